//! Repository port for task persistence with counter maintenance.

use crate::project::domain::{ProjectDomainError, ProjectId};
use crate::task::domain::{Task, TaskId, TaskUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every operation that changes which tasks exist, or whether a task counts
/// as completed, adjusts the owning project's derived counters in the same
/// transaction. This is the invariant the whole store is built around: the
/// counters never drift from the task records they summarise.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and increments the owning project's task counter
    /// (and its completed counter when the task is created completed).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::ProjectNotFound`] when the owning
    /// project does not exist, or [`TaskRepositoryError::DuplicateTask`]
    /// when the task ID already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by owning project and task identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Applies a partial update as a single read-modify-write transaction.
    ///
    /// When the status change crosses the completed boundary the owning
    /// project's completed counter is adjusted in the same transaction.
    /// Returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::TaskNotFound`] when the task does not
    /// exist, [`TaskRepositoryError::ProjectNotFound`] when the owning
    /// project record is missing, or [`TaskRepositoryError::Counters`] when
    /// the counter adjustment would leave the counters inconsistent.
    async fn update(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        update: TaskUpdate,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task>;

    /// Deletes a task and its comments, decrementing the owning project's
    /// task counter (and its completed counter when the task counted as
    /// completed) in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::TaskNotFound`] when the task does not
    /// exist, [`TaskRepositoryError::ProjectNotFound`] when the owning
    /// project record is missing, or [`TaskRepositoryError::Counters`] when
    /// a counter would underflow.
    async fn delete(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<()>;

    /// Returns all tasks in the given project ordered by display order.
    async fn list_for_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {task_id} in project {project_id}")]
    TaskNotFound {
        /// Owning project identifier.
        project_id: ProjectId,
        /// Missing task identifier.
        task_id: TaskId,
    },

    /// The owning project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Counter maintenance detected inconsistent derived counters.
    #[error(transparent)]
    Counters(#[from] ProjectDomainError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
