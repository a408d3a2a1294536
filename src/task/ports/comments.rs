//! Repository port for comment persistence with comment-count maintenance.

use crate::project::domain::ProjectId;
use crate::task::domain::{Comment, CommentId, CommentUpdate, TaskDomainError, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for comment repository operations.
pub type CommentRepositoryResult<T> = Result<T, CommentRepositoryError>;

/// Comment persistence contract.
///
/// Adding or removing a comment adjusts the owning task's derived comment
/// count in the same transaction.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a new comment and increments the owning task's comment count.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::TaskNotFound`] when the owning task
    /// does not exist, or [`CommentRepositoryError::DuplicateComment`] when
    /// the comment ID already exists.
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()>;

    /// Returns all comments on the given task, oldest first.
    async fn list_for_task(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> CommentRepositoryResult<Vec<Comment>>;

    /// Applies a partial update as a single read-modify-write transaction
    /// and returns the updated comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::CommentNotFound`] when the comment
    /// does not exist.
    async fn update(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        comment_id: CommentId,
        update: CommentUpdate,
        now: DateTime<Utc>,
    ) -> CommentRepositoryResult<Comment>;

    /// Deletes a comment and decrements the owning task's comment count in
    /// the same transaction.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::CommentNotFound`] when the comment
    /// does not exist, [`CommentRepositoryError::TaskNotFound`] when the
    /// owning task record is missing, or
    /// [`CommentRepositoryError::Counts`] when the comment count would
    /// underflow.
    async fn delete(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        comment_id: CommentId,
        now: DateTime<Utc>,
    ) -> CommentRepositoryResult<()>;
}

/// Errors returned by comment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CommentRepositoryError {
    /// A comment with the same identifier already exists.
    #[error("duplicate comment identifier: {0}")]
    DuplicateComment(CommentId),

    /// The comment was not found.
    #[error("comment not found: {comment_id} on task {task_id}")]
    CommentNotFound {
        /// Owning task identifier.
        task_id: TaskId,
        /// Missing comment identifier.
        comment_id: CommentId,
    },

    /// The owning task was not found.
    #[error("task not found: {task_id} in project {project_id}")]
    TaskNotFound {
        /// Owning project identifier.
        project_id: ProjectId,
        /// Missing task identifier.
        task_id: TaskId,
    },

    /// Comment-count maintenance detected an inconsistent counter.
    #[error(transparent)]
    Counts(#[from] TaskDomainError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
