//! Service layer for task creation, retrieval, and lifecycle updates.

use crate::project::domain::ProjectId;
use crate::task::{
    domain::{Task, TaskDomainError, TaskDraft, TaskId, TaskPriority, TaskStatus, TaskTitle,
        TaskUpdate},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    creator_id: UserId,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    assignee_id: Option<UserId>,
    due_date: Option<DateTime<Utc>>,
    tags: Vec<String>,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields.
    ///
    /// Omitted fields take their defaults: an empty description, `todo`
    /// status, medium priority, the creator as assignee, no due date, and no
    /// tags.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>, creator_id: UserId) -> Self {
        Self {
            project_id,
            title: title.into(),
            creator_id,
            description: None,
            status: None,
            priority: None,
            assignee_id: None,
            due_date: None,
            tags: Vec::new(),
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial workflow status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }
}

/// Request payload for partially updating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    assignee_id: Option<UserId>,
    due_date: Option<Option<DateTime<Utc>>>,
    tags: Option<Vec<String>>,
    is_active: Option<bool>,
    display_order: Option<i64>,
}

impl UpdateTaskRequest {
    /// Creates an empty update request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a replacement workflow status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets a replacement priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets a replacement assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets a replacement due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Clears the due date.
    #[must_use]
    pub const fn clearing_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Sets replacement tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    /// Sets a replacement active flag.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Sets a replacement display order.
    #[must_use]
    pub const fn with_display_order(mut self, display_order: i64) -> Self {
        self.display_order = Some(display_order);
        self
    }

    fn into_update(self) -> Result<TaskUpdate, TaskDomainError> {
        Ok(TaskUpdate {
            title: self.title.map(TaskTitle::new).transpose()?,
            description: self.description,
            status: self.status,
            priority: self.priority,
            assignee_id: self.assignee_id,
            due_date: self.due_date,
            tags: self.tags,
            is_active: self.is_active,
            display_order: self.display_order,
        })
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Counter maintenance is delegated to the repository so the task mutation
/// and the owning project's counter adjustment commit together.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a new task and increments the owning project's counters.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when input validation fails, the
    /// owning project does not exist, or the repository rejects persistence.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let draft = TaskDraft {
            project_id: request.project_id,
            title,
            description: request.description.unwrap_or_default(),
            status: request.status.unwrap_or(TaskStatus::Todo),
            priority: request.priority.unwrap_or_default(),
            assignee_id: request.assignee_id.unwrap_or(request.creator_id),
            creator_id: request.creator_id,
            due_date: request.due_date,
            tags: request.tags,
        };
        let task = Task::new(draft, &*self.clock);
        self.repository.store(&task).await?;
        tracing::debug!(project_id = %task.project_id(), task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn get_task(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(project_id, task_id).await?)
    }

    /// Applies a partial update and returns the updated task.
    ///
    /// A status change that crosses the completed boundary adjusts the
    /// owning project's completed counter in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when input validation fails or the
    /// task does not exist.
    pub async fn update_task(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let update = request.into_update()?;
        let task = self
            .repository
            .update(project_id, task_id, update, self.clock.utc())
            .await?;
        tracing::debug!(project_id = %project_id, task_id = %task_id, "task updated");
        Ok(task)
    }

    /// Deletes a task, its comments, and decrements the owning project's
    /// counters.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not
    /// exist.
    pub async fn delete_task(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> TaskLifecycleResult<()> {
        self.repository
            .delete(project_id, task_id, self.clock.utc())
            .await?;
        tracing::debug!(project_id = %project_id, task_id = %task_id, "task deleted");
        Ok(())
    }

    /// Lists all tasks in the given project in display order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_tasks(&self, project_id: ProjectId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_for_project(project_id).await?)
    }
}
