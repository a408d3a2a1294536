//! Service layer for task comments.

use crate::project::domain::ProjectId;
use crate::task::{
    domain::{Comment, CommentBody, CommentId, CommentUpdate, TaskDomainError, TaskId},
    ports::{CommentRepository, CommentRepositoryError},
};
use crate::user::domain::UserId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for adding a comment to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommentRequest {
    project_id: ProjectId,
    task_id: TaskId,
    author_id: UserId,
    body: String,
}

impl AddCommentRequest {
    /// Creates a request with required comment fields.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        task_id: TaskId,
        author_id: UserId,
        body: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            task_id,
            author_id,
            body: body.into(),
        }
    }
}

/// Request payload for partially updating a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCommentRequest {
    body: Option<String>,
    is_active: Option<bool>,
}

impl UpdateCommentRequest {
    /// Creates an empty update request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a replacement body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets a replacement active flag.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    fn into_update(self) -> Result<CommentUpdate, TaskDomainError> {
        Ok(CommentUpdate {
            body: self.body.map(CommentBody::new).transpose()?,
            is_active: self.is_active,
        })
    }
}

/// Service-level errors for comment operations.
#[derive(Debug, Error)]
pub enum CommentServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CommentRepositoryError),
}

/// Result type for comment service operations.
pub type CommentServiceResult<T> = Result<T, CommentServiceError>;

/// Comment orchestration service.
///
/// The owning task's comment counter is maintained by the repository in the
/// same transaction as the comment mutation.
#[derive(Clone)]
pub struct CommentService<R, C>
where
    R: CommentRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> CommentService<R, C>
where
    R: CommentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new comment service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Adds a comment and increments the owning task's comment counter.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError`] when the body is empty, the owning
    /// task does not exist, or the repository rejects persistence.
    pub async fn add_comment(&self, request: AddCommentRequest) -> CommentServiceResult<Comment> {
        let body = CommentBody::new(request.body)?;
        let comment = Comment::new(
            request.project_id,
            request.task_id,
            request.author_id,
            body,
            &*self.clock,
        );
        self.repository.store(&comment).await?;
        tracing::debug!(
            task_id = %comment.task_id(),
            comment_id = %comment.id(),
            "comment added"
        );
        Ok(comment)
    }

    /// Lists all comments on the given task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_comments(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> CommentServiceResult<Vec<Comment>> {
        Ok(self.repository.list_for_task(project_id, task_id).await?)
    }

    /// Applies a partial update and returns the updated comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError`] when input validation fails or the
    /// comment does not exist.
    pub async fn update_comment(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        comment_id: CommentId,
        request: UpdateCommentRequest,
    ) -> CommentServiceResult<Comment> {
        let update = request.into_update()?;
        let comment = self
            .repository
            .update(project_id, task_id, comment_id, update, self.clock.utc())
            .await?;
        Ok(comment)
    }

    /// Deletes a comment and decrements the owning task's comment counter.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::Repository`] when the comment does not
    /// exist.
    pub async fn delete_comment(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        comment_id: CommentId,
    ) -> CommentServiceResult<()> {
        self.repository
            .delete(project_id, task_id, comment_id, self.clock.utc())
            .await?;
        tracing::debug!(task_id = %task_id, comment_id = %comment_id, "comment deleted");
        Ok(())
    }
}
