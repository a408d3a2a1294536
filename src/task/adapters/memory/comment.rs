//! In-memory comment repository with transactional comment-count maintenance.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::project::domain::ProjectId;
use crate::store::{MemoryStore, StoreLockError};
use crate::task::{
    domain::{Comment, CommentId, CommentUpdate, TaskId},
    ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
};

impl From<StoreLockError> for CommentRepositoryError {
    fn from(err: StoreLockError) -> Self {
        Self::persistence(err)
    }
}

/// Thread-safe in-memory comment repository.
///
/// Shares its [`MemoryStore`] with the task repository so comment-count
/// adjustments commit atomically with the comment mutation.
#[derive(Debug, Clone)]
pub struct InMemoryCommentRepository {
    store: MemoryStore,
}

impl InMemoryCommentRepository {
    /// Creates a repository over the given shared store.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        self.store.transaction(|state| {
            let key = (comment.project_id(), comment.task_id(), comment.id());
            if state.comments.contains_key(&key) {
                return Err(CommentRepositoryError::DuplicateComment(comment.id()));
            }
            let task = state
                .tasks
                .get_mut(&(comment.project_id(), comment.task_id()))
                .ok_or(CommentRepositoryError::TaskNotFound {
                    project_id: comment.project_id(),
                    task_id: comment.task_id(),
                })?;
            task.record_comment_added(comment.created_at());
            state.comments.insert(key, comment.clone());
            Ok(())
        })
    }

    async fn list_for_task(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> CommentRepositoryResult<Vec<Comment>> {
        self.store.read(|state| {
            let mut comments: Vec<Comment> = state
                .comments
                .iter()
                .filter(|((owner_project, owner_task, _), _)| {
                    *owner_project == project_id && *owner_task == task_id
                })
                .map(|(_, comment)| comment.clone())
                .collect();
            comments.sort_by_key(|comment| (comment.created_at(), comment.id().into_inner()));
            Ok(comments)
        })
    }

    async fn update(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        comment_id: CommentId,
        update: CommentUpdate,
        now: DateTime<Utc>,
    ) -> CommentRepositoryResult<Comment> {
        self.store.transaction(|state| {
            let comment = state
                .comments
                .get_mut(&(project_id, task_id, comment_id))
                .ok_or(CommentRepositoryError::CommentNotFound {
                    task_id,
                    comment_id,
                })?;
            comment.apply_update(update, now);
            Ok(comment.clone())
        })
    }

    async fn delete(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        comment_id: CommentId,
        now: DateTime<Utc>,
    ) -> CommentRepositoryResult<()> {
        self.store.transaction(|state| {
            // Fallible steps run before any mutation: the in-memory
            // transaction cannot roll back a partial write.
            if !state
                .comments
                .contains_key(&(project_id, task_id, comment_id))
            {
                return Err(CommentRepositoryError::CommentNotFound {
                    task_id,
                    comment_id,
                });
            }
            let task = state.tasks.get_mut(&(project_id, task_id)).ok_or(
                CommentRepositoryError::TaskNotFound {
                    project_id,
                    task_id,
                },
            )?;
            task.record_comment_removed(now)?;
            state.comments.remove(&(project_id, task_id, comment_id));
            Ok(())
        })
    }
}
