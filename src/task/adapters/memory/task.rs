//! In-memory task repository with transactional counter maintenance.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::project::domain::{CompletionChange, ProjectId};
use crate::store::{MemoryStore, StoreLockError};
use crate::task::{
    domain::{Task, TaskId, TaskUpdate},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

impl From<StoreLockError> for TaskRepositoryError {
    fn from(err: StoreLockError) -> Self {
        Self::persistence(err)
    }
}

/// Thread-safe in-memory task repository.
///
/// Shares its [`MemoryStore`] with the project repository so counter
/// adjustments commit atomically with the task mutation.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    store: MemoryStore,
}

impl InMemoryTaskRepository {
    /// Creates a repository over the given shared store.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.store.transaction(|state| {
            let key = (task.project_id(), task.id());
            if state.tasks.contains_key(&key) {
                return Err(TaskRepositoryError::DuplicateTask(task.id()));
            }
            let project = state
                .projects
                .get_mut(&task.project_id())
                .ok_or(TaskRepositoryError::ProjectNotFound(task.project_id()))?;
            project.record_task_created(task.status().counts_as_completed(), task.created_at());
            state.tasks.insert(key, task.clone());
            Ok(())
        })
    }

    async fn find_by_id(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        self.store
            .read(|state| Ok(state.tasks.get(&(project_id, task_id)).cloned()))
    }

    async fn update(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        update: TaskUpdate,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        self.store.transaction(|state| {
            // All fallible steps run before any mutation: the in-memory
            // transaction cannot roll back a partial write.
            let was_completed = state
                .tasks
                .get(&(project_id, task_id))
                .ok_or(TaskRepositoryError::TaskNotFound {
                    project_id,
                    task_id,
                })?
                .status()
                .counts_as_completed();
            let change = update.status.map_or(CompletionChange::Unchanged, |status| {
                CompletionChange::between(was_completed, status.counts_as_completed())
            });
            if change != CompletionChange::Unchanged {
                let project = state
                    .projects
                    .get_mut(&project_id)
                    .ok_or(TaskRepositoryError::ProjectNotFound(project_id))?;
                project.apply_completion_change(change, now)?;
            }
            let task = state.tasks.get_mut(&(project_id, task_id)).ok_or(
                TaskRepositoryError::TaskNotFound {
                    project_id,
                    task_id,
                },
            )?;
            task.apply_update(update, now);
            Ok(task.clone())
        })
    }

    async fn delete(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<()> {
        self.store.transaction(|state| {
            // Fallible steps first; see `update`.
            let completed = state
                .tasks
                .get(&(project_id, task_id))
                .ok_or(TaskRepositoryError::TaskNotFound {
                    project_id,
                    task_id,
                })?
                .status()
                .counts_as_completed();
            let project = state
                .projects
                .get_mut(&project_id)
                .ok_or(TaskRepositoryError::ProjectNotFound(project_id))?;
            project.record_task_deleted(completed, now)?;
            state.tasks.remove(&(project_id, task_id));
            state
                .comments
                .retain(|(comment_project, comment_task, _), _| {
                    *comment_project != project_id || *comment_task != task_id
                });
            Ok(())
        })
    }

    async fn list_for_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.store.read(|state| {
            let mut tasks: Vec<Task> = state
                .tasks
                .iter()
                .filter(|((owner, _), _)| *owner == project_id)
                .map(|(_, task)| task.clone())
                .collect();
            tasks.sort_by_key(|task| (task.display_order(), task.id().into_inner()));
            Ok(tasks)
        })
    }
}
