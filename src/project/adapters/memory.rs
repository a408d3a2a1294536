//! In-memory project repository over the shared transactional store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::project::{
    domain::{Project, ProjectId, ProjectUpdate},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use crate::store::{MemoryStore, StoreLockError};
use crate::user::domain::UserId;

impl From<StoreLockError> for ProjectRepositoryError {
    fn from(err: StoreLockError) -> Self {
        Self::persistence(err)
    }
}

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone)]
pub struct InMemoryProjectRepository {
    store: MemoryStore,
}

impl InMemoryProjectRepository {
    /// Creates a repository over the given shared store.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        self.store.transaction(|state| {
            if state.projects.contains_key(&project.id()) {
                return Err(ProjectRepositoryError::DuplicateProject(project.id()));
            }
            state.projects.insert(project.id(), project.clone());
            Ok(())
        })
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.store.read(|state| Ok(state.projects.get(&id).cloned()))
    }

    async fn update(
        &self,
        id: ProjectId,
        update: ProjectUpdate,
        now: DateTime<Utc>,
    ) -> ProjectRepositoryResult<Project> {
        self.store.transaction(|state| {
            let project = state
                .projects
                .get_mut(&id)
                .ok_or(ProjectRepositoryError::NotFound(id))?;
            project.apply_update(update, now);
            Ok(project.clone())
        })
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        self.store.transaction(|state| {
            state
                .projects
                .remove(&id)
                .ok_or(ProjectRepositoryError::NotFound(id))?;
            // Cascade so no task or comment outlives its project.
            state.tasks.retain(|(project_id, _), _| *project_id != id);
            state
                .comments
                .retain(|(project_id, _, _), _| *project_id != id);
            Ok(())
        })
    }

    async fn list_for_owner(&self, owner_id: UserId) -> ProjectRepositoryResult<Vec<Project>> {
        self.store.read(|state| {
            let mut projects: Vec<Project> = state
                .projects
                .values()
                .filter(|project| project.owner_id() == owner_id)
                .cloned()
                .collect();
            projects.sort_by_key(|project| (project.created_at(), project.id().into_inner()));
            Ok(projects)
        })
    }
}
