//! Shared test helpers for in-memory repository integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasklane::project::{
    adapters::InMemoryProjectRepository,
    domain::{Project, ProjectId},
    services::{CreateProjectRequest, ProjectCatalogService},
};
use tasklane::store::MemoryStore;
use tasklane::task::{
    adapters::{InMemoryCommentRepository, InMemoryTaskRepository},
    domain::{Task, TaskStatus},
    services::{CommentService, CreateTaskRequest, TaskLifecycleService},
};
use tasklane::user::{
    adapters::InMemoryUserRepository,
    domain::{User, UserId},
    services::{CreateUserRequest, UserAccountService},
};

/// All services wired over one shared in-memory store, mirroring how a
/// deployment shares a single database.
pub struct TestEnv {
    /// Project catalog service.
    pub projects: ProjectCatalogService<InMemoryProjectRepository, DefaultClock>,
    /// Task lifecycle service.
    pub tasks: TaskLifecycleService<InMemoryTaskRepository, DefaultClock>,
    /// Comment service.
    pub comments: CommentService<InMemoryCommentRepository, DefaultClock>,
    /// User account service.
    pub users: UserAccountService<InMemoryUserRepository, DefaultClock>,
}

/// Provides a fresh environment with all services sharing one store.
#[fixture]
pub fn env() -> TestEnv {
    let store = MemoryStore::new();
    let clock = Arc::new(DefaultClock);
    TestEnv {
        projects: ProjectCatalogService::new(
            Arc::new(InMemoryProjectRepository::new(store.clone())),
            Arc::clone(&clock),
        ),
        tasks: TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new(store.clone())),
            Arc::clone(&clock),
        ),
        comments: CommentService::new(
            Arc::new(InMemoryCommentRepository::new(store.clone())),
            Arc::clone(&clock),
        ),
        users: UserAccountService::new(
            Arc::new(InMemoryUserRepository::new(store)),
            clock,
        ),
    }
}

impl TestEnv {
    /// Creates a user to own projects and author comments.
    ///
    /// # Errors
    ///
    /// Returns an error when account creation fails.
    pub async fn create_user(&self, email: &str, name: &str) -> Result<User, eyre::Report> {
        Ok(self
            .users
            .create_user(CreateUserRequest::new(email, name))
            .await?)
    }

    /// Creates a project owned by the given user.
    ///
    /// # Errors
    ///
    /// Returns an error when project creation fails.
    pub async fn create_project(
        &self,
        name: &str,
        owner_id: UserId,
    ) -> Result<Project, eyre::Report> {
        Ok(self
            .projects
            .create_project(CreateProjectRequest::new(name, owner_id))
            .await?)
    }

    /// Creates a task in the given project with the given initial status.
    ///
    /// # Errors
    ///
    /// Returns an error when task creation fails.
    pub async fn create_task(
        &self,
        project_id: ProjectId,
        title: &str,
        creator_id: UserId,
        status: TaskStatus,
    ) -> Result<Task, eyre::Report> {
        Ok(self
            .tasks
            .create_task(
                CreateTaskRequest::new(project_id, title, creator_id).with_status(status),
            )
            .await?)
    }

    /// Reads the project's derived counters back from the store.
    ///
    /// # Errors
    ///
    /// Returns an error when the project cannot be loaded.
    pub async fn counters(&self, project_id: ProjectId) -> Result<(u64, u64), eyre::Report> {
        let project = self
            .projects
            .get_project(project_id)
            .await?
            .ok_or_else(|| eyre::eyre!("project {project_id} should exist"))?;
        Ok((
            project.counters().task_count(),
            project.counters().completed_task_count(),
        ))
    }

    /// Recounts tasks from the store and checks the derived counters agree.
    ///
    /// # Errors
    ///
    /// Returns an error when either counter disagrees with the recount.
    pub async fn verify_counters_against_tasks(
        &self,
        project_id: ProjectId,
    ) -> Result<(), eyre::Report> {
        let listed = self.tasks.list_tasks(project_id).await?;
        let total = u64::try_from(listed.len())?;
        let completed = u64::try_from(
            listed
                .iter()
                .filter(|task| task.status().counts_as_completed())
                .count(),
        )?;

        let (task_count, completed_task_count) = self.counters(project_id).await?;
        eyre::ensure!(
            task_count == total,
            "task counter {task_count} disagrees with recount {total}"
        );
        eyre::ensure!(
            completed_task_count == completed,
            "completed counter {completed_task_count} disagrees with recount {completed}"
        );
        Ok(())
    }
}
