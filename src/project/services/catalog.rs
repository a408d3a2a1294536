//! Service layer for project creation, retrieval, and maintenance.

use crate::project::{
    domain::{
        ColorHex, DEFAULT_PROJECT_EMOJI, Project, ProjectDomainError, ProjectId, ProjectName,
        ProjectUpdate,
    },
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::user::domain::UserId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    owner_id: UserId,
    description: Option<String>,
    color: Option<String>,
    emoji: Option<String>,
    is_public: bool,
}

impl CreateProjectRequest {
    /// Creates a request with required project fields.
    #[must_use]
    pub fn new(name: impl Into<String>, owner_id: UserId) -> Self {
        Self {
            name: name.into(),
            owner_id,
            description: None,
            color: None,
            emoji: None,
            is_public: false,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the accent colour as a `#rrggbb` value.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the project emoji.
    #[must_use]
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    /// Marks the project publicly visible.
    #[must_use]
    pub const fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }
}

/// Request payload for partially updating a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    name: Option<String>,
    description: Option<String>,
    color: Option<String>,
    emoji: Option<String>,
    is_active: Option<bool>,
    is_public: Option<bool>,
}

impl UpdateProjectRequest {
    /// Creates an empty update request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a replacement name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a replacement accent colour as a `#rrggbb` value.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets a replacement emoji.
    #[must_use]
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    /// Sets a replacement active flag.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Sets a replacement visibility flag.
    #[must_use]
    pub const fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    fn into_update(self) -> Result<ProjectUpdate, ProjectDomainError> {
        Ok(ProjectUpdate {
            name: self.name.map(ProjectName::new).transpose()?,
            description: self.description,
            color: self.color.map(ColorHex::new).transpose()?,
            emoji: self.emoji,
            is_active: self.is_active,
            is_public: self.is_public,
        })
    }
}

/// Service-level errors for project catalog operations.
#[derive(Debug, Error)]
pub enum ProjectCatalogError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
}

/// Result type for project catalog service operations.
pub type ProjectCatalogResult<T> = Result<T, ProjectCatalogError>;

/// Project catalog orchestration service.
#[derive(Clone)]
pub struct ProjectCatalogService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ProjectCatalogService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project catalog service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a new project with zeroed counters.
    ///
    /// Omitted fields take their defaults: an empty description, the default
    /// accent colour, the default emoji, and private visibility.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError`] when input validation fails or the
    /// repository rejects persistence.
    pub async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> ProjectCatalogResult<Project> {
        let name = ProjectName::new(request.name)?;
        let color = request
            .color
            .map_or_else(|| Ok(ColorHex::default_accent()), ColorHex::new)?;
        let emoji = request
            .emoji
            .unwrap_or_else(|| DEFAULT_PROJECT_EMOJI.to_owned());

        let project = Project::new(
            name,
            request.description.unwrap_or_default(),
            color,
            emoji,
            request.owner_id,
            request.is_public,
            &*self.clock,
        );
        self.repository.store(&project).await?;
        tracing::debug!(project_id = %project.id(), "project created");
        Ok(project)
    }

    /// Retrieves a project by identifier.
    ///
    /// Returns `Ok(None)` when the project does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::Repository`] when persistence lookup
    /// fails.
    pub async fn get_project(&self, id: ProjectId) -> ProjectCatalogResult<Option<Project>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Applies a partial update and returns the updated project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError`] when input validation fails or the
    /// project does not exist.
    pub async fn update_project(
        &self,
        id: ProjectId,
        request: UpdateProjectRequest,
    ) -> ProjectCatalogResult<Project> {
        let update = request.into_update()?;
        let project = self.repository.update(id, update, self.clock.utc()).await?;
        tracing::debug!(project_id = %id, "project updated");
        Ok(project)
    }

    /// Deletes a project along with its tasks and their comments.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::Repository`] when the project does not
    /// exist.
    pub async fn delete_project(&self, id: ProjectId) -> ProjectCatalogResult<()> {
        self.repository.delete(id).await?;
        tracing::debug!(project_id = %id, "project deleted");
        Ok(())
    }

    /// Lists all projects owned by the given user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_projects(&self, owner_id: UserId) -> ProjectCatalogResult<Vec<Project>> {
        Ok(self.repository.list_for_owner(owner_id).await?)
    }
}
