//! Orchestration services for the project context.

mod catalog;

pub use catalog::{
    CreateProjectRequest, ProjectCatalogError, ProjectCatalogResult, ProjectCatalogService,
    UpdateProjectRequest,
};
