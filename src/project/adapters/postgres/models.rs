//! Diesel row models and domain mappings for project persistence.

use super::schema::projects;
use crate::project::{
    domain::{ColorHex, PersistedProjectData, Project, ProjectId, ProjectName, TaskCounters},
    ports::{ProjectRepositoryError, ProjectRepositoryResult},
};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for project records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Accent colour.
    pub color: String,
    /// Display emoji.
    pub emoji: String,
    /// Owning user identifier.
    pub owner_id: uuid::Uuid,
    /// Active flag.
    pub is_active: bool,
    /// Visibility flag.
    pub is_public: bool,
    /// Derived total task counter.
    pub task_count: i64,
    /// Derived completed task counter.
    pub completed_task_count: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for project records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Accent colour.
    pub color: String,
    /// Display emoji.
    pub emoji: String,
    /// Owning user identifier.
    pub owner_id: uuid::Uuid,
    /// Active flag.
    pub is_active: bool,
    /// Visibility flag.
    pub is_public: bool,
    /// Derived total task counter.
    pub task_count: i64,
    /// Derived completed task counter.
    pub completed_task_count: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model writing back the full mutable portion of a project row.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
pub struct ProjectRowChanges {
    /// Project name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Accent colour.
    pub color: String,
    /// Display emoji.
    pub emoji: String,
    /// Active flag.
    pub is_active: bool,
    /// Visibility flag.
    pub is_public: bool,
    /// Derived total task counter.
    pub task_count: i64,
    /// Derived completed task counter.
    pub completed_task_count: i64,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Builds an insert row from a project aggregate.
pub(crate) fn to_new_row(project: &Project) -> ProjectRepositoryResult<NewProjectRow> {
    let counters = counters_to_columns(project.counters())?;
    Ok(NewProjectRow {
        id: project.id().into_inner(),
        name: project.name().as_str().to_owned(),
        description: project.description().to_owned(),
        color: project.color().as_str().to_owned(),
        emoji: project.emoji().to_owned(),
        owner_id: project.owner_id().into_inner(),
        is_active: project.is_active(),
        is_public: project.is_public(),
        task_count: counters.0,
        completed_task_count: counters.1,
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    })
}

/// Builds a write-back changeset from a project aggregate.
pub(crate) fn to_row_changes(project: &Project) -> ProjectRepositoryResult<ProjectRowChanges> {
    let counters = counters_to_columns(project.counters())?;
    Ok(ProjectRowChanges {
        name: project.name().as_str().to_owned(),
        description: project.description().to_owned(),
        color: project.color().as_str().to_owned(),
        emoji: project.emoji().to_owned(),
        is_active: project.is_active(),
        is_public: project.is_public(),
        task_count: counters.0,
        completed_task_count: counters.1,
        updated_at: project.updated_at(),
    })
}

/// Reconstructs a project aggregate from a row.
pub(crate) fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let name = ProjectName::new(row.name).map_err(ProjectRepositoryError::persistence)?;
    let color = ColorHex::new(row.color).map_err(ProjectRepositoryError::persistence)?;
    let task_count =
        u64::try_from(row.task_count).map_err(ProjectRepositoryError::persistence)?;
    let completed_task_count =
        u64::try_from(row.completed_task_count).map_err(ProjectRepositoryError::persistence)?;
    let counters = TaskCounters::from_counts(task_count, completed_task_count)
        .map_err(ProjectRepositoryError::persistence)?;

    let data = PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        name,
        description: row.description,
        color,
        emoji: row.emoji,
        owner_id: UserId::from_uuid(row.owner_id),
        is_active: row.is_active,
        is_public: row.is_public,
        counters,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Project::from_persisted(data))
}

fn counters_to_columns(counters: TaskCounters) -> ProjectRepositoryResult<(i64, i64)> {
    let task_count =
        i64::try_from(counters.task_count()).map_err(ProjectRepositoryError::persistence)?;
    let completed_task_count = i64::try_from(counters.completed_task_count())
        .map_err(ProjectRepositoryError::persistence)?;
    Ok((task_count, completed_task_count))
}
