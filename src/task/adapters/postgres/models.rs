//! Diesel row models and domain mappings for task and comment persistence.

use super::schema::{comments, tasks};
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{
        Comment, CommentBody, CommentId, PersistedCommentData, PersistedTaskData, Task, TaskId,
        TaskPriority, TaskStatus, TaskTitle,
    },
    ports::{
        CommentRepositoryError, CommentRepositoryResult, TaskRepositoryError,
        TaskRepositoryResult,
    },
};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Workflow status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Assigned user identifier.
    pub assignee_id: uuid::Uuid,
    /// Creating user identifier.
    pub creator_id: uuid::Uuid,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Tag list as a JSON array of strings.
    pub tags: Value,
    /// Active flag.
    pub is_active: bool,
    /// Display order position.
    pub display_order: i64,
    /// Derived comment counter.
    pub comment_count: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp, if completed.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Workflow status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Assigned user identifier.
    pub assignee_id: uuid::Uuid,
    /// Creating user identifier.
    pub creator_id: uuid::Uuid,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Tag list as a JSON array of strings.
    pub tags: Value,
    /// Active flag.
    pub is_active: bool,
    /// Display order position.
    pub display_order: i64,
    /// Derived comment counter.
    pub comment_count: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp, if completed.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Update model writing back the mutable portion of a task row.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskRowChanges {
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Workflow status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Assigned user identifier.
    pub assignee_id: uuid::Uuid,
    /// Optional due date.
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// Tag list as a JSON array of strings.
    pub tags: Value,
    /// Active flag.
    pub is_active: bool,
    /// Display order position.
    pub display_order: i64,
    /// Derived comment counter.
    pub comment_count: i64,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp, if completed.
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

/// Query result row for comment records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Owning task identifier.
    pub task_id: uuid::Uuid,
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Authoring user identifier.
    pub author_id: uuid::Uuid,
    /// Comment body.
    pub body: String,
    /// Active flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for comment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub struct NewCommentRow {
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Owning task identifier.
    pub task_id: uuid::Uuid,
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Authoring user identifier.
    pub author_id: uuid::Uuid,
    /// Comment body.
    pub body: String,
    /// Active flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Builds an insert row from a task aggregate.
pub(crate) fn task_to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let tags = serde_json::to_value(task.tags()).map_err(TaskRepositoryError::persistence)?;
    let comment_count =
        i64::try_from(task.comment_count()).map_err(TaskRepositoryError::persistence)?;
    Ok(NewTaskRow {
        project_id: task.project_id().into_inner(),
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        assignee_id: task.assignee_id().into_inner(),
        creator_id: task.creator_id().into_inner(),
        due_date: task.due_date(),
        tags,
        is_active: task.is_active(),
        display_order: task.display_order(),
        comment_count,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        completed_at: task.completed_at(),
    })
}

/// Builds a write-back changeset from a task aggregate.
pub(crate) fn task_to_row_changes(task: &Task) -> TaskRepositoryResult<TaskRowChanges> {
    let tags = serde_json::to_value(task.tags()).map_err(TaskRepositoryError::persistence)?;
    let comment_count =
        i64::try_from(task.comment_count()).map_err(TaskRepositoryError::persistence)?;
    Ok(TaskRowChanges {
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        assignee_id: task.assignee_id().into_inner(),
        due_date: Some(task.due_date()),
        tags,
        is_active: task.is_active(),
        display_order: task.display_order(),
        comment_count,
        updated_at: task.updated_at(),
        completed_at: Some(task.completed_at()),
    })
}

/// Reconstructs a task aggregate from a row.
pub(crate) fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let title = TaskTitle::new(row.title).map_err(TaskRepositoryError::persistence)?;
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let tags = serde_json::from_value::<Vec<String>>(row.tags)
        .map_err(TaskRepositoryError::persistence)?;
    let comment_count =
        u64::try_from(row.comment_count).map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        title,
        description: row.description,
        status,
        priority,
        assignee_id: UserId::from_uuid(row.assignee_id),
        creator_id: UserId::from_uuid(row.creator_id),
        due_date: row.due_date,
        tags,
        is_active: row.is_active,
        display_order: row.display_order,
        comment_count,
        created_at: row.created_at,
        updated_at: row.updated_at,
        completed_at: row.completed_at,
    };
    Ok(Task::from_persisted(data))
}

/// Builds an insert row from a comment aggregate.
pub(crate) fn comment_to_new_row(comment: &Comment) -> NewCommentRow {
    NewCommentRow {
        project_id: comment.project_id().into_inner(),
        task_id: comment.task_id().into_inner(),
        id: comment.id().into_inner(),
        author_id: comment.author_id().into_inner(),
        body: comment.body().as_str().to_owned(),
        is_active: comment.is_active(),
        created_at: comment.created_at(),
        updated_at: comment.updated_at(),
    }
}

/// Reconstructs a comment aggregate from a row.
pub(crate) fn row_to_comment(row: CommentRow) -> CommentRepositoryResult<Comment> {
    let body = CommentBody::new(row.body).map_err(CommentRepositoryError::persistence)?;
    let data = PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        task_id: TaskId::from_uuid(row.task_id),
        author_id: UserId::from_uuid(row.author_id),
        body,
        is_active: row.is_active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Comment::from_persisted(data))
}
