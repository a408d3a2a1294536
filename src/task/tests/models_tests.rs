//! Row-model mapping tests for task and comment persistence.

use crate::project::domain::ProjectId;
use crate::task::adapters::postgres::models::{
    CommentRow, TaskRow, comment_to_new_row, row_to_comment, row_to_task, task_to_new_row,
    task_to_row_changes,
};
use crate::task::domain::{
    Comment, CommentBody, Task, TaskDraft, TaskPriority, TaskStatus, TaskTitle, TaskUpdate,
};
use crate::user::domain::UserId;
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::rstest;

fn sample_task() -> Task {
    let creator_id = UserId::new();
    Task::new(
        TaskDraft {
            project_id: ProjectId::new(),
            title: TaskTitle::new("Index the archive").expect("valid title"),
            description: "Build the search index".to_owned(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
            assignee_id: UserId::new(),
            creator_id,
            due_date: Some(Utc::now() + Duration::days(7)),
            tags: vec!["search".to_owned(), "backend".to_owned()],
        },
        &DefaultClock,
    )
}

#[rstest]
fn task_to_new_row_serialises_tags_and_enums() {
    let task = sample_task();
    let row = task_to_new_row(&task).expect("row conversion should succeed");

    assert_eq!(row.status, "in_progress");
    assert_eq!(row.priority, "high");
    assert_eq!(
        row.tags,
        serde_json::json!(["search", "backend"])
    );
    assert_eq!(row.comment_count, 0);
    assert_eq!(row.display_order, task.display_order());
    assert_eq!(row.completed_at, None);
}

#[rstest]
fn row_to_task_round_trips_the_aggregate() {
    let task = sample_task();
    let new_row = task_to_new_row(&task).expect("row conversion should succeed");
    let row = TaskRow {
        project_id: new_row.project_id,
        id: new_row.id,
        title: new_row.title,
        description: new_row.description,
        status: new_row.status,
        priority: new_row.priority,
        assignee_id: new_row.assignee_id,
        creator_id: new_row.creator_id,
        due_date: new_row.due_date,
        tags: new_row.tags,
        is_active: new_row.is_active,
        display_order: new_row.display_order,
        comment_count: new_row.comment_count,
        created_at: new_row.created_at,
        updated_at: new_row.updated_at,
        completed_at: new_row.completed_at,
    };

    let restored = row_to_task(row).expect("valid row");
    assert_eq!(restored, task);
}

#[rstest]
fn row_to_task_rejects_unknown_status() {
    let task = sample_task();
    let new_row = task_to_new_row(&task).expect("row conversion should succeed");
    let row = TaskRow {
        project_id: new_row.project_id,
        id: new_row.id,
        title: new_row.title,
        description: new_row.description,
        status: "paused".to_owned(),
        priority: new_row.priority,
        assignee_id: new_row.assignee_id,
        creator_id: new_row.creator_id,
        due_date: new_row.due_date,
        tags: new_row.tags,
        is_active: new_row.is_active,
        display_order: new_row.display_order,
        comment_count: new_row.comment_count,
        created_at: new_row.created_at,
        updated_at: new_row.updated_at,
        completed_at: new_row.completed_at,
    };

    assert!(row_to_task(row).is_err());
}

#[rstest]
fn task_to_row_changes_writes_the_completion_stamp() {
    let mut task = sample_task();
    let now = task.created_at() + Duration::minutes(30);
    task.apply_update(
        TaskUpdate {
            status: Some(TaskStatus::Completed),
            ..TaskUpdate::default()
        },
        now,
    );

    let changes = task_to_row_changes(&task).expect("row conversion should succeed");
    assert_eq!(changes.status, "completed");
    assert_eq!(changes.completed_at, Some(Some(now)));
    assert_eq!(changes.updated_at, now);
}

#[rstest]
fn comment_rows_round_trip_the_aggregate() {
    let task = sample_task();
    let comment = Comment::new(
        task.project_id(),
        task.id(),
        UserId::new(),
        CommentBody::new("Shipping this tomorrow").expect("valid body"),
        &DefaultClock,
    );

    let new_row = comment_to_new_row(&comment);
    let row = CommentRow {
        project_id: new_row.project_id,
        task_id: new_row.task_id,
        id: new_row.id,
        author_id: new_row.author_id,
        body: new_row.body,
        is_active: new_row.is_active,
        created_at: new_row.created_at,
        updated_at: new_row.updated_at,
    };

    let restored = row_to_comment(row).expect("valid row");
    assert_eq!(restored, comment);
}
