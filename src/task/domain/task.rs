//! Task aggregate root and update application.

use super::{TaskDomainError, TaskId, TaskPriority, TaskStatus};
use crate::project::domain::{CompletionChange, ProjectId};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty, trimmed task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskTitle`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyTaskTitle);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Owning project identifier.
    pub project_id: ProjectId,
    /// Validated title.
    pub title: TaskTitle,
    /// Free-form description.
    pub description: String,
    /// Initial workflow status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Assigned user.
    pub assignee_id: UserId,
    /// Creating user.
    pub creator_id: UserId,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Free-form tags.
    pub tags: Vec<String>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    assignee_id: UserId,
    creator_id: UserId,
    due_date: Option<DateTime<Utc>>,
    tags: Vec<String>,
    is_active: bool,
    display_order: i64,
    comment_count: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning project identifier.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted assignee.
    pub assignee_id: UserId,
    /// Persisted creator.
    pub creator_id: UserId,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted tags.
    pub tags: Vec<String>,
    /// Persisted active flag.
    pub is_active: bool,
    /// Persisted display order.
    pub display_order: i64,
    /// Persisted derived comment count.
    pub comment_count: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Partial update applied to a task aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Replacement assignee.
    pub assignee_id: Option<UserId>,
    /// Replacement due date (`Some(None)` clears it).
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// Replacement tags.
    pub tags: Option<Vec<String>>,
    /// Replacement active flag.
    pub is_active: Option<bool>,
    /// Replacement display order.
    pub display_order: Option<i64>,
}

impl Task {
    /// Creates a new task from a draft.
    ///
    /// The display order defaults to the creation time in milliseconds so
    /// newly created tasks sort after existing ones. A task created in a
    /// completed status carries a completion timestamp from the start.
    #[must_use]
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let completed_at = draft
            .status
            .counts_as_completed()
            .then_some(timestamp);
        Self {
            id: TaskId::new(),
            project_id: draft.project_id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            assignee_id: draft.assignee_id,
            creator_id: draft.creator_id,
            due_date: draft.due_date,
            tags: draft.tags,
            is_active: true,
            display_order: timestamp.timestamp_millis(),
            comment_count: 0,
            created_at: timestamp,
            updated_at: timestamp,
            completed_at,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            assignee_id: data.assignee_id,
            creator_id: data.creator_id,
            due_date: data.due_date,
            tags: data.tags,
            is_active: data.is_active,
            display_order: data.display_order,
            comment_count: data.comment_count,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee_id(&self) -> UserId {
        self.assignee_id
    }

    /// Returns the creator.
    #[must_use]
    pub const fn creator_id(&self) -> UserId {
        self.creator_id
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns whether the task is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the display order.
    #[must_use]
    pub const fn display_order(&self) -> i64 {
        self.display_order
    }

    /// Returns the derived comment count.
    #[must_use]
    pub const fn comment_count(&self) -> u64 {
        self.comment_count
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Applies a partial update and reports the completed-boundary crossing.
    ///
    /// Entering a completed status stamps `completed_at`; reopening clears
    /// it. A change that stays on one side of the boundary (including
    /// `completed` to `archived`) reports
    /// [`CompletionChange::Unchanged`] and leaves `completed_at` alone, so
    /// the caller knows no counter adjustment is due.
    pub fn apply_update(&mut self, update: TaskUpdate, now: DateTime<Utc>) -> CompletionChange {
        let mut change = CompletionChange::Unchanged;
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(status) = update.status {
            change = CompletionChange::between(
                self.status.counts_as_completed(),
                status.counts_as_completed(),
            );
            match change {
                CompletionChange::Completed => self.completed_at = Some(now),
                CompletionChange::Reopened => self.completed_at = None,
                CompletionChange::Unchanged => {}
            }
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(assignee_id) = update.assignee_id {
            self.assignee_id = assignee_id;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        if let Some(display_order) = update.display_order {
            self.display_order = display_order;
        }
        self.updated_at = now;
        change
    }

    /// Records a comment added to this task.
    ///
    /// Must run in the same transaction as the comment insert.
    pub fn record_comment_added(&mut self, now: DateTime<Utc>) {
        self.comment_count += 1;
        self.updated_at = now;
    }

    /// Records a comment removed from this task.
    ///
    /// Must run in the same transaction as the comment removal.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CommentCountUnderflow`] when the counter is
    /// already zero.
    pub fn record_comment_removed(&mut self, now: DateTime<Utc>) -> Result<(), TaskDomainError> {
        self.comment_count = self
            .comment_count
            .checked_sub(1)
            .ok_or(TaskDomainError::CommentCountUnderflow)?;
        self.updated_at = now;
        Ok(())
    }
}
