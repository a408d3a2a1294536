//! Project aggregate root.

use super::{ColorHex, CompletionChange, ProjectDomainError, ProjectId, ProjectName, TaskCounters};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Default project emoji applied when none is supplied.
pub const DEFAULT_PROJECT_EMOJI: &str = "\u{1f4cb}";

/// Project aggregate root: a container of tasks with derived counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    description: String,
    color: ColorHex,
    emoji: String,
    owner_id: UserId,
    is_active: bool,
    is_public: bool,
    counters: TaskCounters,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted project name.
    pub name: ProjectName,
    /// Persisted description.
    pub description: String,
    /// Persisted accent colour.
    pub color: ColorHex,
    /// Persisted emoji.
    pub emoji: String,
    /// Persisted owner identifier.
    pub owner_id: UserId,
    /// Persisted active flag.
    pub is_active: bool,
    /// Persisted visibility flag.
    pub is_public: bool,
    /// Persisted derived counters.
    pub counters: TaskCounters,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to a project aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    /// Replacement name.
    pub name: Option<ProjectName>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement accent colour.
    pub color: Option<ColorHex>,
    /// Replacement emoji.
    pub emoji: Option<String>,
    /// Replacement active flag.
    pub is_active: Option<bool>,
    /// Replacement visibility flag.
    pub is_public: Option<bool>,
}

impl Project {
    /// Creates a new project with zeroed counters.
    #[must_use]
    pub fn new(
        name: ProjectName,
        description: String,
        color: ColorHex,
        emoji: String,
        owner_id: UserId,
        is_public: bool,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ProjectId::new(),
            name,
            description,
            color,
            emoji,
            owner_id,
            is_active: true,
            is_public,
            counters: TaskCounters::zero(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            color: data.color,
            emoji: data.emoji,
            owner_id: data.owner_id,
            is_active: data.is_active,
            is_public: data.is_public,
            counters: data.counters,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the accent colour.
    #[must_use]
    pub const fn color(&self) -> &ColorHex {
        &self.color
    }

    /// Returns the emoji.
    #[must_use]
    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    /// Returns the owner identifier.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns whether the project is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns whether the project is publicly visible.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.is_public
    }

    /// Returns the derived task counters.
    #[must_use]
    pub const fn counters(&self) -> TaskCounters {
        self.counters
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

    /// Applies a partial update and bumps the update timestamp.
    pub fn apply_update(&mut self, update: ProjectUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(emoji) = update.emoji {
            self.emoji = emoji;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        if let Some(is_public) = update.is_public {
            self.is_public = is_public;
        }
        self.touch(now);
    }

    /// Records a task created under this project.
    ///
    /// Must run in the same transaction as the task insert.
    pub fn record_task_created(&mut self, completed: bool, now: DateTime<Utc>) {
        self.counters.record_created(completed);
        self.touch(now);
    }

    /// Records a task deleted from this project.
    ///
    /// Must run in the same transaction as the task removal.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::CountersOutOfSync`] when a counter would
    /// underflow.
    pub fn record_task_deleted(
        &mut self,
        completed: bool,
        now: DateTime<Utc>,
    ) -> Result<(), ProjectDomainError> {
        self.counters.record_deleted(completed)?;
        self.touch(now);
        Ok(())
    }

    /// Applies a completed-boundary crossing reported by a task update.
    ///
    /// Must run in the same transaction as the task update.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::CountersOutOfSync`] when the completed
    /// counter would underflow or exceed the total.
    pub fn apply_completion_change(
        &mut self,
        change: CompletionChange,
        now: DateTime<Utc>,
    ) -> Result<(), ProjectDomainError> {
        if change == CompletionChange::Unchanged {
            return Ok(());
        }
        self.counters.apply_completion_change(change)?;
        self.touch(now);
        Ok(())
    }

    /// Updates the `updated_at` timestamp.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
