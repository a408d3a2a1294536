//! Derived per-project task counters and their maintenance rules.
//!
//! The counters are not authoritative data: they are derived from the tasks
//! stored under the project and exist so listings can render totals without
//! scanning. Every mutation here is designed to be applied inside the same
//! transaction as the task change that justifies it.

use super::ProjectDomainError;
use serde::{Deserialize, Serialize};

/// Direction in which a task status change crosses the completed boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionChange {
    /// The change does not cross the completed boundary.
    Unchanged,
    /// The task became completed.
    Completed,
    /// The task was reopened.
    Reopened,
}

impl CompletionChange {
    /// Derives the boundary crossing from before/after completion flags.
    #[must_use]
    pub const fn between(was_completed: bool, now_completed: bool) -> Self {
        match (was_completed, now_completed) {
            (false, true) => Self::Completed,
            (true, false) => Self::Reopened,
            _ => Self::Unchanged,
        }
    }
}

/// Derived task counters for a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCounters {
    task_count: u64,
    completed_task_count: u64,
}

impl TaskCounters {
    /// Returns counters for a project with no tasks.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            task_count: 0,
            completed_task_count: 0,
        }
    }

    /// Reconstructs counters from persisted values.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::CountersOutOfSync`] when the completed
    /// count exceeds the total.
    pub const fn from_counts(
        task_count: u64,
        completed_task_count: u64,
    ) -> Result<Self, ProjectDomainError> {
        if completed_task_count > task_count {
            return Err(ProjectDomainError::CountersOutOfSync {
                task_count,
                completed_task_count,
            });
        }
        Ok(Self {
            task_count,
            completed_task_count,
        })
    }

    /// Returns the total number of tasks.
    #[must_use]
    pub const fn task_count(self) -> u64 {
        self.task_count
    }

    /// Returns the number of completed tasks.
    #[must_use]
    pub const fn completed_task_count(self) -> u64 {
        self.completed_task_count
    }

    /// Records a newly created task.
    pub const fn record_created(&mut self, completed: bool) {
        self.task_count += 1;
        if completed {
            self.completed_task_count += 1;
        }
    }

    /// Records a deleted task.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::CountersOutOfSync`] when either counter
    /// would underflow, which indicates the counters had already drifted from
    /// the underlying records.
    pub fn record_deleted(&mut self, completed: bool) -> Result<(), ProjectDomainError> {
        let task_count = self
            .task_count
            .checked_sub(1)
            .ok_or_else(|| self.out_of_sync())?;
        let completed_task_count = if completed {
            self.completed_task_count
                .checked_sub(1)
                .ok_or_else(|| self.out_of_sync())?
        } else {
            self.completed_task_count
        };
        if completed_task_count > task_count {
            return Err(self.out_of_sync());
        }
        self.task_count = task_count;
        self.completed_task_count = completed_task_count;
        Ok(())
    }

    /// Applies a completed-boundary crossing reported by a task update.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::CountersOutOfSync`] when the completed
    /// counter would underflow or exceed the total.
    pub fn apply_completion_change(
        &mut self,
        change: CompletionChange,
    ) -> Result<(), ProjectDomainError> {
        let completed_task_count = match change {
            CompletionChange::Unchanged => return Ok(()),
            CompletionChange::Completed => self
                .completed_task_count
                .checked_add(1)
                .filter(|count| *count <= self.task_count)
                .ok_or_else(|| self.out_of_sync())?,
            CompletionChange::Reopened => self
                .completed_task_count
                .checked_sub(1)
                .ok_or_else(|| self.out_of_sync())?,
        };
        self.completed_task_count = completed_task_count;
        Ok(())
    }

    const fn out_of_sync(self) -> ProjectDomainError {
        ProjectDomainError::CountersOutOfSync {
            task_count: self.task_count,
            completed_task_count: self.completed_task_count,
        }
    }
}
