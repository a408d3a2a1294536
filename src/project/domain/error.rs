//! Error types for project domain validation and counter maintenance.

use thiserror::Error;

/// Errors returned while constructing or mutating domain project values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The colour value is not a `#rrggbb` hex triplet.
    #[error("invalid colour '{0}', expected #rrggbb")]
    InvalidColor(String),

    /// A counter operation would leave the derived counters inconsistent.
    ///
    /// The derived counters must always satisfy
    /// `completed_task_count <= task_count` with neither underflowing zero.
    #[error("derived counters out of sync: {task_count} tasks, {completed_task_count} completed")]
    CountersOutOfSync {
        /// Total task counter at the point of failure.
        task_count: u64,
        /// Completed task counter at the point of failure.
        completed_task_count: u64,
    },
}
