//! Domain model for projects and their derived task counters.
//!
//! A project is a container of tasks carrying two derived counters: the
//! total task count and the completed task count. The counters are only ever
//! mutated through the operations on [`Project`] and [`TaskCounters`], which
//! the task-context repositories invoke inside the same transaction as the
//! task mutation that justifies the change.

mod color;
mod counters;
mod error;
mod ids;
mod name;
mod project;

pub use color::ColorHex;
pub use counters::{CompletionChange, TaskCounters};
pub use error::ProjectDomainError;
pub use ids::ProjectId;
pub use name::ProjectName;
pub use project::{DEFAULT_PROJECT_EMOJI, PersistedProjectData, Project, ProjectUpdate};
