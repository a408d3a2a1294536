//! Task management for tasklane.
//!
//! Tasks belong to a project and carry workflow status, priority, assignee,
//! tags, and comments. Every status change that crosses the completion
//! boundary adjusts the owning project's derived counters in the same
//! transaction, and comment mutations keep the task's comment counter in
//! step. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
