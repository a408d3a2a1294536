//! Project management for tasklane.
//!
//! Projects are containers of tasks carrying two derived counters (total and
//! completed task counts) that the task context maintains transactionally.
//! The module follows hexagonal architecture:
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
