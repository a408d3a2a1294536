//! Tasklane: project and task management with derived counters.
//!
//! This crate provides the data layer for a task management application:
//! users own projects, projects contain tasks, and tasks carry comments.
//! Each project stores two derived counters (total and completed task
//! counts) that every task mutation maintains in the same transaction, so
//! project listings never recount tasks.
//!
//! # Architecture
//!
//! Tasklane follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`project`]: Project catalog and derived task counters
//! - [`task`]: Task lifecycle, comments, and counter-coupled mutations
//! - [`user`]: User accounts and profiles
//! - [`store`]: Shared in-memory store backing the memory adapters

pub mod project;
pub mod store;
pub mod task;
pub mod user;
