//! Adapter implementations for the task context.

mod memory;
pub mod postgres;

pub use memory::{InMemoryCommentRepository, InMemoryTaskRepository};
