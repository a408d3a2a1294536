//! Adapter implementations for the project context.

mod memory;
pub mod postgres;

pub use memory::InMemoryProjectRepository;
