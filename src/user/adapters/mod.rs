//! Adapter implementations for the user context.

mod memory;
pub mod postgres;

pub use memory::InMemoryUserRepository;
