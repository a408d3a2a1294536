//! Port contracts for the user context.

mod repository;

pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
