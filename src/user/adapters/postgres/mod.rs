//! `PostgreSQL` adapters for user persistence.

pub(crate) mod models;
mod repository;
pub(crate) mod schema;

pub use repository::{PostgresUserRepository, UserPgPool};
