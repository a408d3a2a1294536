//! `PostgreSQL` adapters for task and comment persistence.

mod comment_repository;
pub(crate) mod models;
mod repository;
pub(crate) mod schema;

pub use comment_repository::{CommentPgPool, PostgresCommentRepository};
pub use repository::{PostgresTaskRepository, TaskPgPool};
