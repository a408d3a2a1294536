//! Port contracts for the task context.

mod comments;
mod repository;

pub use comments::{CommentRepository, CommentRepositoryError, CommentRepositoryResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
