//! Domain model for tasks and their comments.
//!
//! Tasks belong to a project and report completed-boundary crossings through
//! [`Task::apply_update`], which the repositories translate into project
//! counter adjustments within the same transaction. Comments hang off tasks
//! and maintain the task's derived comment count the same way.

mod comment;
mod error;
mod ids;
mod status;
mod task;

pub use comment::{Comment, CommentBody, CommentUpdate, PersistedCommentData};
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{CommentId, TaskId};
pub use status::{TaskPriority, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskDraft, TaskTitle, TaskUpdate};
