//! Orchestration services for the task context.

mod comments;
mod lifecycle;

pub use comments::{
    AddCommentRequest, CommentService, CommentServiceError, CommentServiceResult,
    UpdateCommentRequest,
};
pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    UpdateTaskRequest,
};
