//! In-memory repository integration tests.
//!
//! Tests are organized into modules by functionality:
//! - `counter_tests`: Derived project counter maintenance across the task
//!   lifecycle
//! - `comment_tests`: Comment workflow and comment-count coupling
//! - `project_workflow_tests`: Project catalog operations and cascade
//!   deletion
//! - `user_account_tests`: Account creation, profile updates, activity
//!   stamping

mod in_memory {
    pub mod helpers;

    mod comment_tests;
    mod counter_tests;
    mod project_workflow_tests;
    mod user_account_tests;
}
