//! Orchestration services for the user context.

mod accounts;

pub use accounts::{
    CreateUserRequest, UpdateUserRequest, UserAccountError, UserAccountResult, UserAccountService,
};
