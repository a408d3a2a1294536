//! Domain model for user accounts.
//!
//! Users own projects, author tasks, and write comments. The domain keeps
//! profile validation (email form, theme parsing) independent of any
//! persistence concern.

mod error;
mod ids;
mod user;

pub use error::{ParseThemeError, UserDomainError};
pub use ids::UserId;
pub use user::{EmailAddress, PersistedUserData, Theme, User, UserUpdate};
