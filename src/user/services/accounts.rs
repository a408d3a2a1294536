//! Service layer for user account management.

use crate::user::{
    domain::{EmailAddress, Theme, User, UserDomainError, UserId, UserUpdate},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Default timezone applied when none is supplied.
const DEFAULT_TIMEZONE: &str = "UTC";

/// Request payload for creating a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    email: String,
    display_name: String,
    avatar: Option<String>,
    timezone: Option<String>,
    theme: Option<Theme>,
}

impl CreateUserRequest {
    /// Creates a request with required account fields.
    ///
    /// Omitted fields take their defaults: an empty avatar, the `UTC`
    /// timezone, and the system theme.
    #[must_use]
    pub fn new(email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
            avatar: None,
            timezone: None,
            theme: None,
        }
    }

    /// Sets the avatar URL or emoji.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Sets the timezone name.
    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Sets the theme preference.
    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }
}

/// Request payload for partially updating a user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    email: Option<String>,
    display_name: Option<String>,
    avatar: Option<String>,
    timezone: Option<String>,
    theme: Option<Theme>,
    is_active: Option<bool>,
}

impl UpdateUserRequest {
    /// Creates an empty update request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a replacement email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets a replacement display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Sets a replacement avatar.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Sets a replacement timezone.
    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Sets a replacement theme preference.
    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Sets a replacement active flag.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    fn into_update(self) -> Result<UserUpdate, UserDomainError> {
        let display_name = match self.display_name {
            Some(name) => {
                let trimmed = name.trim().to_owned();
                if trimmed.is_empty() {
                    return Err(UserDomainError::EmptyDisplayName);
                }
                Some(trimmed)
            }
            None => None,
        };
        Ok(UserUpdate {
            email: self.email.map(EmailAddress::new).transpose()?,
            display_name,
            avatar: self.avatar,
            timezone: self.timezone,
            theme: self.theme,
            is_active: self.is_active,
        })
    }
}

/// Service-level errors for user account operations.
#[derive(Debug, Error)]
pub enum UserAccountError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for user account service operations.
pub type UserAccountResult<T> = Result<T, UserAccountError>;

/// User account orchestration service.
#[derive(Clone)]
pub struct UserAccountService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> UserAccountService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new user account service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a new user account.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError`] when input validation fails or the
    /// repository rejects persistence.
    pub async fn create_user(&self, request: CreateUserRequest) -> UserAccountResult<User> {
        let email = EmailAddress::new(request.email)?;
        let display_name = request.display_name.trim().to_owned();
        if display_name.is_empty() {
            return Err(UserDomainError::EmptyDisplayName.into());
        }
        let user = User::new(
            email,
            display_name,
            request.avatar.unwrap_or_default(),
            request
                .timezone
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_owned()),
            request.theme.unwrap_or(Theme::System),
            &*self.clock,
        );
        self.repository.store(&user).await?;
        tracing::debug!(user_id = %user.id(), "user created");
        Ok(user)
    }

    /// Retrieves a user by identifier.
    ///
    /// Returns `Ok(None)` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::Repository`] when persistence lookup
    /// fails.
    pub async fn get_user(&self, id: UserId) -> UserAccountResult<Option<User>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Applies a partial profile update and returns the updated user.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError`] when input validation fails or the user
    /// does not exist.
    pub async fn update_user(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> UserAccountResult<User> {
        let update = request.into_update()?;
        Ok(self.repository.update(id, update).await?)
    }

    /// Stamps the user's last-active timestamp with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::Repository`] when the user does not
    /// exist.
    pub async fn touch_last_active(&self, id: UserId) -> UserAccountResult<User> {
        Ok(self
            .repository
            .touch_last_active(id, self.clock.utc())
            .await?)
    }
}
