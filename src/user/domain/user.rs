//! User aggregate and profile value types.

use super::{ParseThemeError, UserDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated email address in `local@domain` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidEmail`] when the value does not
    /// contain exactly one `@` separating non-empty local and domain parts,
    /// or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let has_more_parts = parts.next().is_some();
        let is_valid = !local.is_empty()
            && !domain.is_empty()
            && !has_more_parts
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(UserDomainError::InvalidEmail(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the email address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Preferred interface theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Light interface theme.
    Light,
    /// Dark interface theme.
    Dark,
    /// Follow the operating system preference.
    System,
}

impl Theme {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl TryFrom<&str> for Theme {
    type Error = ParseThemeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(ParseThemeError(value.to_owned())),
        }
    }
}

/// User aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    display_name: String,
    avatar: String,
    is_active: bool,
    timezone: String,
    theme: Theme,
    created_at: DateTime<Utc>,
    last_active_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted user aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted display name.
    pub display_name: String,
    /// Persisted avatar URL or emoji.
    pub avatar: String,
    /// Persisted active flag.
    pub is_active: bool,
    /// Persisted timezone name.
    pub timezone: String,
    /// Persisted theme preference.
    pub theme: Theme,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-active timestamp, if any.
    pub last_active_at: Option<DateTime<Utc>>,
}

/// Partial update applied to a user aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    /// Replacement email address.
    pub email: Option<EmailAddress>,
    /// Replacement display name.
    pub display_name: Option<String>,
    /// Replacement avatar.
    pub avatar: Option<String>,
    /// Replacement timezone.
    pub timezone: Option<String>,
    /// Replacement theme preference.
    pub theme: Option<Theme>,
    /// Replacement active flag.
    pub is_active: Option<bool>,
}

impl User {
    /// Creates a new user profile.
    #[must_use]
    pub fn new(
        email: EmailAddress,
        display_name: String,
        avatar: String,
        timezone: String,
        theme: Theme,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: UserId::new(),
            email,
            display_name,
            avatar,
            is_active: true,
            timezone,
            theme,
            created_at: clock.utc(),
            last_active_at: None,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            display_name: data.display_name,
            avatar: data.avatar,
            is_active: data.is_active,
            timezone: data.timezone,
            theme: data.theme,
            created_at: data.created_at,
            last_active_at: data.last_active_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the avatar URL or emoji.
    #[must_use]
    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    /// Returns whether the account is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the timezone name.
    #[must_use]
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Returns the theme preference.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-active timestamp, if any.
    #[must_use]
    pub const fn last_active_at(&self) -> Option<DateTime<Utc>> {
        self.last_active_at
    }

    /// Applies a partial profile update.
    pub fn apply_update(&mut self, update: UserUpdate) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(display_name) = update.display_name {
            self.display_name = display_name;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = avatar;
        }
        if let Some(timezone) = update.timezone {
            self.timezone = timezone;
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
    }

    /// Stamps the last-active timestamp.
    pub fn touch_last_active(&mut self, now: DateTime<Utc>) {
        self.last_active_at = Some(now);
    }
}
