//! Validated display colour newtype.

use super::ProjectDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowercase `#rrggbb` hex colour used for project display accents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorHex(String);

impl ColorHex {
    /// Default project accent colour applied when none is supplied.
    pub const DEFAULT: &'static str = "#3b82f6";

    /// Creates a validated colour.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidColor`] when the value is not a
    /// `#` followed by exactly six hex digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let mut chars = normalized.chars();
        let has_hash = chars.next() == Some('#');
        let digits: Vec<char> = chars.collect();
        let is_valid = has_hash && digits.len() == 6 && digits.iter().all(char::is_ascii_hexdigit);

        if !is_valid {
            return Err(ProjectDomainError::InvalidColor(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the default project accent colour.
    #[must_use]
    pub fn default_accent() -> Self {
        Self(Self::DEFAULT.to_owned())
    }

    /// Returns the colour as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ColorHex {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ColorHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
