//! Diesel row models and domain mappings for user persistence.

use super::schema::users;
use crate::user::{
    domain::{EmailAddress, PersistedUserData, Theme, User, UserId},
    ports::{UserRepositoryError, UserRepositoryResult},
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Avatar URL or emoji.
    pub avatar: String,
    /// Active flag.
    pub is_active: bool,
    /// IANA timezone name.
    pub timezone: String,
    /// Interface theme preference.
    pub theme: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-active timestamp, if any.
    pub last_active_at: Option<DateTime<Utc>>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Avatar URL or emoji.
    pub avatar: String,
    /// Active flag.
    pub is_active: bool,
    /// IANA timezone name.
    pub timezone: String,
    /// Interface theme preference.
    pub theme: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-active timestamp, if any.
    pub last_active_at: Option<DateTime<Utc>>,
}

/// Update model writing back the mutable portion of a user row.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserRowChanges {
    /// Email address.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Avatar URL or emoji.
    pub avatar: String,
    /// Active flag.
    pub is_active: bool,
    /// IANA timezone name.
    pub timezone: String,
    /// Interface theme preference.
    pub theme: String,
    /// Last-active timestamp, if any.
    pub last_active_at: Option<Option<DateTime<Utc>>>,
}

/// Builds an insert row from a user aggregate.
pub(crate) fn to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        id: user.id().into_inner(),
        email: user.email().as_str().to_owned(),
        display_name: user.display_name().to_owned(),
        avatar: user.avatar().to_owned(),
        is_active: user.is_active(),
        timezone: user.timezone().to_owned(),
        theme: user.theme().as_str().to_owned(),
        created_at: user.created_at(),
        last_active_at: user.last_active_at(),
    }
}

/// Builds a write-back changeset from a user aggregate.
pub(crate) fn to_row_changes(user: &User) -> UserRowChanges {
    UserRowChanges {
        email: user.email().as_str().to_owned(),
        display_name: user.display_name().to_owned(),
        avatar: user.avatar().to_owned(),
        is_active: user.is_active(),
        timezone: user.timezone().to_owned(),
        theme: user.theme().as_str().to_owned(),
        last_active_at: Some(user.last_active_at()),
    }
}

/// Reconstructs a user aggregate from a row.
pub(crate) fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let email = EmailAddress::new(row.email).map_err(UserRepositoryError::persistence)?;
    let theme =
        Theme::try_from(row.theme.as_str()).map_err(UserRepositoryError::persistence)?;
    let data = PersistedUserData {
        id: UserId::from_uuid(row.id),
        email,
        display_name: row.display_name,
        avatar: row.avatar,
        is_active: row.is_active,
        timezone: row.timezone,
        theme,
        created_at: row.created_at,
        last_active_at: row.last_active_at,
    };
    Ok(User::from_persisted(data))
}
