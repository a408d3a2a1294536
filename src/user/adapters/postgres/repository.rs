//! `PostgreSQL` repository implementation for user storage.

use super::{
    models::{UserRow, row_to_user, to_new_row, to_row_changes},
    schema::users,
};
use crate::user::{
    domain::{User, UserId, UserUpdate},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by user adapters.
pub type UserPgPool = Pool<ConnectionManager<PgConnection>>;

impl From<DieselError> for UserRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: UserPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: UserPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

/// Loads a user row under a row lock and maps it to the aggregate.
fn lock_user(connection: &mut PgConnection, id: UserId) -> UserRepositoryResult<User> {
    let row = users::table
        .find(id.into_inner())
        .select(UserRow::as_select())
        .for_update()
        .first::<UserRow>(connection)
        .optional()?
        .ok_or(UserRepositoryError::NotFound(id))?;
    row_to_user(row)
}

/// Writes the mutable portion of a user aggregate back to its row.
fn write_user(connection: &mut PgConnection, user: &User) -> UserRepositoryResult<()> {
    diesel::update(users::table.find(user.id().into_inner()))
        .set(&to_row_changes(user))
        .execute(connection)?;
    Ok(())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let id = user.id();
        let new_row = to_new_row(user);
        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(id)
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .find(id.into_inner())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn update(&self, id: UserId, update: UserUpdate) -> UserRepositoryResult<User> {
        self.run_blocking(move |connection| {
            connection.transaction::<User, UserRepositoryError, _>(|connection| {
                let mut user = lock_user(connection, id)?;
                user.apply_update(update);
                write_user(connection, &user)?;
                Ok(user)
            })
        })
        .await
    }

    async fn touch_last_active(
        &self,
        id: UserId,
        now: DateTime<Utc>,
    ) -> UserRepositoryResult<User> {
        self.run_blocking(move |connection| {
            connection.transaction::<User, UserRepositoryError, _>(|connection| {
                let mut user = lock_user(connection, id)?;
                user.touch_last_active(now);
                write_user(connection, &user)?;
                Ok(user)
            })
        })
        .await
    }
}
