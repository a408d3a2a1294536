//! In-memory user repository over the shared transactional store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::store::{MemoryStore, StoreLockError};
use crate::user::{
    domain::{User, UserId, UserUpdate},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

impl From<StoreLockError> for UserRepositoryError {
    fn from(err: StoreLockError) -> Self {
        Self::persistence(err)
    }
}

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: MemoryStore,
}

impl InMemoryUserRepository {
    /// Creates a repository over the given shared store.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        self.store.transaction(|state| {
            if state.users.contains_key(&user.id()) {
                return Err(UserRepositoryError::DuplicateUser(user.id()));
            }
            state.users.insert(user.id(), user.clone());
            Ok(())
        })
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.store.read(|state| Ok(state.users.get(&id).cloned()))
    }

    async fn update(&self, id: UserId, update: UserUpdate) -> UserRepositoryResult<User> {
        self.store.transaction(|state| {
            let user = state
                .users
                .get_mut(&id)
                .ok_or(UserRepositoryError::NotFound(id))?;
            user.apply_update(update);
            Ok(user.clone())
        })
    }

    async fn touch_last_active(
        &self,
        id: UserId,
        now: DateTime<Utc>,
    ) -> UserRepositoryResult<User> {
        self.store.transaction(|state| {
            let user = state
                .users
                .get_mut(&id)
                .ok_or(UserRepositoryError::NotFound(id))?;
            user.touch_last_active(now);
            Ok(user.clone())
        })
    }
}
