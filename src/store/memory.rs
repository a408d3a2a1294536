//! In-memory item store with read-modify-write transactions.
//!
//! The memory adapters for one logical store share a single [`MemoryStore`],
//! so a transaction that touches a task and its project's counters commits
//! both or neither. [`MemoryStore::transaction`] is the in-memory equivalent
//! of the managed store's transactional read-modify-write helper: the write
//! lock is held for the whole closure.

use crate::project::domain::{Project, ProjectId};
use crate::task::domain::{Comment, CommentId, Task, TaskId};
use crate::user::domain::{User, UserId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error raised when the store lock was poisoned by a panicking writer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("store lock poisoned: {0}")]
pub struct StoreLockError(pub String);

/// Mutable state shared by all memory adapters of one logical store.
#[derive(Debug, Default)]
pub struct StoreState {
    pub(crate) projects: HashMap<ProjectId, Project>,
    pub(crate) tasks: HashMap<(ProjectId, TaskId), Task>,
    pub(crate) comments: HashMap<(ProjectId, TaskId, CommentId), Comment>,
    pub(crate) users: HashMap<UserId, User>,
}

/// Thread-safe in-memory store with transactional mutation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs an atomic read-modify-write transaction against the store.
    ///
    /// The closure observes and mutates the state under the write lock, so
    /// every change it makes commits atomically with respect to other
    /// transactions and reads.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a [`StoreLockError`] converted into
    /// `E` when the lock was poisoned.
    pub fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut StoreState) -> Result<T, E>,
        E: From<StoreLockError>,
    {
        let mut state = self
            .state
            .write()
            .map_err(|err| StoreLockError(err.to_string()))?;
        f(&mut state)
    }

    /// Runs a read-only closure against the store under the shared lock.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a [`StoreLockError`] converted into
    /// `E` when the lock was poisoned.
    pub fn read<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&StoreState) -> Result<T, E>,
        E: From<StoreLockError>,
    {
        let state = self
            .state
            .read()
            .map_err(|err| StoreLockError(err.to_string()))?;
        f(&state)
    }
}
