//! Shared in-memory transactional store backing the memory adapters.

mod memory;

pub use memory::{MemoryStore, StoreLockError, StoreState};
