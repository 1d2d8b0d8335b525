//! KeyValueStore trait

use crate::error::PersistenceError;

/// Synchronous key-value storage, the only persistence seam of the core.
///
/// Reads never fail: a value that cannot be read is reported as absent.
/// Writes either complete or fail immediately; callers do not retry.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw bytes stored under `key`
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &[u8]) -> Result<(), PersistenceError>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}
