//! Filesystem KeyValueStore implementation
//!
//! Each key is a file `{root}/{key}.json`. Writes go through a temp file
//! that is renamed into place, so a slot is either the old value or the
//! new one, never a torn write.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;
use crate::storage::traits::KeyValueStore;

/// Key-value store backed by one file per key
#[derive(Debug, Clone)]
pub struct FsKvStore {
    root: PathBuf,
}

impl FsKvStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the filesystem path for a key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn write_atomic(&self, path: &Path, value: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;

        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(value)?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    }
}

impl KeyValueStore for FsKvStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(data) => {
                tracing::debug!(key, bytes = data.len(), "read slot");
                Some(data)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(
                    key,
                    path = %path.display(),
                    error = %e,
                    "unreadable slot treated as absent"
                );
                None
            }
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), PersistenceError> {
        let path = self.path_for(key);
        self.write_atomic(&path, value)
            .map_err(|source| PersistenceError::Io {
                key: key.to_string(),
                source,
            })?;
        tracing::debug!(key, bytes = value.len(), "wrote slot");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistenceError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_kv_store() -> FsKvStore {
        let dir = env::temp_dir()
            .join(format!("kv_test_{}", uuid::Uuid::new_v4()));
        FsKvStore::new(dir)
    }

    #[test]
    fn test_store_and_retrieve() {
        let store = temp_kv_store();
        assert_eq!(store.get("ticketapp_users"), None);

        store.set("ticketapp_users", b"[]").unwrap();
        assert_eq!(store.get("ticketapp_users"), Some(b"[]".to_vec()));
        assert!(store.path_for("ticketapp_users").exists());

        // Clean up
        fs::remove_dir_all(store.root()).ok();
    }

    #[test]
    fn test_overwrite_leaves_no_temp_file() {
        let store = temp_kv_store();
        store.set("k", b"first").unwrap();
        store.set("k", b"second").unwrap();

        assert_eq!(store.get("k"), Some(b"second".to_vec()));
        assert!(!store.path_for("k").with_extension("json.tmp").exists());

        // Clean up
        fs::remove_dir_all(store.root()).ok();
    }

    #[test]
    fn test_remove() {
        let store = temp_kv_store();
        store.set("k", b"v").unwrap();

        store.remove("k").unwrap();
        assert_eq!(store.get("k"), None);
        // Absent key is fine
        store.remove("k").unwrap();

        // Clean up
        fs::remove_dir_all(store.root()).ok();
    }
}
