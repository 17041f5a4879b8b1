//! File-backed key-value store.

use std::collections::BTreeMap;
use std::path::PathBuf;
use studypulse_core::{KeyValueStore, StorageError};

use super::atomic_json::AtomicJsonFile;

/// Persists all keys in a single JSON object on disk.
///
/// Every mutation is a locked read-modify-write followed by an atomic rename,
/// so a crash never leaves a partially written store behind.
pub struct FileKeyValueStore {
    file: AtomicJsonFile<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .file
            .load()?
            .and_then(|mut entries| entries.remove(key)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.file.update(BTreeMap::new(), |entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if !self.file.path().exists() {
            return Ok(());
        }
        self.file.update(BTreeMap::new(), |entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        FileKeyValueStore::new(path.clone())
            .set("preferredLanguage", "en")
            .unwrap();

        let reopened = FileKeyValueStore::new(path);
        assert_eq!(
            reopened.get("preferredLanguage").unwrap().as_deref(),
            Some("en")
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("storage.json"));

        store.remove("authToken").unwrap();
        store.set("authToken", "t").unwrap();
        store.remove("authToken").unwrap();
        store.remove("authToken").unwrap();

        assert!(store.get("authToken").unwrap().is_none());
    }

    #[test]
    fn test_remove_on_corrupt_file_resets_it() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "garbage").unwrap();
        let store = FileKeyValueStore::new(path);

        assert!(store.get("authToken").is_err());
        store.remove("authToken").unwrap();
        assert!(store.get("authToken").unwrap().is_none());
    }
}
