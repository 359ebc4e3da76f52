use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::error::StorageError;

/// Plain string key/value storage.
pub trait KeyValueStore: Send + Sync {
    /// The stored value, or `default` when nothing readable is stored.
    fn read_string(&self, key: &str, default: &str) -> String;

    fn write_string(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

fn check_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Storage that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read_string(&self, key: &str, default: &str) -> String {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn write_string(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_key(key)?;
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn read_string(&self, key: &str, default: &str) -> String {
        if check_key(key).is_err() {
            return default.to_string();
        }
        let path = self.entry_path(key);
        match fs::read_to_string(&path) {
            Ok(value) => value,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => default.to_string(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable storage entry");
                default.to_string()
            }
        }
    }

    fn write_string(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_key(key)?;
        fs::create_dir_all(&self.dir)?;

        let path = self.entry_path(key);
        let tmp_path = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_defaults_and_writes() {
        let store = MemoryStore::new();
        assert_eq!(store.read_string("settings", "{}"), "{}");
        store.write_string("settings", "abc").unwrap();
        assert_eq!(store.read_string("settings", "{}"), "abc");
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.write_string("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            store.write_string("", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        assert_eq!(store.read_string("settings", "fallback"), "fallback");

        store.write_string("settings", "{\"a\":1}").unwrap();
        assert_eq!(store.read_string("settings", "fallback"), "{\"a\":1}");
        assert!(store.dir().join("settings.json").exists());
        assert!(!store.dir().join("settings.json.tmp").exists());

        // a second store over the same directory sees the value
        let reopened = FileStore::new(store.dir());
        assert_eq!(reopened.read_string("settings", ""), "{\"a\":1}");
    }

    #[test]
    fn test_file_store_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.write_string("k", "one").unwrap();
        store.write_string("k", "two").unwrap();
        assert_eq!(store.read_string("k", ""), "two");
    }
}
