//! String key-value storage for user preferences
//!
//! Mirrors the browser's local storage: string keys, string values, and a
//! missing key is simply `None`. [`MemoryStore`] lives for the process,
//! [`FileStore`] persists to a JSON object on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors raised while persisting a value
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("storage file is not a JSON object: {0}")]
    Format(#[from] serde_json::Error),
}

/// Persistent key-value storage
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Store shared between the page controller and its host
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Store that lives in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<FxHashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let values = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON file
///
/// The file is read once on open and rewritten on every `set`. A missing
/// file starts an empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: RwLock<FxHashMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => FxHashMap::default(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => FxHashMap::default(),
            Err(err) => return Err(err.into()),
        };
        tracing::debug!("Opened store at {} ({} keys)", path.display(), values.len());
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let snapshot = {
            let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
            values.insert(key.to_string(), value.to_string());
            // Sorted output keeps the file diff-friendly
            let sorted: std::collections::BTreeMap<_, _> = values.iter().collect();
            serde_json::to_string_pretty(&sorted)?
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, snapshot)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_survives_poisoned_lock() {
        let store = Arc::new(MemoryStore::with_entries([("theme", "dark")]));
        let poisoner = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.values.write().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(store.values.is_poisoned());

        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.get("theme"), None);

        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("light"));

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_memory_store_with_entries() {
        let store = MemoryStore::with_entries([("theme", "light")]);
        assert_eq!(store.get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs").join("store.json");

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("theme"), None);
        store.set("theme", "light").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(FileStore::open(&path), Err(StoreError::Format(_))));
    }

    #[test]
    fn test_file_store_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("theme"), None);
    }
}
