//! Synchronous key-value backends.
//!
//! A [`KeyValueStore`] is a flat map from string keys to string values with
//! last-write-wins semantics, in the spirit of a browser's local storage.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;
use ulid::Ulid;

use crate::error::{Result, StoreError};

pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Process-local store, gone when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items().remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key under a directory.
///
/// ```text
/// .formsmith/
///   formBuilderData.json
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Use `root` for storage. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let usable = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\'])
            && !key.starts_with(".tmp_");
        if !usable {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;
        atomic_write(&path, value.as_bytes())?;
        debug!(?path, bytes = value.len(), "stored item");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write to a temp file then rename for atomic persistence.
fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| std::io::Error::new(ErrorKind::InvalidInput, "no parent dir"))?;
    let tmp = dir.join(format!(".tmp_{}", Ulid::new()));
    fs::write(&tmp, data)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get_item("forms").unwrap(), None);

        store.set_item("forms", "{}").unwrap();
        assert_eq!(store.get_item("forms").unwrap().as_deref(), Some("{}"));

        store.set_item("forms", "{\"a\":[]}").unwrap();
        assert_eq!(
            store.get_item("forms").unwrap().as_deref(),
            Some("{\"a\":[]}")
        );

        store.remove_item("forms").unwrap();
        assert_eq!(store.get_item("forms").unwrap(), None);
        store.remove_item("forms").unwrap();
    }

    #[test]
    fn memory_store_last_write_wins() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn file_store_last_write_wins() {
        let tmp = TempDir::new().unwrap();
        exercise(&FileStore::new(tmp.path().join("store")));
    }

    #[test]
    fn file_store_creates_directory_and_file() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("nested/store");
        let store = FileStore::new(&root);

        store.set_item("formBuilderData", "{}").unwrap();

        assert!(root.join("formBuilderData.json").is_file());
        let leftovers: Vec<_> = fs::read_dir(&root)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".tmp_"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        for key in ["", "..", "a/b", "a\\b", ".tmp_x"] {
            assert!(matches!(
                store.set_item(key, "x"),
                Err(StoreError::InvalidKey { .. })
            ));
        }
    }
}
