//! # JsonFileStore
//!
//! Key/value pairs persisted as one flat JSON object. The whole file is
//! rewritten on every change; a missing file reads as empty.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use domains::{KeyValueStore, StorageError};
use tracing::{debug, instrument};

type Items = BTreeMap<String, String>;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    items: Mutex<Items>,
}

impl JsonFileStore {
    /// Loads `path` if it exists. Parent directories are created on first write.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let items = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Items::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(entries = items.len(), "local storage loaded");
        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy, persists it, and only then swaps it in.
    /// A failed write leaves the in-memory view untouched.
    fn update(&self, change: impl FnOnce(&mut Items)) -> Result<(), StorageError> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| StorageError::LockPoisoned("local storage"))?;
        let mut next = items.clone();
        change(&mut next);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&next)?)?;
        *items = next;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self
            .items
            .lock()
            .map_err(|_| StorageError::LockPoisoned("local storage"))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.update(|items| {
            items.remove(key);
        })
    }
}
