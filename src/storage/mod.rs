//! Flat key-value persistence
//!
//! Values are stored as serialized JSON strings under string keys, mirroring
//! a browser's local storage. Reads never fail from the caller's point of
//! view: a missing backend, a missing entry or a corrupt payload all resolve
//! to the caller's default.

pub mod cell;

pub use cell::PersistentCell;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored payload could not be (de)serialized
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The write would exceed the configured quota
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        /// Size the store would have after the write
        needed: usize,
        /// Maximum allowed size
        quota: usize,
    },

    /// The backend cannot be used at all
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A string-keyed store of serialized values
pub trait Storage: Send + Sync {
    /// Get the raw serialized value for a key
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store a raw serialized value, replacing any previous one
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read a value, falling back to `default` on any failure
///
/// Missing backends and missing entries are silent. Backend errors and
/// payloads that do not deserialize into `T` are logged and treated as
/// "no entry".
pub fn read_value<T: DeserializeOwned>(storage: Option<&dyn Storage>, key: &str, default: T) -> T {
    let Some(storage) = storage else {
        return default;
    };

    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default,
        Err(e) => {
            tracing::warn!("Error reading storage key {:?}: {}", key, e);
            return default;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Ignoring unparseable value for storage key {:?}: {}", key, e);
            default
        }
    }
}

/// Serialize and store a value
///
/// Without a backend this is a no-op that succeeds.
pub fn write_value<T: Serialize + ?Sized>(
    storage: Option<&dyn Storage>,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let Some(storage) = storage else {
        return Ok(());
    };
    let raw = serde_json::to_string(value)?;
    storage.set_item(key, &raw)
}

/// Total size in bytes of a key-value map, as counted against quotas
fn entries_size(entries: &BTreeMap<String, String>) -> usize {
    entries.iter().map(|(k, v)| k.len() + v.len()).sum()
}

fn check_quota(
    entries: &BTreeMap<String, String>,
    quota: Option<usize>,
) -> Result<(), StorageError> {
    if let Some(quota) = quota {
        let needed = entries_size(entries);
        if needed > quota {
            return Err(StorageError::QuotaExceeded { needed, quota });
        }
    }
    Ok(())
}

/// In-process storage, used for tests and when no data directory exists
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total size of keys and values in bytes
    pub fn with_quota(quota: usize) -> Self {
        Self { entries: Mutex::default(), quota: Some(quota) }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, StorageError> {
        self.entries.lock().map_err(|_| StorageError::Unavailable("storage lock poisoned".into()))
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.lock()?;
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());
        check_quota(&updated, self.quota)?;
        *entries = updated;
        Ok(())
    }
}

/// Storage persisted as a single JSON object on disk
///
/// The whole map is rewritten on every write. A corrupt file reads as an
/// error for every key and is replaced by the next successful write.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    quota: Option<usize>,
    // Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), quota: None, write_lock: Mutex::new(()) }
    }

    /// Limit the total size of keys and values in bytes
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Load the current map for modification, discarding a corrupt file
    fn load_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.load() {
            Err(StorageError::Serialization(e)) => {
                tracing::warn!("Replacing corrupt storage file {:?}: {}", self.path, e);
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn modify(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".into()))?;
        let mut entries = self.load_for_write()?;
        f(&mut entries);
        check_quota(&entries, self.quota)?;
        self.save(&entries)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }
}
