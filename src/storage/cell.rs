//! A single value backed by a storage key

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{Storage, read_value, write_value};

/// A value that survives restarts by living under a storage key
///
/// The stored value is read once when the cell is opened. Writes update the
/// in-memory value first; a failed write is logged and the process keeps
/// running with the new value.
pub struct PersistentCell<T> {
    storage: Option<Arc<dyn Storage>>,
    key: String,
    value: T,
}

impl<T> PersistentCell<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Open the cell, reading the stored value or falling back to `default`
    pub fn open(storage: Option<Arc<dyn Storage>>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = read_value(storage.as_deref(), &key, default);
        Self { storage, key, value }
    }

    /// Current in-memory value
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and persist it
    ///
    /// Returns whether the value reached durable storage.
    pub fn set(&mut self, value: T) -> bool {
        self.value = value;
        match write_value(self.storage.as_deref(), &self.key, &self.value) {
            Ok(()) => self.storage.is_some(),
            Err(e) => {
                tracing::warn!("Error writing storage key {:?}: {}", self.key, e);
                false
            }
        }
    }

    /// Replace the in-memory value without writing it
    ///
    /// The stored entry is left as it is until the next `set`.
    pub fn reset(&mut self, value: T) {
        self.value = value;
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentCell")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("backed", &self.storage.is_some())
            .finish()
    }
}
