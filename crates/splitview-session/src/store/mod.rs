//! Whole-snapshot persistence.
//!
//! Each key holds one JSON document that is always read and written in
//! full. The controller owns the only handle, so there are no partial
//! writers to reconcile.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use splitview_common::StorageError;

/// Stable storage keys.
pub mod keys {
    pub const VIEWS: &str = "views";
    pub const HISTORY: &str = "history";
    pub const OVERRIDES: &str = "overrides";
}

pub trait SnapshotStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError>;
    fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError>;
}

/// Load `key` and decode it, treating a missing key as `T::default()`.
pub fn load_or_default<T>(store: &dyn SnapshotStore, key: &str) -> Result<T, StorageError>
where
    T: serde::de::DeserializeOwned + Default,
{
    match store.load(key)? {
        Some(value) => serde_json::from_value(value).map_err(|e| StorageError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(T::default()),
    }
}

/// Encode `value` and save it under `key`.
pub fn save_as<T: serde::Serialize>(
    store: &dyn SnapshotStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_value(value).map_err(|e| StorageError::Write {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.save(key, &json)
}
