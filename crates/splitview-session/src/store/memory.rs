use std::collections::HashMap;
use std::sync::Mutex;

use splitview_common::StorageError;

use super::SnapshotStore;

/// Store that lives and dies with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        let entries = self.entries.lock().map_err(|e| StorageError::Read {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        entries.insert(key.to_string(), value.clone());
        Ok(())
    }
}
