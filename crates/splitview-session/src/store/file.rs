//! One JSON file per key.

use std::path::{Path, PathBuf};

use splitview_common::StorageError;
use tracing::{debug, warn};

use super::SnapshotStore;

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data_dir>/splitview/`.
    pub fn default_dir() -> Result<PathBuf, StorageError> {
        dirs::data_dir()
            .map(|d| d.join("splitview"))
            .ok_or_else(|| StorageError::BadLocation("could not determine data directory".into()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::BadLocation(format!("invalid key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SnapshotStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        let path = self.path_for(key)?;
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::Read {
                    key: key.to_string(),
                    reason: e.to_string(),
                })
            }
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let write_err = |e: std::io::Error| StorageError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        };

        let text = serde_json::to_string_pretty(value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        std::fs::create_dir_all(&self.dir).map_err(write_err)?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &text).map_err(write_err)?;
        if let Err(e) = std::fs::rename(&tmp_path, &path) {
            warn!("atomic rename failed ({}), falling back to direct write", e);
            std::fs::write(&path, &text).map_err(write_err)?;
        }

        debug!(key = %key, path = %path.display(), "snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        let value = json!({"views": []});
        store.save("views", &value).unwrap();
        assert_eq!(store.load("views").unwrap(), Some(value));
        assert!(dir.path().join("nested/views.json").exists());
        assert!(!dir.path().join("nested/views.json.tmp").exists());
    }

    #[test]
    fn missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.load("history").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("history.json"), "{not json").unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.load("history"),
            Err(StorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn keys_cannot_escape_directory() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.save("../evil", &json!(1)),
            Err(StorageError::BadLocation(_))
        ));
    }

    #[test]
    fn overwrite_replaces_whole_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.save("overrides", &json!(["a.com", "b.com"])).unwrap();
        store.save("overrides", &json!(["c.com"])).unwrap();
        assert_eq!(store.load("overrides").unwrap(), Some(json!(["c.com"])));
    }
}
