//! Settings for the split view engine.
//!
//! The options page and the user's own edits both land in one TOML file.
//! Every key is optional, values are range checked, and [`ReloadManager`]
//! republishes the file whenever it changes on disk.
//!
//! ```rust,no_run
//! # fn main() -> Result<(), splitview_common::ConfigError> {
//! let config = splitview_config::load_config()?;
//! println!("{} panels max", config.display.max_panels);
//! # Ok(())
//! # }
//! ```

pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;
pub mod watcher;

pub use reload::ReloadManager;
pub use schema::{
    DisplayConfig, DomainList, FramingConfig, HistoryConfig, LogLevel, LoggingConfig,
    SplitViewConfig, StorageConfig, ViewsScope, CONFIG_SCHEMA_VERSION,
};
pub use toml_writer::{save_config, save_config_to_path};
pub use watcher::ConfigWatcher;

use std::path::Path;

use splitview_common::ConfigError;

/// [`load_config_from`] on `<config_dir>/splitview/config.toml`.
pub fn load_config() -> Result<SplitViewConfig, ConfigError> {
    checked(toml_loader::load_default()?)
}

/// Read `path`, writing the commented template first if it is missing.
/// Out-of-range values are an error here.
pub fn load_config_from(path: &Path) -> Result<SplitViewConfig, ConfigError> {
    checked(toml_loader::load_or_create(path)?)
}

fn checked(config: SplitViewConfig) -> Result<SplitViewConfig, ConfigError> {
    validation::validate(&config)?;
    Ok(config)
}

/// Pretty JSON for `splitview config` and the options page.
pub fn config_to_json(config: &SplitViewConfig) -> String {
    match serde_json::to_string_pretty(config) {
        Ok(json) => json,
        Err(e) => serde_json::json!({ "error": e.to_string() }).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_dump_has_one_key_per_section() {
        let dump: serde_json::Value =
            serde_json::from_str(&config_to_json(&SplitViewConfig::default())).unwrap();
        let keys: Vec<&str> = dump.as_object().unwrap().keys().map(String::as_str).collect();
        for section in ["display", "framing", "history", "storage", "logging"] {
            assert!(keys.contains(&section), "no {section} in {keys:?}");
        }
    }

    #[test]
    fn schema_is_at_version_one() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn first_load_writes_a_valid_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("splitview.toml");
        assert_eq!(load_config_from(&path).unwrap(), SplitViewConfig::default());
        assert!(path.is_file());
    }

    #[test]
    fn zero_history_entries_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("splitview.toml");
        std::fs::write(&path, "[history]\nmax_entries = 0\n").unwrap();
        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn json_dump_reads_back_unchanged() {
        let mut config = SplitViewConfig::default();
        config.display.max_panels = 6;
        let back: SplitViewConfig = serde_json::from_str(&config_to_json(&config)).unwrap();
        assert_eq!(back, config);
    }
}
