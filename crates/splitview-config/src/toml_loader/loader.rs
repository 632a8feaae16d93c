//! Read config from a path or the platform default.

use std::io::ErrorKind;
use std::path::Path;

use splitview_common::ConfigError;
use tracing::{info, warn};

use crate::schema::SplitViewConfig;
use crate::validation;

use super::paths::{create_default_config, default_config_path};

/// Parse the TOML file at `path`. Absent keys fall back to defaults.
///
/// Validation problems are only logged here; [`crate::load_config_from`]
/// is the entry point that refuses them.
pub fn load_from_path(path: &Path) -> Result<SplitViewConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("cannot read {}: {e}", path.display())),
    })?;

    let config = toml::from_str::<SplitViewConfig>(&text)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

    match validation::validate(&config) {
        Ok(()) => info!(path = %path.display(), "config loaded"),
        Err(e) => warn!(path = %path.display(), "config loaded with problems: {e}"),
    }
    Ok(config)
}

/// [`load_or_create`] on the platform default path.
pub fn load_default() -> Result<SplitViewConfig, ConfigError> {
    load_or_create(&default_config_path()?)
}

/// Like [`load_from_path`], but a missing file is replaced by the
/// commented template and defaults are returned.
pub fn load_or_create(path: &Path) -> Result<SplitViewConfig, ConfigError> {
    match load_from_path(path) {
        Err(ConfigError::FileNotFound(_)) => {
            info!(path = %path.display(), "first run, writing default config");
            create_default_config(path)?;
            Ok(SplitViewConfig::default())
        }
        other => other,
    }
}
