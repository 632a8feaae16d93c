//! Persist a `SplitViewConfig` as TOML, used when the options page saves.

use std::path::Path;

use splitview_common::ConfigError;

use crate::schema::SplitViewConfig;
use crate::toml_loader::{default_config_path, write_replacing};

/// Save to `<config_dir>/splitview/config.toml`.
pub fn save_config(config: &SplitViewConfig) -> Result<(), ConfigError> {
    save_config_to_path(config, &default_config_path()?)
}

/// Save to `path`. Missing directories are created and the file is
/// swapped in whole.
pub fn save_config_to_path(config: &SplitViewConfig, path: &Path) -> Result<(), ConfigError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::ParseError(format!("config does not render as TOML: {e}")))?;
    write_replacing(path, rendered.as_bytes())
}
