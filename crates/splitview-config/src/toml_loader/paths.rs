//! Where the config file lives, and the disk writes shared by the
//! template creator and the options-page writer.

use std::io;
use std::path::{Path, PathBuf};

use splitview_common::ConfigError;
use tracing::{debug, info, warn};

use super::template::default_config_toml;

const APP_DIR: &str = "splitview";
const FILE_NAME: &str = "config.toml";

/// `<config_dir>/splitview/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    match dirs::config_dir() {
        Some(base) => Ok(base.join(APP_DIR).join(FILE_NAME)),
        None => Err(ConfigError::ParseError(
            "this platform reports no user config directory".into(),
        )),
    }
}

/// Write the commented default config to `path`, replacing whatever is there.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    write_replacing(path, default_config_toml().as_bytes())?;
    info!(path = %path.display(), "wrote commented default config");
    Ok(())
}

fn io_failure(what: &str, path: &Path, err: io::Error) -> ConfigError {
    ConfigError::ParseError(format!("{what} {}: {err}", path.display()))
}

/// Put `bytes` at `path` via a `.toml.tmp` sibling and a rename, so a
/// watcher never sees a half-written file. Falls back to writing in place
/// when the rename is refused (some network mounts do).
pub(crate) fn write_replacing(path: &Path, bytes: &[u8]) -> Result<(), ConfigError> {
    let dir = path.parent().filter(|d| !d.as_os_str().is_empty());
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir).map_err(|e| io_failure("cannot create", dir, e))?;
    }

    let staged = path.with_extension("toml.tmp");
    std::fs::write(&staged, bytes).map_err(|e| io_failure("cannot stage", &staged, e))?;
    match std::fs::rename(&staged, path) {
        Ok(()) => {}
        Err(rename_err) => {
            warn!(path = %path.display(), "rename refused ({rename_err}), writing in place");
            let _ = std::fs::remove_file(&staged);
            std::fs::write(path, bytes).map_err(|e| io_failure("cannot write", path, e))?;
        }
    }
    debug!(path = %path.display(), bytes = bytes.len(), "config file replaced");
    Ok(())
}
