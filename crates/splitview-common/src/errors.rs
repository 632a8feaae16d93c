use std::path::PathBuf;

use crate::id::ViewId;
use crate::types::SurfaceId;

/// Problems reading, checking or following the TOML config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no config file at {}", .0.display())]
    FileNotFound(PathBuf),

    /// Unreadable, unwritable or not valid TOML.
    #[error("unusable config: {0}")]
    ParseError(String),

    #[error("invalid config values: {0}")]
    ValidationError(String),

    #[error("cannot follow config changes: {0}")]
    WatchError(String),
}

/// Failures reported by the browser side when asked to manipulate a tab or window.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("host request timed out: {0}")]
    Timeout(String),

    #[error("host rejected request: {0}")]
    Rejected(String),

    #[error("host disconnected")]
    Disconnected,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("no usable snapshot location: {0}")]
    BadLocation(String),

    #[error("failed to read snapshot '{key}': {reason}")]
    Read { key: String, reason: String },

    #[error("failed to write snapshot '{key}': {reason}")]
    Write { key: String, reason: String },

    #[error("corrupt snapshot '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum SplitViewError {
    #[error("select at least 2 web pages to split (got {eligible})")]
    InsufficientSelection { eligible: usize },

    #[error("preflight probe failed: {0}")]
    ProbeFailure(String),

    #[error("view already holds the maximum of {max} panels")]
    CapacityExceeded { max: usize },

    #[error("view {0} is no longer open")]
    StaleReference(ViewId),

    #[error("failed to open surface: {0}")]
    SurfaceCreationFailure(#[source] HostError),

    #[error("surface {0} already belongs to a view")]
    SurfaceAlreadyBound(SurfaceId),

    #[error("panel not found in view {view_id}: {url}")]
    PanelNotFound { view_id: ViewId, url: String },

    #[error("a view needs at least one panel")]
    EmptyView,

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl SplitViewError {
    /// Whether this failure is shown to the user as a notice.
    ///
    /// Probe failures and stale menu references are recovered silently.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            SplitViewError::InsufficientSelection { .. }
                | SplitViewError::CapacityExceeded { .. }
                | SplitViewError::SurfaceCreationFailure(_)
        )
    }
}
