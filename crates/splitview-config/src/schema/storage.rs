use serde::{Deserialize, Serialize};

/// Lifetime of the stored view registry snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewsScope {
    /// Cleared on every start.
    #[default]
    Session,
    /// Kept across restarts for inspection; never used to revive views.
    Install,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub views_scope: ViewsScope,
}
