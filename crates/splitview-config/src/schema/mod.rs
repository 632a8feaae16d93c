//! Configuration schema.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod display;
mod framing;
mod history;
mod logging;
mod storage;

pub use display::*;
pub use framing::*;
pub use history::*;
pub use logging::*;
pub use storage::*;

use serde::{Deserialize, Serialize};
use splitview_common::OptionsUpdate;
use tracing::debug;

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SplitViewConfig {
    pub display: DisplayConfig,
    pub framing: FramingConfig,
    pub history: HistoryConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl SplitViewConfig {
    /// Apply the fields the options page sent. Returns whether anything
    /// changed.
    pub fn apply_options(&mut self, options: &OptionsUpdate) -> bool {
        let before = self.clone();
        if let Some(mode) = options.mode {
            self.display.mode = mode;
        }
        if let Some(warn) = options.warn_on_fallback {
            self.display.warn_on_fallback = warn;
        }
        if let Some(domains) = &options.force_windowed_domains {
            self.framing.force_windowed_domains = DomainList::new(domains);
        }
        let changed = *self != before;
        debug!(changed, "options applied");
        changed
    }
}
