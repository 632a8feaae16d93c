//! How views are presented.

use serde::{Deserialize, Serialize};
use splitview_common::DisplayMode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Preferred mode for new views.
    pub mode: DisplayMode,
    /// Tell the user when framing is refused (notice or overlay).
    pub warn_on_fallback: bool,
    /// Maximum panels per view (valid range: 2-8).
    pub max_panels: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Framed,
            warn_on_fallback: true,
            max_panels: 4,
        }
    }
}
