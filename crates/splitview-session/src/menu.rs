//! The "add to split view" context menu model.

use serde::{Deserialize, Serialize};
use splitview_common::MenuEntry;

use crate::registry::ViewRegistry;

/// What the host menu should show right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSnapshot {
    pub revision: u64,
    pub entries: Vec<MenuEntry>,
}

impl MenuSnapshot {
    pub fn of(registry: &ViewRegistry) -> Self {
        Self {
            revision: registry.revision(),
            entries: registry.menu_entries(),
        }
    }

    /// The parent item is hidden when no view is live.
    pub fn enabled(&self) -> bool {
        !self.entries.is_empty()
    }
}
