use serde::{Deserialize, Serialize};

use crate::id::ViewId;

use super::DisplayMode;

/// One panel as the rendering layer should show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    pub url: String,
    /// Set when the panel must show the framing warning overlay instead of
    /// loading the page. Names the domain that refused framing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_domain: Option<String>,
}

impl PanelState {
    pub fn plain(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            warning_domain: None,
        }
    }
}

/// Everything a view surface needs to (re)draw itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub id: ViewId,
    pub name: String,
    pub mode: DisplayMode,
    pub panels: Vec<PanelState>,
}

impl ViewState {
    pub fn urls(&self) -> Vec<String> {
        self.panels.iter().map(|p| p.url.clone()).collect()
    }
}

/// One "add current tab to view" menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub id: ViewId,
    pub name: String,
}

impl MenuEntry {
    /// Prefix of the host menu item id; the view id follows it.
    pub const ITEM_PREFIX: &'static str = "add-to-";

    pub fn item_id(&self) -> String {
        format!("{}{}", Self::ITEM_PREFIX, self.id)
    }

    /// Recover the view id from a host menu item id.
    pub fn parse_item_id(item_id: &str) -> Option<ViewId> {
        item_id
            .strip_prefix(Self::ITEM_PREFIX)
            .and_then(ViewId::parse)
    }
}
