//! The browser side of the controller: tabs, windows, and pages.
//!
//! The controller never talks to a browser API directly. Everything it
//! needs from the host goes through [`SurfaceHost`], which the native
//! messaging transport implements and tests replace with a recording fake.

#[cfg(test)]
pub mod recording;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use splitview_common::{HostError, ScreenRect, SurfaceId, ViewId};

/// A window to open for one panel of a windowed view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowRequest {
    pub url: String,
    pub bounds: ScreenRect,
    /// Existing tab to move into the window instead of loading `url` again.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<u64>,
}

/// Extension pages the host knows how to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostPage {
    Options,
    Welcome,
}

#[async_trait]
pub trait SurfaceHost: Send + Sync {
    /// Open the tab that renders a framed view. Returns a `SurfaceId::Tab`.
    async fn open_view_tab(&self, view_id: &ViewId) -> Result<SurfaceId, HostError>;

    /// Open a popup window. Returns a `SurfaceId::Window`.
    async fn open_window(&self, request: WindowRequest) -> Result<SurfaceId, HostError>;

    async fn set_window_bounds(
        &self,
        window: SurfaceId,
        bounds: ScreenRect,
    ) -> Result<(), HostError>;

    async fn close_surface(&self, surface: SurfaceId) -> Result<(), HostError>;

    async fn focus_surface(&self, surface: SurfaceId) -> Result<(), HostError>;

    /// Work area of the display new windows are tiled across.
    async fn display_bounds(&self) -> Result<ScreenRect, HostError>;

    async fn open_page(&self, page: HostPage) -> Result<(), HostError>;

    /// Replace the dynamic header-rewrite rules. An empty list removes them.
    async fn apply_header_rules(&self, rules: Vec<serde_json::Value>) -> Result<(), HostError>;
}
