use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer screen rectangle in host (CSS pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenRect {
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.left as i64 + self.width as i64
    }
}

/// Handle to a host tab or window. Tab and window ids live in separate
/// namespaces on the browser side, so the kind is part of the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceId {
    Tab(u64),
    Window(u64),
}

impl SurfaceId {
    pub fn is_window(&self) -> bool {
        matches!(self, SurfaceId::Window(_))
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceId::Tab(id) => write!(f, "tab-{id}"),
            SurfaceId::Window(id) => write!(f, "window-{id}"),
        }
    }
}

/// How the panels of a view are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Embedded frames inside one tab.
    #[default]
    #[serde(alias = "tab")]
    Framed,
    /// One tiled window per panel.
    #[serde(alias = "window")]
    Windowed,
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Framed => f.write_str("framed"),
            DisplayMode::Windowed => f.write_str("windowed"),
        }
    }
}

/// What a framed view does with a page that refuses to be framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FallbackStyle {
    /// Open the whole view as tiled windows instead.
    #[default]
    Windowed,
    /// Keep the view framed and cover refusing panels with a warning.
    Overlay,
}

/// How long a "show anyway" grant lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverrideScope {
    /// Until the view it was granted in is destroyed.
    #[default]
    View,
    /// Stored, and honoured by every later view.
    Persistent,
}
