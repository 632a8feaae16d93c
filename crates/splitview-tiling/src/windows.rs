//! Re-tiling the windows of a windowed view.

use splitview_common::types::{ScreenRect, SurfaceId};
use tracing::debug;

use crate::layout::plan;

/// Where one window of a windowed view should be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    pub surface: SurfaceId,
    pub bounds: ScreenRect,
}

/// Assign each window a column of `display`, in panel order.
pub fn retile(windows: &[SurfaceId], display: ScreenRect) -> Vec<TilePlacement> {
    let placements: Vec<TilePlacement> = windows
        .iter()
        .zip(plan(windows.len(), display))
        .map(|(surface, bounds)| TilePlacement {
            surface: *surface,
            bounds,
        })
        .collect();
    debug!(count = placements.len(), "retiled windows");
    placements
}
