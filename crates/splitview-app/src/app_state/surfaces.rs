//! Host surface lifecycle: out-of-band closes, focus, tiling.

use std::time::Duration;

use splitview_common::{SplitViewError, SurfaceId, ViewId};
use splitview_session::SurfaceClosed;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::core::SplitViewApp;
use super::reply::Reply;

/// Focus reports this soon after raising a view are echoes of the raise.
pub(super) const RAISE_QUIET: Duration = Duration::from_millis(500);

impl SplitViewApp {
    /// The user closed a tab or window themselves.
    pub(super) async fn surface_closed(
        &mut self,
        surface: SurfaceId,
    ) -> Result<Reply, SplitViewError> {
        match self.registry.on_surface_closed(surface) {
            SurfaceClosed::Untracked => return Ok(Reply::Ack),
            SurfaceClosed::PanelRemoved { view_id, url } => {
                info!(view_id = %view_id, url = %url, "panel window closed");
                self.retile(&view_id).await;
            }
            SurfaceClosed::ViewDestroyed(view) => {
                info!(view_id = %view.id, surface = %surface, "view surface closed");
                let leftovers: Vec<SurfaceId> =
                    view.surfaces().into_iter().filter(|s| *s != surface).collect();
                self.close_surfaces(&leftovers).await;
                self.forget_view(&view.id);
            }
        }
        self.persist_views();
        Ok(Reply::Ack)
    }

    /// Bring every window of a windowed view forward together, leaving
    /// the focused one on top.
    ///
    /// Raising windows makes the host report focus changes for them;
    /// those arrive within [`RAISE_QUIET`] and are ignored.
    pub(super) async fn surface_focused(
        &mut self,
        surface: SurfaceId,
    ) -> Result<Reply, SplitViewError> {
        let Some(view_id) = self.registry.owner_of(surface).cloned() else {
            return Ok(Reply::Ack);
        };
        let siblings = self.registry.sibling_windows(surface);
        if siblings.len() < 2 {
            return Ok(Reply::Ack);
        }
        let now = Instant::now();
        if let Some((raised, at)) = &self.raised {
            if *raised == view_id && now.duration_since(*at) < RAISE_QUIET {
                return Ok(Reply::Ack);
            }
        }
        self.raised = Some((view_id, now));

        let others = siblings.iter().filter(|w| **w != surface);
        for window in others.chain(std::iter::once(&surface)) {
            if let Err(e) = self.host.focus_surface(*window).await {
                debug!(surface = %window, error = %e, "focus failed");
            }
        }
        Ok(Reply::Ack)
    }

    /// Close surfaces the registry no longer tracks. Failures are logged;
    /// the surface may already be gone.
    pub(super) async fn close_surfaces(&self, surfaces: &[SurfaceId]) {
        for surface in surfaces {
            if let Err(e) = self.host.close_surface(*surface).await {
                warn!(surface = %surface, error = %e, "failed to close surface");
            }
        }
    }

    /// Lay the windows of a windowed view out side by side again.
    pub(super) async fn retile(&self, view_id: &ViewId) {
        let Some(view) = self.registry.get(view_id) else {
            return;
        };
        let windows = view.windows();
        if windows.is_empty() {
            return;
        }
        let display = match self.host.display_bounds().await {
            Ok(display) => display,
            Err(e) => {
                warn!(view_id = %view_id, error = %e, "cannot retile without display bounds");
                return;
            }
        };
        for placement in splitview_tiling::retile(&windows, display) {
            if let Err(e) = self
                .host
                .set_window_bounds(placement.surface, placement.bounds)
                .await
            {
                warn!(surface = %placement.surface, error = %e, "failed to move window");
            }
        }
    }
}
