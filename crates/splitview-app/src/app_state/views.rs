//! Whole-view handlers and the render signal.

use splitview_common::{Event, SplitViewError, ViewId};
use tracing::info;

use super::core::SplitViewApp;
use super::reply::Reply;

impl SplitViewApp {
    pub(super) fn get_view(&self, view_id: &ViewId) -> Result<Reply, SplitViewError> {
        self.registry
            .get(view_id)
            .map(|view| Reply::View(view.state()))
            .ok_or_else(|| SplitViewError::StaleReference(view_id.clone()))
    }

    pub(super) fn rename_view(
        &mut self,
        view_id: &ViewId,
        name: &str,
    ) -> Result<Reply, SplitViewError> {
        let name = self.registry.rename_view(view_id, name)?;
        info!(view_id = %view_id, name = %name, "view renamed");
        self.render(view_id);
        self.persist_views();
        self.get_view(view_id)
    }

    /// Close a view from its own close button. A view that is already
    /// gone is not an error.
    pub(super) async fn close_view(&mut self, view_id: &ViewId) -> Result<Reply, SplitViewError> {
        let Some(view) = self.registry.destroy_view(view_id) else {
            return Ok(Reply::Ack);
        };
        self.close_surfaces(&view.surfaces()).await;
        self.forget_view(view_id);
        self.persist_views();
        Ok(Reply::Ack)
    }

    /// Tell the surface of a view to redraw with its current state.
    pub(super) fn render(&self, view_id: &ViewId) {
        let Some(view) = self.registry.get(view_id) else {
            return;
        };
        let Some(surface) = view.tab.or_else(|| view.windows().first().copied()) else {
            return;
        };
        self.event_bus.publish(Event::ViewRendered {
            surface,
            view: view.state(),
        });
    }

    /// Drop what belonged to a destroyed view and tell the rendering
    /// layer it is gone.
    pub(super) fn forget_view(&mut self, view_id: &ViewId) {
        self.overrides.forget_view(view_id);
        self.event_bus.publish(Event::ViewDestroyed {
            view_id: view_id.clone(),
        });
    }
}
