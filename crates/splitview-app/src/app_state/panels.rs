//! Panel handlers: adding, removing, editing, and overriding panels.

use splitview_common::{DisplayMode, MenuEntry, SplitViewError, ViewId};
use splitview_framing::warning_domain;
use splitview_session::Panel;
use tracing::{debug, info};

use super::core::SplitViewApp;
use super::reply::Reply;
use crate::host::WindowRequest;

impl SplitViewApp {
    pub(super) async fn add_to_view(
        &mut self,
        view_id: &ViewId,
        url: &str,
        title: &str,
    ) -> Result<Reply, SplitViewError> {
        let Some(view) = self.registry.get(view_id) else {
            // The menu outlived its view; rebuild it and move on.
            debug!(view_id = %view_id, "add to a view that is gone");
            self.publish_menu(true);
            return Ok(Reply::Ack);
        };
        if url.trim().is_empty() {
            return Err(SplitViewError::InvalidUrl(url.to_string()));
        }
        let max = self.registry.max_panels();
        if view.panels.len() >= max {
            return Err(SplitViewError::CapacityExceeded { max });
        }
        let mode = view.mode;
        let window_count = view.windows().len();

        let panel = Panel::new(url, title);
        match mode {
            DisplayMode::Framed => {
                let warning = self.framed_warning(view_id, url).await;
                self.registry.add_panel(view_id, panel.with_warning(warning))?;
                self.render(view_id);
            }
            DisplayMode::Windowed => {
                let display = self
                    .host
                    .display_bounds()
                    .await
                    .map_err(SplitViewError::SurfaceCreationFailure)?;
                let bounds = splitview_tiling::plan(window_count + 1, display)
                    .last()
                    .copied()
                    .unwrap_or(display);
                let window = self
                    .host
                    .open_window(WindowRequest {
                        url: url.to_string(),
                        bounds,
                        tab_id: None,
                    })
                    .await
                    .map_err(SplitViewError::SurfaceCreationFailure)?;
                if let Err(e) = self.registry.add_panel(view_id, panel.in_window(window)) {
                    self.close_surfaces(&[window]).await;
                    return Err(e);
                }
                self.retile(view_id).await;
            }
        }

        info!(view_id = %view_id, url = %url, "page added to view");
        self.record_history([(url, title)]);
        self.persist_views();
        self.persist_history();
        self.get_view(view_id)
    }

    /// Menu item ids look like `add-to-<view id>`. Anything else belongs
    /// to another menu and is ignored.
    pub(super) async fn menu_clicked(
        &mut self,
        menu_item_id: &str,
        url: &str,
        title: &str,
    ) -> Result<Reply, SplitViewError> {
        match MenuEntry::parse_item_id(menu_item_id) {
            Some(view_id) => self.add_to_view(&view_id, url, title).await,
            None => {
                debug!(menu_item_id, "ignoring foreign menu item");
                Ok(Reply::Ack)
            }
        }
    }

    pub(super) async fn remove_panel(
        &mut self,
        view_id: &ViewId,
        url: &str,
    ) -> Result<Reply, SplitViewError> {
        let removed = self.registry.remove_panel(view_id, url)?;
        if let Some(window) = removed.panel.window {
            self.close_surfaces(&[window]).await;
        }

        match removed.destroyed {
            Some(view) => {
                info!(view_id = %view_id, "last panel removed");
                self.close_surfaces(&view.surfaces()).await;
                self.forget_view(view_id);
            }
            None if removed.panel.window.is_some() => self.retile(view_id).await,
            None => self.render(view_id),
        }

        self.persist_views();
        Ok(Reply::Remaining(removed.remaining))
    }

    /// Replace the member list from the address bar. Changed URLs are
    /// checked again so their warnings stay accurate.
    pub(super) async fn update_urls(
        &mut self,
        view_id: &ViewId,
        urls: Vec<String>,
    ) -> Result<Reply, SplitViewError> {
        let before = self
            .registry
            .get(view_id)
            .ok_or_else(|| SplitViewError::StaleReference(view_id.clone()))?
            .urls();
        let view = self.registry.update_urls(view_id, urls)?;
        let framed = view.mode == DisplayMode::Framed;
        let changed: Vec<(usize, String)> = view
            .panels
            .iter()
            .enumerate()
            .filter(|(i, p)| before.get(*i) != Some(&p.url))
            .map(|(i, p)| (i, p.url.clone()))
            .collect();

        if framed {
            for (index, url) in changed {
                let warning = self.framed_warning(view_id, &url).await;
                self.registry.set_warning(view_id, index, warning)?;
            }
        }

        self.render(view_id);
        self.persist_views();
        self.get_view(view_id)
    }

    pub(super) fn panel_navigated(
        &mut self,
        view_id: &ViewId,
        index: usize,
        url: &str,
    ) -> Result<Reply, SplitViewError> {
        self.registry.set_panel_url(view_id, index, url)?;
        self.persist_views();
        Ok(Reply::Ack)
    }

    /// The user accepted a refusing page. Every panel of the view on that
    /// domain loses its warning.
    pub(super) fn show_anyway(
        &mut self,
        view_id: &ViewId,
        url: &str,
    ) -> Result<Reply, SplitViewError> {
        if !self.registry.contains(view_id) {
            return Err(SplitViewError::StaleReference(view_id.clone()));
        }
        let domain = warning_domain(url);
        if self.overrides.grant(view_id, &domain) {
            self.persist_overrides();
        }
        let cleared = self.registry.clear_warning(view_id, &domain)?;
        debug!(view_id = %view_id, domain = %domain, cleared, "warning dismissed");

        self.render(view_id);
        self.persist_views();
        self.get_view(view_id)
    }

    /// Warning to show on a page added to a framed view, if it refuses
    /// framing and the user has not accepted its domain.
    ///
    /// An existing framed view cannot turn into windows, so a refusing
    /// page always gets the overlay here.
    pub(super) async fn framed_warning(&self, view_id: &ViewId, url: &str) -> Option<String> {
        let verdict = self.resolver.resolve(url).await;
        if !verdict.is_blocked() {
            return None;
        }
        let domain = warning_domain(url);
        if self.overrides.allows(Some(view_id), &domain) {
            return None;
        }
        info!(
            view_id = %view_id,
            domain = %domain,
            trigger = ?verdict.trigger(),
            "added page refuses framing"
        );
        self.config.display.warn_on_fallback.then_some(domain)
    }
}
