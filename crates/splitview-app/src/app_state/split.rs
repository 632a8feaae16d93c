//! The split action: selected pages in, one new view out.

use splitview_common::{
    DisplayMode, Event, FallbackStyle, SelectedItem, SplitViewError, SurfaceId, ViewId,
};
use splitview_framing::{assess, compose, AssessMode, Assessment};
use splitview_session::{Panel, ViewSurfaces};
use tracing::{info, warn};

use super::core::SplitViewApp;
use super::dispatch::fallback_notice;
use super::reply::Reply;
use crate::host::WindowRequest;

impl SplitViewApp {
    pub(super) async fn split_selected(
        &mut self,
        items: Vec<SelectedItem>,
    ) -> Result<Reply, SplitViewError> {
        let mut pages: Vec<SelectedItem> =
            items.into_iter().filter(SelectedItem::is_web_page).collect();
        if pages.len() < 2 {
            return Err(SplitViewError::InsufficientSelection {
                eligible: pages.len(),
            });
        }
        let max = self.registry.max_panels();
        if pages.len() > max {
            warn!(
                selected = pages.len(),
                max,
                "selection exceeds the panel limit, keeping the first pages"
            );
            pages.truncate(max);
        }

        let urls: Vec<String> = pages.iter().map(|p| p.url.clone()).collect();
        let prefs = self.preferences();
        let assessment = match prefs.mode {
            DisplayMode::Framed => {
                let mode = match prefs.fallback {
                    FallbackStyle::Windowed => AssessMode::StopOnBlock,
                    FallbackStyle::Overlay => AssessMode::Complete,
                };
                assess(&self.resolver, &urls, mode, &self.cancel)
                    .await
                    .map_err(|e| SplitViewError::ProbeFailure(e.to_string()))?
            }
            DisplayMode::Windowed => Assessment::unprobed(urls.len()),
        };

        let overrides = &self.overrides;
        let plan = compose(prefs, &urls, &assessment, |domain| overrides.allows(None, domain));
        if plan.fell_back(prefs.mode) && prefs.warn_on_fallback {
            self.event_bus
                .publish(Event::Notice(fallback_notice(&plan.refused)));
        }

        let panels: Vec<Panel> = pages
            .iter()
            .zip(plan.panels)
            .map(|(page, state)| {
                Panel::new(&page.url, &page.title).with_warning(state.warning_domain)
            })
            .collect();

        let id = ViewId::new();
        let surfaces = match plan.mode {
            DisplayMode::Framed => {
                let tab = self
                    .host
                    .open_view_tab(&id)
                    .await
                    .map_err(SplitViewError::SurfaceCreationFailure)?;
                ViewSurfaces::Tab(tab)
            }
            DisplayMode::Windowed => ViewSurfaces::Windows(self.open_windows(&pages).await?),
        };
        let opened: Vec<SurfaceId> = match &surfaces {
            ViewSurfaces::Tab(tab) => vec![*tab],
            ViewSurfaces::Windows(windows) => windows.clone(),
        };

        if let Err(e) = self.registry.create_view_as(id.clone(), panels, None, surfaces) {
            self.close_surfaces(&opened).await;
            return Err(e);
        }
        info!(view_id = %id, mode = %plan.mode, panels = pages.len(), "view created");

        self.render(&id);
        self.record_history(pages.iter().map(|p| (p.url.as_str(), p.title.as_str())));
        self.persist_views();
        self.persist_history();
        Ok(Reply::Created(id))
    }

    /// Open one tiled window per page. Windows already opened are closed
    /// again if a later one fails.
    async fn open_windows(&self, pages: &[SelectedItem]) -> Result<Vec<SurfaceId>, SplitViewError> {
        let display = self
            .host
            .display_bounds()
            .await
            .map_err(SplitViewError::SurfaceCreationFailure)?;
        let rects = splitview_tiling::plan(pages.len(), display);

        let mut opened = Vec::with_capacity(pages.len());
        for (page, bounds) in pages.iter().zip(rects) {
            let request = WindowRequest {
                url: page.url.clone(),
                bounds,
                tab_id: page.tab_id,
            };
            match self.host.open_window(request).await {
                Ok(window) => opened.push(window),
                Err(e) => {
                    warn!(
                        error = %e,
                        opened = opened.len(),
                        "window creation failed, rolling back"
                    );
                    self.close_surfaces(&opened).await;
                    return Err(SplitViewError::SurfaceCreationFailure(e));
                }
            }
        }
        Ok(opened)
    }
}
