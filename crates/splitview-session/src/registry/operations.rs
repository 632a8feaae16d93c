//! Mutating the panels and names of live views.

use splitview_common::{SplitViewError, SurfaceId, ViewId};
use tracing::{debug, info};

use crate::matching::find_panel;
use crate::naming::uniquify;
use crate::view::{Panel, View};

use super::ViewRegistry;

/// Result of [`ViewRegistry::remove_panel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedPanel {
    pub panel: Panel,
    /// URLs still in the view; empty when the view was destroyed.
    pub remaining: Vec<String>,
    /// Set when the removed panel was the last one.
    pub destroyed: Option<View>,
}

impl ViewRegistry {
    /// Append a panel. Windowed views must pass the new panel's window.
    pub fn add_panel(&mut self, id: &ViewId, panel: Panel) -> Result<&View, SplitViewError> {
        let index = self.index_of(id)?;
        if self.views[index].panels.len() >= self.max_panels {
            return Err(SplitViewError::CapacityExceeded {
                max: self.max_panels,
            });
        }
        if let Some(window) = panel.window {
            if self.owners.contains_key(&window) {
                return Err(SplitViewError::SurfaceAlreadyBound(window));
            }
            self.owners.insert(window, id.clone());
        }

        debug!(view_id = %id, url = %panel.url, "panel added");
        self.views[index].panels.push(panel);
        self.bump();
        Ok(&self.views[index])
    }

    /// Remove the panel `url` refers to. Removing the last panel
    /// destroys the view.
    pub fn remove_panel(&mut self, id: &ViewId, url: &str) -> Result<RemovedPanel, SplitViewError> {
        let index = self.index_of(id)?;
        let view = &mut self.views[index];
        let position = find_panel(view.panels.iter().map(|p| p.url.as_str()), url).ok_or_else(
            || SplitViewError::PanelNotFound {
                view_id: id.clone(),
                url: url.to_string(),
            },
        )?;

        let panel = view.panels.remove(position);
        if let Some(window) = panel.window {
            self.owners.remove(&window);
        }

        if self.views[index].panels.is_empty() {
            let destroyed = self.destroy_view(id);
            return Ok(RemovedPanel {
                panel,
                remaining: Vec::new(),
                destroyed,
            });
        }

        debug!(view_id = %id, url = %panel.url, "panel removed");
        self.bump();
        Ok(RemovedPanel {
            panel,
            remaining: self.views[index].urls(),
            destroyed: None,
        })
    }

    /// Replace the member URLs of a framed view.
    ///
    /// Windowed views accept only an update that keeps the panel count,
    /// since each panel is tied to a window.
    pub fn update_urls(&mut self, id: &ViewId, urls: Vec<String>) -> Result<&View, SplitViewError> {
        let index = self.index_of(id)?;
        if urls.is_empty() {
            return Err(SplitViewError::EmptyView);
        }
        if urls.len() > self.max_panels {
            return Err(SplitViewError::CapacityExceeded {
                max: self.max_panels,
            });
        }

        let view = &mut self.views[index];
        if view.tab.is_none() && urls.len() != view.panels.len() {
            return Err(SplitViewError::Protocol(format!(
                "windowed view {id} has {} panels, got {} urls",
                view.panels.len(),
                urls.len()
            )));
        }

        let old = std::mem::take(&mut view.panels);
        view.panels = urls
            .into_iter()
            .enumerate()
            .map(|(i, url)| match old.get(i) {
                Some(prev) if prev.url == url => prev.clone(),
                Some(prev) => Panel {
                    url,
                    title: String::new(),
                    warning_domain: None,
                    window: prev.window,
                },
                None => Panel::new(url, ""),
            })
            .collect();
        debug!(view_id = %id, panels = view.panels.len(), "panel urls replaced");
        self.bump();
        Ok(&self.views[index])
    }

    /// Record that the page in panel `index` navigated elsewhere.
    pub fn set_panel_url(
        &mut self,
        id: &ViewId,
        index: usize,
        url: &str,
    ) -> Result<(), SplitViewError> {
        let view_index = self.index_of(id)?;
        let panel = self.views[view_index]
            .panels
            .get_mut(index)
            .ok_or_else(|| SplitViewError::PanelNotFound {
                view_id: id.clone(),
                url: format!("#{index}"),
            })?;
        if panel.url != url {
            panel.url = url.to_string();
            self.bump();
        }
        Ok(())
    }

    /// Rename a view; the name is made unique against the others.
    pub fn rename_view(&mut self, id: &ViewId, name: &str) -> Result<String, SplitViewError> {
        let index = self.index_of(id)?;
        let candidate = name.trim();
        if candidate.is_empty() || candidate == self.views[index].name {
            return Ok(self.views[index].name.clone());
        }
        let unique = uniquify(candidate, self.names_except(Some(id)));
        info!(view_id = %id, name = %unique, "view renamed");
        self.views[index].name = unique.clone();
        self.bump();
        Ok(unique)
    }

    /// Drop the warning overlay from every panel showing `domain`.
    /// Returns how many panels changed.
    pub fn clear_warning(&mut self, id: &ViewId, domain: &str) -> Result<usize, SplitViewError> {
        let index = self.index_of(id)?;
        let mut cleared = 0;
        for panel in &mut self.views[index].panels {
            if panel.warning_domain.as_deref() == Some(domain) {
                panel.warning_domain = None;
                cleared += 1;
            }
        }
        if cleared > 0 {
            self.bump();
        }
        Ok(cleared)
    }

    /// Set or clear the warning overlay of panel `index`.
    pub fn set_warning(
        &mut self,
        id: &ViewId,
        index: usize,
        domain: Option<String>,
    ) -> Result<(), SplitViewError> {
        let view_index = self.index_of(id)?;
        let panel = self.views[view_index]
            .panels
            .get_mut(index)
            .ok_or_else(|| SplitViewError::PanelNotFound {
                view_id: id.clone(),
                url: format!("#{index}"),
            })?;
        if panel.warning_domain != domain {
            panel.warning_domain = domain;
            self.bump();
        }
        Ok(())
    }

    /// Windows of the view owning `surface`, when that view is windowed.
    pub fn sibling_windows(&self, surface: SurfaceId) -> Vec<SurfaceId> {
        self.owner_of(surface)
            .and_then(|id| self.get(id))
            .filter(|v| v.tab.is_none())
            .map(View::windows)
            .unwrap_or_default()
    }
}
