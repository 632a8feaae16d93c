//! Creating and destroying views.

use splitview_common::{DisplayMode, SplitViewError, SurfaceId, ViewId};
use tracing::{debug, info};

use crate::naming::{derive_default_name, uniquify};
use crate::view::{Panel, View};

use super::ViewRegistry;

/// The surfaces a new view will own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewSurfaces {
    /// One tab drawing every panel in frames.
    Tab(SurfaceId),
    /// One window per panel, in panel order.
    Windows(Vec<SurfaceId>),
}

impl ViewSurfaces {
    fn all(&self) -> Vec<SurfaceId> {
        match self {
            ViewSurfaces::Tab(tab) => vec![*tab],
            ViewSurfaces::Windows(windows) => windows.clone(),
        }
    }
}

/// What closing a surface did to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceClosed {
    /// The surface belonged to no view.
    Untracked,
    /// One window of a windowed view closed; its panel is gone.
    PanelRemoved { view_id: ViewId, url: String },
    /// The owning view is gone.
    ViewDestroyed(View),
}

impl ViewRegistry {
    /// Register a view for pages that are already on screen.
    ///
    /// The name is `preferred_name` if given and non-blank, otherwise
    /// derived from the pages; either way it is made unique among live
    /// views.
    pub fn create_view(
        &mut self,
        panels: Vec<Panel>,
        preferred_name: Option<&str>,
        surfaces: ViewSurfaces,
    ) -> Result<ViewId, SplitViewError> {
        self.create_view_as(ViewId::new(), panels, preferred_name, surfaces)
    }

    /// [`create_view`](Self::create_view) with an id allocated up front,
    /// for surfaces that must know their view before it is registered.
    pub fn create_view_as(
        &mut self,
        id: ViewId,
        panels: Vec<Panel>,
        preferred_name: Option<&str>,
        surfaces: ViewSurfaces,
    ) -> Result<ViewId, SplitViewError> {
        if self.contains(&id) {
            return Err(SplitViewError::Other(format!("view {id} already exists")));
        }
        if panels.is_empty() {
            return Err(SplitViewError::EmptyView);
        }
        if panels.len() > self.max_panels {
            return Err(SplitViewError::CapacityExceeded {
                max: self.max_panels,
            });
        }
        for surface in surfaces.all() {
            if self.owners.contains_key(&surface) {
                return Err(SplitViewError::SurfaceAlreadyBound(surface));
            }
        }

        let (mode, tab, panels) = match surfaces {
            ViewSurfaces::Tab(tab) => (
                DisplayMode::Framed,
                Some(tab),
                panels
                    .into_iter()
                    .map(|p| Panel { window: None, ..p })
                    .collect::<Vec<_>>(),
            ),
            ViewSurfaces::Windows(windows) => {
                if windows.len() != panels.len() {
                    return Err(SplitViewError::Other(format!(
                        "{} windows for {} panels",
                        windows.len(),
                        panels.len()
                    )));
                }
                let panels = panels
                    .into_iter()
                    .zip(windows)
                    .map(|(p, w)| p.in_window(w))
                    .collect::<Vec<_>>();
                (DisplayMode::Windowed, None, panels)
            }
        };

        let candidate = match preferred_name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => derive_default_name(panels.iter().map(|p| (p.url.as_str(), p.title.as_str()))),
        };
        let name = uniquify(&candidate, self.names_except(None));

        let view = View {
            id,
            name,
            mode,
            panels,
            tab,
        };
        let id = view.id.clone();
        for surface in view.surfaces() {
            self.owners.insert(surface, id.clone());
        }
        info!(
            view_id = %id,
            name = %view.name,
            mode = %view.mode,
            panels = view.panels.len(),
            "view created"
        );
        self.views.push(view);
        self.bump();
        Ok(id)
    }

    /// Remove a view and release its name and surfaces.
    pub fn destroy_view(&mut self, id: &ViewId) -> Option<View> {
        let index = self.index_of(id).ok()?;
        let view = self.views.remove(index);
        for surface in view.surfaces() {
            self.owners.remove(&surface);
        }
        info!(view_id = %id, name = %view.name, "view destroyed");
        self.bump();
        Some(view)
    }

    /// A surface went away without us closing it.
    pub fn on_surface_closed(&mut self, surface: SurfaceId) -> SurfaceClosed {
        let Some(view_id) = self.owners.get(&surface).cloned() else {
            debug!(surface = %surface, "untracked surface closed");
            return SurfaceClosed::Untracked;
        };

        let Ok(index) = self.index_of(&view_id) else {
            self.owners.remove(&surface);
            return SurfaceClosed::Untracked;
        };

        let view = &mut self.views[index];
        let panel_index = view.panels.iter().position(|p| p.window == Some(surface));
        match panel_index {
            Some(i) if view.panels.len() > 1 => {
                let panel = view.panels.remove(i);
                self.owners.remove(&surface);
                debug!(view_id = %view_id, url = %panel.url, "window closed, panel removed");
                self.bump();
                SurfaceClosed::PanelRemoved {
                    view_id,
                    url: panel.url,
                }
            }
            _ => match self.destroy_view(&view_id) {
                Some(view) => SurfaceClosed::ViewDestroyed(view),
                None => SurfaceClosed::Untracked,
            },
        }
    }

    /// Drop every view. Used on shutdown.
    pub fn clear(&mut self) -> Vec<View> {
        self.owners.clear();
        if !self.views.is_empty() {
            self.bump();
        }
        std::mem::take(&mut self.views)
    }
}
