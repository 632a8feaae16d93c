use serde::{Deserialize, Serialize};
use splitview_common::{DisplayMode, PanelState, SurfaceId, ViewId, ViewState};

/// One page inside a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_domain: Option<String>,
    /// The window showing this panel, for windowed views.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<SurfaceId>,
}

impl Panel {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            warning_domain: None,
            window: None,
        }
    }

    pub fn with_warning(mut self, domain: Option<String>) -> Self {
        self.warning_domain = domain;
        self
    }

    pub fn in_window(mut self, window: SurfaceId) -> Self {
        self.window = Some(window);
        self
    }
}

/// A live split view.
///
/// Framed views are drawn by a single tab. Windowed views have one
/// window per panel and no tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    pub id: ViewId,
    pub name: String,
    pub mode: DisplayMode,
    pub panels: Vec<Panel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab: Option<SurfaceId>,
}

impl View {
    pub fn urls(&self) -> Vec<String> {
        self.panels.iter().map(|p| p.url.clone()).collect()
    }

    /// Every surface this view owns.
    pub fn surfaces(&self) -> Vec<SurfaceId> {
        self.tab
            .into_iter()
            .chain(self.panels.iter().filter_map(|p| p.window))
            .collect()
    }

    pub fn windows(&self) -> Vec<SurfaceId> {
        self.panels.iter().filter_map(|p| p.window).collect()
    }

    pub fn state(&self) -> ViewState {
        ViewState {
            id: self.id.clone(),
            name: self.name.clone(),
            mode: self.mode,
            panels: self
                .panels
                .iter()
                .map(|p| PanelState {
                    url: p.url.clone(),
                    warning_domain: p.warning_domain.clone(),
                })
                .collect(),
        }
    }
}
