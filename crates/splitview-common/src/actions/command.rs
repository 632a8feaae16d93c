use serde::{Deserialize, Serialize};

use crate::id::ViewId;
use crate::types::{DisplayMode, SurfaceId};

/// A page the user had selected when triggering the split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedItem {
    pub url: String,
    #[serde(default)]
    pub title: String,
    /// Host tab currently showing the page, if any. Windowed views move
    /// this tab into its own window instead of reloading the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<u64>,
}

impl SelectedItem {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            tab_id: None,
        }
    }

    /// Only loaded web pages can be split.
    pub fn is_web_page(&self) -> bool {
        let lower = self.url.trim_start().to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }
}

/// Why the extension (re)started, as reported by the host
/// (`install`, `update`, `browser_update`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstallReason(pub String);

impl InstallReason {
    pub fn is_first_install(&self) -> bool {
        self.0 == "install"
    }
}

/// Fields the options page can change. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<DisplayMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warn_on_fallback: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_windowed_domains: Option<Vec<String>>,
}

/// Every request the controller understands.
///
/// The toolbar button, the context menu, view pages, the options page, and
/// host lifecycle notifications all resolve to a `Command`. The controller
/// has exactly one handler per variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Command {
    // -- Views --
    SplitSelected {
        items: Vec<SelectedItem>,
    },
    GetView {
        view_id: ViewId,
    },
    RenameView {
        view_id: ViewId,
        name: String,
    },
    CloseView {
        view_id: ViewId,
    },

    // -- Panels --
    AddToView {
        view_id: ViewId,
        url: String,
        #[serde(default)]
        title: String,
    },
    MenuClicked {
        menu_item_id: String,
        url: String,
        #[serde(default)]
        title: String,
    },
    RemovePanel {
        view_id: ViewId,
        url: String,
    },
    UpdateUrls {
        view_id: ViewId,
        urls: Vec<String>,
    },
    PanelNavigated {
        view_id: ViewId,
        index: usize,
        url: String,
    },
    ShowAnyway {
        view_id: ViewId,
        url: String,
    },

    // -- Host surfaces --
    SurfaceClosed {
        surface: SurfaceId,
    },
    SurfaceFocused {
        surface: SurfaceId,
    },

    // -- Framing --
    ResolveUrl {
        url: String,
    },

    // -- Config / lifecycle --
    SaveOptions {
        options: OptionsUpdate,
    },
    ReloadConfig,
    OpenOptions,
    Installed {
        reason: InstallReason,
    },
    Shutdown,
}

impl Command {
    /// Short name used in log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Command::SplitSelected { .. } => "split_selected",
            Command::GetView { .. } => "get_view",
            Command::RenameView { .. } => "rename_view",
            Command::CloseView { .. } => "close_view",
            Command::AddToView { .. } => "add_to_view",
            Command::MenuClicked { .. } => "menu_clicked",
            Command::RemovePanel { .. } => "remove_panel",
            Command::UpdateUrls { .. } => "update_urls",
            Command::PanelNavigated { .. } => "panel_navigated",
            Command::ShowAnyway { .. } => "show_anyway",
            Command::SurfaceClosed { .. } => "surface_closed",
            Command::SurfaceFocused { .. } => "surface_focused",
            Command::ResolveUrl { .. } => "resolve_url",
            Command::SaveOptions { .. } => "save_options",
            Command::ReloadConfig => "reload_config",
            Command::OpenOptions => "open_options",
            Command::Installed { .. } => "installed",
            Command::Shutdown => "shutdown",
        }
    }

    /// Whether the command can change registry state.
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Command::GetView { .. }
                | Command::ResolveUrl { .. }
                | Command::OpenOptions
                | Command::SurfaceFocused { .. }
        )
    }
}
