//! Turning verdicts into a concrete view layout.

use splitview_common::{DisplayMode, FallbackStyle, PanelState};
use tracing::info;

use crate::assess::Assessment;
use crate::rules::host_of;

/// The display settings that decide how refusals are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FramingPreferences {
    pub mode: DisplayMode,
    pub fallback: FallbackStyle,
    pub warn_on_fallback: bool,
}

/// How a view will actually be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewPlan {
    pub mode: DisplayMode,
    pub panels: Vec<PanelState>,
    /// Domains that refused framing and were not overridden, in URL
    /// order, deduplicated.
    pub refused: Vec<String>,
}

impl ViewPlan {
    /// True when a framed preference was turned into windows.
    pub fn fell_back(&self, preferred: DisplayMode) -> bool {
        preferred == DisplayMode::Framed && self.mode == DisplayMode::Windowed
    }
}

/// Domain shown in warnings and used as the override key.
pub fn warning_domain(url: &str) -> String {
    host_of(url).unwrap_or_else(|| url.to_string())
}

/// Decide the mode and per-panel annotations of a view.
///
/// `overridden` reports domains the user already accepted. A windowed
/// preference ignores the assessment entirely.
pub fn compose(
    prefs: FramingPreferences,
    urls: &[String],
    assessment: &Assessment,
    overridden: impl Fn(&str) -> bool,
) -> ViewPlan {
    if prefs.mode == DisplayMode::Windowed {
        return ViewPlan {
            mode: DisplayMode::Windowed,
            panels: urls.iter().map(PanelState::plain).collect(),
            refused: Vec::new(),
        };
    }

    let mut refused: Vec<String> = Vec::new();
    let mut refused_at = vec![false; urls.len()];
    for (index, _) in assessment.blocked() {
        let Some(url) = urls.get(index) else { continue };
        let domain = warning_domain(url);
        if overridden(&domain) {
            continue;
        }
        refused_at[index] = true;
        if !refused.contains(&domain) {
            refused.push(domain);
        }
    }

    if refused.is_empty() {
        return ViewPlan {
            mode: DisplayMode::Framed,
            panels: urls.iter().map(PanelState::plain).collect(),
            refused,
        };
    }

    match prefs.fallback {
        FallbackStyle::Windowed => {
            info!(refused = ?refused, "framing refused, falling back to windows");
            ViewPlan {
                mode: DisplayMode::Windowed,
                panels: urls.iter().map(PanelState::plain).collect(),
                refused,
            }
        }
        FallbackStyle::Overlay => {
            let panels = urls
                .iter()
                .zip(refused_at)
                .map(|(url, blocked)| PanelState {
                    url: url.clone(),
                    warning_domain: (blocked && prefs.warn_on_fallback)
                        .then(|| warning_domain(url)),
                })
                .collect();
            ViewPlan {
                mode: DisplayMode::Framed,
                panels,
                refused,
            }
        }
    }
}
