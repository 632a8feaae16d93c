//! Frame-permission settings.

use serde::{Deserialize, Deserializer, Serialize};
use splitview_common::{FallbackStyle, OverrideScope};

/// Hosts that always open windowed.
///
/// Accepts a TOML array or a single newline-delimited string, the
/// format the options page stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DomainList(Vec<String>);

impl DomainList {
    /// Trimmed, non-blank entries in their original order.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            entries
                .into_iter()
                .map(|e| e.as_ref().trim().to_string())
                .filter(|e| !e.is_empty())
                .collect(),
        )
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for DomainList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            List(Vec<String>),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::List(items) => Self::new(items),
            Raw::Text(text) => Self::new(text.lines()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingConfig {
    pub force_windowed_domains: DomainList,
    /// Preflight probe timeout in milliseconds (valid range: 100-30000).
    pub probe_timeout_ms: u64,
    pub fallback: FallbackStyle,
    pub override_scope: OverrideScope,
    /// Treat `frame-ancestors 'self'` as a refusal.
    pub block_on_frame_ancestors_self: bool,
    /// Strip anti-framing headers from sub-frames of the view surface.
    pub strip_headers: bool,
    /// Origin of the view surface, e.g. `moz-extension://<uuid>`.
    pub extension_origin: String,
    pub user_agent: String,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            force_windowed_domains: DomainList::default(),
            probe_timeout_ms: 2500,
            fallback: FallbackStyle::Windowed,
            override_scope: OverrideScope::View,
            block_on_frame_ancestors_self: true,
            strip_headers: true,
            extension_origin: String::new(),
            user_agent: format!("splitview/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
