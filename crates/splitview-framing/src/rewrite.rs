//! Response-header rewrite applied at the network layer.
//!
//! Last line of defence when a probe said "allowed" but the real
//! response refuses framing. Only sub-frame responses embedded by the
//! view surface are touched; top-level navigations never are.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

const STRIPPED: [&str; 2] = ["x-frame-options", "content-security-policy"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    MainFrame,
    SubFrame,
    Other,
}

/// What the network layer knows about a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseContext {
    pub resource_type: ResourceType,
    /// Origin of the document that embeds the frame.
    #[serde(default)]
    pub initiator: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRewritePolicy {
    enabled: bool,
    extension_origin: String,
}

impl HeaderRewritePolicy {
    pub fn new(enabled: bool, extension_origin: &str) -> Self {
        let extension_origin = normalize_origin(extension_origin);
        if enabled && extension_origin.is_empty() {
            warn!("header stripping enabled without an extension origin; it will never apply");
        }
        Self {
            enabled,
            extension_origin,
        }
    }

    pub fn is_active(&self) -> bool {
        self.enabled && !self.extension_origin.is_empty()
    }

    pub fn should_strip(&self, ctx: &ResponseContext) -> bool {
        self.is_active()
            && ctx.resource_type == ResourceType::SubFrame
            && ctx
                .initiator
                .as_deref()
                .is_some_and(|origin| normalize_origin(origin) == self.extension_origin)
    }

    /// Remove the anti-framing headers in place. Returns how many were
    /// removed.
    pub fn apply(&self, ctx: &ResponseContext, headers: &mut Vec<(String, String)>) -> usize {
        if !self.should_strip(ctx) {
            return 0;
        }
        let before = headers.len();
        headers.retain(|(name, _)| !STRIPPED.iter().any(|h| name.eq_ignore_ascii_case(h)));
        let removed = before - headers.len();
        if removed > 0 {
            debug!(removed, "stripped framing headers");
        }
        removed
    }

    /// The same policy as a browser `declarativeNetRequest` dynamic rule.
    pub fn declarative_rule(&self, id: u32) -> Option<serde_json::Value> {
        if !self.is_active() {
            return None;
        }
        let initiator = self
            .extension_origin
            .split_once("://")
            .map(|(_, host)| host)
            .unwrap_or(&self.extension_origin);
        Some(json!({
            "id": id,
            "priority": 1,
            "action": {
                "type": "modifyHeaders",
                "responseHeaders": STRIPPED
                    .iter()
                    .map(|h| json!({ "header": h, "operation": "remove" }))
                    .collect::<Vec<_>>(),
            },
            "condition": {
                "resourceTypes": ["sub_frame"],
                "initiatorDomains": [initiator],
            },
        }))
    }
}

fn normalize_origin(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_ascii_lowercase()
}
