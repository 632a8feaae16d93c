//! Validation for the `[framing]` section.

use std::sync::LazyLock;

use regex::Regex;

use crate::schema::SplitViewConfig;

use super::helpers::validate_range;

/// Hostname: dot-separated labels of letters, digits, and inner hyphens.
static HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?\.)*[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$")
        .unwrap()
});

/// `scheme://authority`, optional trailing slash.
static ORIGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9+.-]*://[^/\s]+/?$").unwrap());

/// Whether a force-windowed entry names a host. Pasted URLs are
/// accepted; only their host part is checked.
pub fn is_valid_domain_entry(entry: &str) -> bool {
    let entry = entry.trim().to_ascii_lowercase();
    let rest = entry
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(&entry);
    let host = rest.split(['/', ':', '?', '#']).next().unwrap_or_default();
    let host = host.trim_end_matches('.');
    host.len() <= 253 && HOST_RE.is_match(host)
}

pub(crate) fn validate_framing(errors: &mut Vec<String>, config: &SplitViewConfig) {
    let framing = &config.framing;

    validate_range(
        errors,
        "framing.probe_timeout_ms",
        framing.probe_timeout_ms,
        100,
        30_000,
    );

    for entry in framing.force_windowed_domains.entries() {
        if !is_valid_domain_entry(entry) {
            errors.push(format!(
                "framing.force_windowed_domains: '{entry}' is not a hostname"
            ));
        }
    }

    let origin = framing.extension_origin.trim().to_ascii_lowercase();
    if !origin.is_empty() && !ORIGIN_RE.is_match(&origin) {
        errors.push(format!(
            "framing.extension_origin: '{}' is not an origin",
            framing.extension_origin
        ));
    }

    if framing.user_agent.trim().is_empty() {
        errors.push("framing.user_agent must not be empty".into());
    }
}
