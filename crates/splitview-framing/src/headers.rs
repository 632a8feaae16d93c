//! Reading anti-framing response headers.

/// Knobs for [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderPolicy {
    /// Treat `frame-ancestors 'self'` as a refusal. The view surface is
    /// never same-origin with the page, so this is on by default.
    pub block_on_self: bool,
}

impl Default for HeaderPolicy {
    fn default() -> Self {
        Self {
            block_on_self: true,
        }
    }
}

/// Check `X-Frame-Options` and `Content-Security-Policy` values.
///
/// Returns the offending header line when framing is refused. Every
/// received value of each header is passed in; repeated headers are
/// common for CSP.
pub fn classify(
    x_frame_options: &[String],
    content_security_policy: &[String],
    policy: HeaderPolicy,
) -> Option<String> {
    for value in x_frame_options {
        if xfo_blocks(value) {
            return Some(format!("x-frame-options: {}", value.trim()));
        }
    }
    for value in content_security_policy {
        if let Some(sources) = frame_ancestors(value) {
            if ancestors_block(&sources, policy) {
                return Some(format!(
                    "content-security-policy: frame-ancestors {}",
                    sources.join(" ")
                ));
            }
        }
    }
    None
}

fn xfo_blocks(value: &str) -> bool {
    value.split(',').any(|token| {
        let token = token.trim();
        token.eq_ignore_ascii_case("deny") || token.eq_ignore_ascii_case("sameorigin")
    })
}

/// Source list of the first `frame-ancestors` directive, lowercased.
fn frame_ancestors(csp: &str) -> Option<Vec<String>> {
    csp.split(';').find_map(|directive| {
        let mut parts = directive.split_ascii_whitespace();
        let name = parts.next()?;
        name.eq_ignore_ascii_case("frame-ancestors")
            .then(|| parts.map(str::to_ascii_lowercase).collect())
    })
}

fn ancestors_block(sources: &[String], policy: HeaderPolicy) -> bool {
    if sources.is_empty() || sources.iter().any(|s| s == "'none'") {
        return true;
    }
    policy.block_on_self && sources.iter().all(|s| s == "'self'")
}
