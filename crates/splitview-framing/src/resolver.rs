//! `resolve(url) -> FrameVerdict`.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::headers::{classify, HeaderPolicy};
use crate::probe::{HeaderProbe, ProbeError};
use crate::rules::{host_of, DomainRuleSet};
use crate::verdict::FrameVerdict;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(2500);

/// Combines the user's domain rules with a live header probe.
///
/// Order of checks: scheme, domain rules, probe. Only the probe touches
/// the network, and any probe failure resolves to
/// [`FrameVerdict::UnknownAssumeAllowed`].
pub struct FrameResolver {
    rules: DomainRuleSet,
    probe: Arc<dyn HeaderProbe>,
    timeout: Duration,
    headers: HeaderPolicy,
}

impl FrameResolver {
    pub fn new(probe: Arc<dyn HeaderProbe>, rules: DomainRuleSet) -> Self {
        Self {
            rules,
            probe,
            timeout: DEFAULT_PROBE_TIMEOUT,
            headers: HeaderPolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header_policy(mut self, headers: HeaderPolicy) -> Self {
        self.headers = headers;
        self
    }

    pub fn rules(&self) -> &DomainRuleSet {
        &self.rules
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Swap in a new rule set and probe settings after a config change.
    pub fn reconfigure(&mut self, rules: DomainRuleSet, timeout: Duration, headers: HeaderPolicy) {
        info!(
            rules = rules.len(),
            timeout_ms = timeout.as_millis() as u64,
            "frame resolver reconfigured"
        );
        self.rules = rules;
        self.timeout = timeout;
        self.headers = headers;
    }

    pub async fn resolve(&self, url: &str) -> FrameVerdict {
        if !is_http(url) {
            return FrameVerdict::Allowed;
        }

        let Some(host) = host_of(url) else {
            return FrameVerdict::UnknownAssumeAllowed {
                reason: format!("unparseable url: {url}"),
            };
        };

        if let Some(rule) = self.rules.matching_rule(&host) {
            return FrameVerdict::BlockedByUserRule {
                rule: rule.to_string(),
            };
        }

        let outcome = match tokio::time::timeout(self.timeout, self.probe.probe(url)).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout(self.timeout)),
        };

        match outcome {
            Ok(probed) => {
                match classify(
                    &probed.x_frame_options,
                    &probed.content_security_policy,
                    self.headers,
                ) {
                    Some(header) => {
                        debug!(url = %url, header = %header, "framing refused by headers");
                        FrameVerdict::BlockedByHeaders { header }
                    }
                    None => FrameVerdict::Allowed,
                }
            }
            Err(e) => {
                debug!(url = %url, error = %e, "probe failed, assuming allowed");
                FrameVerdict::UnknownAssumeAllowed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

fn is_http(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
