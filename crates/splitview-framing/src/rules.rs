//! User-configured domains that always open windowed.

use tracing::debug;

/// Lowercase a hostname and drop a leading `www.` and trailing dot.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

/// Normalized hostname of an http(s) URL.
pub fn host_of(raw: &str) -> Option<String> {
    let parsed = url::Url::parse(raw.trim()).ok()?;
    match parsed.scheme() {
        "http" | "https" => parsed.host_str().map(normalize_host),
        _ => None,
    }
}

/// Ordered set of hostnames. A rule matches its own host and every
/// subdomain of it: `example.com` covers `mail.example.com` but not
/// `notexample.com`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainRuleSet {
    rules: Vec<String>,
}

impl DomainRuleSet {
    /// Build from raw entries. Entries may be bare hosts or pasted URLs;
    /// blanks and duplicates are dropped, order is kept.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules: Vec<String> = Vec::new();
        for entry in entries {
            let Some(rule) = Self::normalize_entry(entry.as_ref()) else {
                continue;
            };
            if !rules.contains(&rule) {
                rules.push(rule);
            }
        }
        Self { rules }
    }

    /// Parse the options page's newline-delimited textarea value.
    pub fn from_lines(text: &str) -> Self {
        Self::new(text.lines())
    }

    fn normalize_entry(entry: &str) -> Option<String> {
        let entry = entry.trim();
        if entry.is_empty() {
            return None;
        }
        if entry.contains("://") {
            return host_of(entry);
        }
        let host = entry.split(['/', ':']).next().unwrap_or_default();
        let host = normalize_host(host);
        (!host.is_empty()).then_some(host)
    }

    /// First rule covering `host`, if any.
    pub fn matching_rule(&self, host: &str) -> Option<&str> {
        let host = normalize_host(host);
        let found = self.rules.iter().find(|rule| {
            host == **rule
                || host
                    .strip_suffix(rule.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        });
        if let Some(rule) = found {
            debug!(host = %host, rule = %rule, "domain rule matched");
        }
        found.map(String::as_str)
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}
