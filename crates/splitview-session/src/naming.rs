//! Display names for views.

/// Make `candidate` distinct from every name in `existing`.
///
/// Returns `candidate` itself when free, otherwise the first of
/// `"candidate (2)"`, `"candidate (3)"`, ... not in use.
pub fn uniquify<'a, I>(candidate: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: Vec<&str> = existing.into_iter().collect();
    if !taken.contains(&candidate) {
        return candidate.to_string();
    }
    (2..)
        .map(|n| format!("{candidate} ({n})"))
        .find(|name| !taken.contains(&name.as_str()))
        .unwrap_or_else(|| candidate.to_string())
}

/// Default name for a new view: its distinct hosts, joined with `" | "`.
///
/// Pages without a host contribute their title, or failing that their
/// URL.
pub fn derive_default_name<'a, I>(pages: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut labels: Vec<String> = Vec::new();
    for (url, title) in pages {
        let label = host_label(url)
            .or_else(|| {
                let title = title.trim();
                (!title.is_empty()).then(|| title.to_string())
            })
            .unwrap_or_else(|| url.trim().to_string());
        if !label.is_empty() && !labels.contains(&label) {
            labels.push(label);
        }
    }
    if labels.is_empty() {
        return "Split view".to_string();
    }
    labels.join(" | ")
}

fn host_label(raw: &str) -> Option<String> {
    let parsed = url::Url::parse(raw.trim()).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    Some(host.strip_prefix("www.").map(str::to_string).unwrap_or(host))
}
