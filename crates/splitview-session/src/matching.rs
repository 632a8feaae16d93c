//! Locating the panel a request refers to.
//!
//! Pages move on after they are loaded, so the URL a view page sends
//! back may differ slightly from the stored one.

use std::cmp::Reverse;

use url::Url;

/// Index of the panel `target` refers to.
///
/// Tried in order: exact match; equal after dropping the fragment and a
/// trailing slash; same origin with one path a prefix of the other,
/// closest path first.
pub fn find_panel<'a, I>(urls: I, target: &str) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: Clone,
{
    let urls = urls.into_iter();
    let target = target.trim();

    if let Some(i) = urls.clone().position(|u| u == target) {
        return Some(i);
    }

    let wanted = normalize(target)?;
    if let Some(i) = urls
        .clone()
        .position(|u| normalize(u).as_deref() == Some(wanted.as_str()))
    {
        return Some(i);
    }

    let wanted = Url::parse(&wanted).ok()?;
    urls.enumerate()
        .filter_map(|(i, u)| {
            let candidate = normalize(u).and_then(|n| Url::parse(&n).ok())?;
            if candidate.origin() != wanted.origin() {
                return None;
            }
            path_closeness(candidate.path(), wanted.path()).map(|key| (key, i))
        })
        .min_by_key(|&(key, _)| key)
        .map(|(_, i)| i)
}

/// When one path is a prefix of the other: the shared length (longer is
/// closer) and the leftover length (shorter is closer).
fn path_closeness(a: &str, b: &str) -> Option<(Reverse<usize>, usize)> {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    long.starts_with(short)
        .then(|| (Reverse(short.len()), long.len() - short.len()))
}

fn normalize(raw: &str) -> Option<String> {
    let mut url = Url::parse(raw.trim()).ok()?;
    url.set_fragment(None);
    let text = url.to_string();
    Some(match text.strip_suffix('/') {
        Some(stripped) if url.query().is_none() => stripped.to_string(),
        _ => text,
    })
}
