use serde::{Deserialize, Serialize};
use std::fmt;

use uuid::Uuid;

/// A random v4 UUID in hyphenated form.
pub fn new_id() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

/// Eight hex digits, enough to pair a host request with its reply.
pub fn new_correlation_id() -> String {
    let mut short = Uuid::new_v4().simple().to_string();
    short.truncate(8);
    short
}

/// Opaque identifier of a live split view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewId(String);

impl ViewId {
    pub fn new() -> Self {
        Self(new_id())
    }

    /// Accepts only well-formed UUIDs, as produced by [`ViewId::new`].
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(|u| Self(u.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
