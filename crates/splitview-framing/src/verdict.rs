use serde::{Deserialize, Serialize};

/// Outcome of asking whether a URL may be embedded in a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum FrameVerdict {
    Allowed,
    /// The page's response headers refuse framing. `header` is the
    /// offending header line, e.g. `x-frame-options: DENY`.
    BlockedByHeaders { header: String },
    /// A user rule forces this host into a window.
    BlockedByUserRule { rule: String },
    /// The probe could not tell. Framing is attempted anyway.
    UnknownAssumeAllowed { reason: String },
}

impl FrameVerdict {
    pub fn is_blocked(&self) -> bool {
        matches!(
            self,
            FrameVerdict::BlockedByHeaders { .. } | FrameVerdict::BlockedByUserRule { .. }
        )
    }

    /// The rule or header responsible for a block.
    pub fn trigger(&self) -> Option<&str> {
        match self {
            FrameVerdict::BlockedByHeaders { header } => Some(header),
            FrameVerdict::BlockedByUserRule { rule } => Some(rule),
            _ => None,
        }
    }
}
