use serde::{Deserialize, Serialize};

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// What a notice is about, so the host can pick a localized string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    InsufficientSelection,
    FramingFallback,
    CapacityExceeded,
    SurfaceCreationFailed,
    OptionsSaved,
}

/// A notice for the host to display (browser notification or inline status).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}

impl Notice {
    fn at(level: NoticeLevel, kind: NoticeKind, title: String, body: String) -> Self {
        Self { level, kind, title, body }
    }

    pub fn info(kind: NoticeKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::at(NoticeLevel::Info, kind, title.into(), body.into())
    }

    pub fn warning(kind: NoticeKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::at(NoticeLevel::Warning, kind, title.into(), body.into())
    }

    pub fn error(kind: NoticeKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::at(NoticeLevel::Error, kind, title.into(), body.into())
    }
}
