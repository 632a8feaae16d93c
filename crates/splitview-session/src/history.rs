//! Capped log of recently split pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

pub const DEFAULT_MAX_ENTRIES: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    #[serde(default)]
    pub title: String,
    pub timestamp: DateTime<Utc>,
}

/// Newest first, one entry per URL, at most `max_entries` long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    max_entries: usize,
}

impl HistoryLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Rebuild from stored entries, re-applying order, dedup and cap.
    pub fn from_entries(mut entries: Vec<HistoryEntry>, max_entries: usize) -> Self {
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let mut log = Self::new(max_entries);
        for entry in entries {
            if !log.entries.iter().any(|e| e.url == entry.url) {
                log.entries.push(entry);
            }
        }
        log.truncate();
        log
    }

    pub fn record(&mut self, url: &str, title: &str, at: DateTime<Utc>) {
        self.entries.retain(|e| e.url != url);
        self.entries.insert(
            0,
            HistoryEntry {
                url: url.to_string(),
                title: title.to_string(),
                timestamp: at,
            },
        );
        self.truncate();
        trace!(url = %url, len = self.entries.len(), "history recorded");
    }

    pub fn set_max_entries(&mut self, max_entries: usize) {
        self.max_entries = max_entries.max(1);
        self.truncate();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn truncate(&mut self) {
        self.entries.truncate(self.max_entries);
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}
