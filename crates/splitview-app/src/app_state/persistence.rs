//! Write-through of registry, history, and override snapshots.

use chrono::Utc;
use serde::Serialize;
use splitview_config::ViewsScope;
use splitview_framing::OverrideSet;
use splitview_session::{keys, load_or_default, save_as, HistoryEntry, HistoryLog, RegistrySnapshot};
use tracing::{info, warn};

use super::core::SplitViewApp;

impl SplitViewApp {
    /// Load persisted state at startup. A key that cannot be read is
    /// logged and its state starts empty.
    pub fn restore(&mut self) {
        if self.config.storage.views_scope == ViewsScope::Install {
            match load_or_default::<RegistrySnapshot>(self.store.as_ref(), keys::VIEWS) {
                Ok(snapshot) if !snapshot.views.is_empty() => info!(
                    stored = snapshot.views.len(),
                    "views from a previous run found; they are not reopened"
                ),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "stored views unreadable"),
            }
        }
        // Views never outlive the process that owned their surfaces.
        self.persist_views();

        match load_or_default::<Vec<HistoryEntry>>(self.store.as_ref(), keys::HISTORY) {
            Ok(entries) => {
                self.history =
                    HistoryLog::from_entries(entries, self.config.history.max_entries as usize);
            }
            Err(e) => warn!(error = %e, "history unreadable, starting empty"),
        }

        match load_or_default::<Vec<String>>(self.store.as_ref(), keys::OVERRIDES) {
            Ok(domains) => {
                self.overrides =
                    OverrideSet::new(self.config.framing.override_scope).with_persistent(domains);
            }
            Err(e) => warn!(error = %e, "overrides unreadable, starting empty"),
        }

        info!(history = self.history.len(), "state restored");
    }

    pub(super) fn record_history<'a>(
        &mut self,
        pages: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) {
        if !self.config.history.enabled {
            return;
        }
        let now = Utc::now();
        for (url, title) in pages {
            self.history.record(url, title, now);
        }
    }

    pub(super) fn persist_views(&self) {
        self.persist(keys::VIEWS, &self.registry.snapshot());
    }

    pub(super) fn persist_history(&self) {
        if self.config.history.enabled {
            self.persist(keys::HISTORY, &self.history.entries());
        }
    }

    pub(super) fn persist_overrides(&self) {
        self.persist(keys::OVERRIDES, &self.overrides.persistent_domains());
    }

    fn persist<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = save_as(self.store.as_ref(), key, value) {
            warn!(key, error = %e, "failed to persist state");
        }
    }
}
