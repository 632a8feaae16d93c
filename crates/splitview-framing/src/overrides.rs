//! "Show anyway" grants.

use std::collections::{BTreeSet, HashMap, HashSet};

use splitview_common::{OverrideScope, ViewId};
use tracing::info;

use crate::rules::normalize_host;

/// Domains the user chose to frame despite a refusal.
///
/// View-scoped grants die with their view. Persistent grants outlive
/// it and are written to storage by the owner of this set.
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
    scope: OverrideScope,
    per_view: HashMap<ViewId, HashSet<String>>,
    persistent: BTreeSet<String>,
}

impl OverrideSet {
    pub fn new(scope: OverrideScope) -> Self {
        Self {
            scope,
            ..Default::default()
        }
    }

    /// Seed persistent grants loaded from storage.
    pub fn with_persistent<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.persistent
            .extend(domains.into_iter().map(|d| normalize_host(d.as_ref())));
        self
    }

    pub fn scope(&self) -> OverrideScope {
        self.scope
    }

    pub fn set_scope(&mut self, scope: OverrideScope) {
        self.scope = scope;
    }

    /// Record a grant. Returns true when the persistent set changed.
    pub fn grant(&mut self, view: &ViewId, domain: &str) -> bool {
        let domain = normalize_host(domain);
        info!(view_id = %view, domain = %domain, scope = ?self.scope, "framing override granted");
        self.per_view
            .entry(view.clone())
            .or_default()
            .insert(domain.clone());
        match self.scope {
            OverrideScope::View => false,
            OverrideScope::Persistent => self.persistent.insert(domain),
        }
    }

    /// Whether `domain` may be framed without a warning in `view`.
    pub fn allows(&self, view: Option<&ViewId>, domain: &str) -> bool {
        let domain = normalize_host(domain);
        if self.persistent.contains(&domain) {
            return true;
        }
        view.and_then(|v| self.per_view.get(v))
            .is_some_and(|set| set.contains(&domain))
    }

    pub fn forget_view(&mut self, view: &ViewId) {
        self.per_view.remove(view);
    }

    pub fn persistent_domains(&self) -> Vec<String> {
        self.persistent.iter().cloned().collect()
    }
}
