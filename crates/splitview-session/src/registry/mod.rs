//! The authoritative map of live views.
//!
//! One owned value, mutated only through the methods below. Every
//! mutation bumps [`ViewRegistry::revision`] so callers can tell when
//! the menu needs rebuilding.

mod lifecycle;
mod operations;


use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use splitview_common::{MenuEntry, SurfaceId, SplitViewError, ViewId};

use crate::view::View;

pub use lifecycle::{SurfaceClosed, ViewSurfaces};
pub use operations::RemovedPanel;

pub const DEFAULT_MAX_PANELS: usize = 4;

pub struct ViewRegistry {
    /// Live views, oldest first.
    pub(super) views: Vec<View>,
    /// Reverse index: which view owns each surface.
    pub(super) owners: HashMap<SurfaceId, ViewId>,
    pub(super) max_panels: usize,
    pub(super) revision: u64,
}

/// Serialized form of the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub views: Vec<View>,
}

impl ViewRegistry {
    pub fn new(max_panels: usize) -> Self {
        Self {
            views: Vec::new(),
            owners: HashMap::new(),
            max_panels: max_panels.max(1),
            revision: 0,
        }
    }

    pub fn max_panels(&self) -> usize {
        self.max_panels
    }

    /// Lower or raise the panel cap. Existing views keep their panels.
    pub fn set_max_panels(&mut self, max_panels: usize) {
        self.max_panels = max_panels.max(1);
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: &ViewId) -> Option<&View> {
        self.views.iter().find(|v| &v.id == id)
    }

    pub fn contains(&self, id: &ViewId) -> bool {
        self.get(id).is_some()
    }

    /// The view owning `surface`.
    pub fn owner_of(&self, surface: SurfaceId) -> Option<&ViewId> {
        self.owners.get(&surface)
    }

    pub fn views(&self) -> impl Iterator<Item = &View> {
        self.views.iter()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Names of every live view other than `except`.
    pub fn names_except<'a>(&'a self, except: Option<&'a ViewId>) -> impl Iterator<Item = &'a str> {
        self.views
            .iter()
            .filter(move |v| Some(&v.id) != except)
            .map(|v| v.name.as_str())
    }

    /// Menu items, in creation order.
    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        self.views
            .iter()
            .map(|v| MenuEntry {
                id: v.id.clone(),
                name: v.name.clone(),
            })
            .collect()
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            views: self.views.clone(),
        }
    }

    pub(super) fn index_of(&self, id: &ViewId) -> Result<usize, SplitViewError> {
        self.views
            .iter()
            .position(|v| &v.id == id)
            .ok_or_else(|| SplitViewError::StaleReference(id.clone()))
    }

    pub(super) fn bump(&mut self) {
        self.revision += 1;
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PANELS)
    }
}
