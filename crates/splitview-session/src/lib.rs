//! View session state: which views are live, which surfaces they own,
//! what they are called, plus the recent-URL history and the snapshot
//! store everything is persisted through.

pub mod history;
pub mod matching;
pub mod menu;
pub mod naming;
pub mod registry;
pub mod store;
pub mod view;

pub use history::{HistoryEntry, HistoryLog};
pub use matching::find_panel;
pub use menu::MenuSnapshot;
pub use naming::{derive_default_name, uniquify};
pub use registry::{RegistrySnapshot, RemovedPanel, SurfaceClosed, ViewRegistry, ViewSurfaces};
pub use store::{keys, load_or_default, save_as, FileStore, MemoryStore, SnapshotStore};
pub use view::{Panel, View};
