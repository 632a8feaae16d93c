use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::ViewId;
use crate::notifications::Notice;
use crate::types::{MenuEntry, SurfaceId, ViewState};

/// Everything the controller emits toward the rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// A view surface must (re)draw with this state.
    ViewRendered { surface: SurfaceId, view: ViewState },
    ViewDestroyed { view_id: ViewId },
    /// The "add to view" menu must be rebuilt. Empty means hide it.
    MenuChanged { entries: Vec<MenuEntry> },
    Notice(Notice),
    ConfigReloaded,
    Shutdown,
    #[serde(other)]
    Unknown,
}

/// Fan-out of [`Event`]s to every connected renderer.
///
/// Slow subscribers lag and lose the oldest events rather than block the
/// controller.
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    /// Returns how many subscribers were reached; zero when nobody listens.
    pub fn publish(&self, event: Event) -> usize {
        match self.tx.send(event) {
            Ok(reached) => reached,
            Err(_) => 0,
        }
    }
}
