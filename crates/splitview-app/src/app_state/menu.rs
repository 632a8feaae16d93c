use splitview_common::Event;
use splitview_session::MenuSnapshot;
use tracing::debug;

use super::core::SplitViewApp;

impl SplitViewApp {
    /// Publish the "add to view" menu if the registry changed since it was
    /// last published, or always with `force`.
    pub(super) fn publish_menu(&mut self, force: bool) {
        let snapshot = MenuSnapshot::of(&self.registry);
        if !force && self.menu_revision == Some(snapshot.revision) {
            return;
        }
        debug!(
            revision = snapshot.revision,
            entries = snapshot.entries.len(),
            enabled = snapshot.enabled(),
            "menu changed"
        );
        self.menu_revision = Some(snapshot.revision);
        self.event_bus.publish(Event::MenuChanged {
            entries: snapshot.entries,
        });
    }
}
