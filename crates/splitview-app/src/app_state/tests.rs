use std::sync::Arc;
use std::time::Duration;

use splitview_common::{
    Command, DisplayMode, Event, FallbackStyle, InstallReason, MenuEntry, NoticeKind,
    OptionsUpdate, OverrideScope, ScreenRect, SelectedItem, SplitViewError, SurfaceId, ViewId,
};
use splitview_config::{DomainList, SplitViewConfig, ViewsScope};
use splitview_framing::{ProbedHeaders, StaticProbe};
use splitview_session::{keys, load_or_default, HistoryEntry, MemoryStore, RegistrySnapshot};
use tokio::sync::broadcast;

use super::*;
use crate::host::recording::{HostCall, RecordingHost};
use crate::host::HostPage;

struct Fixture {
    app: SplitViewApp,
    host: Arc<RecordingHost>,
    store: Arc<MemoryStore>,
    events: broadcast::Receiver<Event>,
}

impl Fixture {
    fn new() -> Self {
        Self::with(SplitViewConfig::default(), StaticProbe::new(), RecordingHost::new())
    }

    fn with_config(config: SplitViewConfig) -> Self {
        Self::with(config, StaticProbe::new(), RecordingHost::new())
    }

    fn with(config: SplitViewConfig, probe: StaticProbe, host: RecordingHost) -> Self {
        Self::sharing(config, probe, host, Arc::new(MemoryStore::new()))
    }

    fn sharing(
        config: SplitViewConfig,
        probe: StaticProbe,
        host: RecordingHost,
        store: Arc<MemoryStore>,
    ) -> Self {
        let host = Arc::new(host);
        let app = SplitViewApp::new(config, Arc::new(probe), host.clone(), store.clone());
        let events = app.subscribe();
        Self {
            app,
            host,
            store,
            events,
        }
    }

    async fn split(&mut self, urls: &[&str]) -> Result<ViewId, SplitViewError> {
        match self.app.handle(Command::SplitSelected { items: items(urls) }).await? {
            Reply::Created(id) => Ok(id),
            other => panic!("expected a created view, got {other:?}"),
        }
    }

    async fn view(&mut self, view_id: &ViewId) -> splitview_common::ViewState {
        match self
            .app
            .handle(Command::GetView {
                view_id: view_id.clone(),
            })
            .await
            .unwrap()
        {
            Reply::View(state) => state,
            other => panic!("expected a view, got {other:?}"),
        }
    }

    fn drain(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    fn stored_views(&self) -> RegistrySnapshot {
        load_or_default(self.store.as_ref(), keys::VIEWS).unwrap()
    }
}

fn items(urls: &[&str]) -> Vec<SelectedItem> {
    urls.iter().map(|u| SelectedItem::new(*u, "")).collect()
}

fn denying() -> ProbedHeaders {
    ProbedHeaders {
        status: 200,
        ..Default::default()
    }
    .with_xfo("DENY")
}

fn notices(events: &[Event]) -> Vec<NoticeKind> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Notice(n) => Some(n.kind),
            _ => None,
        })
        .collect()
}

fn last_menu(events: &[Event]) -> Option<Vec<MenuEntry>> {
    events.iter().rev().find_map(|e| match e {
        Event::MenuChanged { entries } => Some(entries.clone()),
        _ => None,
    })
}

fn windowed() -> SplitViewConfig {
    let mut config = SplitViewConfig::default();
    config.display.mode = DisplayMode::Windowed;
    config
}

fn overlay() -> SplitViewConfig {
    let mut config = SplitViewConfig::default();
    config.framing.fallback = FallbackStyle::Overlay;
    config
}

// -- Split --

#[tokio::test]
async fn framed_split_opens_one_tab() {
    let mut fx = Fixture::new();
    let id = fx.split(&["https://a.com", "https://b.com"]).await.unwrap();

    assert_eq!(fx.host.calls(), [HostCall::OpenViewTab(id.clone())]);
    let view = fx.app.registry.get(&id).unwrap();
    assert_eq!(view.mode, DisplayMode::Framed);
    assert_eq!(view.tab, Some(SurfaceId::Tab(100)));
    assert_eq!(view.name, "a.com | b.com");

    let events = fx.drain();
    assert!(events.iter().any(|e| matches!(
        e,
        Event::ViewRendered { surface: SurfaceId::Tab(100), view } if view.id == id
    )));
    let menu = last_menu(&events).unwrap();
    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].id, id);

    assert_eq!(fx.stored_views().views.len(), 1);
    let history: Vec<HistoryEntry> = load_or_default(fx.store.as_ref(), keys::HISTORY).unwrap();
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn windowed_split_tiles_one_window_per_page() {
    let mut fx = Fixture::with_config(windowed());
    let mut selection = items(&["https://a.com", "https://b.com", "https://c.com"]);
    selection[1].tab_id = Some(7);
    let reply = fx
        .app
        .handle(Command::SplitSelected { items: selection })
        .await
        .unwrap();
    let Reply::Created(id) = reply else {
        panic!("expected a created view");
    };

    let opened = fx.host.opened_windows();
    assert_eq!(opened.len(), 3);
    let lefts: Vec<i32> = opened.iter().map(|w| w.bounds.left).collect();
    assert_eq!(lefts, [0, 400, 800]);
    assert!(opened.iter().all(|w| w.bounds.width == 400 && w.bounds.height == 800));
    assert_eq!(opened[1].tab_id, Some(7));

    let view = fx.app.registry.get(&id).unwrap();
    assert_eq!(view.mode, DisplayMode::Windowed);
    assert_eq!(
        view.windows(),
        [SurfaceId::Window(100), SurfaceId::Window(101), SurfaceId::Window(102)]
    );
}

#[tokio::test]
async fn refusing_page_falls_back_to_windows() {
    let probe = StaticProbe::new().respond("https://b.com", denying());
    let mut fx = Fixture::with(SplitViewConfig::default(), probe, RecordingHost::new());
    let id = fx.split(&["https://a.com", "https://b.com"]).await.unwrap();

    assert_eq!(fx.app.registry.get(&id).unwrap().mode, DisplayMode::Windowed);
    assert_eq!(fx.host.opened_windows().len(), 2);

    let events = fx.drain();
    let fallback = events.iter().find_map(|e| match e {
        Event::Notice(n) if n.kind == NoticeKind::FramingFallback => Some(n.body.clone()),
        _ => None,
    });
    assert!(fallback.unwrap().contains("b.com"));
}

#[tokio::test]
async fn fallback_notice_respects_warn_setting() {
    let mut config = SplitViewConfig::default();
    config.display.warn_on_fallback = false;
    let probe = StaticProbe::new().respond("https://b.com", denying());
    let mut fx = Fixture::with(config, probe, RecordingHost::new());
    fx.split(&["https://a.com", "https://b.com"]).await.unwrap();

    assert!(notices(&fx.drain()).is_empty());
}

#[tokio::test]
async fn overlay_fallback_marks_only_the_refusing_panel() {
    let probe = StaticProbe::new().respond("https://b.com", denying());
    let mut fx = Fixture::with(overlay(), probe, RecordingHost::new());
    let id = fx.split(&["https://a.com", "https://b.com"]).await.unwrap();

    let view = fx.view(&id).await;
    assert_eq!(view.mode, DisplayMode::Framed);
    assert_eq!(view.panels[0].warning_domain, None);
    assert_eq!(view.panels[1].warning_domain.as_deref(), Some("b.com"));
    assert!(!notices(&fx.drain()).contains(&NoticeKind::FramingFallback));
}

#[tokio::test]
async fn user_rule_forces_windows() {
    let mut config = SplitViewConfig::default();
    config.framing.force_windowed_domains = DomainList::new(["a.com"]);
    let mut fx = Fixture::with_config(config);
    let id = fx
        .split(&["https://www.a.com/page", "https://b.com"])
        .await
        .unwrap();

    assert_eq!(fx.app.registry.get(&id).unwrap().mode, DisplayMode::Windowed);
}

#[tokio::test]
async fn one_web_page_is_not_enough() {
    let mut fx = Fixture::new();
    let err = fx
        .split(&["https://a.com", "chrome://settings", "about:blank"])
        .await
        .unwrap_err();

    assert!(matches!(err, SplitViewError::InsufficientSelection { eligible: 1 }));
    assert!(fx.host.calls().is_empty());
    assert!(fx.app.registry.is_empty());
    assert_eq!(notices(&fx.drain()), [NoticeKind::InsufficientSelection]);
}

#[tokio::test]
async fn oversized_selection_keeps_the_first_pages() {
    let mut fx = Fixture::new();
    let id = fx
        .split(&[
            "https://a.com",
            "https://b.com",
            "https://c.com",
            "https://d.com",
            "https://e.com",
        ])
        .await
        .unwrap();

    let view = fx.view(&id).await;
    assert_eq!(
        view.urls(),
        ["https://a.com", "https://b.com", "https://c.com", "https://d.com"]
    );
}

#[tokio::test]
async fn failed_window_rolls_back_the_others() {
    let host = RecordingHost::new().failing_after_windows(1);
    let mut fx = Fixture::with(windowed(), StaticProbe::new(), host);
    let err = fx
        .split(&["https://a.com", "https://b.com", "https://c.com"])
        .await
        .unwrap_err();

    assert!(matches!(err, SplitViewError::SurfaceCreationFailure(_)));
    assert_eq!(fx.host.closed(), [SurfaceId::Window(100)]);
    assert!(fx.app.registry.is_empty());
    assert_eq!(notices(&fx.drain()), [NoticeKind::SurfaceCreationFailed]);
}

#[tokio::test]
async fn failed_tab_registers_nothing() {
    let host = RecordingHost::new().failing_tabs();
    let mut fx = Fixture::with(SplitViewConfig::default(), StaticProbe::new(), host);
    let err = fx.split(&["https://a.com", "https://b.com"]).await.unwrap_err();

    assert!(matches!(err, SplitViewError::SurfaceCreationFailure(_)));
    assert!(fx.app.registry.is_empty());
    assert!(fx.stored_views().views.is_empty());
}

#[tokio::test]
async fn same_pages_get_distinct_names() {
    let mut fx = Fixture::new();
    let first = fx.split(&["https://a.com", "https://b.com"]).await.unwrap();
    let second = fx.split(&["https://a.com", "https://b.com"]).await.unwrap();

    assert_eq!(fx.view(&first).await.name, "a.com | b.com");
    assert_eq!(fx.view(&second).await.name, "a.com | b.com (2)");
}

// -- Panels --

#[tokio::test]
async fn add_to_framed_view() {
    let mut fx = Fixture::new();
    let id = fx.split(&["https://a.com", "https://b.com"]).await.unwrap();
    fx.drain();

    let reply = fx
        .app
        .handle(Command::AddToView {
            view_id: id.clone(),
            url: "https://c.com".into(),
            title: "C".into(),
        })
        .await
        .unwrap();
    let Reply::View(view) = reply else {
        panic!("expected the updated view");
    };
    assert_eq!(view.panels.len(), 3);
    assert!(fx
        .drain()
        .iter()
        .any(|e| matches!(e, Event::ViewRendered { view, .. } if view.panels.len() == 3)));
}

#[tokio::test]
async fn add_to_windowed_view_opens_a_window_and_retiles() {
    let mut fx = Fixture::with_config(windowed());
    let id = fx.split(&["https://a.com", "https://b.com"]).await.unwrap();

    fx.app
        .handle(Command::AddToView {
            view_id: id.clone(),
            url: "https://c.com".into(),
            title: String::new(),
        })
        .await
        .unwrap();

    let opened = fx.host.opened_windows();
    assert_eq!(opened.len(), 3);
    assert_eq!(opened[2].bounds, ScreenRect::new(800, 0, 400, 800));

    let bounds = fx.host.bounds_set();
    assert_eq!(bounds.len(), 3);
    assert!(bounds.iter().all(|(_, r)| r.width == 400));
    assert_eq!(fx.app.registry.get(&id).unwrap().windows().len(), 3);
}

#[tokio::test]
async fn full_view_refuses_another_page() {
    let mut fx = Fixture::new();
    let id = fx
        .split(&["https://a.com", "https://b.com", "https://c.com", "https://d.com"])
        .await
        .unwrap();
    fx.drain();

    let err = fx
        .app
        .handle(Command::AddToView {
            view_id: id.clone(),
            url: "https://e.com".into(),
            title: String::new(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, SplitViewError::CapacityExceeded { max: 4 }));
    assert_eq!(fx.view(&id).await.panels.len(), 4);
    assert_eq!(notices(&fx.drain()), [NoticeKind::CapacityExceeded]);
}

#[tokio::test]
async fn adding_to_a_closed_view_rebuilds_the_menu() {
    let mut fx = Fixture::new();
    let reply = fx
        .app
        .handle(Command::AddToView {
            view_id: ViewId::new(),
            url: "https://a.com".into(),
            title: String::new(),
        })
        .await
        .unwrap();

    assert_eq!(reply, Reply::Ack);
    let events = fx.drain();
    assert_eq!(last_menu(&events), Some(Vec::new()));
    assert!(notices(&events).is_empty());
}

#[tokio::test]
async fn menu_click_routes_by_item_id() {
    let mut fx = Fixture::new();
    let id = fx.split(&["https://a.com", "https://b.com"]).await.unwrap();

    let foreign = fx
        .app
        .handle(Command::MenuClicked {
            menu_item_id: "some-other-menu".into(),
            url: "https://c.com".into(),
            title: String::new(),
        })
        .await
        .unwrap();
    assert_eq!(foreign, Reply::Ack);
    assert_eq!(fx.view(&id).await.panels.len(), 2);

    let entry = MenuEntry {
        id: id.clone(),
        name: String::new(),
    };
    fx.app
        .handle(Command::MenuClicked {
            menu_item_id: entry.item_id(),
            url: "https://c.com".into(),
            title: String::new(),
        })
        .await
        .unwrap();
    assert_eq!(fx.view(&id).await.panels.len(), 3);
}

#[tokio::test]
async fn removing_the_last_panel_closes_the_view() {
    let mut fx = Fixture::new();
    let id = fx.split(&["https://a.com", "https://b.com"]).await.unwrap();

    let reply = fx
        .app
        .handle(Command::RemovePanel {
            view_id: id.clone(),
            url: "https://a.com".into(),
        })
        .await
        .unwrap();
    assert_eq!(reply, Reply::Remaining(vec!["https://b.com".into()]));
    assert!(fx.host.closed().is_empty());

    let reply = fx
        .app
        .handle(Command::RemovePanel {
            view_id: id.clone(),
            url: "https://b.com".into(),
        })
        .await
        .unwrap();
    assert_eq!(reply, Reply::Remaining(Vec::new()));
    assert_eq!(fx.host.closed(), [SurfaceId::Tab(100)]);
    assert!(fx.app.registry.is_empty());

    let events = fx.drain();
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::ViewDestroyed { view_id } if *view_id == id)));
    assert_eq!(last_menu(&events), Some(Vec::new()));
}

#[tokio::test]
async fn removing_a_windowed_panel_closes_its_window() {
    let mut fx = Fixture::with_config(windowed());
    let id = fx
        .split(&["https://a.com", "https://b.com", "https://c.com"])
        .await
        .unwrap();

    fx.app
        .handle(Command::RemovePanel {
            view_id: id.clone(),
            url: "https://b.com".into(),
        })
        .await
        .unwrap();

    assert_eq!(fx.host.closed(), [SurfaceId::Window(101)]);
    let bounds = fx.host.bounds_set();
    assert_eq!(bounds.len(), 2);
    assert!(bounds.iter().all(|(_, r)| r.width == 600));
}

#[tokio::test]
async fn changed_urls_are_checked_again() {
    let probe = StaticProbe::new().respond("https://b.com", denying());
    let mut fx = Fixture::with(overlay(), probe, RecordingHost::new());
    let id = fx.split(&["https://a.com", "https://c.com"]).await.unwrap();

    let reply = fx
        .app
        .handle(Command::UpdateUrls {
            view_id: id.clone(),
            urls: vec!["https://a.com".into(), "https://b.com".into()],
        })
        .await
        .unwrap();
    let Reply::View(view) = reply else {
        panic!("expected the updated view");
    };
    assert_eq!(view.panels[0].warning_domain, None);
    assert_eq!(view.panels[1].warning_domain.as_deref(), Some("b.com"));
}

#[tokio::test]
async fn show_anyway_lifts_the_warning_for_the_view() {
    let probe = StaticProbe::new()
        .respond("https://b.com", denying())
        .respond("https://b.com/other", denying());
    let mut fx = Fixture::with(overlay(), probe, RecordingHost::new());
    let id = fx.split(&["https://a.com", "https://b.com"]).await.unwrap();

    let reply = fx
        .app
        .handle(Command::ShowAnyway {
            view_id: id.clone(),
            url: "https://b.com".into(),
        })
        .await
        .unwrap();
    let Reply::View(view) = reply else {
        panic!("expected the updated view");
    };
    assert!(view.panels.iter().all(|p| p.warning_domain.is_none()));

    fx.app
        .handle(Command::AddToView {
            view_id: id.clone(),
            url: "https://b.com/other".into(),
            title: String::new(),
        })
        .await
        .unwrap();
    assert!(fx.view(&id).await.panels[2].warning_domain.is_none());

    // A view-scoped grant does not carry over.
    let other = fx.split(&["https://a.com", "https://b.com"]).await.unwrap();
    assert_eq!(
        fx.view(&other).await.panels[1].warning_domain.as_deref(),
        Some("b.com")
    );
}

#[tokio::test]
async fn persistent_override_survives_restart() {
    let mut config = overlay();
    config.framing.override_scope = OverrideScope::Persistent;
    let store = Arc::new(MemoryStore::new());

    let probe = StaticProbe::new().respond("https://b.com", denying());
    let mut fx = Fixture::sharing(config.clone(), probe, RecordingHost::new(), store.clone());
    let id = fx.split(&["https://a.com", "https://b.com"]).await.unwrap();
    fx.app
        .handle(Command::ShowAnyway {
            view_id: id,
            url: "https://b.com".into(),
        })
        .await
        .unwrap();
    fx.app.handle(Command::Shutdown).await.unwrap();

    let probe = StaticProbe::new().respond("https://b.com", denying());
    let mut fx = Fixture::sharing(config, probe, RecordingHost::new(), store);
    fx.app.restore();
    let id = fx.split(&["https://a.com", "https://b.com"]).await.unwrap();
    assert!(fx.view(&id).await.panels.iter().all(|p| p.warning_domain.is_none()));
}

#[tokio::test]
async fn resolve_url_reports_the_verdict() {
    let probe = StaticProbe::new().respond("https://b.com", denying());
    let mut fx = Fixture::with(SplitViewConfig::default(), probe, RecordingHost::new());

    let reply = fx
        .app
        .handle(Command::ResolveUrl {
            url: "https://b.com".into(),
        })
        .await
        .unwrap();
    assert!(matches!(reply, Reply::Verdict(ref v) if v.is_blocked()));
}

// -- Views and surfaces --

#[tokio::test]
async fn rename_and_stale_lookup() {
    let mut fx = Fixture::new();
    let id = fx.split(&["https://a.com", "https://b.com"]).await.unwrap();

    let reply = fx
        .app
        .handle(Command::RenameView {
            view_id: id.clone(),
            name: "  Research  ".into(),
        })
        .await
        .unwrap();
    assert!(matches!(reply, Reply::View(ref v) if v.name == "Research"));
    fx.drain();

    let err = fx
        .app
        .handle(Command::GetView {
            view_id: ViewId::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SplitViewError::StaleReference(_)));
    assert!(notices(&fx.drain()).is_empty());
}

#[tokio::test]
async fn close_view_closes_its_windows() {
    let mut fx = Fixture::with_config(windowed());
    let id = fx.split(&["https://a.com", "https://b.com"]).await.unwrap();

    fx.app
        .handle(Command::CloseView {
            view_id: id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(
        fx.host.closed(),
        [SurfaceId::Window(100), SurfaceId::Window(101)]
    );
    assert!(fx.app.registry.is_empty());

    // Closing twice is harmless.
    let reply = fx.app.handle(Command::CloseView { view_id: id }).await.unwrap();
    assert_eq!(reply, Reply::Ack);
}

#[tokio::test]
async fn closing_the_view_tab_forgets_the_view() {
    let mut fx = Fixture::new();
    let id = fx.split(&["https://a.com", "https://b.com"]).await.unwrap();
    fx.drain();

    fx.app
        .handle(Command::SurfaceClosed {
            surface: SurfaceId::Tab(100),
        })
        .await
        .unwrap();

    assert!(fx.app.registry.is_empty());
    assert!(fx.host.closed().is_empty());
    let events = fx.drain();
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::ViewDestroyed { view_id } if *view_id == id)));
    assert_eq!(last_menu(&events), Some(Vec::new()));
    assert!(fx.stored_views().views.is_empty());
}

#[tokio::test]
async fn closing_one_window_retiles_the_rest() {
    let mut fx = Fixture::with_config(windowed());
    let id = fx
        .split(&["https://a.com", "https://b.com", "https://c.com"])
        .await
        .unwrap();

    fx.app
        .handle(Command::SurfaceClosed {
            surface: SurfaceId::Window(101),
        })
        .await
        .unwrap();

    assert_eq!(fx.view(&id).await.urls(), ["https://a.com", "https://c.com"]);
    assert_eq!(
        fx.host.bounds_set(),
        [
            (SurfaceId::Window(100), ScreenRect::new(0, 0, 600, 800)),
            (SurfaceId::Window(102), ScreenRect::new(600, 0, 600, 800)),
        ]
    );
}

#[tokio::test]
async fn untracked_surface_is_ignored() {
    let mut fx = Fixture::new();
    let reply = fx
        .app
        .handle(Command::SurfaceClosed {
            surface: SurfaceId::Window(9),
        })
        .await
        .unwrap();
    assert_eq!(reply, Reply::Ack);
    assert!(fx.host.calls().is_empty());
}

fn focused(host: &RecordingHost) -> Vec<SurfaceId> {
    host.calls()
        .into_iter()
        .filter_map(|c| match c {
            HostCall::Focus(s) => Some(s),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn focus_raises_siblings_and_ignores_echoes() {
    let mut fx = Fixture::with_config(windowed());
    fx.split(&["https://a.com", "https://b.com", "https://c.com"])
        .await
        .unwrap();

    fx.app
        .handle(Command::SurfaceFocused {
            surface: SurfaceId::Window(101),
        })
        .await
        .unwrap();
    assert_eq!(
        focused(&fx.host),
        [SurfaceId::Window(100), SurfaceId::Window(102), SurfaceId::Window(101)]
    );

    // The raise itself reports focus on the siblings.
    fx.app
        .handle(Command::SurfaceFocused {
            surface: SurfaceId::Window(100),
        })
        .await
        .unwrap();
    assert_eq!(focused(&fx.host).len(), 3);

    tokio::time::advance(Duration::from_millis(600)).await;
    fx.app
        .handle(Command::SurfaceFocused {
            surface: SurfaceId::Window(100),
        })
        .await
        .unwrap();
    let calls = focused(&fx.host);
    assert_eq!(calls.len(), 6);
    assert_eq!(calls[5], SurfaceId::Window(100));
}

// -- Config and lifecycle --

#[tokio::test]
async fn save_options_writes_and_applies() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut fx = Fixture::new();
    fx.app = fx.app.with_config_path(path.clone());

    fx.app
        .handle(Command::SaveOptions {
            options: OptionsUpdate {
                mode: Some(DisplayMode::Windowed),
                ..Default::default()
            },
        })
        .await
        .unwrap();

    let saved = splitview_config::load_config_from(&path).unwrap();
    assert_eq!(saved.display.mode, DisplayMode::Windowed);
    let events = fx.drain();
    assert!(events.iter().any(|e| matches!(e, Event::ConfigReloaded)));
    assert_eq!(notices(&events), [NoticeKind::OptionsSaved]);

    fx.split(&["https://a.com", "https://b.com"]).await.unwrap();
    assert_eq!(fx.host.opened_windows().len(), 2);
}

#[tokio::test]
async fn unchanged_options_still_confirm() {
    let mut fx = Fixture::new();
    fx.app
        .handle(Command::SaveOptions {
            options: OptionsUpdate::default(),
        })
        .await
        .unwrap();

    let events = fx.drain();
    assert!(!events.iter().any(|e| matches!(e, Event::ConfigReloaded)));
    assert_eq!(notices(&events), [NoticeKind::OptionsSaved]);
}

#[tokio::test]
async fn reload_config_picks_up_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut config = SplitViewConfig::default();
    config.display.max_panels = 2;
    splitview_config::save_config_to_path(&config, &path).unwrap();

    let mut fx = Fixture::new();
    fx.app = fx.app.with_config_path(path);
    fx.app.handle(Command::ReloadConfig).await.unwrap();

    assert_eq!(fx.app.registry.max_panels(), 2);
    assert!(fx.drain().iter().any(|e| matches!(e, Event::ConfigReloaded)));
    let id = fx
        .split(&["https://a.com", "https://b.com", "https://c.com"])
        .await
        .unwrap();
    assert_eq!(fx.view(&id).await.panels.len(), 2);
}

#[tokio::test]
async fn invalid_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[display]\nmax_panels = 40\n").unwrap();

    let mut fx = Fixture::new();
    fx.app = fx.app.with_config_path(path);
    assert!(fx.app.handle(Command::ReloadConfig).await.is_err());
    assert_eq!(fx.app.registry.max_panels(), 4);
}

#[tokio::test]
async fn first_install_opens_the_welcome_page() {
    let mut config = SplitViewConfig::default();
    config.framing.extension_origin = "moz-extension://abc".into();
    let mut fx = Fixture::with_config(config);

    fx.app
        .handle(Command::Installed {
            reason: InstallReason("install".into()),
        })
        .await
        .unwrap();
    assert_eq!(
        fx.host.calls(),
        [HostCall::OpenPage(HostPage::Welcome), HostCall::HeaderRules(1)]
    );
    assert_eq!(last_menu(&fx.drain()), Some(Vec::new()));

    fx.app
        .handle(Command::Installed {
            reason: InstallReason("update".into()),
        })
        .await
        .unwrap();
    assert_eq!(fx.host.calls().len(), 3);
}

#[tokio::test]
async fn header_rules_follow_framing_config() {
    let mut fx = Fixture::new();
    let mut config = SplitViewConfig::default();
    config.framing.extension_origin = "chrome-extension://abc".into();
    assert!(fx.app.apply_config(config.clone()).await);
    assert_eq!(fx.host.calls(), [HostCall::HeaderRules(1)]);

    config.framing.strip_headers = false;
    assert!(fx.app.apply_config(config.clone()).await);
    assert_eq!(fx.host.calls().last(), Some(&HostCall::HeaderRules(0)));

    assert!(!fx.app.apply_config(config).await);
    assert_eq!(fx.host.calls().len(), 2);
}

#[tokio::test]
async fn open_options_asks_the_host() {
    let mut fx = Fixture::new();
    fx.app.handle(Command::OpenOptions).await.unwrap();
    assert_eq!(fx.host.calls(), [HostCall::OpenPage(HostPage::Options)]);
}

#[tokio::test]
async fn session_scope_drops_stored_views_on_restore() {
    let store = Arc::new(MemoryStore::new());
    let mut fx = Fixture::sharing(
        SplitViewConfig::default(),
        StaticProbe::new(),
        RecordingHost::new(),
        store.clone(),
    );
    fx.split(&["https://a.com", "https://b.com"]).await.unwrap();
    assert_eq!(fx.stored_views().views.len(), 1);

    let mut fx = Fixture::sharing(
        SplitViewConfig::default(),
        StaticProbe::new(),
        RecordingHost::new(),
        store,
    );
    fx.app.restore();
    assert!(fx.stored_views().views.is_empty());
    assert_eq!(fx.app.history.len(), 2);
}

#[tokio::test]
async fn install_scope_clears_stored_views_after_reading_them() {
    let mut config = SplitViewConfig::default();
    config.storage.views_scope = ViewsScope::Install;
    let store = Arc::new(MemoryStore::new());
    let mut fx = Fixture::sharing(
        config.clone(),
        StaticProbe::new(),
        RecordingHost::new(),
        store.clone(),
    );
    fx.split(&["https://a.com", "https://b.com"]).await.unwrap();
    assert_eq!(fx.stored_views().views.len(), 1);

    let mut fx = Fixture::sharing(config, StaticProbe::new(), RecordingHost::new(), store);
    fx.app.restore();
    assert!(fx.app.registry.is_empty());
    assert!(fx.stored_views().views.is_empty());
}

#[tokio::test]
async fn disabled_history_records_nothing() {
    let mut config = SplitViewConfig::default();
    config.history.enabled = false;
    let mut fx = Fixture::with_config(config);
    fx.split(&["https://a.com", "https://b.com"]).await.unwrap();

    assert!(fx.app.history.is_empty());
    let history: Vec<HistoryEntry> = load_or_default(fx.store.as_ref(), keys::HISTORY).unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn shutdown_saves_and_announces() {
    let mut fx = Fixture::new();
    fx.split(&["https://a.com", "https://b.com"]).await.unwrap();
    fx.drain();

    assert_eq!(fx.app.handle(Command::Shutdown).await.unwrap(), Reply::Ack);
    assert!(fx.app.cancel.is_cancelled());
    assert!(fx.drain().iter().any(|e| matches!(e, Event::Shutdown)));
    assert_eq!(fx.stored_views().views.len(), 1);
}
