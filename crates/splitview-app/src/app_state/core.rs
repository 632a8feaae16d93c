//! SplitViewApp struct definition and constructor.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use splitview_common::{Event, EventBus, ViewId};
use splitview_config::SplitViewConfig;
use splitview_framing::{
    DomainRuleSet, FrameResolver, FramingPreferences, HeaderPolicy, HeaderProbe,
    HeaderRewritePolicy, OverrideSet,
};
use splitview_session::{HistoryLog, SnapshotStore, ViewRegistry};

use crate::host::SurfaceHost;

/// Event bus capacity. A slow transport skips (lags) past this.
const EVENT_CAPACITY: usize = 256;

/// The controller. Owns every piece of mutable state and processes one
/// command at a time.
pub struct SplitViewApp {
    pub(super) config: SplitViewConfig,
    /// Where `SaveOptions` writes and `ReloadConfig` reads.
    pub(super) config_path: Option<PathBuf>,

    pub(super) registry: ViewRegistry,
    pub(super) history: HistoryLog,

    // Framing
    pub(super) resolver: FrameResolver,
    pub(super) rewrite: HeaderRewritePolicy,
    pub(super) overrides: OverrideSet,

    // Collaborators
    pub(super) host: Arc<dyn SurfaceHost>,
    pub(super) store: Arc<dyn SnapshotStore>,
    pub(super) event_bus: EventBus,

    /// Cancels in-flight probes on shutdown.
    pub(super) cancel: CancellationToken,
    /// Registry revision the menu was last published for.
    pub(super) menu_revision: Option<u64>,
    /// Last windowed view raised together, and when.
    pub(super) raised: Option<(ViewId, Instant)>,
}

impl SplitViewApp {
    pub fn new(
        config: SplitViewConfig,
        probe: Arc<dyn HeaderProbe>,
        host: Arc<dyn SurfaceHost>,
        store: Arc<dyn SnapshotStore>,
    ) -> Self {
        let resolver = frame_resolver(&config, probe);
        let rewrite = rewrite_policy(&config);
        let overrides = OverrideSet::new(config.framing.override_scope);
        let registry = ViewRegistry::new(config.display.max_panels as usize);
        let history = HistoryLog::new(config.history.max_entries as usize);

        Self {
            config,
            config_path: None,
            registry,
            history,
            resolver,
            rewrite,
            overrides,
            host,
            store,
            event_bus: EventBus::new(EVENT_CAPACITY),
            cancel: CancellationToken::new(),
            menu_revision: None,
            raised: None,
        }
    }

    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Receive everything the controller emits toward the rendering layer.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe()
    }

    pub(super) fn preferences(&self) -> FramingPreferences {
        FramingPreferences {
            mode: self.config.display.mode,
            fallback: self.config.framing.fallback,
            warn_on_fallback: self.config.display.warn_on_fallback,
        }
    }
}

/// A resolver carrying the framing settings of `config`.
pub fn frame_resolver(config: &SplitViewConfig, probe: Arc<dyn HeaderProbe>) -> FrameResolver {
    FrameResolver::new(probe, rule_set(config))
        .with_timeout(probe_timeout(config))
        .with_header_policy(header_policy(config))
}

pub(super) fn rule_set(config: &SplitViewConfig) -> DomainRuleSet {
    DomainRuleSet::new(config.framing.force_windowed_domains.entries())
}

pub(super) fn probe_timeout(config: &SplitViewConfig) -> Duration {
    Duration::from_millis(config.framing.probe_timeout_ms)
}

pub(super) fn header_policy(config: &SplitViewConfig) -> HeaderPolicy {
    HeaderPolicy {
        block_on_self: config.framing.block_on_frame_ancestors_self,
    }
}

pub(super) fn rewrite_policy(config: &SplitViewConfig) -> HeaderRewritePolicy {
    HeaderRewritePolicy::new(config.framing.strip_headers, &config.framing.extension_origin)
}
