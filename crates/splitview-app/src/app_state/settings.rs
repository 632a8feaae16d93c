//! Configuration and lifecycle handlers.

use splitview_common::{Event, InstallReason, OptionsUpdate, SplitViewError};
use splitview_config::{save_config_to_path, validation, ReloadManager, SplitViewConfig};
use tracing::{debug, info, warn};

use super::core::{header_policy, probe_timeout, rewrite_policy, rule_set, SplitViewApp};
use super::dispatch::options_saved_notice;
use super::reply::Reply;
use crate::host::HostPage;

/// Id of the dynamic header-rewrite rule installed in the host.
const HEADER_RULE_ID: u32 = 1;

impl SplitViewApp {
    /// Apply what the options page sent, write it to the config file, and
    /// switch to it.
    pub(super) async fn save_options(
        &mut self,
        options: &OptionsUpdate,
    ) -> Result<Reply, SplitViewError> {
        let mut config = self.config.clone();
        if config.apply_options(options) {
            validation::validate(&config)?;
            if let Some(path) = &self.config_path {
                save_config_to_path(&config, path)?;
            }
            self.apply_config(config).await;
        }
        self.event_bus
            .publish(Event::Notice(options_saved_notice()));
        Ok(Reply::Ack)
    }

    /// Read the config file again. An invalid file leaves the current
    /// config in place.
    pub(super) async fn reload_config(&mut self) -> Result<Reply, SplitViewError> {
        let Some(path) = self.config_path.clone() else {
            debug!("no config file to reload");
            return Ok(Reply::Ack);
        };
        let config = ReloadManager::new(path).reload()?;
        self.apply_config(config).await;
        Ok(Reply::Ack)
    }

    /// Switch every component to `config`. Returns false when nothing
    /// changed.
    ///
    /// Live views keep their panels even if `max_panels` shrinks below
    /// their size; only later additions are refused.
    pub async fn apply_config(&mut self, config: SplitViewConfig) -> bool {
        if config == self.config {
            return false;
        }
        self.resolver
            .reconfigure(rule_set(&config), probe_timeout(&config), header_policy(&config));
        self.overrides.set_scope(config.framing.override_scope);
        self.registry.set_max_panels(config.display.max_panels as usize);
        self.history.set_max_entries(config.history.max_entries as usize);

        let rewrite = rewrite_policy(&config);
        let rewrite_changed = rewrite != self.rewrite;
        self.rewrite = rewrite;
        if config.framing.user_agent != self.config.framing.user_agent {
            info!("user agent change takes effect after restart");
        }
        self.config = config;

        if rewrite_changed {
            self.push_header_rules().await;
        }
        info!(mode = %self.config.display.mode, "config applied");
        self.event_bus.publish(Event::ConfigReloaded);
        true
    }

    pub(super) async fn open_options(&self) -> Result<Reply, SplitViewError> {
        self.host.open_page(HostPage::Options).await?;
        Ok(Reply::Ack)
    }

    /// The extension was installed, updated, or the browser restarted.
    pub(super) async fn installed(
        &mut self,
        reason: &InstallReason,
    ) -> Result<Reply, SplitViewError> {
        info!(reason = %reason.0, "extension started");
        if reason.is_first_install() {
            if let Err(e) = self.host.open_page(HostPage::Welcome).await {
                warn!(error = %e, "failed to open welcome page");
            }
        }
        self.push_header_rules().await;
        self.publish_menu(true);
        Ok(Reply::Ack)
    }

    /// Stop in-flight probes and write everything out.
    pub(super) fn shutdown(&mut self) -> Result<Reply, SplitViewError> {
        info!(views = self.registry.len(), "shutting down");
        self.cancel.cancel();
        self.persist_views();
        self.persist_history();
        self.persist_overrides();
        self.event_bus.publish(Event::Shutdown);
        Ok(Reply::Ack)
    }

    /// Install the header rewrite in the host, or remove it when inactive.
    async fn push_header_rules(&self) {
        let rules: Vec<serde_json::Value> =
            self.rewrite.declarative_rule(HEADER_RULE_ID).into_iter().collect();
        debug!(rules = rules.len(), "pushing header rules");
        if let Err(e) = self.host.apply_header_rules(rules).await {
            warn!(error = %e, "failed to install header rules");
        }
    }
}
