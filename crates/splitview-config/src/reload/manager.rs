use std::path::PathBuf;

use splitview_common::ConfigError;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use crate::schema::SplitViewConfig;
use crate::toml_loader;
use crate::validation;
use crate::watcher::ConfigWatcher;

/// Publishes the config file's last valid contents on a watch channel.
///
/// Edits that do not parse or validate are reported and skipped, so
/// subscribers only ever see a config they can run with.
pub struct ReloadManager {
    config_path: PathBuf,
}

impl ReloadManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Read the file once, then follow it from a background task.
    ///
    /// When the first read fails the defaults are published instead.
    pub async fn start(
        config_path: PathBuf,
    ) -> (SplitViewConfig, watch::Receiver<SplitViewConfig>) {
        let manager = Self::new(config_path);
        let initial = manager.reload().unwrap_or_else(|e| {
            warn!(path = %manager.config_path.display(), "starting on defaults: {e}");
            SplitViewConfig::default()
        });

        let (publish, subscribe) = watch::channel(initial.clone());
        tokio::spawn(manager.follow(publish));
        (initial, subscribe)
    }

    /// Parse and validate the file as it is right now.
    pub fn reload(&self) -> Result<SplitViewConfig, ConfigError> {
        let config = toml_loader::load_from_path(&self.config_path)?;
        validation::validate(&config).map(|()| config)
    }

    async fn follow(self, publish: watch::Sender<SplitViewConfig>) {
        let watcher = match ConfigWatcher::new(self.config_path.clone()) {
            Ok(watcher) => watcher,
            Err(e) => {
                error!("live reload disabled: {e}");
                return;
            }
        };
        let (signal, mut signals) = mpsc::channel(4);
        tokio::spawn(async move {
            if let Err(e) = watcher.watch(signal).await {
                error!("live reload stopped: {e}");
            }
        });

        while signals.recv().await.is_some() {
            if publish.is_closed() {
                debug!("no config subscribers left");
                break;
            }
            match self.reload() {
                Ok(fresh) => {
                    let replaced = publish.send_if_modified(|current| {
                        let differs = *current != fresh;
                        if differs {
                            *current = fresh;
                        }
                        differs
                    });
                    if replaced {
                        info!(path = %self.config_path.display(), "config reloaded");
                    } else {
                        debug!("config file touched without changes");
                    }
                }
                Err(e) => warn!("ignoring config edit: {e}"),
            }
        }
    }
}
