use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use splitview_common::ConfigError;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Signals `()` once per settled burst of writes to a single config file.
///
/// The containing directory is what gets watched: editors that save by
/// writing a new file and renaming it over the old one never modify the
/// original inode.
pub struct ConfigWatcher {
    dir: PathBuf,
    file_name: OsString,
}

impl ConfigWatcher {
    /// `path` may not exist yet; creating it later is reported like an edit.
    pub fn new(path: PathBuf) -> Result<Self, ConfigError> {
        let Some(file_name) = path.file_name().map(OsString::from) else {
            return Err(ConfigError::WatchError(format!(
                "{} is not a file path",
                path.display()
            )));
        };
        if !path.is_file() {
            warn!(path = %path.display(), "config file absent, will pick it up once created");
        }
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self { dir, file_name })
    }

    fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Runs until the receiving end of `changed` goes away.
    pub async fn watch(self, changed: mpsc::Sender<()>) -> Result<(), ConfigError> {
        let (ping_tx, mut pings) = mpsc::channel::<()>(16);
        let target = self.file_name.clone();
        let path = self.path();

        let mut notifier = RecommendedWatcher::new(
            move |result: notify::Result<Event>| match result {
                Ok(event) => {
                    if concerns(&event, &target) {
                        let _ = ping_tx.try_send(());
                    }
                }
                Err(e) => error!("notify reported: {e}"),
            },
            notify::Config::default(),
        )
        .map_err(|e| ConfigError::WatchError(format!("notify backend unavailable: {e}")))?;
        notifier
            .watch(&self.dir, RecursiveMode::NonRecursive)
            .map_err(|e| {
                ConfigError::WatchError(format!("cannot watch {}: {e}", self.dir.display()))
            })?;
        info!(path = %path.display(), "config watch armed");

        loop {
            if pings.recv().await.is_none() || !settle(&mut pings).await {
                break;
            }
            debug!(path = %path.display(), "config file settled after change");
            if changed.send(()).await.is_err() {
                break;
            }
        }
        debug!("config watch stopped");
        drop(notifier);
        Ok(())
    }
}

fn concerns(event: &Event, file_name: &OsString) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event.paths.iter().any(|p| is_named(p, file_name))
}

fn is_named(path: &Path, file_name: &OsString) -> bool {
    path.file_name() == Some(file_name.as_os_str())
}

/// Wait for [`DEBOUNCE`] without a ping. False means the sender closed
/// before things went quiet.
async fn settle(pings: &mut mpsc::Receiver<()>) -> bool {
    while let Ok(next) = tokio::time::timeout(DEBOUNCE, pings.recv()).await {
        if next.is_none() {
            return false;
        }
    }
    true
}
