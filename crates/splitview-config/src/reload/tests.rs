use std::time::Duration;

use splitview_common::DisplayMode;

use super::*;
use crate::SplitViewConfig;

fn config_file(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

#[tokio::test]
async fn missing_file_publishes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (config, rx) = ReloadManager::start(dir.path().join("config.toml")).await;
    assert_eq!(config, SplitViewConfig::default());
    assert_eq!(*rx.borrow(), config);
}

#[tokio::test]
async fn partial_file_fills_in_defaults() {
    let (_dir, path) = config_file("[display]\nmode = \"windowed\"\n");
    let (config, _rx) = ReloadManager::start(path).await;
    assert_eq!(config.display.mode, DisplayMode::Windowed);
    assert_eq!(config.display.max_panels, 4);
}

#[test]
fn out_of_range_panel_count_is_refused() {
    let (_dir, path) = config_file("[display]\nmax_panels = 50\n");
    let err = ReloadManager::new(path).reload().unwrap_err();
    assert!(err.to_string().contains("display.max_panels"));
}

#[tokio::test]
async fn invalid_file_at_startup_falls_back_to_defaults() {
    let (_dir, path) = config_file("[framing]\nprobe_timeout_ms = 1\n");
    let (config, _rx) = ReloadManager::start(path).await;
    assert_eq!(config.framing.probe_timeout_ms, 2500);
}

#[tokio::test]
async fn edits_reach_subscribers_and_bad_edits_do_not() {
    let (_dir, path) = config_file("[display]\nmax_panels = 4\n");
    let (_, mut rx) = ReloadManager::start(path.clone()).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    std::fs::write(&path, "[display]\nmax_panels = 50\n").unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(rx.borrow_and_update().display.max_panels, 4);

    std::fs::write(&path, "[display]\nmax_panels = 6\n").unwrap();
    tokio::time::timeout(Duration::from_secs(5), rx.changed())
        .await
        .expect("reload not published")
        .unwrap();
    assert_eq!(rx.borrow().display.max_panels, 6);
}
