//! File watcher for live config reload.
//!
//! `notify` events for the config file are coalesced over a 500ms
//! window so an editor's write-then-rename produces one signal.

mod config_watcher;


pub use config_watcher::{ConfigWatcher, DEBOUNCE};
