//! Live config reload.
//!
//! Pairs the file watcher with loading and validation, and publishes
//! each good config on a `tokio::sync::watch` channel.

mod manager;

#[cfg(test)]
mod tests;

pub use manager::ReloadManager;
