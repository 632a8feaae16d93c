//! Top-level application state.
//!
//! [`SplitViewApp`] is the single controller: it owns the view registry,
//! the frame resolver, overrides, history, and config, and runs each
//! [`Command`](splitview_common::Command) to completion before the next.
//! Handlers are grouped by what they touch.

mod core;
mod dispatch;
mod menu;
mod panels;
mod persistence;
mod reply;
mod settings;
mod split;
mod surfaces;
mod views;

#[cfg(test)]
mod tests;

pub use self::core::{frame_resolver, SplitViewApp};
pub use reply::Reply;
