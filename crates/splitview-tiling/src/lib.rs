//! Geometry for tiled split views.
//!
//! Pure functions only: given a number of panels and a rectangle, compute
//! where each panel goes. Nothing here talks to the host.

pub mod layout;
pub mod windows;

pub use layout::plan;
pub use windows::{retile, TilePlacement};
