//! slat: tab-bar decorations for grouped windows in a tiling compositor.
//!
//! The workspace splits into three crates:
//! - `slat-anim`: goal-driven animated values with easing and instant warp
//! - `slat-core`: geometry, color, config, the host node tree, damage
//!   tracking, and the recorded paint pass
//! - `slat-tabs`: tab entries, the bar reconciliation and layout
//!   animation, and the per-group damage/render lifecycle
//!
//! This crate re-exports the public surface of all three.

pub use slat_anim as anim;
pub use slat_core as core;
pub use slat_tabs as tabs;

pub use slat_tabs::{TabBar, TabEntry, TabGroup};
