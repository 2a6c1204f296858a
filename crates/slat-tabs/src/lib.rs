//! slat-tabs: tab-bar decorations for grouped windows.
//!
//! A [`TabGroup`] decorates one tabbed container in the host's window
//! tree. Each time group membership or geometry changes the host calls
//! [`TabGroup::update_with_group`], which reconciles the bar's entries
//! against the node list while preserving identity and in-flight
//! animations. Once per frame [`TabGroup::tick`] advances animations and
//! accumulates damage, and [`TabGroup::render`] records the stencil-masked
//! paint pass, skipping all work when the bar's region is undamaged.

mod bar;
mod entry;
mod group;
mod overlap;
mod texture;

pub use bar::TabBar;
pub use entry::{EntryState, TabEntry};
pub use group::TabGroup;
pub use overlap::find_overlapping_windows;
