//! slat-core: shared substrate for the tab-bar decoration engine.
//!
//! Holds everything the tab-bar crates consume from their host: 2D
//! geometry, premultiplied-linear color, the TOML configuration layer, the
//! window/group node tree, the process-wide damage accumulator, and the
//! recorded paint pass the compositor executes.

pub mod color;
pub mod config;
pub mod damage;
pub mod frame;
pub mod geometry;
pub mod tree;

pub use color::Color;
pub use config::{Config, ConfigError};
pub use damage::DamageTracker;
pub use frame::{Monitor, PaintCommand, Painter, RenderFrame, TextureId, Workspace, WorkspaceId};
pub use geometry::{Rect, Vec2};
pub use tree::{GroupLayout, Node, NodeId, NodeKind, NodeTree};
