//! Per-frame render state and the recorded paint pass.
//!
//! The decoration engine does not talk to the GPU. It records its work as
//! [`PaintCommand`]s through a [`Painter`]; the compositor executes the
//! list inside its own render pass. Stencil commands bracket the entry
//! draws so overlapping windows mask the bar out, and texture uploads are
//! only recorded when an entry's raster was regenerated.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::Config;
use crate::damage::DamageTracker;
use crate::geometry::{Rect, Vec2};
use crate::tree::NodeTree;

/// Identifies the workspace whose render offset and fullscreen state apply
/// to a decoration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorkspaceId(pub u32);

/// Monitor the current frame is rendering for.
#[derive(Clone, Copy, Debug)]
pub struct Monitor {
    /// Output scale factor; layout coordinates times scale give pixels.
    pub scale: f32,
    /// Monitor position in global layout space.
    pub position: Vec2,
    /// Monitor size in layout space.
    pub size: Vec2,
}

/// Per-workspace render state, resolved by the host for the frame.
#[derive(Clone, Copy, Debug)]
pub struct Workspace {
    /// Slide offset applied while the workspace animates in or out.
    pub render_offset: Vec2,
    /// Workspace-wide opacity multiplier.
    pub alpha: f32,
    /// A fullscreen window covers this workspace.
    pub has_fullscreen: bool,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            render_offset: Vec2::ZERO,
            alpha: 1.0,
            has_fullscreen: false,
        }
    }
}

/// Handle to a GPU texture owned by a tab entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(u64);

impl TextureId {
    /// Allocate a fresh handle.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// One unit of recorded GPU work.
#[derive(Clone, Debug)]
pub enum PaintCommand {
    /// (Re)upload pixel data for a texture. sRGB RGBA8, row-major.
    UploadTexture {
        texture: TextureId,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    },
    /// Enable stencil writes; color output stays masked until
    /// [`PaintCommand::StencilUse`].
    StencilBegin,
    /// Write a rounded rect into the stencil buffer.
    StencilRect { rect: Rect, rounding: f32 },
    /// Restrict subsequent draws to pixels the stencil left untouched.
    StencilUse,
    /// Composite a textured quad.
    DrawTexture {
        texture: TextureId,
        rect: Rect,
        alpha: f32,
    },
    /// Clear and disable stencil state.
    StencilEnd,
}

/// Everything a decoration needs to paint itself for one frame, resolved
/// by the host: the command recorder, the output being rendered, the
/// decoration's workspace (if it still exists), the frame's accumulated
/// damage, the live node tree, and the config snapshot.
pub struct RenderFrame<'a> {
    pub painter: &'a mut Painter,
    pub monitor: &'a Monitor,
    pub workspace: Option<&'a Workspace>,
    pub damage: &'a DamageTracker,
    pub tree: &'a NodeTree,
    pub config: &'a Config,
}

/// Records paint commands for one frame.
#[derive(Debug, Default)]
pub struct Painter {
    commands: Vec<PaintCommand>,
}

impl Painter {
    pub fn begin_frame() -> Self {
        Self::default()
    }

    pub fn upload_texture(&mut self, texture: TextureId, width: u32, height: u32, pixels: Vec<u8>) {
        self.commands.push(PaintCommand::UploadTexture {
            texture,
            width,
            height,
            pixels,
        });
    }

    pub fn stencil_begin(&mut self) {
        self.commands.push(PaintCommand::StencilBegin);
    }

    pub fn stencil_rect(&mut self, rect: Rect, rounding: f32) {
        self.commands.push(PaintCommand::StencilRect { rect, rounding });
    }

    pub fn stencil_use(&mut self) {
        self.commands.push(PaintCommand::StencilUse);
    }

    pub fn draw_texture(&mut self, texture: TextureId, rect: Rect, alpha: f32) {
        self.commands.push(PaintCommand::DrawTexture {
            texture,
            rect,
            alpha,
        });
    }

    pub fn stencil_end(&mut self) {
        self.commands.push(PaintCommand::StencilEnd);
    }

    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<PaintCommand> {
        self.commands
    }
}
