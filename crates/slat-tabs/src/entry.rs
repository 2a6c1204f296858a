//! One tab's visual state.

use slat_anim::{AnimatedValue, AnimationConfig};
use slat_core::config::TabsConfig;
use slat_core::{NodeId, Painter, Rect, TextureId};

use crate::texture::rasterize_tab;

/// Lifecycle state of a tab entry.
///
/// Entries are never deleted outright when their node leaves the group:
/// they pass through `Removing` while their width animates to zero, and
/// only then get erased. A node that comes back mid-removal cancels the
/// removal and the entry resumes from its in-flight width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryState {
    /// Created but not yet placed by a layout pass.
    Uninitialized,
    /// Placed and participating in the bar.
    Active,
    /// Node left the group; width is animating to zero.
    Removing,
}

/// Inputs the cached raster depends on.
#[derive(Debug, PartialEq)]
struct TextureKey {
    rounding: f32,
    focused: bool,
    urgent: bool,
    width: u32,
    height: u32,
}

#[derive(Debug)]
struct TabTexture {
    id: TextureId,
    key: TextureKey,
}

/// Visual state for one child node of a tabbed group.
#[derive(Debug)]
pub struct TabEntry {
    node: NodeId,
    /// Title snapshotted when the entry was created.
    pub title: String,
    focused: bool,
    urgent: bool,
    state: EntryState,
    /// Left edge as a fraction of the bar width.
    pub(crate) offset: AnimatedValue<f32>,
    /// Width as a fraction of the bar width.
    pub(crate) width: AnimatedValue<f32>,
    texture: Option<TabTexture>,
}

impl TabEntry {
    pub(crate) fn new(node: NodeId, title: String, urgent: bool, anim: AnimationConfig) -> Self {
        Self {
            node,
            title,
            focused: false,
            urgent,
            state: EntryState::Uninitialized,
            offset: AnimatedValue::new(0.0, anim),
            width: AnimatedValue::new(0.0, anim),
            texture: None,
        }
    }

    /// Identity comparison against the represented node.
    pub fn matches(&self, node: NodeId) -> bool {
        self.node == node
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    pub fn urgent(&self) -> bool {
        self.urgent
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn is_removing(&self) -> bool {
        self.state == EntryState::Removing
    }

    pub(crate) fn is_uninitialized(&self) -> bool {
        self.state == EntryState::Uninitialized
    }

    /// Returns whether the flag changed, so the bar can mark itself dirty.
    pub(crate) fn set_focused(&mut self, focused: bool) -> bool {
        if self.focused == focused {
            return false;
        }
        self.focused = focused;
        true
    }

    pub(crate) fn set_urgent(&mut self, urgent: bool) -> bool {
        if self.urgent == urgent {
            return false;
        }
        self.urgent = urgent;
        true
    }

    pub(crate) fn mark_placed(&mut self) {
        self.state = EntryState::Active;
    }

    /// Start the exit animation.
    pub(crate) fn begin_removal(&mut self) {
        self.state = EntryState::Removing;
        self.width.set_goal(0.0);
    }

    /// The node came back before the exit animation finished; resume as an
    /// active entry from the current in-flight width.
    pub(crate) fn cancel_removal(&mut self) {
        self.state = EntryState::Active;
    }

    /// Step both animated properties. Returns whether anything moved.
    pub(crate) fn advance(&mut self, dt_ms: f32) -> bool {
        let offset_moved = self.offset.advance(dt_ms);
        let width_moved = self.width.advance(dt_ms);
        offset_moved || width_moved
    }

    /// Current left edge as a fraction of the bar width.
    pub fn offset_fraction(&self) -> f32 {
        self.offset.current()
    }

    /// Current width as a fraction of the bar width.
    pub fn width_fraction(&self) -> f32 {
        self.width.current()
    }

    /// Width the entry is animating toward.
    pub fn width_goal(&self) -> f32 {
        self.width.goal()
    }

    /// Offset the entry is animating toward.
    pub fn offset_goal(&self) -> f32 {
        self.offset.goal()
    }

    /// Produce (or reuse) the raster for this entry at the given pixel box,
    /// recording an upload only when a cache key changed.
    pub(crate) fn prepare_texture(
        &mut self,
        painter: &mut Painter,
        pixel_box: Rect,
        tabs: &TabsConfig,
    ) -> TextureId {
        let width = pixel_box.w.max(0.0).round() as u32;
        let height = pixel_box.h.max(0.0).round() as u32;
        let rounding = tabs
            .rounding
            .min(pixel_box.w * 0.5)
            .min(pixel_box.h * 0.5);

        let key = TextureKey {
            rounding,
            focused: self.focused,
            urgent: self.urgent,
            width,
            height,
        };

        if let Some(texture) = &self.texture {
            if texture.key == key {
                return texture.id;
            }
        }

        let color = if self.focused {
            tabs.col_active
        } else if self.urgent {
            tabs.col_urgent
        } else {
            tabs.col_inactive
        };

        let pixels = rasterize_tab(width, height, rounding, color);
        let id = self
            .texture
            .as_ref()
            .map(|t| t.id)
            .unwrap_or_else(TextureId::next);
        painter.upload_texture(id, width, height, pixels);
        self.texture = Some(TabTexture { id, key });
        id
    }
}
