//! Per-group tab bar container: lifecycle, damage, and the render pass.

use slat_anim::AnimatedValue;
use slat_core::{
    Config, DamageTracker, NodeId, NodeTree, Rect, RenderFrame, Vec2, Workspace, WorkspaceId,
};
use tracing::debug;

use crate::bar::TabBar;
use crate::overlap::find_overlapping_windows;

/// Tab bar decoration for one tabbed group in the node tree.
#[derive(Debug)]
pub struct TabGroup {
    /// Gap-adjusted absolute position of the bar.
    pub(crate) pos: AnimatedValue<Vec2>,
    /// Bar size; height comes from config, width from the group node.
    pub(crate) size: AnimatedValue<Vec2>,
    /// Mirror of the represented node's visibility.
    pub hidden: bool,
    /// Workspace whose render offset and fullscreen state apply.
    pub workspace_id: Option<WorkspaceId>,
    pub bar: TabBar,
    last_pos: Vec2,
    last_size: Vec2,
    /// Sibling windows overlapping the bar's vertical extent, stenciled
    /// out before entries are drawn.
    stencil_windows: Vec<NodeId>,
}

impl TabGroup {
    /// Create the decoration for `node` and snap it into place.
    ///
    /// The bar's contents still animate in, but the group itself appears
    /// at its resolved position immediately.
    pub fn new(tree: &NodeTree, node: NodeId, config: &Config) -> Self {
        let mut group = Self {
            pos: AnimatedValue::new(Vec2::ZERO, config.animation.group),
            size: AnimatedValue::new(Vec2::ZERO, config.animation.group),
            hidden: false,
            workspace_id: None,
            bar: TabBar::new(config.animation.bar),
            last_pos: Vec2::ZERO,
            last_size: Vec2::ZERO,
            stencil_windows: Vec::new(),
        };

        group.update_with_group(tree, node, config);
        group.bar.update_animations(true);
        group.pos.warp();
        group.size.warp();
        group
    }

    /// Re-sync with the represented node after a membership or geometry
    /// change.
    pub fn update_with_group(&mut self, tree: &NodeTree, node: NodeId, config: &Config) {
        debug!(?node, "updating tab bar for group");

        let Some(n) = tree.get(node) else {
            return;
        };

        let gaps = if n.parent.is_none() {
            config.general.gaps_out
        } else {
            config.general.gaps_in
        };
        let target_pos = n.pos + Vec2::splat(gaps);
        let target_size = Vec2::new(n.size.x - gaps * 2.0, config.tabs.height);

        self.hidden = n.hidden;
        self.pos.set_goal(target_pos);
        self.size.set_goal(target_size);

        self.bar.update_node_list(tree, node);
        self.bar.update_animations(false);

        if let Some(focused) = tree.group(node).and_then(|g| g.focused_child) {
            self.update_stencil_windows(tree, focused);
        }
    }

    /// Start the exit animation; poll [`TabGroup::is_destroyed`] to know
    /// when the decoration can be dropped.
    pub fn begin_destroy(&mut self) {
        self.bar.begin_destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.bar.is_destroyed()
    }

    pub fn stencil_windows(&self) -> &[NodeId] {
        &self.stencil_windows
    }

    /// Rebuild the set of windows that must be stenciled out, scanning
    /// the focused child's subtree against the bar's target height.
    pub(crate) fn update_stencil_windows(&mut self, tree: &NodeTree, focused: NodeId) {
        self.stencil_windows.clear();
        find_overlapping_windows(tree, focused, self.size.goal().y, &mut self.stencil_windows);
    }

    /// Per-frame update: advance animations, retarget the fullscreen
    /// fade, and accumulate damage for regions the bar vacated or
    /// changed.
    pub fn tick(
        &mut self,
        dt_ms: f32,
        workspace: Option<&Workspace>,
        config: &Config,
        damage: &mut DamageTracker,
    ) {
        if !self.bar.destroying {
            if let Some(ws) = workspace {
                let target = if ws.has_fullscreen { 0.0 } else { 1.0 };
                self.bar.fade_opacity.set_goal(target);
            }
        }

        self.pos.advance(dt_ms);
        self.size.advance(dt_ms);
        self.bar.advance(dt_ms);

        let size = self.size.current();
        let mut pos = self.pos.current();
        pos.y += self.bar.vertical_pos.current()
            * size.y
            * if config.tabs.from_top { -1.0 } else { 1.0 };

        if self.last_pos != pos || self.last_size != size {
            // Clear the region the bar is moving out of.
            damage.damage_rect(Rect::from_pos_size(self.last_pos, self.last_size));
            self.bar.damaged = true;
            self.last_pos = pos;
            self.last_size = size;
        }

        if self.bar.destroy || self.bar.dirty {
            damage.damage_rect(Rect::from_pos_size(pos, size));
            self.bar.damaged = true;
            self.bar.dirty = false;
        }
    }

    /// Record the bar's paint pass for this frame.
    ///
    /// Skips all work when the bar lies outside the monitor, its region
    /// is undamaged, or it has finished destroying. Overlapping windows
    /// are written to the stencil first so entries render through to the
    /// background rather than over them.
    pub fn render(&mut self, frame: &mut RenderFrame<'_>) {
        let scale = frame.monitor.scale;

        let size = self.size.current();
        let mut pos = self.pos.current() - frame.monitor.position;
        pos.y += self.bar.vertical_pos.current()
            * size.y
            * if frame.config.tabs.from_top { -1.0 } else { 1.0 };
        if let Some(ws) = frame.workspace {
            pos += ws.render_offset;
        }

        let scaled_pos = (pos * scale).round();
        let scaled_size = (size * scale).round();
        let bar_box = Rect::from_pos_size(scaled_pos, scaled_size);

        let monitor_px = frame.monitor.size * scale;
        if scaled_pos.x > monitor_px.x
            || scaled_pos.y > monitor_px.y
            || scaled_pos.x + scaled_size.x < 0.0
            || scaled_pos.y + scaled_size.y < 0.0
        {
            return;
        }

        if !self.bar.damaged {
            self.bar.damaged = frame.damage.intersects(&bar_box);
        }
        if !self.bar.damaged || self.bar.destroy {
            return;
        }
        self.bar.damaged = false;

        // Mask out every overlapping window that is still alive.
        frame.painter.stencil_begin();
        for &window in &self.stencil_windows {
            let Some(node) = frame.tree.get(window) else {
                continue;
            };
            if !node.is_window() {
                continue;
            }

            let window_box =
                Rect::from_pos_size(node.pos - frame.monitor.position, node.size)
                    .scale_round(scale);
            if !window_box.is_empty() {
                frame
                    .painter
                    .stencil_rect(window_box, frame.config.general.window_rounding);
            }
        }
        frame.painter.stencil_use();

        let fade_opacity =
            self.bar.fade_opacity.current() * frame.workspace.map(|ws| ws.alpha).unwrap_or(1.0);
        let padding = frame.config.tabs.padding;

        // Non-focused entries first; the focused tab composites on top.
        for focused_pass in [false, true] {
            for entry in &mut self.bar.entries {
                if entry.focused() != focused_pass {
                    continue;
                }

                let entry_pos = Vec2::new(
                    (pos.x + entry.offset_fraction() * size.x + padding * 0.5) * scale,
                    scaled_pos.y,
                );
                let entry_size = Vec2::new(
                    (entry.width_fraction() * size.x - padding) * scale,
                    scaled_size.y,
                );
                if entry_size.x <= 0.0 || entry_size.y <= 0.0 || fade_opacity == 0.0 {
                    continue;
                }

                let entry_box = Rect::from_pos_size(entry_pos, entry_size);
                let texture =
                    entry.prepare_texture(frame.painter, entry_box, &frame.config.tabs);
                frame.painter.draw_texture(texture, entry_box, fade_opacity);
            }
        }

        frame.painter.stencil_end();
    }
}
