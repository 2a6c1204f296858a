//! The ordered tab entry collection and its reconciliation.

use slat_anim::{AnimatedValue, AnimationConfig};
use slat_core::{NodeId, NodeTree};

use crate::entry::TabEntry;

/// Ordered collection of [`TabEntry`] mirroring one group's child list.
///
/// The bar never rebuilds its entries wholesale: `update_node_list`
/// diffs the live node list against the existing entries so that nodes
/// which persist or merely move keep their identity and in-flight
/// animation state, and nodes which disappear animate out before being
/// erased.
#[derive(Debug)]
pub struct TabBar {
    pub(crate) entries: Vec<TabEntry>,
    /// An animated value changed; consumed by damage computation.
    pub(crate) dirty: bool,
    /// The bar's screen region changed and must be redrawn.
    pub(crate) damaged: bool,
    /// Exit fade has started.
    pub(crate) destroying: bool,
    /// Exit fade has finished; the owner should drop the bar.
    pub(crate) destroy: bool,
    /// Slide-in/out offset in bar heights, 0 = fully shown.
    pub(crate) vertical_pos: AnimatedValue<f32>,
    pub(crate) fade_opacity: AnimatedValue<f32>,
    anim: AnimationConfig,
}

impl TabBar {
    pub(crate) fn new(anim: AnimationConfig) -> Self {
        let mut vertical_pos = AnimatedValue::new(1.0, anim);
        let mut fade_opacity = AnimatedValue::new(0.0, anim);

        // Slide and fade in from the hidden state.
        vertical_pos.set_goal(0.0);
        fade_opacity.set_goal(1.0);

        Self {
            entries: Vec::new(),
            dirty: false,
            damaged: false,
            destroying: false,
            destroy: false,
            vertical_pos,
            fade_opacity,
            anim,
        }
    }

    pub fn entries(&self) -> &[TabEntry] {
        &self.entries
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_destroying(&self) -> bool {
        self.destroying
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroy
    }

    /// Current slide offset in bar heights.
    pub fn slide_fraction(&self) -> f32 {
        self.vertical_pos.current()
    }

    pub fn fade_opacity(&self) -> f32 {
        self.fade_opacity.current()
    }

    /// Start the exit animation; `destroy` is set once the fade settles.
    pub(crate) fn begin_destroy(&mut self) {
        self.vertical_pos.set_goal(1.0);
        self.fade_opacity.set_goal(0.0);
        self.destroying = true;
    }

    /// Advance every bar-owned animated value by `dt_ms`.
    ///
    /// Marks the bar dirty when anything moved, erases entries whose exit
    /// animation completed, and promotes `destroying` to `destroy` once
    /// the fade settles.
    pub(crate) fn advance(&mut self, dt_ms: f32) {
        let mut changed = self.vertical_pos.advance(dt_ms);
        changed |= self.fade_opacity.advance(dt_ms);
        for entry in &mut self.entries {
            changed |= entry.advance(dt_ms);
        }
        if changed {
            self.dirty = true;
        }

        self.entries
            .retain(|e| !(e.is_removing() && e.width.is_settled() && e.width.current() == 0.0));

        if self.destroying && self.fade_opacity.is_settled() {
            self.destroy = true;
        }
    }

    /// Reconcile the entry list against `group`'s current child list.
    ///
    /// Two passes over the lists: first a lock-step scan that sides out
    /// entries not matching the node order, then a rebuild walk that
    /// splices sided-out entries back where their node reappeared (keeping
    /// their animation state) or creates fresh entries. Entries whose node
    /// is gone start their exit animation instead of being erased.
    pub(crate) fn update_node_list(&mut self, tree: &NodeTree, group: NodeId) {
        let Some(group_data) = tree.group(group) else {
            return;
        };
        let nodes = &group_data.children;

        // Pass 1: side out entries that fall out of lock-step with the
        // node order. Parallel flags keep the sided-out entries in place.
        let mut removed = vec![false; self.entries.len()];
        {
            let mut ei = 0;
            'nodes: for &node in nodes {
                loop {
                    if ei >= self.entries.len() {
                        break 'nodes;
                    }
                    if self.entries[ei].matches(node) {
                        break;
                    }
                    removed[ei] = true;
                    ei += 1;
                }
                ei += 1;
            }
            // Entries past the end of the node list are removed too.
            while ei < self.entries.len() {
                removed[ei] = true;
                ei += 1;
            }
        }

        // Pass 2: rebuild in node order, reusing sided-out entries.
        let mut i = 0;
        for &node in nodes {
            loop {
                if i < self.entries.len() && self.entries[i].matches(node) {
                    break;
                }

                // A sided-out entry sits here; leave it to animate out.
                if i < self.entries.len() && removed[i] {
                    i += 1;
                    continue;
                }

                let moved = (0..self.entries.len())
                    .find(|&j| removed[j] && self.entries[j].matches(node));
                match moved {
                    Some(j) => {
                        // The node moved: splice its entry back here with
                        // its animation state intact.
                        let entry = self.entries.remove(j);
                        removed.remove(j);
                        if j < i {
                            i -= 1;
                        }
                        self.entries.insert(i, entry);
                        removed.insert(i, false);
                    }
                    None => {
                        let entry = TabEntry::new(
                            node,
                            tree.title_of(node).to_string(),
                            tree.is_urgent(node),
                            self.anim,
                        );
                        self.entries.insert(i, entry);
                        removed.insert(i, false);
                    }
                }
                break;
            }

            // A reused entry may still be mid-removal from an earlier
            // update; resume it instead of letting the exit complete.
            if self.entries[i].is_removing() {
                self.entries[i].cancel_removal();
            }

            let focused = group_data.focused_child == Some(node)
                || (group_data.group_focused && tree.is_indirectly_focused(group));
            if self.entries[i].set_focused(focused) {
                self.dirty = true;
            }
            if self.entries[i].set_urgent(tree.is_urgent(node)) {
                self.dirty = true;
            }

            i += 1;
        }

        // Pass 3: start exit animations for everything still sided out.
        let mut j = self.entries.len();
        while j > 0 {
            j -= 1;
            if !removed[j] {
                continue;
            }
            if !self.entries[j].is_removing() {
                self.entries[j].begin_removal();
            }
            // Exit animation already finished (or never became visible).
            if self.entries[j].width.current() == 0.0 {
                self.entries.remove(j);
            }
        }
    }

    /// Recompute layout targets for every entry.
    ///
    /// Active entries share the bar evenly; entries animating out keep
    /// their zero-width goal. With `warp` the layout is applied instantly
    /// and exiting entries are dropped, used when the bar first appears.
    pub(crate) fn update_animations(&mut self, warp: bool) {
        let active = self.entries.iter().filter(|e| !e.is_removing()).count();
        let entry_width = if active == 0 { 0.0 } else { 1.0 / active as f32 };

        let mut offset = 0.0;
        let mut real_offset = 0.0;

        if warp {
            self.entries.retain(|e| !e.is_removing());
            for entry in &mut self.entries {
                entry.offset.warp_to(offset);
                entry.width.warp_to(entry_width);
                entry.mark_placed();
                offset += entry.width.goal();
            }
            return;
        }

        for entry in &mut self.entries {
            let warp_init = entry.is_uninitialized();
            if warp_init {
                // Fix the start point at the end of the currently-visible
                // run so the entry grows in without jumping.
                entry.offset.warp_to(real_offset);
                entry.width.warp_to(0.0);
                entry.mark_placed();
            }

            if entry.offset.goal() != offset {
                entry.offset.set_goal(offset);
            }
            if (warp_init || !entry.is_removing()) && entry.width.goal() != entry_width {
                entry.width.set_goal(entry_width);
            }

            offset += entry.width.goal();
            real_offset += entry.width.current();
        }
    }
}
