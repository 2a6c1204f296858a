//! Scan for windows overlapping a tab bar's vertical extent.

use slat_core::{GroupLayout, NodeId, NodeKind, NodeTree};

/// Collect windows under `node` that could be drawn beneath the bar's
/// strip, so the render pass can stencil them out.
///
/// `height` is the remaining vertical reach of the bar. Horizontal splits
/// share the full extent, so every child is scanned. Vertical splits
/// consume the budget top-down; children entirely below the bar's reach
/// are excluded. Tabbed containers are not entered, since their own tab
/// bar already occludes the content below it.
pub fn find_overlapping_windows(
    tree: &NodeTree,
    node: NodeId,
    height: f32,
    windows: &mut Vec<NodeId>,
) {
    let Some(n) = tree.get(node) else {
        return;
    };

    match &n.kind {
        NodeKind::Window(_) => windows.push(node),
        NodeKind::Group(group) => match group.layout {
            GroupLayout::SplitH => {
                for &child in &group.children {
                    find_overlapping_windows(tree, child, height, windows);
                }
            }
            GroupLayout::SplitV => {
                let mut remaining = height;
                for &child in &group.children {
                    find_overlapping_windows(tree, child, remaining, windows);
                    remaining -= tree.get(child).map(|c| c.size.y).unwrap_or(0.0);
                    if remaining <= 0.0 {
                        break;
                    }
                }
            }
            GroupLayout::Tabbed => {}
        },
    }
}
