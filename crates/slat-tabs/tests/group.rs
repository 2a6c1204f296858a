//! Lifecycle tests for `TabGroup` driven through the public host API.

use slat_anim::{AnimationConfig, EasingFunction};
use slat_core::{Config, DamageTracker, GroupLayout, NodeId, NodeTree, Vec2, Workspace};
use slat_tabs::TabGroup;

const EPSILON: f32 = 0.0001;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn test_config() -> Config {
    let mut config = Config::default();
    let linear = AnimationConfig {
        duration_ms: 100.0,
        easing: EasingFunction::Linear,
    };
    config.animation.bar = linear;
    config.animation.group = linear;
    config
}

fn tabbed_setup(titles: &[&str]) -> (NodeTree, NodeId, Vec<NodeId>) {
    let mut tree = NodeTree::new();
    let group = tree.add_group(GroupLayout::Tabbed);
    tree.set_geometry(group, Vec2::ZERO, Vec2::new(800.0, 600.0));

    let nodes: Vec<_> = titles
        .iter()
        .map(|t| {
            let w = tree.add_window(*t);
            tree.attach(group, w);
            w
        })
        .collect();
    if let Some(first) = nodes.first() {
        tree.set_focused_child(group, Some(*first));
    }
    (tree, group, nodes)
}

#[test]
fn test_create_warps_geometry_and_layout() {
    let config = test_config();
    let (tree, group, _) = tabbed_setup(&["a", "b", "c"]);

    let decoration = TabGroup::new(&tree, group, &config);

    // Entries are evenly laid out with no animation pending.
    let entries = decoration.bar.entries();
    assert_eq!(entries.len(), 3);
    for (i, entry) in entries.iter().enumerate() {
        assert!(approx_eq(entry.width_fraction(), 1.0 / 3.0));
        assert!(approx_eq(entry.offset_fraction(), i as f32 / 3.0));
    }

    // First entry is the focused child.
    assert!(entries[0].focused());
    assert!(!entries[1].focused());
}

#[test]
fn test_removal_scenario_three_entries() {
    let config = test_config();
    let (mut tree, group, nodes) = tabbed_setup(&["a", "b", "c"]);
    let mut decoration = TabGroup::new(&tree, group, &config);
    let workspace = Workspace::default();
    let mut damage = DamageTracker::new();

    tree.remove(nodes[1]);
    decoration.update_with_group(&tree, group, &config);

    // Survivors retarget to half the bar, the removed entry to zero.
    let entries = decoration.bar.entries();
    assert_eq!(entries.len(), 3);
    assert!(approx_eq(entries[0].width_goal(), 0.5));
    assert!(approx_eq(entries[1].width_goal(), 0.0));
    assert!(entries[1].is_removing());
    assert!(approx_eq(entries[2].width_goal(), 0.5));

    // The removed entry survives until its width reaches zero.
    decoration.tick(50.0, Some(&workspace), &config, &mut damage);
    assert_eq!(decoration.bar.entries().len(), 3);

    decoration.tick(60.0, Some(&workspace), &config, &mut damage);
    let entries = decoration.bar.entries();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| !e.matches(nodes[1])));

    decoration.tick(500.0, Some(&workspace), &config, &mut damage);
    let total: f32 = decoration
        .bar
        .entries()
        .iter()
        .map(|e| e.width_fraction())
        .sum();
    assert!(approx_eq(total, 1.0));
}

#[test]
fn test_identical_update_is_idempotent() {
    let config = test_config();
    let (tree, group, _) = tabbed_setup(&["a", "b"]);
    let mut decoration = TabGroup::new(&tree, group, &config);
    let workspace = Workspace::default();
    let mut damage = DamageTracker::new();

    // Settle every animation, then drain accumulated damage.
    decoration.tick(1000.0, Some(&workspace), &config, &mut damage);
    damage.clear();

    decoration.update_with_group(&tree, group, &config);
    decoration.tick(16.0, Some(&workspace), &config, &mut damage);

    // No goals changed, so nothing moved and nothing was damaged.
    assert!(damage.region().is_empty());
    for entry in decoration.bar.entries() {
        assert!(approx_eq(entry.width_fraction(), entry.width_goal()));
        assert!(approx_eq(entry.offset_fraction(), entry.offset_goal()));
    }
}

#[test]
fn test_empty_group_drains_all_entries() {
    let config = test_config();
    let (mut tree, group, nodes) = tabbed_setup(&["a", "b"]);
    let mut decoration = TabGroup::new(&tree, group, &config);
    let workspace = Workspace::default();
    let mut damage = DamageTracker::new();

    for node in nodes {
        tree.remove(node);
    }
    decoration.update_with_group(&tree, group, &config);
    assert!(decoration.bar.entries().iter().all(|e| e.is_removing()));

    decoration.tick(500.0, Some(&workspace), &config, &mut damage);
    assert!(decoration.bar.entries().is_empty());
}

#[test]
fn test_hidden_mirrors_node() {
    let config = test_config();
    let (mut tree, group, _) = tabbed_setup(&["a"]);
    let mut decoration = TabGroup::new(&tree, group, &config);
    assert!(!decoration.hidden);

    tree.set_hidden(group, true);
    decoration.update_with_group(&tree, group, &config);
    assert!(decoration.hidden);
}

#[test]
fn test_destroy_fades_out_then_completes() {
    let config = test_config();
    let (tree, group, _) = tabbed_setup(&["a", "b"]);
    let mut decoration = TabGroup::new(&tree, group, &config);
    let workspace = Workspace::default();
    let mut damage = DamageTracker::new();

    decoration.tick(1000.0, Some(&workspace), &config, &mut damage);
    damage.clear();

    decoration.begin_destroy();
    assert!(!decoration.is_destroyed());

    decoration.tick(50.0, Some(&workspace), &config, &mut damage);
    assert!(!decoration.is_destroyed());

    decoration.tick(60.0, Some(&workspace), &config, &mut damage);
    assert!(decoration.is_destroyed());
    // The destroy frame damages the bar's region so it gets cleared.
    assert!(!damage.region().is_empty());
}

#[test]
fn test_fullscreen_workspace_fades_bar_out() {
    let config = test_config();
    let (tree, group, _) = tabbed_setup(&["a"]);
    let mut decoration = TabGroup::new(&tree, group, &config);
    let mut damage = DamageTracker::new();

    let mut workspace = Workspace::default();
    decoration.tick(1000.0, Some(&workspace), &config, &mut damage);
    assert!(approx_eq(decoration.bar.fade_opacity(), 1.0));

    workspace.has_fullscreen = true;
    decoration.tick(1000.0, Some(&workspace), &config, &mut damage);
    assert!(approx_eq(decoration.bar.fade_opacity(), 0.0));

    workspace.has_fullscreen = false;
    decoration.tick(1000.0, Some(&workspace), &config, &mut damage);
    assert!(approx_eq(decoration.bar.fade_opacity(), 1.0));
}

#[test]
fn test_missing_workspace_leaves_fade_untouched() {
    let config = test_config();
    let (tree, group, _) = tabbed_setup(&["a"]);
    let mut decoration = TabGroup::new(&tree, group, &config);
    let mut damage = DamageTracker::new();

    decoration.tick(1000.0, None, &config, &mut damage);
    assert!(approx_eq(decoration.bar.fade_opacity(), 1.0));
}

#[test]
fn test_geometry_change_damages_vacated_region() {
    let config = test_config();
    let (mut tree, group, _) = tabbed_setup(&["a"]);
    let mut decoration = TabGroup::new(&tree, group, &config);
    let workspace = Workspace::default();
    let mut damage = DamageTracker::new();

    decoration.tick(1000.0, Some(&workspace), &config, &mut damage);
    damage.clear();

    tree.set_geometry(group, Vec2::new(400.0, 0.0), Vec2::new(400.0, 600.0));
    decoration.update_with_group(&tree, group, &config);
    decoration.tick(16.0, Some(&workspace), &config, &mut damage);

    // The old region must be cleared as the bar slides away from it.
    let old_region_damaged = damage
        .region()
        .iter()
        .any(|r| r.x < 100.0 && !r.is_empty());
    assert!(old_region_damaged);
}

#[test]
fn test_stencil_windows_follow_focused_child() {
    let config = test_config();
    let mut tree = NodeTree::new();
    let group = tree.add_group(GroupLayout::Tabbed);
    tree.set_geometry(group, Vec2::ZERO, Vec2::new(800.0, 600.0));

    // Focused child is a horizontal split of two windows.
    let split = tree.add_group(GroupLayout::SplitH);
    tree.attach(group, split);
    let left = tree.add_window("left");
    let right = tree.add_window("right");
    tree.attach(split, left);
    tree.attach(split, right);
    tree.set_geometry(left, Vec2::ZERO, Vec2::new(400.0, 600.0));
    tree.set_geometry(right, Vec2::new(400.0, 0.0), Vec2::new(400.0, 600.0));

    let lone = tree.add_window("lone");
    tree.attach(group, lone);
    tree.set_focused_child(group, Some(split));

    let decoration = TabGroup::new(&tree, group, &config);
    assert_eq!(decoration.stencil_windows().to_vec(), vec![left, right]);
}
