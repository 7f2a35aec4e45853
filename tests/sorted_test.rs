//! Tests for comparator-ordered trees with a custom children property.

use std::cmp::Ordering;

use rstest::{fixture, rstest};
use serde_json::{json, Value};

use rstree::util::testing::init_test_setup;
use rstree::{Node, Strategy, Tree, TreeConfig, TreeError};

fn id(node: &Node) -> i64 {
    node.get("id").and_then(|v| v.as_i64()).unwrap_or(-1)
}

fn descending_by_id(a: &Value, b: &Value) -> Ordering {
    b["id"].as_i64().cmp(&a["id"].as_i64())
}

/// Factory ordering siblings by descending id under a `deps` property.
#[fixture]
fn tree() -> Tree {
    init_test_setup();
    Tree::with_config(
        TreeConfig::new()
            .with_children_property("deps")
            .with_comparator(descending_by_id),
    )
}

// ============================================================
// Stable Sort on Parse Tests
// ============================================================

#[rstest]
fn given_unsorted_model_when_parsing_then_sorts_every_level(tree: Tree) {
    let root = tree
        .parse(json!({
            "id": 1,
            "deps": [
                {"id": 11, "deps": [{"id": 111}]},
                {"id": 12, "deps": [
                    {"id": 122, "stable": 1},
                    {"id": 121, "stable": 1},
                    {"id": 121, "stable": 2},
                    {"id": 122, "stable": 2},
                ]},
            ]
        }))
        .unwrap();

    assert_eq!(
        root.model(),
        json!({
            "id": 1,
            "deps": [
                {"id": 12, "deps": [
                    {"id": 122, "stable": 1},
                    {"id": 122, "stable": 2},
                    {"id": 121, "stable": 1},
                    {"id": 121, "stable": 2},
                ]},
                {"id": 11, "deps": [{"id": 111}]},
            ]
        })
    );

    for child in root.children() {
        assert_eq!(child.parent().unwrap(), root);
    }
}

#[test]
fn given_equal_keys_when_parsing_then_keeps_their_original_relative_order() {
    let tree = Tree::with_config(TreeConfig::new().with_comparator(|a, b| {
        a["k"].as_str().cmp(&b["k"].as_str())
    }));

    let root = tree
        .parse(json!({
            "id": 1,
            "children": [
                {"k": "a", "i": 0},
                {"k": "a", "i": 1},
                {"k": "b", "i": 0},
            ]
        }))
        .unwrap();

    assert_eq!(
        root.model()["children"],
        json!([
            {"k": "a", "i": 0},
            {"k": "a", "i": 1},
            {"k": "b", "i": 0},
        ])
    );
}

// ============================================================
// Ordered Insertion Tests
// ============================================================

#[rstest]
fn given_sorted_tree_when_adding_children_then_inserts_at_comparator_position(tree: Tree) {
    let root = tree
        .parse(json!({"id": 1, "deps": [
            {"id": 12, "stable": 1},
            {"id": 11, "stable": 1},
            {"id": 11, "stable": 2},
            {"id": 12, "stable": 2},
            {"id": 13, "stable": 1},
        ]}))
        .unwrap();

    root.add_child(tree.parse(json!({"id": 13, "stable": 2})).unwrap());
    root.add_child(tree.parse(json!({"id": 10, "stable": 1})).unwrap());
    root.add_child(tree.parse(json!({"id": 12, "stable": 3})).unwrap());

    assert_eq!(
        root.model()["deps"],
        json!([
            {"id": 13, "stable": 1},
            {"id": 13, "stable": 2},
            {"id": 12, "stable": 1},
            {"id": 12, "stable": 2},
            {"id": 12, "stable": 3},
            {"id": 11, "stable": 1},
            {"id": 11, "stable": 2},
            {"id": 10, "stable": 1},
        ])
    );
}

#[rstest]
fn given_sorted_tree_when_adding_children_then_node_and_model_stay_in_sync(tree: Tree) {
    let root = tree
        .parse(json!({"id": 1, "deps": [{"id": 12}, {"id": 11}]}))
        .unwrap();

    root.add_child(tree.parse(json!({"id": 13})).unwrap());
    root.add_child(tree.parse(json!({"id": 10})).unwrap());

    assert_eq!(root.children().len(), 4);
    assert_eq!(
        root.model()["deps"],
        json!([{"id": 13}, {"id": 12}, {"id": 11}, {"id": 10}])
    );
    let ids: Vec<i64> = root.children().iter().map(id).collect();
    assert_eq!(ids, vec![13, 12, 11, 10]);
}

// ============================================================
// Conflicting Operation Tests
// ============================================================

#[rstest]
fn given_sorted_tree_when_adding_child_at_index_then_fails_with_conflict(tree: Tree) {
    let root = tree
        .parse(json!({"id": 1, "deps": [{"id": 12}, {"id": 11}]}))
        .unwrap();
    let child = tree.parse(json!({"id": 13})).unwrap();

    let result = root.add_child_at(child, 1);

    assert!(matches!(
        result.unwrap_err(),
        TreeError::ComparatorConflict { .. }
    ));
    assert_eq!(root.children().len(), 2);
}

#[rstest]
fn given_sorted_tree_when_setting_index_then_fails_with_conflict(tree: Tree) {
    let root = tree
        .parse(json!({"id": 1, "deps": [{"id": 12}, {"id": 11}]}))
        .unwrap();

    let result = root.children()[0].set_index(0);

    assert!(matches!(
        result.unwrap_err(),
        TreeError::ComparatorConflict { .. }
    ));
}

// ============================================================
// Detach Tests
// ============================================================

#[rstest]
fn given_sorted_tree_when_detaching_then_subtree_keeps_the_custom_property(tree: Tree) {
    let root = tree
        .parse(json!({
            "id": 1,
            "deps": [
                {"id": 11, "deps": [{"id": 111}]},
                {"id": 12, "deps": [{"id": 121}, {"id": 122}]},
            ]
        }))
        .unwrap();

    let detached = root.first(Strategy::Pre, |n| id(n) == 11).unwrap().detach();

    assert_eq!(detached.model(), json!({"id": 11, "deps": [{"id": 111}]}));
    assert!(root.first(Strategy::Pre, |n| id(n) == 11).is_none());
    assert!(detached.is_root());
}

#[rstest]
fn given_sorted_tree_when_detaching_root_then_returns_itself(tree: Tree) {
    let root = tree
        .parse(json!({"id": 1, "deps": [{"id": 11}]}))
        .unwrap();

    assert_eq!(root.detach(), root);
    assert_eq!(root.children().len(), 1);
}
