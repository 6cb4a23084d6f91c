//! Navigation Controller Tests
//!
//! Drives a mounted navigator through forward, backward and root moves and
//! checks the data, error and history bookkeeping of each move.

use std::sync::Arc;
use treesteps::{
    History, MemoryHistory, NavigateOptions, Navigator, NavigatorBuilder, NavigatorConfig, NextSelector,
    PreviousSelector, SequentialIdSource, StepNode,
};

type Nav = Navigator<&'static str, String, String>;

fn mount(root: StepNode<&'static str>, start: &str) -> (Nav, MemoryHistory) {
    mount_with(root, start, NavigatorConfig::default())
}

fn mount_with(
    root: StepNode<&'static str>,
    start: &str,
    config: NavigatorConfig,
) -> (Nav, MemoryHistory) {
    let history = MemoryHistory::new(start);
    let nav = NavigatorBuilder::new(root, "init".to_string())
        .config(config)
        .history(Arc::new(history.clone()))
        .id_source(SequentialIdSource::default())
        .build()
        .unwrap();
    (nav, history)
}

/// Linear chain `s1 → s2 → ... → s{len}`, each at `/s{i}`.
fn chain(len: usize) -> StepNode<&'static str> {
    let mut node = StepNode::node("step", format!("/s{len}"));
    for i in (1..len).rev() {
        node = StepNode::node("step", format!("/s{i}")).child(format!("s{}", i + 1), node);
    }
    node
}

fn push() -> NavigateOptions {
    NavigateOptions::default()
}

fn name(nav: &Nav) -> &str {
    &nav.current_node().name
}

#[test]
fn depth_two_lands_two_levels_down() {
    let (mut nav, history) = mount(chain(5), "/s1");
    assert!(nav.to_next(&NextSelector::depth(2), push()));
    assert_eq!(name(&nav), "s3");
    assert_eq!(nav.tree().depth(nav.current()), 2);
    assert_eq!(history.len(), 2);
    assert_eq!(history.location().pathname, "/s3");
}

#[test]
fn depth_beyond_the_tree_does_not_move() {
    let (mut nav, history) = mount(chain(5), "/s1");
    nav.commit("kept".to_string());
    nav.set_error("kept".to_string());

    assert!(!nav.to_next(&NextSelector::depth(100), push()));
    assert_eq!(nav.current(), nav.tree().root());
    assert_eq!(nav.error().map(String::as_str), Some("kept"));
    assert_eq!(nav.snapshot().data_entries, 1);
    assert_eq!(history.len(), 1);
}

#[test]
fn next_delegates_data_to_every_node_on_the_way() {
    let (mut nav, _history) = mount(chain(5), "/s1");
    nav.commit("v".to_string());
    nav.to_next(&NextSelector::depth(3), push());

    assert_eq!(name(&nav), "s4");
    assert_eq!(nav.data(), "v");
    assert_eq!(nav.previous_data(), "v");
    for ancestor in nav.tree().ancestors(nav.current()) {
        assert_eq!(nav.data_of(ancestor), "v");
    }
}

#[test]
fn delegation_overwrites_stale_child_data_until_committed() {
    let (mut nav, _history) = mount(chain(3), "/s1");
    nav.to_next(&NextSelector::default(), push());
    nav.commit("child".to_string());
    nav.to_previous(&PreviousSelector::default(), push());

    nav.commit("parent".to_string());
    nav.to_next(&NextSelector::default(), push());
    assert_eq!(nav.data(), "parent");

    nav.commit("child again".to_string());
    assert_eq!(nav.data(), "child again");
    assert_eq!(nav.previous_data(), "parent");
}

#[test]
fn commit_is_seeded_from_initial_data() {
    let (mut nav, _history) = mount(chain(2), "/s1");
    assert_eq!(nav.data(), "init");
    assert_eq!(nav.previous_data(), "init");

    nav.commit_with(|data| format!("{data}+1"));
    assert_eq!(nav.data(), "init+1");
    assert_eq!(nav.initial_data(), "init");
}

#[test]
fn previous_data_without_parent_entry_is_initial() {
    let (mut nav, _history) = mount(chain(3), "/s1");
    nav.to_next(&NextSelector::default(), push());
    nav.commit("mine".to_string());
    nav.to_next(&NextSelector::default(), push());
    // s2's data was committed, s1's was never set.
    assert_eq!(nav.previous_data(), "mine");
    nav.to_previous(&PreviousSelector::default(), push());
    assert_eq!(nav.previous_data(), "init");
}

#[test]
fn error_survives_one_previous_move() {
    let (mut nav, _history) = mount(chain(5), "/s1");
    nav.to_next(&NextSelector::depth(3), push());
    nav.set_error("invalid".to_string());

    nav.to_previous(&PreviousSelector::default(), push());
    assert_eq!(name(&nav), "s3");
    assert_eq!(nav.error().map(String::as_str), Some("invalid"));

    nav.to_previous(&PreviousSelector::default(), push());
    assert_eq!(name(&nav), "s2");
    assert_eq!(nav.error(), None);
}

#[test]
fn next_and_root_clear_errors_immediately() {
    let (mut nav, _history) = mount(chain(5), "/s1");
    nav.update_error(|_| Some("sticky".to_string()), Some(10));
    nav.to_next(&NextSelector::default(), push());
    assert_eq!(nav.error(), None);

    nav.update_error(|_| Some("sticky".to_string()), Some(10));
    nav.to_root(push());
    assert_eq!(nav.error(), None);
    assert_eq!(nav.error_slot().ttl(), 0);
}

#[test]
fn error_ttl_follows_config_default() {
    let config = NavigatorConfig {
        default_error_ttl: 2,
        ..NavigatorConfig::default()
    };
    let (mut nav, _history) = mount_with(chain(5), "/s1", config);
    nav.to_next(&NextSelector::depth(4), push());
    nav.set_error("e".to_string());

    nav.to_previous(&PreviousSelector::default(), push());
    nav.to_previous(&PreviousSelector::default(), push());
    assert!(nav.error().is_some());
    nav.to_previous(&PreviousSelector::default(), push());
    assert!(nav.error().is_none());
}

#[test]
fn update_error_sees_previous_error() {
    let (mut nav, _history) = mount(chain(2), "/s1");
    nav.set_error("first".to_string());
    nav.update_error(|prev| prev.map(|e| format!("{e}, second")), None);
    assert_eq!(nav.error().map(String::as_str), Some("first, second"));
    nav.update_error(|_| None, None);
    assert_eq!(nav.error(), None);
}

#[test]
fn unresolved_previous_falls_back_to_root() {
    let (mut nav, history) = mount(chain(4), "/s1");
    nav.to_next(&NextSelector::depth(3), push());
    nav.set_error("gone".to_string());

    assert!(nav.to_previous(&PreviousSelector::from("nowhere"), push()));
    assert_eq!(nav.current(), nav.tree().root());
    assert_eq!(nav.error(), None);
    assert_eq!(history.location().pathname, "/s1");
}

#[test]
fn previous_from_root_is_a_noop() {
    let (mut nav, history) = mount(chain(2), "/s1");
    assert!(!nav.to_previous(&PreviousSelector::default(), push()));
    assert_eq!(history.len(), 1);
}

#[test]
fn replace_option_keeps_history_length() {
    let (mut nav, history) = mount(chain(3), "/s1");
    nav.to_next(&NextSelector::default(), NavigateOptions::replace());
    nav.to_next(&NextSelector::default(), NavigateOptions::replace());
    assert_eq!(history.len(), 1);
    assert_eq!(history.location().pathname, "/s3");
}

#[test]
fn skipped_child_passes_forward_moves_to_its_children() {
    let skipped = || {
        StepNode::node("b1", "/b1")
            .skip_on_next()
            .child("c0", StepNode::node("c0", "/c0"))
            .child("c1", StepNode::node("c1", "/c1"))
    };

    // Skipped node first: the default move lands on its first child.
    let root = StepNode::node("root", "/")
        .child("b1", skipped())
        .child("b0", StepNode::node("b0", "/b0"));
    let (mut nav, _history) = mount(root, "/");
    nav.to_next(&NextSelector::default(), push());
    assert_eq!(name(&nav), "c0");

    // Skipped node second: the default move takes the first child, and an
    // index target is applied again below the skipped node.
    let root = StepNode::node("root", "/")
        .child("b0", StepNode::node("b0", "/b0"))
        .child("b1", skipped());
    let (mut nav, _history) = mount(root, "/");
    nav.to_next(&NextSelector::default(), push());
    assert_eq!(name(&nav), "b0");

    nav.to_root(push());
    nav.to_next(&NextSelector::child(1), push());
    assert_eq!(name(&nav), "c1");
}

#[test]
fn tunnel_step_moves_without_history() {
    let root = StepNode::node("a", "/a").child(
        "t",
        StepNode::tunnel("t").child("c", StepNode::node("c", "/c")),
    );
    let (mut nav, history) = mount(root, "/a");

    nav.to_next(&NextSelector::default(), push());
    assert_eq!(name(&nav), "t");
    assert_eq!(history.len(), 1);
    assert_eq!(history.location().pathname, "/a");

    nav.to_next(&NextSelector::default(), push());
    assert_eq!(name(&nav), "c");
    assert_eq!(history.len(), 2);

    // Tunnels are skipped on the way back.
    nav.to_previous(&PreviousSelector::default(), NavigateOptions::replace());
    assert_eq!(name(&nav), "#root");
    assert_eq!(history.len(), 2);
}

#[test]
fn mount_lands_on_direct_access_step_matching_location() {
    let mut root = chain(5);
    {
        let s2 = &mut root.children[0];
        s2.children[0].options.allow_direct_access = true;
    }
    let (nav, history) = mount(root, "/s3");
    assert_eq!(name(&nav), "s3");
    assert_eq!(history.len(), 1);
    assert_eq!(history.location().pathname, "/s3");
    assert_eq!(
        history.location().state,
        Some(format!("node:{}", nav.current_node().id))
    );
}

#[test]
fn mount_without_direct_access_rewrites_to_root() {
    let (nav, history) = mount(chain(5), "/s3");
    assert_eq!(nav.current(), nav.tree().root());
    assert_eq!(history.len(), 1);
    assert_eq!(history.location().pathname, "/s1");
    assert_eq!(history.location().state.as_deref(), Some("node:n1"));
}

#[test]
fn tunnel_root_keeps_the_starting_path() {
    let root = StepNode::tunnel("root").child("a", StepNode::node("a", "/a"));
    let (nav, history) = mount(root, "/landing");
    assert_eq!(nav.current(), nav.tree().root());
    assert_eq!(history.location().pathname, "/landing");
    assert_eq!(history.location().state.as_deref(), Some("node:n1"));
}
