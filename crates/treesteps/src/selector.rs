//! # Selector Resolution
//!
//! Pure functions computing the target of a move without touching any
//! navigation state.
//!
//! Forward moves descend from the current node, one level at a time, using a
//! [`NextSelector`]. Backward moves climb parent links using a
//! [`PreviousSelector`]. Both honour the skip options of the nodes they pass:
//!
//! - a child with `ignore_access_of_previous_node` is entered but does not
//!   count as a level, so forward moves fall through it;
//! - a parent with `ignore_access_of_next_node` is climbed past without
//!   counting, so backward moves never stop on it.
//!
//! Any unresolvable step (missing child, out-of-range index, unknown name,
//! running out of parents) fails the whole resolution.

use crate::tree::{NodeIndex, StepTree};
use serde::{Deserialize, Serialize};

/// Per-level child target: by name or by zero-based index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChildTarget {
    /// Child declared under this name
    Name(String),
    /// Child at this position
    Index(usize),
}

impl From<&str> for ChildTarget {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ChildTarget {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for ChildTarget {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// How to pick the target of a forward move.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NextSelector {
    /// One target per level; the depth is the number of targets.
    Path(Vec<ChildTarget>),
    /// Descend `depth` levels through first children. When `child` is set it
    /// picks the child at the final level only.
    Depth {
        /// Levels to descend (values below 1 behave as 1)
        depth: usize,
        /// Final-level target
        child: Option<ChildTarget>,
    },
}

impl Default for NextSelector {
    fn default() -> Self {
        Self::Depth {
            depth: 1,
            child: None,
        }
    }
}

impl NextSelector {
    /// Descend `depth` levels through first children.
    pub fn depth(depth: usize) -> Self {
        Self::Depth { depth, child: None }
    }

    /// Pick `child` one level down.
    pub fn child(child: impl Into<ChildTarget>) -> Self {
        Self::Depth {
            depth: 1,
            child: Some(child.into()),
        }
    }

    /// Descend `depth` levels and pick `child` at the last one.
    pub fn depth_child(depth: usize, child: impl Into<ChildTarget>) -> Self {
        Self::Depth {
            depth,
            child: Some(child.into()),
        }
    }

    /// Follow an explicit path of per-level targets.
    pub fn path<I, T>(targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ChildTarget>,
    {
        Self::Path(targets.into_iter().map(Into::into).collect())
    }

    fn max_depth(&self) -> usize {
        match self {
            Self::Path(targets) => targets.len(),
            Self::Depth { depth, .. } => (*depth).max(1),
        }
    }
}

/// How to pick the target of a backward move.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreviousSelector {
    /// Climb this many counted levels (values below 1 behave as 1)
    Count(usize),
    /// Climb to the nearest counted ancestor with this name
    Name(String),
}

impl Default for PreviousSelector {
    fn default() -> Self {
        Self::Count(1)
    }
}

impl From<usize> for PreviousSelector {
    fn from(count: usize) -> Self {
        Self::Count(count)
    }
}

impl From<&str> for PreviousSelector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

fn resolve_target<R>(
    tree: &StepTree<R>,
    parent: NodeIndex,
    target: &ChildTarget,
) -> Option<NodeIndex> {
    match target {
        ChildTarget::Name(name) => tree.child_named(parent, name),
        ChildTarget::Index(index) => tree.child_at(parent, *index),
    }
}

fn select_child<R>(
    tree: &StepTree<R>,
    node: NodeIndex,
    selector: &NextSelector,
    depth: usize,
) -> Option<NodeIndex> {
    // The final-level child is matched against the declared depth, so a
    // depth of 0 never reaches it.
    let target = match selector {
        NextSelector::Path(targets) => targets.get(depth - 1),
        NextSelector::Depth { depth: last, child } if depth == *last => child.as_ref(),
        NextSelector::Depth { .. } => None,
    };
    match target {
        Some(target) => resolve_target(tree, node, target),
        None => tree.child_at(node, 0),
    }
}

/// Resolve the target of a forward move from `from`.
pub fn find_next_node<R>(
    tree: &StepTree<R>,
    from: NodeIndex,
    selector: &NextSelector,
) -> Option<NodeIndex> {
    let max_depth = selector.max_depth();
    if max_depth == 0 {
        return None;
    }

    let mut node = from;
    let mut depth = 1;
    loop {
        if tree.node(node).children.is_empty() {
            return None;
        }
        let next = select_child(tree, node, selector, depth)?;
        node = next;
        if tree.node(next).options.ignore_access_of_previous_node {
            continue;
        }
        if depth < max_depth {
            depth += 1;
            continue;
        }
        return Some(next);
    }
}

/// Resolve the target of a backward move from `from`.
pub fn find_previous_node<R>(
    tree: &StepTree<R>,
    from: NodeIndex,
    selector: &PreviousSelector,
) -> Option<NodeIndex> {
    let mut node = from;
    let mut depth = 1;
    loop {
        let parent = tree.parent(node)?;
        node = parent;
        let parent_node = tree.node(parent);
        if parent_node.options.ignore_access_of_next_node {
            continue;
        }
        let reached = match selector {
            PreviousSelector::Count(count) => depth >= *count,
            PreviousSelector::Name(name) => parent_node.name == *name,
        };
        if reached {
            return Some(parent);
        }
        depth += 1;
    }
}

/// `true` if `target` is `from` or one of its ancestors.
pub fn has_ancestor<R>(tree: &StepTree<R>, from: NodeIndex, target: NodeIndex) -> bool {
    from == target || tree.ancestors(from).any(|a| a == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIdSource;
    use crate::tree::StepNode;

    /// Linear chain `{name}1 → {name}2 → ...` hanging off an unnamed head.
    fn chain(name: &str, len: usize) -> StepNode<()> {
        let mut node = StepNode::node((), format!("/{name}{len}"));
        for i in (1..len).rev() {
            node = StepNode::node((), format!("/{name}{i}")).child(format!("{name}{}", i + 1), node);
        }
        node
    }

    fn compile(root: &StepNode<()>) -> StepTree<()> {
        StepTree::compile(root, &mut SequentialIdSource::default())
    }

    /// Walk first children `levels` times.
    fn down(tree: &StepTree<()>, levels: usize) -> NodeIndex {
        (0..levels).fold(tree.root(), |n, _| tree.child_at(n, 0).unwrap())
    }

    /// Root `cmp1` with a 4-deep chain below and `x1` appended as a second
    /// child at `attach_level` (0 = root).
    fn branched(attach_level: usize, extra_len: usize) -> StepTree<()> {
        fn attach(node: &mut StepNode<()>, level: usize, extra: StepNode<()>) {
            if level == 0 {
                node.children.insert("x1".to_string(), extra);
            } else {
                let (_, first) = node.children.get_index_mut(0).unwrap();
                attach(first, level - 1, extra);
            }
        }
        let mut root = chain("cmp", 5);
        attach(&mut root, attach_level, chain("x", extra_len));
        compile(&root)
    }

    #[test]
    fn default_next_is_first_child() {
        let tree = compile(&chain("cmp", 5));
        assert_eq!(
            find_next_node(&tree, tree.root(), &NextSelector::default()),
            Some(down(&tree, 1))
        );
    }

    #[test]
    fn next_from_leaf_is_none() {
        let tree = compile(&chain("cmp", 1));
        assert_eq!(find_next_node(&tree, tree.root(), &NextSelector::default()), None);
    }

    #[test]
    fn previous_of_child_is_root_and_root_has_none() {
        let tree = compile(&chain("cmp", 5));
        let child = down(&tree, 1);
        assert_eq!(
            find_previous_node(&tree, child, &PreviousSelector::default()),
            Some(tree.root())
        );
        assert_eq!(
            find_previous_node(&tree, tree.root(), &PreviousSelector::default()),
            None
        );
    }

    #[test]
    fn next_falls_through_nodes_ignoring_previous_access() {
        let mut root = chain("cmp", 5);
        root.children[0].options.ignore_access_of_previous_node = true;
        let tree = compile(&root);
        assert_eq!(
            find_next_node(&tree, tree.root(), &NextSelector::default()),
            Some(down(&tree, 2))
        );
    }

    #[test]
    fn previous_climbs_past_nodes_ignoring_next_access() {
        let mut root = chain("cmp", 5);
        root.children[0].options.ignore_access_of_next_node = true;
        let tree = compile(&root);
        assert_eq!(
            find_previous_node(&tree, down(&tree, 2), &PreviousSelector::default()),
            Some(tree.root())
        );
    }

    #[test]
    fn previous_from_under_skipped_root_fails() {
        let mut root = chain("cmp", 3);
        root.options.ignore_access_of_next_node = true;
        let tree = compile(&root);
        assert_eq!(
            find_previous_node(&tree, down(&tree, 1), &PreviousSelector::default()),
            None
        );
    }

    #[test]
    fn depth_selectors() {
        let tree = branched(0, 1);
        let root = tree.root();
        assert_eq!(find_next_node(&tree, root, &NextSelector::depth(1)), Some(down(&tree, 1)));
        assert_eq!(find_next_node(&tree, root, &NextSelector::depth(100)), None);
        assert_eq!(find_next_node(&tree, root, &NextSelector::depth_child(100, "x1")), None);
        assert_eq!(find_next_node(&tree, root, &NextSelector::depth_child(100, 0)), None);
        assert_eq!(
            find_next_node(&tree, root, &NextSelector::child(1)),
            tree.child_at(root, 1)
        );
    }

    #[test]
    fn depth_zero_behaves_as_one() {
        let tree = compile(&chain("cmp", 3));
        assert_eq!(
            find_next_node(&tree, tree.root(), &NextSelector::depth(0)),
            Some(down(&tree, 1))
        );
    }

    #[test]
    fn depth_zero_ignores_final_level_child() {
        let tree = branched(0, 1);
        let root = tree.root();
        assert_eq!(
            find_next_node(&tree, root, &NextSelector::depth_child(0, 1)),
            tree.child_at(root, 0)
        );
        assert_eq!(
            find_next_node(&tree, root, &NextSelector::depth_child(1, 1)),
            tree.child_at(root, 1)
        );
    }

    #[test]
    fn depth_with_final_level_child() {
        let tree = branched(1, 1);
        let root = tree.root();
        let level1 = down(&tree, 1);
        let extra = tree.child_at(level1, 1);

        assert_eq!(find_next_node(&tree, root, &NextSelector::depth(2)), Some(down(&tree, 2)));
        assert_eq!(find_next_node(&tree, root, &NextSelector::depth_child(2, 1)), extra);
        assert_eq!(find_next_node(&tree, root, &NextSelector::depth_child(2, 2)), None);
        assert_eq!(find_next_node(&tree, root, &NextSelector::depth_child(2, "x1")), extra);
        // The level-1 node's own name does not exist among its children.
        assert_eq!(find_next_node(&tree, root, &NextSelector::depth_child(2, "cmp2")), None);
    }

    #[test]
    fn path_selectors() {
        let tree = branched(1, 3);
        let root = tree.root();
        let expected = {
            let x1 = tree.child_at(down(&tree, 1), 1).unwrap();
            let x2 = tree.child_at(x1, 0).unwrap();
            tree.child_at(x2, 0)
        };

        let by_name = NextSelector::path(["cmp2", "x1", "x2", "x3"]);
        assert_eq!(find_next_node(&tree, root, &by_name), expected);

        let mixed = NextSelector::Path(vec![
            "cmp2".into(),
            1usize.into(),
            "x2".into(),
            0usize.into(),
        ]);
        assert_eq!(find_next_node(&tree, root, &mixed), expected);

        let by_index = NextSelector::path([0usize, 1, 0, 0]);
        assert_eq!(find_next_node(&tree, root, &by_index), expected);
    }

    #[test]
    fn invalid_paths_abort_whole_resolution() {
        let tree = branched(1, 3);
        let root = tree.root();
        for selector in [
            NextSelector::path(["cmp2", "x1", "nope", "x3"]),
            NextSelector::path(["nope"]),
            NextSelector::path([0usize, 1, 2, 3]),
            NextSelector::path([10usize]),
            NextSelector::Path(Vec::new()),
        ] {
            assert_eq!(find_next_node(&tree, root, &selector), None, "{selector:?}");
        }
    }

    #[test]
    fn path_reapplies_level_target_inside_skipped_child() {
        let root = StepNode::node((), "/")
            .child(
                "a",
                StepNode::new(())
                    .skip_on_next()
                    .child("a", StepNode::node((), "/inner")),
            );
        let tree = compile(&root);
        let a = tree.child_at(tree.root(), 0).unwrap();
        assert_eq!(
            find_next_node(&tree, tree.root(), &NextSelector::path(["a"])),
            tree.child_at(a, 0)
        );
    }

    #[test]
    fn previous_by_count_and_name() {
        let tree = branched(0, 1);
        let start = down(&tree, 3);
        let grandparent = Some(down(&tree, 1));

        assert_eq!(find_previous_node(&tree, start, &PreviousSelector::Count(2)), grandparent);
        assert_eq!(find_previous_node(&tree, start, &"cmp2".into()), grandparent);
        assert_eq!(find_previous_node(&tree, start, &PreviousSelector::Count(100)), None);
        // A descendant's name is never found upwards.
        assert_eq!(find_previous_node(&tree, start, &"cmp5".into()), None);
        assert_eq!(find_previous_node(&tree, start, &PreviousSelector::Count(0)), tree.parent(start));
    }

    #[test]
    fn ancestor_check_is_inclusive() {
        let tree = compile(&chain("cmp", 3));
        let leaf = down(&tree, 2);
        assert!(has_ancestor(&tree, leaf, leaf));
        assert!(has_ancestor(&tree, leaf, tree.root()));
        assert!(!has_ancestor(&tree, tree.root(), leaf));
    }
}
