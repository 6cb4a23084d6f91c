//! Compiled step tree: an arena of nodes with ids and parent links.

use super::{LocationPattern, NodeOptions, StepNode};
use crate::ids::{IdSource, NodeId};
use std::collections::HashMap;

/// Name given to the root of every compiled tree. Not a legal child key in
/// practice: authored children are addressed by plain names.
pub const ROOT_NAME: &str = "#root";

/// Position of a node in its [`StepTree`] arena.
///
/// Only meaningful for the tree that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Raw arena slot.
    pub fn get(self) -> usize {
        self.0
    }
}

/// A node of a compiled tree.
#[derive(Debug, Clone)]
pub struct CompiledNode<R> {
    /// Unique id, embedded in history state payloads
    pub id: NodeId,
    /// Key the node was declared under (`ROOT_NAME` for the root)
    pub name: String,
    /// Renderable unit copied from the declaration
    pub renderable: R,
    /// Location pattern (empty for tunnel nodes)
    pub pattern: LocationPattern,
    /// Normalized access options
    pub options: NodeOptions,
    /// Parent slot, `None` for the root
    pub parent: Option<NodeIndex>,
    /// Child slots in declaration order
    pub children: Vec<NodeIndex>,
}

impl<R> CompiledNode<R> {
    /// `true` if the node has no addressable location.
    pub fn is_tunnel(&self) -> bool {
        self.pattern.is_empty()
    }
}

/// Compiled step tree.
///
/// Nodes are owned by the arena; `parent` and `children` are indices into
/// it. The root always sits at slot 0.
#[derive(Debug, Clone)]
pub struct StepTree<R> {
    nodes: Vec<CompiledNode<R>>,
    by_id: HashMap<NodeId, NodeIndex>,
}

impl<R: Clone> StepTree<R> {
    /// Compile a declarative tree, drawing one fresh id per node.
    pub fn compile(root: &StepNode<R>, ids: &mut dyn IdSource) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            by_id: HashMap::new(),
        };
        tree.insert(root, ROOT_NAME.to_string(), None, ids);
        tree
    }

    fn insert(
        &mut self,
        decl: &StepNode<R>,
        name: String,
        parent: Option<NodeIndex>,
        ids: &mut dyn IdSource,
    ) -> NodeIndex {
        let index = NodeIndex(self.nodes.len());
        let id = ids.next_id();
        self.by_id.insert(id.clone(), index);
        self.nodes.push(CompiledNode {
            id,
            name,
            renderable: decl.renderable.clone(),
            pattern: decl.pattern.clone(),
            options: decl.options,
            parent,
            children: Vec::with_capacity(decl.children.len()),
        });

        for (child_name, child) in &decl.children {
            let child_index = self.insert(child, child_name.clone(), Some(index), ids);
            self.nodes[index.0].children.push(child_index);
        }
        index
    }
}

impl<R> StepTree<R> {
    /// Slot of the root node.
    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    /// Node at `index`.
    ///
    /// # Panics
    ///
    /// If `index` came from a different tree and is out of range.
    pub fn node(&self, index: NodeIndex) -> &CompiledNode<R> {
        &self.nodes[index.0]
    }

    /// Node at `index`, or `None` when out of range.
    pub fn get(&self, index: NodeIndex) -> Option<&CompiledNode<R>> {
        self.nodes.get(index.0)
    }

    /// Look up a node by id.
    pub fn find_node(&self, id: &str) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    /// Parent of `index`, if any.
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.node(index).parent
    }

    /// `position`-th child of `index`.
    pub fn child_at(&self, index: NodeIndex, position: usize) -> Option<NodeIndex> {
        self.node(index).children.get(position).copied()
    }

    /// First child of `index` named `name`. Among duplicate names the choice
    /// is unspecified.
    pub fn child_named(&self, index: NodeIndex, name: &str) -> Option<NodeIndex> {
        self.node(index)
            .children
            .iter()
            .copied()
            .find(|&c| self.node(c).name == name)
    }

    /// Number of parent links between `index` and the root.
    pub fn depth(&self, index: NodeIndex) -> usize {
        self.ancestors(index).count()
    }

    /// Strict ancestors of `index`, nearest first.
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(self.parent(index), move |&i| self.parent(i))
    }

    /// All nodes in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &CompiledNode<R>)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeIndex(i), n))
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a compiled tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
