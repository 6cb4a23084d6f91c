//! # Step Trees
//!
//! A wizard is authored as a tree of [`StepNode`]s: each node carries a
//! caller-defined renderable, an optional location pattern and named
//! children. The tree is then compiled into a [`StepTree`], an arena where
//! every node has a stable id and a parent back-reference.
//!
//! ```rust
//! use treesteps::{StepNode, StepTree, SequentialIdSource};
//!
//! let root = StepNode::node("welcome", "/")
//!     .child(
//!         "plan",
//!         StepNode::tunnel("choose-plan")
//!             .child("details", StepNode::node("details", "/details")),
//!     );
//!
//! let tree = StepTree::compile(&root, &mut SequentialIdSource::default());
//! assert_eq!(tree.len(), 3);
//! ```

mod compiled;

pub use compiled::{CompiledNode, NodeIndex, StepTree, ROOT_NAME};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Access options of a node. All default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeOptions {
    /// The node may be the landing step when the navigator mounts on a
    /// location matching its pattern.
    pub allow_direct_access: bool,
    /// Moving backwards from a child skips this node.
    pub ignore_access_of_next_node: bool,
    /// Moving forwards from the parent passes through this node to its
    /// children.
    pub ignore_access_of_previous_node: bool,
}

/// Path patterns a node is addressable at.
///
/// An empty pattern marks a tunnel node: it holds navigation state but never
/// appears in the history stack. When several patterns are given, any of
/// them makes the node match, and the first is the path pushed on arrival.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationPattern(Vec<String>);

impl LocationPattern {
    /// Pattern with no paths (tunnel).
    pub fn tunnel() -> Self {
        Self(Vec::new())
    }

    /// Pattern with the given paths.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(paths.into_iter().map(Into::into).collect())
    }

    /// `true` for tunnel nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Path pushed to history when the node becomes current.
    pub fn primary(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// All paths of the pattern.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for LocationPattern {
    fn from(path: &str) -> Self {
        Self(vec![path.to_string()])
    }
}

impl From<String> for LocationPattern {
    fn from(path: String) -> Self {
        Self(vec![path])
    }
}

impl From<Vec<String>> for LocationPattern {
    fn from(paths: Vec<String>) -> Self {
        Self(paths)
    }
}

impl<const N: usize> From<[&str; N]> for LocationPattern {
    fn from(paths: [&str; N]) -> Self {
        Self::new(paths)
    }
}

/// Declarative step node, as authored by the caller.
#[derive(Debug, Clone)]
pub struct StepNode<R> {
    /// Renderable unit shown while this node is current
    pub renderable: R,
    /// Where the node is addressable (empty for tunnels)
    pub pattern: LocationPattern,
    /// Named children, in declaration order
    pub children: IndexMap<String, StepNode<R>>,
    /// Access options
    pub options: NodeOptions,
}

impl<R> StepNode<R> {
    /// Bare node with no pattern, children or options.
    pub fn new(renderable: R) -> Self {
        Self {
            renderable,
            pattern: LocationPattern::tunnel(),
            children: IndexMap::new(),
            options: NodeOptions::default(),
        }
    }

    /// Addressable node at `pattern`.
    pub fn node(renderable: R, pattern: impl Into<LocationPattern>) -> Self {
        Self::new(renderable).with_pattern(pattern)
    }

    /// Tunnel node: no pattern, and skipped when moving back from its
    /// children.
    pub fn tunnel(renderable: R) -> Self {
        let mut node = Self::new(renderable);
        node.options.ignore_access_of_next_node = true;
        node
    }

    /// Replace the location pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<LocationPattern>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Replace all options.
    #[must_use]
    pub fn with_options(mut self, options: NodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Append a child under `name`. A repeated name replaces the earlier
    /// child in place.
    #[must_use]
    pub fn child(mut self, name: impl Into<String>, child: StepNode<R>) -> Self {
        self.children.insert(name.into(), child);
        self
    }

    /// Allow landing on this node directly.
    #[must_use]
    pub fn allow_direct_access(mut self) -> Self {
        self.options.allow_direct_access = true;
        self
    }

    /// Skip this node when moving back from its children.
    #[must_use]
    pub fn skip_on_previous(mut self) -> Self {
        self.options.ignore_access_of_next_node = true;
        self
    }

    /// Pass through this node when moving forward from its parent.
    #[must_use]
    pub fn skip_on_next(mut self) -> Self {
        self.options.ignore_access_of_previous_node = true;
        self
    }
}
