//! # Access Guard
//!
//! Decides whether a node may be current given the live location.
//!
//! Tunnel nodes (no pattern) are state, not addresses: they are always
//! allowed under the [`AccessMask::TUNNEL`] rule. Addressable nodes are
//! allowed under [`AccessMask::PATH`] when one of their patterns matches the
//! location.
//!
//! The same rules drive deep-linking: on mount, the navigator lands on the
//! first node marked `allow_direct_access` whose pattern matches, and falls
//! back to the tree root otherwise.

use crate::history::Location;
use crate::routing::LocationMatcher;
use crate::tree::{CompiledNode, NodeIndex, StepTree};
use std::ops::{BitAnd, BitOr, Not};

/// Which access rules to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessMask(u8);

impl AccessMask {
    /// No rule: nothing is allowed
    pub const NONE: Self = Self(0);
    /// Tunnel nodes are allowed
    pub const TUNNEL: Self = Self(1);
    /// Nodes whose pattern matches the location are allowed
    pub const PATH: Self = Self(1 << 1);
    /// Both rules
    pub const ALL: Self = Self(Self::TUNNEL.0 | Self::PATH.0);

    /// `true` if any bit of `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Raw bits.
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl Default for AccessMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for AccessMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for AccessMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for AccessMask {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }
}

/// Whether `node` may be current at `location` under `mask`.
pub fn is_node_allowed<R>(
    node: &CompiledNode<R>,
    location: &Location,
    matcher: &dyn LocationMatcher,
    mask: AccessMask,
) -> bool {
    if mask.contains(AccessMask::TUNNEL) && node.is_tunnel() {
        return true;
    }
    mask.contains(AccessMask::PATH)
        && node
            .pattern
            .paths()
            .any(|pattern| matcher.matches(pattern, location))
}

/// Depth-first, children-first search for the node to land on at mount.
///
/// Returns the first subtree result in child order. Failing that, a node
/// with `allow_direct_access` is returned if its pattern matches the
/// location; the tree root with `allow_direct_access` is returned even
/// without a match. `None` means the caller should land on the root.
pub fn find_first_valid_node<R>(
    tree: &StepTree<R>,
    from: NodeIndex,
    location: &Location,
    matcher: &dyn LocationMatcher,
) -> Option<NodeIndex> {
    let node = tree.node(from);
    if let Some(found) = node
        .children
        .iter()
        .find_map(|&child| find_first_valid_node(tree, child, location, matcher))
    {
        return Some(found);
    }

    if !node.options.allow_direct_access {
        return None;
    }
    if is_node_allowed(node, location, matcher, AccessMask::ALL & !AccessMask::TUNNEL) {
        return Some(from);
    }
    match node.parent {
        Some(_) => None,
        None => Some(from),
    }
}
