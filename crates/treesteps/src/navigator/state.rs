//! Value types describing navigation state.

use crate::ids::NodeId;
use crate::tree::NodeIndex;
use serde::{Deserialize, Serialize};

/// Options shared by every move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub use_replace: bool,
}

impl NavigateOptions {
    /// Push a new history entry.
    #[must_use]
    pub fn push() -> Self {
        Self { use_replace: false }
    }

    /// Replace the current history entry.
    #[must_use]
    pub fn replace() -> Self {
        Self { use_replace: true }
    }
}

/// Pending application error and its remaining lifetime in backward moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSlot<E> {
    error: Option<E>,
    ttl: u32,
}

impl<E> Default for ErrorSlot<E> {
    fn default() -> Self {
        Self {
            error: None,
            ttl: 0,
        }
    }
}

impl<E> ErrorSlot<E> {
    /// Current error, if any.
    pub fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }

    /// Remaining backward moves before the error is dropped.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// `true` when an error is pending.
    pub fn is_set(&self) -> bool {
        self.error.is_some()
    }

    pub(crate) fn set(&mut self, error: Option<E>, ttl: u32) {
        self.error = error;
        self.ttl = ttl;
    }

    pub(crate) fn take(&mut self) -> Option<E> {
        self.error.take()
    }

    pub(crate) fn clear(&mut self) {
        self.error = None;
        self.ttl = 0;
    }

    /// Apply one backward move: an exhausted ttl drops the error, otherwise
    /// it is kept and the ttl counts down.
    pub(crate) fn decay(&mut self) {
        if self.ttl == 0 {
            self.error = None;
        }
        self.ttl = self.ttl.saturating_sub(1);
    }
}

/// Tree-relative direction of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards the leaves, or sideways into another branch
    Forward,
    /// Towards an ancestor of the previous node
    Backward,
}

/// The last change of current node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Node that was current before
    pub from: NodeIndex,
    /// Node current now
    pub to: NodeIndex,
    /// Whether `to` is an ancestor of `from`
    pub direction: Direction,
}

/// Serializable summary of the navigator, for logs and debugging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSnapshot {
    /// Id of the current node
    pub current_id: NodeId,
    /// Name of the current node
    pub current_name: String,
    /// Parent links between the current node and the root
    pub depth: usize,
    /// Whether an error is pending
    pub has_error: bool,
    /// Remaining ttl of the pending error
    pub error_ttl: u32,
    /// Number of nodes holding data
    pub data_entries: usize,
}
