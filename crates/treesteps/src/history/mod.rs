//! # History Collaborator
//!
//! The navigator does not own a session-history stack; it talks to one
//! through the [`History`] trait, which mirrors a browser session-history API:
//! read the live location, push or replace an entry, and subscribe to
//! changes.
//!
//! ```text
//! host (browser, TUI, tests)          treesteps
//! ┌──────────────────────┐      ┌──────────────────────┐
//! │ History impl         │◄─────│ HistoryBridge        │
//! │   push / replace     │      │   navigate / mark    │
//! │   back / forward ────┼─────►│   drain (Pop only)   │
//! └──────────────────────┘      └──────────────────────┘
//! ```
//!
//! Notifications are delivered over an unbounded channel so that the
//! navigator can apply them when it is not already borrowed by a move.

mod memory;

pub use memory::MemoryHistory;

use futures::channel::mpsc::UnboundedSender;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of the session history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Path part, e.g. `/checkout/address`
    pub pathname: String,
    /// Query string including the leading `?`, or empty
    pub search: String,
    /// Fragment including the leading `#`, or empty
    pub hash: String,
    /// Opaque state attached to the entry
    pub state: Option<String>,
}

impl Location {
    /// Location with the given pathname and nothing else.
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            ..Self::default()
        }
    }

    /// Same location with a different pathname.
    #[must_use]
    pub fn with_pathname(mut self, pathname: impl Into<String>) -> Self {
        self.pathname = pathname.into();
        self
    }

    /// Same location with a different state payload.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

/// Why the history changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryAction {
    /// A new entry was pushed
    Push,
    /// The current entry was replaced
    Replace,
    /// The user moved back or forward through existing entries
    Pop,
}

/// A history change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEvent {
    /// Location after the change
    pub location: Location,
    /// Kind of change
    pub action: HistoryAction,
}

/// Handle returned by [`History::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Session-history stack consumed by the navigator.
///
/// Implementations use interior mutability: the host keeps its own handle to
/// drive back/forward while the navigator holds another.
pub trait History: Send + Sync {
    /// Current location.
    fn location(&self) -> Location;

    /// Push a new entry, discarding any forward entries.
    fn push(&self, location: Location);

    /// Replace the current entry.
    fn replace(&self, location: Location);

    /// Register a listener. Every change is sent to `listener`.
    fn subscribe(&self, listener: UnboundedSender<HistoryEvent>) -> ListenerId;

    /// Remove a listener registered with [`History::subscribe`].
    fn unsubscribe(&self, id: ListenerId);
}
