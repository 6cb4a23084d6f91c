//! # History Bridge
//!
//! Adapts navigator moves to [`History`] push/replace calls and collects the
//! history's change notifications for later application.
//!
//! Every entry the navigator writes carries a state payload of the form
//! `{prefix}{node id}`. On back/forward, the payload of the entry the user
//! landed on is decoded back into a node id.
//!
//! The bridge subscribes once on construction and unsubscribes when dropped.

use crate::errors::PayloadError;
use crate::history::{History, HistoryEvent, ListenerId, Location};
use crate::ids::NodeId;
use futures::channel::mpsc::{unbounded, UnboundedReceiver};
use std::sync::Arc;

/// Subscription to a [`History`] plus the state payload codec.
pub struct HistoryBridge {
    history: Arc<dyn History>,
    prefix: String,
    receiver: UnboundedReceiver<HistoryEvent>,
    listener: ListenerId,
}

impl HistoryBridge {
    /// Subscribe to `history`, encoding payloads with `prefix`.
    pub fn new(history: Arc<dyn History>, prefix: impl Into<String>) -> Self {
        let (sender, receiver) = unbounded();
        let listener = history.subscribe(sender);
        Self {
            history,
            prefix: prefix.into(),
            receiver,
            listener,
        }
    }

    /// State payload prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Live location of the underlying history.
    pub fn location(&self) -> Location {
        self.history.location()
    }

    /// Payload for `id`.
    pub fn encode(&self, id: &NodeId) -> String {
        format!("{}{}", self.prefix, id)
    }

    /// Strip the prefix from `payload`, returning the embedded node id.
    pub fn decode<'a>(&self, payload: &'a str) -> Result<&'a str, PayloadError> {
        let id = payload
            .strip_prefix(self.prefix.as_str())
            .ok_or_else(|| PayloadError::ForeignPrefix {
                prefix: self.prefix.clone(),
                payload: payload.to_string(),
            })?;
        if id.is_empty() {
            return Err(PayloadError::EmptyId {
                payload: payload.to_string(),
            });
        }
        Ok(id)
    }

    /// Decode the payload attached to `location`.
    pub fn decode_location<'a>(&self, location: &'a Location) -> Result<&'a str, PayloadError> {
        let payload = location.state.as_deref().ok_or(PayloadError::Missing)?;
        self.decode(payload)
    }

    /// Write an entry at `pathname` for node `id`. Search and hash are kept
    /// from the live location.
    pub fn navigate(&self, pathname: &str, id: &NodeId, replace: bool) {
        let location = self
            .history
            .location()
            .with_pathname(pathname)
            .with_state(self.encode(id));
        if replace {
            self.history.replace(location);
        } else {
            self.history.push(location);
        }
    }

    /// Replace the current entry with `location`, tagged for node `id`.
    pub fn mark(&self, location: Location, id: &NodeId) {
        let location = location.with_state(self.encode(id));
        self.history.replace(location);
    }

    /// Take every notification received since the last call.
    pub fn drain(&mut self) -> Vec<HistoryEvent> {
        std::iter::from_fn(|| self.receiver.try_recv().ok()).collect()
    }
}

impl Drop for HistoryBridge {
    fn drop(&mut self) {
        self.history.unsubscribe(self.listener);
    }
}

impl std::fmt::Debug for HistoryBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryBridge")
            .field("prefix", &self.prefix)
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}
