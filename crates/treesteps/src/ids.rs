//! # Node Identifiers
//!
//! Every compiled node carries an opaque string id, assigned once at compile
//! time. Ids are embedded in history state payloads, so they must be unique
//! for the lifetime of a compiled tree.
//!
//! Id generation sits behind [`IdSource`]: production code uses random v4
//! UUIDs, tests can use [`SequentialIdSource`] for stable, readable ids.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of a compiled node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<Uuid> for NodeId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Source of fresh, collision-free node ids.
pub trait IdSource {
    /// Produce an id never returned before by this source.
    fn next_id(&mut self) -> NodeId;
}

/// Random v4 UUID ids. The default source.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_id(&mut self) -> NodeId {
        NodeId::from(Uuid::new_v4())
    }
}

/// Deterministic ids of the form `{prefix}{n}`, counting from 1.
#[derive(Debug, Clone)]
pub struct SequentialIdSource {
    prefix: String,
    counter: u64,
}

impl SequentialIdSource {
    /// Create a source emitting `{prefix}1`, `{prefix}2`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }
}

impl Default for SequentialIdSource {
    fn default() -> Self {
        Self::new("n")
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&mut self) -> NodeId {
        self.counter += 1;
        NodeId(format!("{}{}", self.prefix, self.counter))
    }
}
