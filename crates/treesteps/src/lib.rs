//! # TreeSteps
//!
//! A wizard-style step navigator over a static tree of named steps, kept in
//! sync with a session-history stack.
//!
//! A wizard is declared as a tree of [`StepNode`]s and compiled into a
//! [`StepTree`]. A [`Navigator`] then walks that tree:
//!
//! - forward with [`NextSelector`]s (by depth, by child name or index, or by
//!   explicit path);
//! - backward with [`PreviousSelector`]s (by count or by ancestor name);
//! - straight to the root.
//!
//! Every move onto an addressable step writes a history entry, and
//! back/forward through those entries moves the navigator with it. Each step
//! carries its own data, seeded from its parent on the way down, and the
//! navigator holds at most one application error that fades after one step
//! back.
//!
//! ```rust
//! use std::sync::Arc;
//! use treesteps::{
//!     MemoryHistory, NavigateOptions, Navigator, NextSelector, StepNode,
//! };
//!
//! let root = StepNode::node("email", "/signup")
//!     .child("password", StepNode::node("password", "/signup/password"));
//!
//! let history = MemoryHistory::new("/signup");
//! let mut nav = Navigator::builder(root, String::new())
//!     .history(Arc::new(history.clone()))
//!     .build::<String>()?;
//!
//! nav.commit("me@example.org".to_string());
//! nav.to_next(&NextSelector::default(), NavigateOptions::default());
//! assert_eq!(nav.current_node().name, "password");
//! assert_eq!(nav.data(), "me@example.org");
//!
//! history.back();
//! nav.sync();
//! assert_eq!(nav.current(), nav.tree().root());
//! # Ok::<(), treesteps::ConfigError>(())
//! ```

pub mod access;
pub mod bridge;
pub mod config;
pub mod errors;
pub mod history;
pub mod ids;
pub mod navigator;
pub mod routing;
pub mod selector;
pub mod tree;

pub use access::{find_first_valid_node, is_node_allowed, AccessMask};
pub use bridge::HistoryBridge;
pub use config::{NavigatorConfig, RoutingConfig};
pub use errors::{ConfigError, PayloadError};
pub use history::{History, HistoryAction, HistoryEvent, ListenerId, Location, MemoryHistory};
pub use ids::{IdSource, NodeId, SequentialIdSource, UuidIdSource};
pub use navigator::{
    Direction, ErrorSlot, NavigateOptions, NavigationSnapshot, Navigator, NavigatorBuilder,
    StepContext, Transition,
};
pub use routing::{LocationMatcher, RouteMatcher};
pub use selector::{
    find_next_node, find_previous_node, has_ancestor, ChildTarget, NextSelector, PreviousSelector,
};
pub use tree::{CompiledNode, LocationPattern, NodeIndex, NodeOptions, StepNode, StepTree, ROOT_NAME};
