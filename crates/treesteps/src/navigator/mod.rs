//! # Navigation Controller
//!
//! [`Navigator`] owns the navigation state of one mounted wizard: the current
//! node, per-node data, the pending error and the last node that passed the
//! access guard. All mutation goes through its move operations and through
//! history synchronization.
//!
//! ## Moves
//!
//! | Operation | Target | Data | Error |
//! |-----------|--------|------|-------|
//! | [`to_next`](Navigator::to_next) | [`find_next_node`] | delegated down | cleared |
//! | [`to_previous`](Navigator::to_previous) | [`find_previous_node`], else root | untouched | decayed |
//! | [`to_root`](Navigator::to_root) | tree root | untouched | cleared |
//!
//! A next move that resolves to nothing changes nothing. Moves onto
//! addressable nodes write a history entry; tunnel nodes never do.
//!
//! ## History
//!
//! Back/forward notifications queue up in the [`HistoryBridge`]. They are
//! applied by [`Navigator::sync`], which every move runs before resolving
//! its target, so a move always starts from the node the live history entry
//! names. After any change of current node the navigator re-checks the node
//! against the live location and redirects to the root (replacing the entry)
//! when it is not reachable from there.

mod context;
mod state;

pub use context::StepContext;
pub use state::{Direction, ErrorSlot, NavigateOptions, NavigationSnapshot, Transition};

use crate::access::{find_first_valid_node, is_node_allowed, AccessMask};
use crate::bridge::HistoryBridge;
use crate::config::NavigatorConfig;
use crate::errors::ConfigError;
use crate::history::{History, HistoryAction, HistoryEvent, Location, MemoryHistory};
use crate::ids::{IdSource, UuidIdSource};
use crate::routing::{LocationMatcher, RouteMatcher};
use crate::selector::{
    find_next_node, find_previous_node, has_ancestor, NextSelector, PreviousSelector,
};
use crate::tree::{CompiledNode, NodeIndex, StepNode, StepTree};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

// ============================================================================
// Builder
// ============================================================================

/// Assembles a [`Navigator`] from a declarative tree and its collaborators.
///
/// Unset collaborators default to a fresh [`MemoryHistory`] at `/`, a
/// [`RouteMatcher`] configured from [`NavigatorConfig::routing`] and random
/// UUID ids.
pub struct NavigatorBuilder<R, T> {
    root: StepNode<R>,
    initial_data: T,
    config: NavigatorConfig,
    history: Option<Arc<dyn History>>,
    matcher: Option<Arc<dyn LocationMatcher>>,
    ids: Option<Box<dyn IdSource + Send>>,
}

impl<R: Clone, T: Clone> NavigatorBuilder<R, T> {
    /// Start from a declarative root and the data every node starts with.
    pub fn new(root: StepNode<R>, initial_data: T) -> Self {
        Self {
            root,
            initial_data,
            config: NavigatorConfig::default(),
            history: None,
            matcher: None,
            ids: None,
        }
    }

    /// Use `config` instead of the defaults.
    #[must_use]
    pub fn config(mut self, config: NavigatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Session history to read and write.
    #[must_use]
    pub fn history(mut self, history: Arc<dyn History>) -> Self {
        self.history = Some(history);
        self
    }

    /// Location matcher used by the access guard.
    #[must_use]
    pub fn matcher(mut self, matcher: Arc<dyn LocationMatcher>) -> Self {
        self.matcher = Some(matcher);
        self
    }

    /// Id source used to compile the tree.
    #[must_use]
    pub fn id_source(mut self, ids: impl IdSource + Send + 'static) -> Self {
        self.ids = Some(Box::new(ids));
        self
    }

    /// Validate the config, compile the tree and mount.
    pub fn build<E>(self) -> Result<Navigator<R, T, E>, ConfigError> {
        self.config.validate()?;

        let history = self
            .history
            .unwrap_or_else(|| Arc::new(MemoryHistory::default()));
        let matcher = self
            .matcher
            .unwrap_or_else(|| Arc::new(RouteMatcher::from_config(&self.config.routing)));
        let mut ids = self.ids.unwrap_or_else(|| Box::new(UuidIdSource));

        let tree = StepTree::compile(&self.root, ids.as_mut());
        let bridge = HistoryBridge::new(history, self.config.state_prefix.clone());
        let root = tree.root();

        let mut navigator = Navigator {
            tree,
            config: self.config,
            bridge,
            matcher,
            ids,
            initial_data: self.initial_data,
            data: HashMap::new(),
            error: ErrorSlot::default(),
            current: root,
            previous: None,
            last_valid: root,
        };
        navigator.mount();
        Ok(navigator)
    }
}

// ============================================================================
// Navigator
// ============================================================================

/// Stateful step navigator over a compiled tree.
///
/// `R` is the renderable attached to each node, `T` the per-node data and `E`
/// the application error type.
pub struct Navigator<R, T, E> {
    tree: StepTree<R>,
    config: NavigatorConfig,
    bridge: HistoryBridge,
    matcher: Arc<dyn LocationMatcher>,
    ids: Box<dyn IdSource + Send>,
    initial_data: T,
    data: HashMap<NodeIndex, T>,
    error: ErrorSlot<E>,
    current: NodeIndex,
    previous: Option<NodeIndex>,
    last_valid: NodeIndex,
}

impl<R: Clone, T: Clone> Navigator<R, T, ()> {
    /// Shorthand for [`NavigatorBuilder::new`].
    pub fn builder(root: StepNode<R>, initial_data: T) -> NavigatorBuilder<R, T> {
        NavigatorBuilder::new(root, initial_data)
    }
}

impl<R: Clone, T: Clone, E> Navigator<R, T, E> {
    fn mount(&mut self) {
        let root = self.tree.root();
        let location = self.bridge.location();
        let initial = find_first_valid_node(&self.tree, root, &location, self.matcher.as_ref())
            .unwrap_or(root);

        let node = self.tree.node(initial);
        let marked = if initial == root {
            match node.pattern.primary() {
                Some(path) => location.clone().with_pathname(path),
                None => location.clone(),
            }
        } else {
            location.clone()
        };
        self.bridge.mark(marked, &node.id);

        self.current = initial;
        self.last_valid = initial;
        self.previous = None;
        info!(
            node = %node.id,
            name = %node.name,
            location = %location,
            nodes = self.tree.len(),
            "Step navigator mounted"
        );
        let live = self.bridge.location();
        self.check_access(&live);
    }

    /// Recompile from a new declarative root and mount again.
    ///
    /// Data, error and transition history are discarded.
    pub fn reset_tree(&mut self, root: &StepNode<R>) {
        self.tree = StepTree::compile(root, self.ids.as_mut());
        self.data.clear();
        self.error.clear();
        // Events queued against the old tree carry ids it no longer has.
        self.bridge.drain();
        self.mount();
    }

    // ------------------------------------------------------------------------
    // Moves
    // ------------------------------------------------------------------------

    /// Move forward to the node picked by `selector`.
    ///
    /// Pending history notifications are applied first. Returns `false`,
    /// leaving all state untouched, when the selector does not resolve.
    /// Otherwise the current data is copied to every node from the target up
    /// to (not including) the current node, and the error is cleared.
    pub fn to_next(&mut self, selector: &NextSelector, options: NavigateOptions) -> bool {
        self.sync();
        self.move_next(selector, options)
    }

    /// Move back to the ancestor picked by `selector`, or to the root when
    /// it does not resolve. The pending error decays by one step.
    pub fn to_previous(&mut self, selector: &PreviousSelector, options: NavigateOptions) -> bool {
        self.sync();
        self.move_previous(selector, options)
    }

    /// Clear the error and move to the tree root.
    pub fn to_root(&mut self, options: NavigateOptions) -> bool {
        self.sync();
        self.move_root(options)
    }

    fn move_next(&mut self, selector: &NextSelector, options: NavigateOptions) -> bool {
        let Some(target) = find_next_node(&self.tree, self.current, selector) else {
            trace!(from = %self.current_node().id, ?selector, "No next step");
            return false;
        };

        let carried = self.data().clone();
        let mut cursor = Some(target);
        while let Some(index) = cursor {
            if index == self.current {
                break;
            }
            self.data.insert(index, carried.clone());
            cursor = self.tree.parent(index);
        }

        self.error.clear();
        self.go_to(target, options)
    }

    fn move_previous(&mut self, selector: &PreviousSelector, options: NavigateOptions) -> bool {
        let Some(target) = find_previous_node(&self.tree, self.current, selector) else {
            trace!(from = %self.current_node().id, ?selector, "No previous step, going to root");
            return self.move_root(options);
        };
        self.error.decay();
        self.go_to(target, options)
    }

    fn move_root(&mut self, options: NavigateOptions) -> bool {
        self.error.clear();
        let root = self.tree.root();
        self.go_to(root, options)
    }

    fn go_to(&mut self, target: NodeIndex, options: NavigateOptions) -> bool {
        if target == self.current {
            return false;
        }

        let node = self.tree.node(target);
        if let Some(path) = node.pattern.primary() {
            self.bridge.navigate(path, &node.id, options.use_replace);
        }
        debug!(
            from = %self.tree.node(self.current).id,
            to = %node.id,
            name = %node.name,
            replace = options.use_replace,
            tunnel = node.is_tunnel(),
            "Step transition"
        );

        self.last_valid = target;
        self.previous = Some(self.current);
        self.current = target;
        let live = self.bridge.location();
        self.check_access(&live);
        true
    }

    /// Redirect to the root when the current node is not reachable from
    /// `location`.
    fn check_access(&mut self, location: &Location) {
        if self.last_valid != self.current {
            return;
        }
        let node = self.tree.node(self.current);
        if is_node_allowed(node, location, self.matcher.as_ref(), AccessMask::ALL) {
            return;
        }
        warn!(
            node = %node.id,
            name = %node.name,
            location = %location,
            "Step not reachable from location, redirecting to root"
        );
        self.move_root(NavigateOptions::replace());
    }

    // ------------------------------------------------------------------------
    // Data and errors
    // ------------------------------------------------------------------------

    /// Store `value` as the current node's data.
    pub fn commit(&mut self, value: T) {
        self.data.insert(self.current, value);
    }

    /// Replace the current node's data with `update(current data)`.
    pub fn commit_with(&mut self, update: impl FnOnce(&T) -> T) {
        let value = update(self.data());
        self.commit(value);
    }

    /// Set the pending error with the configured default ttl.
    pub fn set_error(&mut self, error: E) {
        let ttl = self.config.default_error_ttl;
        self.error.set(Some(error), ttl);
    }

    /// Replace the pending error with `update(previous error)`.
    ///
    /// `ttl` falls back to the configured default. Returning `None` from
    /// `update` clears the error.
    pub fn update_error(&mut self, update: impl FnOnce(Option<E>) -> Option<E>, ttl: Option<u32>) {
        let ttl = ttl.unwrap_or(self.config.default_error_ttl);
        let error = update(self.error.take());
        self.error.set(error, ttl);
    }

    /// Data of the current node, or the initial data.
    pub fn data(&self) -> &T {
        self.data_of(self.current)
    }

    /// Data of the current node's parent, or the initial data.
    pub fn previous_data(&self) -> &T {
        match self.tree.parent(self.current) {
            Some(parent) => self.data_of(parent),
            None => &self.initial_data,
        }
    }

    /// Data stored for `index`, or the initial data.
    pub fn data_of(&self, index: NodeIndex) -> &T {
        self.data.get(&index).unwrap_or(&self.initial_data)
    }

    /// Data every node starts with.
    pub fn initial_data(&self) -> &T {
        &self.initial_data
    }

    /// Pending error.
    pub fn error(&self) -> Option<&E> {
        self.error.error()
    }

    /// Pending error and its ttl.
    pub fn error_slot(&self) -> &ErrorSlot<E> {
        &self.error
    }

    // ------------------------------------------------------------------------
    // History synchronization
    // ------------------------------------------------------------------------

    /// Apply every queued history notification. Returns `true` if the
    /// current node changed.
    pub fn sync(&mut self) -> bool {
        let mut changed = false;
        for event in self.bridge.drain() {
            changed |= self.handle_history_event(&event);
        }
        changed
    }

    /// Apply one history notification.
    ///
    /// Only [`HistoryAction::Pop`] events carrying a payload for a node of
    /// this tree move the navigator. The access re-check runs against the
    /// live location.
    pub fn handle_history_event(&mut self, event: &HistoryEvent) -> bool {
        if event.action != HistoryAction::Pop {
            return false;
        }
        let id = match self.bridge.decode_location(&event.location) {
            Ok(id) => id,
            Err(err) => {
                trace!(location = %event.location, error = %err, "Ignoring history entry");
                return false;
            }
        };
        let Some(target) = self.tree.find_node(id) else {
            trace!(location = %event.location, node = id, "History entry names an unknown step");
            return false;
        };
        if target == self.current {
            return false;
        }

        debug!(
            from = %self.tree.node(self.current).id,
            to = id,
            location = %event.location,
            "Step synced from history"
        );
        self.previous = Some(self.current);
        self.current = target;
        self.last_valid = target;
        let live = self.bridge.location();
        self.check_access(&live);
        true
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    /// Index of the current node.
    pub fn current(&self) -> NodeIndex {
        self.current
    }

    /// The current node.
    pub fn current_node(&self) -> &CompiledNode<R> {
        self.tree.node(self.current)
    }

    /// Last node that passed the access guard.
    pub fn last_valid(&self) -> NodeIndex {
        self.last_valid
    }

    /// The compiled tree.
    pub fn tree(&self) -> &StepTree<R> {
        &self.tree
    }

    /// Active configuration.
    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Live history location.
    pub fn location(&self) -> Location {
        self.bridge.location()
    }

    /// The last change of current node, if there was one since mount.
    pub fn transition(&self) -> Option<Transition> {
        let from = self.previous?;
        let direction = if has_ancestor(&self.tree, from, self.current) {
            Direction::Backward
        } else {
            Direction::Forward
        };
        Some(Transition {
            from,
            to: self.current,
            direction,
        })
    }

    /// Serializable summary of the current state.
    pub fn snapshot(&self) -> NavigationSnapshot {
        let node = self.current_node();
        NavigationSnapshot {
            current_id: node.id.clone(),
            current_name: node.name.clone(),
            depth: self.tree.depth(self.current),
            has_error: self.error.is_set(),
            error_ttl: self.error.ttl(),
            data_entries: self.data.len(),
        }
    }

    /// Handle for the renderable of the current node.
    pub fn context(&mut self) -> StepContext<'_, R, T, E> {
        StepContext::new(self)
    }
}

impl<R, T, E> std::fmt::Debug for Navigator<R, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("last_valid", &self.last_valid)
            .field("nodes", &self.tree.len())
            .field("bridge", &self.bridge)
            .finish_non_exhaustive()
    }
}
