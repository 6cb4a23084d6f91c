//! In-memory session history, behaving like a browser history stack.

use super::{History, HistoryAction, HistoryEvent, ListenerId, Location};
use futures::channel::mpsc::UnboundedSender;
use parking_lot::Mutex;
use std::sync::Arc;

struct MemoryHistoryInner {
    entries: Vec<Location>,
    index: usize,
    next_listener: u64,
    listeners: Vec<(ListenerId, UnboundedSender<HistoryEvent>)>,
}

impl MemoryHistoryInner {
    fn current(&self) -> Location {
        self.entries[self.index].clone()
    }

    fn notify(&mut self, action: HistoryAction) {
        let event = HistoryEvent {
            location: self.current(),
            action,
        };
        // Listeners whose receiver is gone are dropped here.
        self.listeners
            .retain(|(_, tx)| tx.unbounded_send(event.clone()).is_ok());
    }
}

/// Clonable handle to an in-memory history stack.
///
/// All clones share the same stack. `go`, `back` and `forward` emit
/// [`HistoryAction::Pop`]; out-of-range moves are clamped to the ends of the
/// stack.
#[derive(Clone)]
pub struct MemoryHistory {
    inner: Arc<Mutex<MemoryHistoryInner>>,
}

impl MemoryHistory {
    /// History with a single entry at `pathname`.
    pub fn new(pathname: impl Into<String>) -> Self {
        Self::with_entries(vec![Location::new(pathname)], 0)
    }

    /// History preloaded with `entries`, positioned at `index`.
    ///
    /// An empty list is replaced by a single `/` entry and `index` is clamped.
    pub fn with_entries(mut entries: Vec<Location>, index: usize) -> Self {
        if entries.is_empty() {
            entries.push(Location::new("/"));
        }
        let index = index.min(entries.len() - 1);
        Self {
            inner: Arc::new(Mutex::new(MemoryHistoryInner {
                entries,
                index,
                next_listener: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Move `delta` entries through the stack (negative is backwards).
    pub fn go(&self, delta: isize) {
        let mut inner = self.inner.lock();
        let last = inner.entries.len() - 1;
        let target = inner.index.saturating_add_signed(delta).min(last);
        if target == inner.index {
            return;
        }
        inner.index = target;
        inner.notify(HistoryAction::Pop);
    }

    /// Same as `go(-1)`.
    pub fn back(&self) {
        self.go(-1);
    }

    /// Same as `go(1)`.
    pub fn forward(&self) {
        self.go(1);
    }

    /// Number of entries in the stack.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Whether the stack is empty (never true in practice).
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Position of the current entry.
    pub fn index(&self) -> usize {
        self.inner.lock().index
    }

    /// Snapshot of all entries.
    pub fn entries(&self) -> Vec<Location> {
        self.inner.lock().entries.clone()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl std::fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("MemoryHistory")
            .field("entries", &inner.entries)
            .field("index", &inner.index)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Location {
        self.inner.lock().current()
    }

    fn push(&self, location: Location) {
        let mut inner = self.inner.lock();
        let keep = inner.index + 1;
        inner.entries.truncate(keep);
        inner.entries.push(location);
        inner.index = keep;
        inner.notify(HistoryAction::Push);
    }

    fn replace(&self, location: Location) {
        let mut inner = self.inner.lock();
        let index = inner.index;
        inner.entries[index] = location;
        inner.notify(HistoryAction::Replace);
    }

    fn subscribe(&self, listener: UnboundedSender<HistoryEvent>) -> ListenerId {
        let mut inner = self.inner.lock();
        let id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        inner.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.inner.lock().listeners.retain(|(lid, _)| *lid != id);
    }
}
