//! List change notifications
//!
//! Every mutation of a [`KeyedCollection`](crate::collection::KeyedCollection)
//! produces exactly one [`ListChange`], delivered synchronously to each
//! registered observer after the mutation (and its key index update) has
//! been applied.
//!
//! Observers receive the change description only. They cannot reach the
//! collection through it, so an observer mutating the list it observes is
//! ruled out at compile time.
//!
//! [`ChangeLog`] is a ready-made observer that records changes for later
//! inspection; the CLI and the tests both use it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

/// The kind of change, without its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Removed,
    Reset,
    ItemChanged,
}

/// A single change applied to an observable list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListChange {
    /// An item was inserted at `index`.
    Added { index: usize },
    /// The item previously at `index` was removed.
    Removed { index: usize },
    /// The list was cleared; any index-based view must be rebuilt.
    Reset,
    /// The item at `index` was replaced or had its content updated in place.
    ItemChanged { index: usize },
}

impl ListChange {
    /// Kind of change, without its position.
    pub fn kind(&self) -> ChangeKind {
        match self {
            ListChange::Added { .. } => ChangeKind::Added,
            ListChange::Removed { .. } => ChangeKind::Removed,
            ListChange::Reset => ChangeKind::Reset,
            ListChange::ItemChanged { .. } => ChangeKind::ItemChanged,
        }
    }

    /// Affected position; `None` for [`ListChange::Reset`].
    pub fn index(&self) -> Option<usize> {
        match *self {
            ListChange::Added { index }
            | ListChange::Removed { index }
            | ListChange::ItemChanged { index } => Some(index),
            ListChange::Reset => None,
        }
    }
}

impl fmt::Display for ListChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListChange::Added { index } => write!(f, "+ added at {}", index),
            ListChange::Removed { index } => write!(f, "- removed at {}", index),
            ListChange::Reset => write!(f, "* reset"),
            ListChange::ItemChanged { index } => write!(f, "~ changed at {}", index),
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&ListChange)>;

/// Ordered registry of change observers.
#[derive(Default)]
pub struct ChangeObservers {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl ChangeObservers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer; observers are called in registration order.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&ListChange) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn notify(&mut self, change: &ListChange) {
        for (_, observer) in &mut self.observers {
            observer(change);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for ChangeObservers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeObservers")
            .field("count", &self.observers.len())
            .finish()
    }
}

/// Observer that records every change it sees.
///
/// Clones share the same underlying log.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    changes: Rc<RefCell<Vec<ListChange>>>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A closure suitable for `subscribe` that appends to this log.
    pub fn observer(&self) -> impl FnMut(&ListChange) + 'static {
        let changes = Rc::clone(&self.changes);
        move |change| changes.borrow_mut().push(*change)
    }

    /// Copy of everything recorded so far.
    pub fn changes(&self) -> Vec<ListChange> {
        self.changes.borrow().clone()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<ListChange> {
        std::mem::take(&mut *self.changes.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.changes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.borrow().is_empty()
    }
}
