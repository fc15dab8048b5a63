//! Key → item lookup kept alongside an ordered sequence
//!
//! The index itself knows nothing about ordering. [`KeyedCollection`]
//! updates it in the same step as every structural change so that callers
//! never see the two disagree.
//!
//! Writes are last-write-wins. Inserting a second item under an existing
//! key silently replaces the first in the index while the sequence keeps
//! both; avoiding that is the caller's job.
//!
//! [`KeyedCollection`]: crate::collection::KeyedCollection

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::item::Shared;

/// Key → shared item mapping with O(1) lookup.
pub struct KeyIndex<K, T> {
    entries: HashMap<K, Shared<T>>,
}

impl<K: Eq + Hash, T> KeyIndex<K, T> {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Look up the item currently registered under `key`
    pub fn find(&self, key: &K) -> Option<&Shared<T>> {
        self.entries.get(key)
    }

    /// Register `item` under `key`, returning whatever it displaced
    pub fn put(&mut self, key: K, item: Shared<T>) -> Option<Shared<T>> {
        self.entries.insert(key, item)
    }

    /// Drop the entry for `key`
    pub fn remove(&mut self, key: &K) -> Option<Shared<T>> {
        self.entries.remove(key)
    }

    /// Key under which this exact handle is registered.
    ///
    /// Compares by identity and never borrows the item. Linear in the
    /// number of entries.
    pub fn key_of_item(&self, item: &Shared<T>) -> Option<&K> {
        self.entries
            .iter()
            .find(|(_, indexed)| Rc::ptr_eq(indexed, item))
            .map(|(key, _)| key)
    }

    /// Check whether `key` has an entry
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the index has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Eq + Hash, T> Default for KeyIndex<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, T> fmt::Debug for KeyIndex<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
