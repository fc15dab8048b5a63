//! Observable ordered collection with a key index
//!
//! [`KeyedCollection`] is a list of [`Shared`] items plus a
//! [`KeyIndex`] over their keys. Each list primitive updates both
//! structures in one step and then notifies observers:
//!
//! | primitive   | index update                 | notification           |
//! |-------------|------------------------------|------------------------|
//! | `insert`    | put new key                  | `Added { index }`       |
//! | `add`       | put new key                  | `Added { index }`       |
//! | `remove_at` | remove old key               | `Removed { index }`     |
//! | `set`       | remove old key, put new key  | `ItemChanged { index }` |
//! | `clear`     | clear                        | `Reset`                 |
//!
//! On top of those sit the key-aware operations: [`find`], [`upsert`],
//! [`remove_by_key`] and [`apply_changes`].
//!
//! Keys are write-once. Mutating an item's key while it is in the collection
//! leaves the index pointing at the old key.
//!
//! ## Duplicate keys
//!
//! `insert`, `add` and `set` do not reject an item whose key is already
//! present. The index keeps the most recent item for that key while the list
//! keeps both. Use [`upsert`] when the key may already exist.
//!
//! [`find`]: KeyedCollection::find
//! [`upsert`]: KeyedCollection::upsert
//! [`remove_by_key`]: KeyedCollection::remove_by_key
//! [`apply_changes`]: KeyedCollection::apply_changes

use std::fmt;
use std::rc::Rc;

use log::trace;

use crate::change::{ChangeObservers, ListChange, SubscriptionId};
use crate::error::{Error, Result};
use crate::item::{borrowed_at, copy_into, key_of, shared, Item, Shared};
use crate::key_index::KeyIndex;
use crate::reconcile::{self, OrderedContainer, ReconcileOptions, ReconcileSummary, Snapshot};

/// Result of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No item had the key; the new item was appended.
    Inserted,
    /// The existing item was updated in place.
    Updated,
    /// The existing item was left alone because the predicate vetoed it.
    Skipped,
}

/// Ordered list of shared items, indexed by key, that reports every change.
pub struct KeyedCollection<T: Item> {
    items: Vec<Shared<T>>,
    index: KeyIndex<T::Key, T>,
    observers: ChangeObservers,
}

impl<T: Item> KeyedCollection<T> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: KeyIndex::new(),
            observers: ChangeObservers::new(),
        }
    }

    /// Build a collection from already-shared handles, preserving their identity.
    ///
    /// # Errors
    ///
    /// Returns `Error::ItemBorrowed` if one of the handles is mutably borrowed.
    pub fn from_shared<I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = Shared<T>>,
    {
        let mut collection = Self::new();
        for item in items {
            collection.add(item)?;
        }
        Ok(collection)
    }

    /// Number of items in the list
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the list has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of keys in the index.
    ///
    /// Equal to [`len`](Self::len) whenever all keys are unique.
    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    /// Item at `index`, if in range
    pub fn get(&self, index: usize) -> Option<&Shared<T>> {
        self.items.get(index)
    }

    /// Locate the item whose key matches `key`
    pub fn find(&self, key: &T::Key) -> Option<&Shared<T>> {
        self.index.find(key)
    }

    /// Check whether an item is indexed under `key`
    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.index.contains_key(key)
    }

    /// Position of the item indexed under `key`. Linear in the list length.
    pub fn position_of_key(&self, key: &T::Key) -> Option<usize> {
        let item = self.index.find(key)?;
        self.position_of(item)
    }

    /// Position of this exact handle, compared by identity.
    pub fn position_of(&self, item: &Shared<T>) -> Option<usize> {
        self.items.iter().position(|existing| Rc::ptr_eq(existing, item))
    }

    /// Iterate over the items in list order
    pub fn iter(&self) -> std::slice::Iter<'_, Shared<T>> {
        self.items.iter()
    }

    /// Keys in list order.
    ///
    /// # Errors
    ///
    /// Returns `Error::ItemBorrowed` if any item is mutably borrowed.
    pub fn keys(&self) -> Result<Vec<T::Key>> {
        (0..self.items.len())
            .map(|index| self.key_at(index).ok_or_else(|| self.borrowed_error(index)))
            .collect()
    }

    /// Clone every item's current content, in list order.
    ///
    /// # Errors
    ///
    /// Returns `Error::ItemBorrowed` if any item is mutably borrowed.
    pub fn cloned_items(&self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.try_borrow()
                    .map(|it| it.clone())
                    .map_err(|_| self.borrowed_error(index))
            })
            .collect()
    }

    /// Register an observer that is called after every change.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&ListChange) + 'static,
    {
        self.observers.subscribe(observer)
    }

    /// Drop an observer. Returns `false` if the id is not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Insert `item` at `index`, shifting later items right.
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfRange` if `index > len`.
    pub fn insert(&mut self, index: usize, item: Shared<T>) -> Result<()> {
        if index > self.items.len() {
            return Err(self.out_of_range(index));
        }
        let key = key_of(&item)?;

        trace!("insert {:?} at {}", key, index);
        self.items.insert(index, Rc::clone(&item));
        self.index.put(key, item);
        self.notify(ListChange::Added { index });
        Ok(())
    }

    /// Append `item` at the end.
    pub fn add(&mut self, item: Shared<T>) -> Result<()> {
        self.insert(self.items.len(), item)
    }

    /// Remove and return the item at `index`.
    ///
    /// The item does not need to be borrowable; a mutably borrowed item is
    /// unindexed by identity.
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfRange` if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<Shared<T>> {
        if index >= self.items.len() {
            return Err(self.out_of_range(index));
        }
        let key = self.key_at(index);
        Ok(self.detach(index, key.as_ref()))
    }

    /// Replace the item at `index`, re-keying the index. Returns the old item.
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfRange` if `index >= len`.
    pub fn set(&mut self, index: usize, item: Shared<T>) -> Result<Shared<T>> {
        if index >= self.items.len() {
            return Err(self.out_of_range(index));
        }
        let new_key = key_of(&item)?;
        let old_key = self.key_at(index);

        trace!("set {:?} -> {:?} at {}", old_key, new_key, index);
        let old = std::mem::replace(&mut self.items[index], Rc::clone(&item));
        if let Some(old_key) = old_key {
            self.unindex(&old_key, &old);
        }
        self.index.put(new_key, item);
        self.notify(ListChange::ItemChanged { index });
        Ok(old)
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        trace!("clear {} items", self.items.len());
        self.items.clear();
        self.index.clear();
        self.notify(ListChange::Reset);
    }

    /// Remove this exact handle. Returns `false` if it is not in the list.
    pub fn remove(&mut self, item: &Shared<T>) -> bool {
        let Some(index) = self.position_of(item) else {
            return false;
        };
        let key = self.index.key_of_item(item).cloned();
        self.detach(index, key.as_ref());
        true
    }

    /// Remove the item indexed under `item`'s key.
    ///
    /// Only the key of `item` is used; it does not need to be the stored
    /// handle. Returns `false` when no item has that key.
    pub fn remove_by_key(&mut self, item: &T) -> bool {
        self.remove_key(item.key()).is_some()
    }

    /// Remove and return the item indexed under `key`.
    pub fn remove_key(&mut self, key: &T::Key) -> Option<Shared<T>> {
        let existing = self.index.find(key)?;
        let index = self.position_of(existing)?;
        Some(self.detach(index, Some(key)))
    }

    /// Update the item with the same key in place, or append `item`.
    pub fn upsert(&mut self, item: Shared<T>) -> Result<UpsertOutcome> {
        self.upsert_with(item, |_, _| false)
    }

    /// Like [`upsert`](Self::upsert), but `skip_if_present(new, existing)`
    /// can veto the in-place update. It is not consulted for new keys.
    pub fn upsert_with<F>(&mut self, item: Shared<T>, skip_if_present: F) -> Result<UpsertOutcome>
    where
        F: FnOnce(&T, &T) -> bool,
    {
        let key = key_of(&item)?;
        let Some(existing) = self.index.find(&key).map(Rc::clone) else {
            self.add(item)?;
            return Ok(UpsertOutcome::Inserted);
        };

        let skip = {
            let new = item.try_borrow().map_err(|_| borrowed(&key))?;
            let current = existing.try_borrow().map_err(|_| borrowed(&key))?;
            skip_if_present(&new, &current)
        };
        if skip {
            trace!("upsert {:?} skipped by predicate", key);
            return Ok(UpsertOutcome::Skipped);
        }

        copy_into(&existing, &item)?;
        if let Some(index) = self.position_of(&existing) {
            self.notify(ListChange::ItemChanged { index });
        }
        Ok(UpsertOutcome::Updated)
    }

    /// Merge `source` into this collection in place.
    ///
    /// See [`reconcile::apply_changes`] for the algorithm and policies.
    pub fn apply_changes<S>(
        &mut self,
        source: &S,
        delete_non_matching: bool,
    ) -> Result<ReconcileSummary>
    where
        S: Snapshot<T> + ?Sized,
    {
        reconcile::apply_changes(self, source, ReconcileOptions { delete_non_matching })
    }

    /// Key of the item at `index`: read from the item, or recovered from
    /// the index by identity when the item is mutably borrowed.
    fn key_at(&self, index: usize) -> Option<T::Key> {
        let item = self.items.get(index)?;
        key_of(item)
            .ok()
            .or_else(|| self.index.key_of_item(item).cloned())
    }

    fn borrowed_error(&self, index: usize) -> Error {
        match self
            .items
            .get(index)
            .and_then(|item| self.index.key_of_item(item))
        {
            Some(key) => Error::ItemBorrowed {
                key: format!("{:?}", key),
            },
            None => borrowed_at(index),
        }
    }

    // `index` must be in range. `key` is `None` for an item with no readable key.
    fn detach(&mut self, index: usize, key: Option<&T::Key>) -> Shared<T> {
        trace!("remove {:?} at {}", key, index);
        let removed = self.items.remove(index);
        if let Some(key) = key {
            self.unindex(key, &removed);
        }
        self.notify(ListChange::Removed { index });
        removed
    }

    // A duplicate may have displaced `item` in the index; leave that entry alone.
    fn unindex(&mut self, key: &T::Key, item: &Shared<T>) {
        if self
            .index
            .find(key)
            .is_some_and(|indexed| Rc::ptr_eq(indexed, item))
        {
            self.index.remove(key);
        }
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::IndexOutOfRange {
            index,
            len: self.items.len(),
        }
    }

    fn notify(&mut self, change: ListChange) {
        self.observers.notify(&change);
    }
}

fn borrowed<K: fmt::Debug>(key: &K) -> Error {
    Error::ItemBorrowed {
        key: format!("{:?}", key),
    }
}

impl<T: Item> Default for KeyedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Item> FromIterator<T> for KeyedCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        for item in iter {
            let key = item.key().clone();
            let item = shared(item);
            collection.items.push(Rc::clone(&item));
            collection.index.put(key, item);
        }
        collection
    }
}

impl<'a, T: Item> IntoIterator for &'a KeyedCollection<T> {
    type Item = &'a Shared<T>;
    type IntoIter = std::slice::Iter<'a, Shared<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Item + fmt::Debug> fmt::Debug for KeyedCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedCollection")
            .field("items", &self.items)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<T: Item> OrderedContainer<T> for KeyedCollection<T> {
    fn len(&self) -> usize {
        KeyedCollection::len(self)
    }

    fn get(&self, index: usize) -> Option<&Shared<T>> {
        KeyedCollection::get(self, index)
    }

    fn find(&self, key: &T::Key) -> Option<&Shared<T>> {
        KeyedCollection::find(self, key)
    }

    fn insert(&mut self, index: usize, item: Shared<T>) -> Result<()> {
        KeyedCollection::insert(self, index, item)
    }

    fn remove_at(&mut self, index: usize) -> Result<Shared<T>> {
        KeyedCollection::remove_at(self, index)
    }

    fn set(&mut self, index: usize, item: Shared<T>) -> Result<Shared<T>> {
        KeyedCollection::set(self, index, item)
    }

    fn clear(&mut self) {
        KeyedCollection::clear(self)
    }

    fn add(&mut self, item: Shared<T>) -> Result<()> {
        KeyedCollection::add(self, item)
    }

    fn item_changed(&mut self, index: usize) {
        self.notify(ListChange::ItemChanged { index });
    }
}

impl<T: Item> Snapshot<T> for KeyedCollection<T> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn item_at(&self, index: usize) -> Option<&Shared<T>> {
        self.items.get(index)
    }

    fn lookup(&self, key: &T::Key) -> Option<&Shared<T>> {
        self.index.find(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::ChangeLog;
    use crate::item::{CopyFrom, Keyed};

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        label: String,
    }

    impl Keyed for Row {
        type Key = u32;

        fn key(&self) -> &u32 {
            &self.id
        }
    }

    impl CopyFrom for Row {
        fn copy_from(&mut self, other: &Self) -> Result<()> {
            self.label = other.label.clone();
            Ok(())
        }
    }

    fn row(id: u32, label: &str) -> Shared<Row> {
        shared(Row {
            id,
            label: label.to_string(),
        })
    }

    fn collection(rows: &[(u32, &str)]) -> KeyedCollection<Row> {
        KeyedCollection::from_shared(rows.iter().map(|(id, label)| row(*id, label))).unwrap()
    }

    fn contents(list: &KeyedCollection<Row>) -> Vec<(u32, String)> {
        list.iter()
            .map(|r| {
                let r = r.borrow();
                (r.id, r.label.clone())
            })
            .collect()
    }

    fn observed(list: &mut KeyedCollection<Row>) -> ChangeLog {
        let log = ChangeLog::new();
        list.subscribe(log.observer());
        log
    }

    #[test]
    fn test_new_collection_is_empty() {
        let list: KeyedCollection<Row> = KeyedCollection::new();
        assert!(list.is_empty());
        assert_eq!(list.index_len(), 0);
        assert!(list.find(&1).is_none());
    }

    #[test]
    fn test_add_indexes_and_notifies() {
        let mut list = KeyedCollection::new();
        let log = observed(&mut list);
        let item = row(1, "a");

        list.add(Rc::clone(&item)).unwrap();
        list.add(row(2, "b")).unwrap();

        assert!(Rc::ptr_eq(list.find(&1).unwrap(), &item));
        assert_eq!(list.len(), 2);
        assert_eq!(list.index_len(), 2);
        assert_eq!(
            log.changes(),
            vec![ListChange::Added { index: 0 }, ListChange::Added { index: 1 }]
        );
    }

    #[test]
    fn test_insert_at_front_shifts_items() {
        let mut list = collection(&[(1, "a"), (2, "b")]);
        let log = observed(&mut list);

        list.insert(0, row(3, "c")).unwrap();

        assert_eq!(contents(&list)[0], (3, "c".to_string()));
        assert_eq!(list.position_of_key(&1), Some(1));
        assert_eq!(log.changes(), vec![ListChange::Added { index: 0 }]);
    }

    #[test]
    fn test_insert_out_of_range_leaves_list_untouched() {
        let mut list = collection(&[(1, "a")]);
        let log = observed(&mut list);

        let err = list.insert(5, row(2, "b")).unwrap_err();

        assert!(matches!(err, Error::IndexOutOfRange { index: 5, len: 1 }));
        assert_eq!(list.len(), 1);
        assert!(list.find(&2).is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn test_remove_at_drops_index_entry() {
        let mut list = collection(&[(1, "a"), (2, "b"), (3, "c")]);
        let log = observed(&mut list);

        let removed = list.remove_at(1).unwrap();

        assert_eq!(removed.borrow().id, 2);
        assert!(list.find(&2).is_none());
        assert_eq!(list.len(), list.index_len());
        assert_eq!(log.changes(), vec![ListChange::Removed { index: 1 }]);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut list = collection(&[(1, "a")]);
        assert!(matches!(
            list.remove_at(1),
            Err(Error::IndexOutOfRange { index: 1, len: 1 })
        ));

        let mut empty: KeyedCollection<Row> = KeyedCollection::new();
        assert!(matches!(
            empty.remove_at(0),
            Err(Error::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_set_swaps_identity_and_rekeys() {
        let mut list = collection(&[(1, "a"), (2, "b")]);
        let log = observed(&mut list);
        let replacement = row(9, "z");

        let old = list.set(0, Rc::clone(&replacement)).unwrap();

        assert_eq!(old.borrow().id, 1);
        assert!(list.find(&1).is_none());
        assert!(Rc::ptr_eq(list.find(&9).unwrap(), &replacement));
        assert_eq!(list.len(), list.index_len());
        assert_eq!(log.changes(), vec![ListChange::ItemChanged { index: 0 }]);
    }

    #[test]
    fn test_set_out_of_range() {
        let mut list = collection(&[(1, "a")]);
        assert!(matches!(
            list.set(3, row(2, "b")),
            Err(Error::IndexOutOfRange { index: 3, len: 1 })
        ));
    }

    #[test]
    fn test_clear_resets_index() {
        let mut list = collection(&[(1, "a"), (2, "b")]);
        let log = observed(&mut list);

        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.index_len(), 0);
        assert_eq!(log.changes(), vec![ListChange::Reset]);
    }

    #[test]
    fn test_remove_by_identity() {
        let mut list = collection(&[(1, "a")]);
        let stranger = row(1, "a");
        assert!(!list.remove(&stranger));

        let stored = Rc::clone(list.get(0).unwrap());
        assert!(list.remove(&stored));
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_by_key() {
        let mut list = collection(&[(1, "a"), (2, "b")]);
        let log = observed(&mut list);
        let probe = Row {
            id: 2,
            label: "anything".to_string(),
        };

        assert!(list.remove_by_key(&probe));
        assert!(!list.remove_by_key(&probe));
        assert_eq!(contents(&list), vec![(1, "a".to_string())]);
        assert_eq!(log.changes(), vec![ListChange::Removed { index: 1 }]);
    }

    #[test]
    fn test_remove_by_key_while_item_is_borrowed() {
        let mut list = collection(&[(1, "a"), (2, "b")]);
        let log = observed(&mut list);
        let held = Rc::clone(list.get(0).unwrap());
        let _guard = held.borrow_mut();
        let probe = Row {
            id: 1,
            label: "x".to_string(),
        };

        assert!(list.remove_by_key(&probe));

        assert_eq!(list.len(), 1);
        assert!(!list.contains_key(&1));
        assert_eq!(list.len(), list.index_len());
        assert_eq!(log.changes(), vec![ListChange::Removed { index: 0 }]);
    }

    #[test]
    fn test_remove_at_and_remove_while_item_is_borrowed() {
        let mut list = collection(&[(1, "a"), (2, "b"), (3, "c")]);
        let first = Rc::clone(list.get(0).unwrap());
        let last = Rc::clone(list.get(2).unwrap());
        let _first_guard = first.borrow_mut();
        let _last_guard = last.borrow_mut();

        let removed = list.remove_at(0).unwrap();
        assert!(Rc::ptr_eq(&removed, &first));
        assert!(list.remove(&last));

        assert!(!list.contains_key(&1));
        assert!(!list.contains_key(&3));
        assert_eq!(list.len(), 1);
        assert_eq!(list.index_len(), 1);
    }

    #[test]
    fn test_borrowed_item_error_names_key_from_index() {
        let list = collection(&[(1, "a"), (2, "b")]);
        let held = Rc::clone(list.get(1).unwrap());
        let _guard = held.borrow_mut();

        let err = list.cloned_items().unwrap_err();
        assert!(matches!(err, Error::ItemBorrowed { ref key } if key == "2"));
        // Keys come back from the index while the item is held.
        assert_eq!(list.keys().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_remove_key_missing_is_none() {
        let mut list = collection(&[(1, "a")]);
        assert!(list.remove_key(&7).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_upsert_updates_in_place() {
        let mut list = collection(&[(1, "a"), (2, "b")]);
        let original = Rc::clone(list.find(&2).unwrap());
        let log = observed(&mut list);

        let outcome = list.upsert(row(2, "X")).unwrap();

        assert_eq!(outcome, UpsertOutcome::Updated);
        assert!(Rc::ptr_eq(list.find(&2).unwrap(), &original));
        assert_eq!(
            contents(&list),
            vec![(1, "a".to_string()), (2, "X".to_string())]
        );
        assert_eq!(log.changes(), vec![ListChange::ItemChanged { index: 1 }]);
    }

    #[test]
    fn test_upsert_appends_new_key() {
        let mut list = collection(&[(1, "a"), (2, "X")]);
        let log = observed(&mut list);

        let outcome = list.upsert(row(5, "z")).unwrap();

        assert_eq!(outcome, UpsertOutcome::Inserted);
        assert_eq!(
            contents(&list),
            vec![
                (1, "a".to_string()),
                (2, "X".to_string()),
                (5, "z".to_string())
            ]
        );
        assert_eq!(log.changes(), vec![ListChange::Added { index: 2 }]);
    }

    #[test]
    fn test_upsert_with_veto_skips_update() {
        let mut list = collection(&[(1, "keep")]);
        let log = observed(&mut list);

        let outcome = list
            .upsert_with(row(1, "new"), |new, existing| {
                new.label.len() < existing.label.len()
            })
            .unwrap();

        assert_eq!(outcome, UpsertOutcome::Skipped);
        assert_eq!(contents(&list), vec![(1, "keep".to_string())]);
        assert!(log.is_empty());
    }

    #[test]
    fn test_upsert_predicate_not_called_for_new_key() {
        let mut list = collection(&[(1, "a")]);
        let outcome = list
            .upsert_with(row(2, "b"), |_, _| panic!("predicate must not run"))
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);
    }

    #[test]
    fn test_duplicate_key_via_add_is_last_write_wins() {
        let mut list = collection(&[(1, "first")]);
        let second = row(1, "second");

        list.add(Rc::clone(&second)).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.index_len(), 1);
        assert!(Rc::ptr_eq(list.find(&1).unwrap(), &second));
    }

    #[test]
    fn test_removing_shadowed_duplicate_keeps_index_entry() {
        let mut list = collection(&[(1, "first")]);
        let second = row(1, "second");
        list.add(Rc::clone(&second)).unwrap();

        list.remove_at(0).unwrap();

        assert!(Rc::ptr_eq(list.find(&1).unwrap(), &second));
        assert_eq!(list.len(), list.index_len());
    }

    #[test]
    fn test_from_iterator_does_not_need_observers() {
        let list: KeyedCollection<Row> = vec![
            Row {
                id: 4,
                label: "d".to_string(),
            },
            Row {
                id: 5,
                label: "e".to_string(),
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(list.len(), 2);
        assert_eq!(list.position_of_key(&5), Some(1));
    }

    #[test]
    fn test_keys_follow_list_order() {
        let mut list = collection(&[(3, "c"), (1, "a")]);
        list.insert(1, row(2, "b")).unwrap();
        assert_eq!(list.keys().unwrap(), vec![3, 2, 1]);
    }

    #[test]
    fn test_cloned_items_in_order() {
        let list = collection(&[(2, "b"), (1, "a")]);
        let items = list.cloned_items().unwrap();
        assert_eq!(items[0].id, 2);
        assert_eq!(items[1].id, 1);
    }

    #[test]
    fn test_unsubscribed_observer_is_silent() {
        let mut list = collection(&[]);
        let log = ChangeLog::new();
        let id = list.subscribe(log.observer());
        assert!(list.unsubscribe(id));

        list.add(row(1, "a")).unwrap();
        assert!(log.is_empty());
    }
}
