//! Reconciliation of a live keyed list against an authoritative snapshot
//!
//! [`apply_changes`] merges a read-only `source` into a live `target` in
//! place. It runs in two passes:
//!
//! 1.  **Reconcile existing items**, walking `target` from the last index to
//!     the first so that removing at `i` never shifts an index still to be
//!     visited. Items whose key exists in `source` have their content copied
//!     from the source item; identity and position are untouched. Items
//!     missing from `source` are removed when `delete_non_matching` is set
//!     and left alone otherwise.
//! 2.  **Append new items**, walking `source` in its own order and appending
//!     every item whose key is not (yet) present in `target`.
//!
//! The second pass depends on the key set produced by the first, so the
//! first always runs to completion before the second begins.
//!
//! New items always land at the end of `target`, never at their relative
//! position in `source`. Position is only preserved for items that already
//! existed.
//!
//! The engine is written against two small capability traits rather than a
//! concrete list type: [`OrderedContainer`] for the target and [`Snapshot`]
//! for the source. [`KeyedCollection`](crate::collection::KeyedCollection)
//! implements both.

use std::fmt;
use std::rc::Rc;

use log::{debug, trace};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::item::{borrowed_at, copy_into, key_of, Item, Keyed, Shared};

/// Mutable, index-addressable list with key lookup.
///
/// Every structural method must keep the key lookup consistent with the
/// sequence before it returns.
pub trait OrderedContainer<T: Item> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&Shared<T>>;

    fn find(&self, key: &T::Key) -> Option<&Shared<T>>;

    fn insert(&mut self, index: usize, item: Shared<T>) -> Result<()>;

    fn remove_at(&mut self, index: usize) -> Result<Shared<T>>;

    fn set(&mut self, index: usize, item: Shared<T>) -> Result<Shared<T>>;

    fn clear(&mut self);

    fn add(&mut self, item: Shared<T>) -> Result<()> {
        let end = self.len();
        self.insert(end, item)
    }

    /// Called after the item at `index` was updated in place.
    ///
    /// Containers that notify observers should announce the change here.
    fn item_changed(&mut self, _index: usize) {}
}

/// Read-only keyed, ordered data used as the authoritative side of a merge.
pub trait Snapshot<T: Keyed> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn item_at(&self, index: usize) -> Option<&Shared<T>>;

    fn lookup(&self, key: &T::Key) -> Option<&Shared<T>>;
}

/// Merge policy for [`apply_changes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Remove target items whose key is absent from the source.
    pub delete_non_matching: bool,
}

impl ReconcileOptions {
    /// Options that leave unmatched target items in place.
    pub fn keep_missing() -> Self {
        Self {
            delete_non_matching: false,
        }
    }
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            delete_non_matching: true,
        }
    }
}

/// Counts describing what a reconciliation did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    /// Target items found in the source and updated in place.
    pub updated: usize,
    /// Target items removed because the source no longer has them.
    pub removed: usize,
    /// Target items missing from the source but kept.
    pub kept: usize,
    /// Source items appended to the target.
    pub added: usize,
}

impl ReconcileSummary {
    /// True when the call changed neither the structure nor any content.
    pub fn is_noop(&self) -> bool {
        self.updated == 0 && self.removed == 0 && self.added == 0
    }
}

impl fmt::Display for ReconcileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} updated, {} removed, {} kept, {} added",
            self.updated, self.removed, self.kept, self.added
        )
    }
}

/// Merge `source` into `target` in place.
///
/// # Errors
///
/// Propagates the first failure from an item's `copy_from` (or a live
/// borrow of an item the engine must touch). Items already processed stay
/// updated; items not yet reached are unaffected. Nothing is rolled back.
pub fn apply_changes<T, C, S>(
    target: &mut C,
    source: &S,
    options: ReconcileOptions,
) -> Result<ReconcileSummary>
where
    T: Item,
    C: OrderedContainer<T> + ?Sized,
    S: Snapshot<T> + ?Sized,
{
    let mut summary = ReconcileSummary::default();

    // Nothing can be deleted and nothing can be added.
    if !options.delete_non_matching && source.is_empty() {
        trace!("reconcile skipped: empty source, deletion disabled");
        return Ok(summary);
    }

    for index in (0..target.len()).rev() {
        let existing = match target.get(index) {
            Some(item) => Rc::clone(item),
            None => continue,
        };
        let key = key_of(&existing).map_err(|_| borrowed_at(index))?;

        match source.lookup(&key) {
            Some(updated) => {
                let same_item = Rc::ptr_eq(&existing, updated);
                copy_into(&existing, updated)?;
                if !same_item {
                    target.item_changed(index);
                }
                summary.updated += 1;
            }
            None if options.delete_non_matching => {
                target.remove_at(index)?;
                summary.removed += 1;
            }
            None => summary.kept += 1,
        }
    }

    for index in 0..source.len() {
        let Some(candidate) = source.item_at(index) else {
            continue;
        };
        let key = key_of(candidate).map_err(|_| Error::ItemBorrowed {
            key: format!("at source index {}", index),
        })?;
        if target.find(&key).is_none() {
            target.add(Rc::clone(candidate))?;
            summary.added += 1;
        }
    }

    debug!("reconciled {} items: {}", target.len(), summary);
    Ok(summary)
}
