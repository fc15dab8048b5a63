//! Item capabilities required by keyed collections
//!
//! A collection only needs two things from the values it holds: a key that
//! never changes while the item is in the collection, and a way to overwrite
//! the item's other fields from a newer copy without replacing the item
//! itself.
//!
//! Items are held behind [`Shared`] handles so that the collection, its
//! key index and any outside holder (a selected row, a detail view) all
//! point at the same object. Reconciliation updates that object in place.

use std::cell::RefCell;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use crate::error::{Error, Result};

/// Shared, identity-bearing handle to an item.
///
/// Two handles refer to the same item when `Rc::ptr_eq` holds.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wrap an item in a fresh [`Shared`] handle.
pub fn shared<T>(item: T) -> Shared<T> {
    Rc::new(RefCell::new(item))
}

/// Provides the unique key used to index an item.
///
/// The key must not change once the item has been added to a collection;
/// the index is never re-keyed for in-place edits.
pub trait Keyed {
    type Key: Eq + Hash + Clone + Debug;

    fn key(&self) -> &Self::Key;
}

/// Copies all non-key fields from another item of the same kind.
pub trait CopyFrom {
    /// Overwrite this item's content with `other`'s.
    ///
    /// # Errors
    ///
    /// Implementations may refuse an update (for example, when `other` is
    /// older than `self`). The error propagates unchanged to whoever called
    /// `upsert` or `apply_changes`, and earlier updates are not rolled back.
    fn copy_from(&mut self, other: &Self) -> Result<()>;
}

/// Anything that can live in a [`KeyedCollection`](crate::collection::KeyedCollection).
pub trait Item: Keyed + CopyFrom {}

impl<T: Keyed + CopyFrom> Item for T {}

/// Read the key of a shared item.
///
/// # Errors
///
/// Returns `Error::ItemBorrowed` if the item is currently mutably borrowed.
pub(crate) fn key_of<T: Keyed>(item: &Shared<T>) -> Result<T::Key> {
    item.try_borrow()
        .map(|it| it.key().clone())
        .map_err(|_| Error::ItemBorrowed {
            key: "<unknown>".to_string(),
        })
}

/// Copy `source` into `target`, preserving `target`'s identity.
///
/// A handle copied onto itself is left alone, which happens when a snapshot
/// shares handles with the collection it was previously merged into.
pub(crate) fn copy_into<T: Item>(target: &Shared<T>, source: &Shared<T>) -> Result<()> {
    if Rc::ptr_eq(target, source) {
        return Ok(());
    }

    let src = source.try_borrow().map_err(|_| borrowed(target))?;
    let mut dst = target.try_borrow_mut().map_err(|_| Error::ItemBorrowed {
        key: format!("{:?}", src.key()),
    })?;
    dst.copy_from(&src)
}

/// `Error::ItemBorrowed` for an item whose key cannot be read, named by position.
pub(crate) fn borrowed_at(index: usize) -> Error {
    Error::ItemBorrowed {
        key: format!("at index {}", index),
    }
}

fn borrowed<T: Keyed>(item: &Shared<T>) -> Error {
    Error::ItemBorrowed {
        key: item
            .try_borrow()
            .map(|it| format!("{:?}", it.key()))
            .unwrap_or_else(|_| "<unknown>".to_string()),
    }
}
