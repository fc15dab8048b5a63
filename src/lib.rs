//! # Keyed Sync Library
//!
//! Keyed, observable ordered collections that can be reconciled in place
//! against an authoritative snapshot. The library backs the `keyed-sync`
//! command-line tool but is meant to be embedded wherever a live list (a
//! table on screen, a cache of positions) has to follow a stream of fresh
//! snapshots without losing track of which row is which.
//!
//! ## Quick Example
//!
//! ```
//! use keyed_sync::collection::KeyedCollection;
//! use keyed_sync::change::{ChangeLog, ListChange};
//! use keyed_sync::item::shared;
//! use keyed_sync::record::Record;
//!
//! let mut live: KeyedCollection<Record> =
//!     vec![Record::new("1", "a"), Record::new("2", "b")].into_iter().collect();
//! let selected = live.find(&"2".to_string()).unwrap().clone();
//!
//! let log = ChangeLog::new();
//! live.subscribe(log.observer());
//!
//! let update: KeyedCollection<Record> =
//!     vec![Record::new("2", "B"), Record::new("3", "c")].into_iter().collect();
//! live.apply_changes(&update, true).unwrap();
//!
//! // "2" was updated in place, so the selection still points at it.
//! assert_eq!(selected.borrow().value, "B");
//! assert!(std::rc::Rc::ptr_eq(&selected, live.get(0).unwrap()));
//! assert_eq!(live.len(), 2);
//! assert_eq!(
//!     log.changes(),
//!     vec![
//!         ListChange::ItemChanged { index: 1 },
//!         ListChange::Removed { index: 0 },
//!         ListChange::Added { index: 1 },
//!     ]
//! );
//!
//! // Upsert appends unknown keys and updates known ones in place.
//! live.upsert(shared(Record::new("5", "z"))).unwrap();
//! assert_eq!(live.len(), 3);
//! ```
//!
//! ## Core Concepts
//!
//! - **Items (`item`)**: values with a write-once key and a `copy_from`
//!   that refreshes their content, held behind shared handles so that
//!   identity survives updates.
//! - **Key index (`key_index`)**: the key → item lookup kept in lockstep
//!   with the ordered sequence.
//! - **Collection (`collection`)**: the observable ordered list; every
//!   structural change updates the index and emits a `ListChange`.
//! - **Reconciliation (`reconcile`)**: the two-pass merge of a snapshot
//!   into a live collection.
//!
//! Around the core sit a schema-driven table reader (`table`), a lazy line
//! reader (`lines`), a start/stop orchestrator (`lifecycle`), the record
//! file format used by the CLI (`record`), configuration (`config`) and
//! output rendering (`output`).
//!
//! Collections are single-threaded: handles are `Rc<RefCell<_>>` and every
//! operation runs to completion on the calling thread.

pub mod change;
pub mod collection;
pub mod config;
pub mod error;
pub mod item;
pub mod key_index;
pub mod lifecycle;
pub mod lines;
pub mod output;
pub mod reconcile;
pub mod record;
pub mod table;

#[cfg(test)]
mod collection_proptest;
