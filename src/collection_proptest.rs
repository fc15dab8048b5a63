//! Property-based tests for keyed collections and reconciliation.
//!
//! These tests use proptest to generate random live lists and snapshots and
//! verify that the merge invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use std::collections::{BTreeMap, HashSet};
    use std::rc::Rc;

    use crate::collection::KeyedCollection;
    use crate::error::Result;
    use crate::item::{shared, CopyFrom, Keyed, Shared};
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Cell {
        id: u8,
        text: String,
    }

    impl Keyed for Cell {
        type Key = u8;

        fn key(&self) -> &u8 {
            &self.id
        }
    }

    impl CopyFrom for Cell {
        fn copy_from(&mut self, other: &Self) -> Result<()> {
            self.text = other.text.clone();
            Ok(())
        }
    }

    /// Key-unique list of cells, in generated order.
    fn unique_cells() -> impl Strategy<Value = Vec<(u8, String)>> {
        prop::collection::btree_map(0u8..32, "[a-z]{0,3}", 0..16).prop_flat_map(
            |map: BTreeMap<u8, String>| {
                let entries: Vec<(u8, String)> = map.into_iter().collect();
                Just(entries).prop_shuffle()
            },
        )
    }

    fn build(cells: &[(u8, String)]) -> KeyedCollection<Cell> {
        KeyedCollection::from_shared(cells.iter().map(|(id, text)| {
            shared(Cell {
                id: *id,
                text: text.clone(),
            })
        }))
        .unwrap()
    }

    fn snapshot(list: &KeyedCollection<Cell>) -> Vec<(u8, String)> {
        list.iter()
            .map(|c| {
                let c = c.borrow();
                (c.id, c.text.clone())
            })
            .collect()
    }

    fn handles(list: &KeyedCollection<Cell>) -> Vec<(u8, Shared<Cell>)> {
        list.iter().map(|c| (c.borrow().id, Rc::clone(c))).collect()
    }

    // ============================================================================
    // apply_changes property tests
    // ============================================================================

    proptest! {
        /// Property: the index and the sequence have the same size after a merge
        #[test]
        fn apply_changes_keeps_index_in_step(
            target in unique_cells(),
            source in unique_cells(),
            delete in any::<bool>(),
        ) {
            let mut live = build(&target);
            let update = build(&source);

            live.apply_changes(&update, delete).unwrap();

            prop_assert_eq!(live.len(), live.index_len());
        }

        /// Property: items present on both sides keep identity and take the source content
        #[test]
        fn apply_changes_preserves_identity(
            target in unique_cells(),
            source in unique_cells(),
            delete in any::<bool>(),
        ) {
            let mut live = build(&target);
            let before = handles(&live);
            let update = build(&source);
            let source_text: BTreeMap<u8, String> = source.iter().cloned().collect();

            live.apply_changes(&update, delete).unwrap();

            for (id, handle) in before {
                if let Some(text) = source_text.get(&id) {
                    let now = live.find(&id).unwrap();
                    prop_assert!(Rc::ptr_eq(now, &handle));
                    prop_assert_eq!(&now.borrow().text, text);
                }
            }
        }

        /// Property: target-only keys survive iff deletion is off, untouched
        #[test]
        fn apply_changes_deletion_policy(
            target in unique_cells(),
            source in unique_cells(),
            delete in any::<bool>(),
        ) {
            let mut live = build(&target);
            let update = build(&source);
            let source_keys: HashSet<u8> = source.iter().map(|(id, _)| *id).collect();

            live.apply_changes(&update, delete).unwrap();

            for (id, text) in target.iter().filter(|(id, _)| !source_keys.contains(id)) {
                match live.find(id) {
                    Some(item) => {
                        prop_assert!(!delete);
                        prop_assert_eq!(&item.borrow().text, text);
                    }
                    None => prop_assert!(delete),
                }
            }
        }

        /// Property: surviving items keep their relative order and new items
        /// follow them in source order
        #[test]
        fn apply_changes_order(
            target in unique_cells(),
            source in unique_cells(),
            delete in any::<bool>(),
        ) {
            let mut live = build(&target);
            let update = build(&source);
            let source_keys: HashSet<u8> = source.iter().map(|(id, _)| *id).collect();
            let target_keys: HashSet<u8> = target.iter().map(|(id, _)| *id).collect();

            live.apply_changes(&update, delete).unwrap();

            let expected: Vec<u8> = target
                .iter()
                .map(|(id, _)| *id)
                .filter(|id| !delete || source_keys.contains(id))
                .chain(
                    source
                        .iter()
                        .map(|(id, _)| *id)
                        .filter(|id| !target_keys.contains(id)),
                )
                .collect();
            let actual: Vec<u8> = snapshot(&live).into_iter().map(|(id, _)| id).collect();
            prop_assert_eq!(actual, expected);
        }

        /// Property: applying the same snapshot twice equals applying it once
        #[test]
        fn apply_changes_is_idempotent(
            target in unique_cells(),
            source in unique_cells(),
            delete in any::<bool>(),
        ) {
            let mut once = build(&target);
            let mut twice = build(&target);
            let update = build(&source);

            once.apply_changes(&update, delete).unwrap();
            twice.apply_changes(&update, delete).unwrap();
            twice.apply_changes(&update, delete).unwrap();

            prop_assert_eq!(snapshot(&once), snapshot(&twice));
        }

        /// Property: with deletion on, the result holds exactly the source's keys
        #[test]
        fn apply_changes_with_delete_matches_source_content(
            target in unique_cells(),
            source in unique_cells(),
        ) {
            let mut live = build(&target);
            let update = build(&source);

            live.apply_changes(&update, true).unwrap();

            let mut actual = snapshot(&live);
            let mut expected = source.clone();
            actual.sort();
            expected.sort();
            prop_assert_eq!(actual, expected);
        }
    }

    // ============================================================================
    // list primitive property tests
    // ============================================================================

    #[derive(Debug, Clone)]
    enum Op {
        Insert(usize, u8),
        RemoveAt(usize),
        Set(usize, u8),
        Upsert(u8),
        RemoveKey(u8),
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..20, 0u8..64).prop_map(|(i, k)| Op::Insert(i, k)),
            (0usize..20).prop_map(Op::RemoveAt),
            (0usize..20, 0u8..64).prop_map(|(i, k)| Op::Set(i, k)),
            (0u8..64).prop_map(Op::Upsert),
            (0u8..64).prop_map(Op::RemoveKey),
            Just(Op::Clear),
        ]
    }

    proptest! {
        /// Property: key-aware operation sequences never let the index drift
        #[test]
        fn primitives_keep_index_in_step(ops in prop::collection::vec(op(), 0..40)) {
            let mut list: KeyedCollection<Cell> = KeyedCollection::new();
            let cell = |id: u8| shared(Cell { id, text: format!("v{}", id) });

            for op in ops {
                match op {
                    // Direct inserts skip keys already present to keep them unique.
                    Op::Insert(i, k) if !list.contains_key(&k) => {
                        let _ = list.insert(i.min(list.len()), cell(k));
                    }
                    Op::Set(i, k) if !list.contains_key(&k) && i < list.len() => {
                        list.set(i, cell(k)).unwrap();
                    }
                    Op::RemoveAt(i) if i < list.len() => {
                        list.remove_at(i).unwrap();
                    }
                    Op::Upsert(k) => {
                        list.upsert(cell(k)).unwrap();
                    }
                    Op::RemoveKey(k) => {
                        let had = list.contains_key(&k);
                        prop_assert_eq!(list.remove_key(&k).is_some(), had);
                    }
                    Op::Clear => list.clear(),
                    _ => {}
                }
                prop_assert_eq!(list.len(), list.index_len());
                for item in list.iter() {
                    let id = item.borrow().id;
                    prop_assert!(Rc::ptr_eq(list.find(&id).unwrap(), item));
                }
            }
        }
    }
}
