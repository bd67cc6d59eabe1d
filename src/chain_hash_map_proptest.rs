#![cfg(test)]

// Property tests for ChainHashMap kept inside the crate so every operation
// can be followed by `validate()` — the full structural self-check covering
// run contiguity, bucket-index correctness, count correctness, and
// bucket-id/hash agreement.

use crate::chain_hash_map::ChainHashMap;
use crate::error::TableError;
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations so shrinking reduces to earlier keys and shorter
// op lists. Short lowercase keys plus tiny table sizes force collisions.
#[derive(Clone, Debug)]
enum Op {
    Add(usize, i32),
    SetValue(usize, i32),
    Remove(usize),
    Find(usize),
    Has(usize),
    Resize(usize),
    ResizeInvalid,
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-c]{0,3}", 1..=6).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Add(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::SetValue(i, v)),
            idx.clone().prop_map(Op::Remove),
            idx.clone().prop_map(Op::Find),
            idx.clone().prop_map(Op::Has),
            (1usize..=8).prop_map(Op::Resize),
            Just(Op::ResizeInvalid),
            Just(Op::Clear),
            Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: upsert-only state-machine equivalence against a std HashMap
// model. With set_value as the only insert path each key has at most one
// entry, so find/has_entry/remove/len must agree with the model exactly, at
// every table size, across resizes and clears.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_upsert_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: ChainHashMap<String, i32> = ChainHashMap::with_table_size(3).unwrap();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                Op::Add(i, v) | Op::SetValue(i, v) => {
                    sut.set_value(pool[i].clone(), v);
                    model.insert(pool[i].clone(), v);
                }
                Op::Remove(i) => {
                    let key = &pool[i];
                    match (sut.remove(key.as_str()), model.remove(key)) {
                        (Ok(got), Some(expected)) => prop_assert_eq!(got, expected),
                        (Err(TableError::KeyNotFound), None) => {}
                        (got, expected) => {
                            return Err(TestCaseError::fail(format!(
                                "remove({key:?}) => {got:?}, model => {expected:?}"
                            )));
                        }
                    }
                }
                Op::Find(i) => {
                    prop_assert_eq!(sut.find(pool[i].as_str()), model.get(&pool[i]));
                }
                Op::Has(i) => {
                    prop_assert_eq!(sut.has_entry(pool[i].as_str()), model.contains_key(&pool[i]));
                }
                Op::Resize(size) => {
                    prop_assert_eq!(sut.set_table_size(size), Ok(()));
                    prop_assert_eq!(sut.table_size(), size);
                }
                Op::ResizeInvalid => {
                    let before = sut.table_size();
                    prop_assert_eq!(sut.set_table_size(0), Err(TableError::InvalidTableSize(0)));
                    prop_assert_eq!(sut.table_size(), before);
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                }
                Op::Iterate => {
                    let seen: Vec<(&String, &i32)> = sut.iter().collect();
                    prop_assert_eq!(seen.len(), model.len());
                }
            }
            sut.validate();
            prop_assert_eq!(sut.len(), model.len());
        }

        // Final sweep: every model entry is findable with its exact value.
        for (key, value) in &model {
            prop_assert_eq!(sut.find(key.as_str()), Some(value));
        }
    }
}

// Property: with duplicate-tolerant `add` in play, per-key multiplicity is
// model-checked as a multiset. `find` must return one of the recorded
// values for the key, `remove` must hand back a recorded value (removed
// once from the multiset), and the structural invariants must hold after
// every operation — including across resizes, which may reorder duplicates.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_duplicates_multiset((pool, ops) in arb_scenario()) {
        let mut sut: ChainHashMap<String, i32> = ChainHashMap::with_table_size(2).unwrap();
        let mut model: HashMap<String, Vec<i32>> = HashMap::new();

        for op in ops {
            match op {
                Op::Add(i, v) => {
                    sut.add(pool[i].clone(), v);
                    model.entry(pool[i].clone()).or_default().push(v);
                }
                // set_value touches one entry: overwrite some recorded value
                // or add a first one. The model cannot know which duplicate
                // was hit, so skip it in this scenario.
                Op::SetValue(..) => {}
                Op::Remove(i) => {
                    let key = &pool[i];
                    let values = model.entry(key.clone()).or_default();
                    match sut.remove(key.as_str()) {
                        Ok(got) => {
                            let pos = values.iter().position(|v| *v == got);
                            prop_assert!(pos.is_some(), "removed unrecorded value {}", got);
                            values.swap_remove(pos.unwrap());
                        }
                        Err(TableError::KeyNotFound) => {
                            prop_assert!(values.is_empty());
                        }
                        Err(other) => {
                            return Err(TestCaseError::fail(format!("remove: {other:?}")));
                        }
                    }
                }
                Op::Find(i) => {
                    let values = model.get(&pool[i]);
                    match sut.find(pool[i].as_str()) {
                        Some(got) => {
                            let known = values.is_some_and(|vs| vs.contains(got));
                            prop_assert!(known, "found unrecorded value {}", got);
                        }
                        None => {
                            prop_assert!(values.map_or(true, |vs| vs.is_empty()));
                        }
                    }
                }
                Op::Has(i) => {
                    let expected = model.get(&pool[i]).is_some_and(|vs| !vs.is_empty());
                    prop_assert_eq!(sut.has_entry(pool[i].as_str()), expected);
                }
                Op::Resize(size) => {
                    prop_assert_eq!(sut.set_table_size(size), Ok(()));
                }
                Op::ResizeInvalid => {
                    prop_assert_eq!(sut.set_table_size(0), Err(TableError::InvalidTableSize(0)));
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                }
                Op::Iterate => {
                    prop_assert_eq!(sut.keys().count(), sut.len());
                }
            }
            sut.validate();
            let expected_len: usize = model.values().map(Vec::len).sum();
            prop_assert_eq!(sut.len(), expected_len);
        }
    }
}
