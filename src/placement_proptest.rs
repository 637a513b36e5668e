#![cfg(test)]

// Property tests for Placement kept inside the crate so the in-module
// `Handle` internals and hasher plumbing stay private.

use crate::bucket::BucketCount;
use crate::error::InsertError;
use crate::placement::{Handle, Placement};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap};
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// states, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize),
    Remove(usize),
    Find(usize),
    Resize(i32),
    Iterate,
    Load,
}

fn arb_scenario() -> impl Strategy<Value = (i32, Vec<i64>, Vec<OpI>)> {
    (
        1i32..=64,
        proptest::collection::vec(any::<i64>(), 1..=16),
    )
        .prop_flat_map(|(buckets, pool)| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let op = prop_oneof![
                3 => idx.clone().prop_map(OpI::Insert),
                1 => idx.clone().prop_map(OpI::Remove),
                1 => idx.clone().prop_map(OpI::Find),
                2 => (1i32..=64).prop_map(OpI::Resize),
                1 => Just(OpI::Iterate),
                1 => Just(OpI::Load),
            ];
            proptest::collection::vec(op, 1..60)
                .prop_map(move |ops| (buckets, pool.clone(), ops))
        })
}

// State-machine equivalence against a `HashMap<i64, i32>` of state -> bucket.
// Invariants exercised across random operation sequences:
// - Duplicate states are rejected; on success a unique stable Handle is returned.
// - Each placed state's bucket equals `select_bucket(state, buckets)`.
// - `resize` reports exactly the states whose bucket changed, and growing
//   only relocates into new buckets while shrinking only relocates out of
//   removed ones.
// - Stale handles never resolve; `len`/`is_empty` parity with the model.
fn run_state_machine<S: BuildHasher>(
    mut sut: Placement<S>,
    pool: &[i64],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut buckets = sut.buckets();
    let mut model: HashMap<i64, i32> = HashMap::new();
    let mut live: HashMap<i64, Handle> = HashMap::new();
    let mut stale: Vec<Handle> = Vec::new();

    for op in ops {
        match op {
            OpI::Insert(i) => {
                let s = pool[i];
                let already = model.contains_key(&s);
                match sut.insert(s) {
                    Ok(h) => {
                        prop_assert!(!already, "insert must fail on duplicate");
                        prop_assert!(live.insert(s, h).is_none());
                        model.insert(s, buckets.select(s));
                    }
                    Err(InsertError::DuplicateKey) => {
                        prop_assert!(already, "duplicate error only when state exists");
                    }
                }
            }
            OpI::Remove(i) => {
                let s = pool[i];
                if let Some(h) = live.remove(&s) {
                    let (ss, b) = sut.remove(h).expect("handle valid for removal");
                    prop_assert_eq!(ss, s);
                    prop_assert_eq!(Some(b), model.remove(&s));
                    stale.push(h);
                } else {
                    prop_assert!(sut.find(s).is_none());
                }
            }
            OpI::Find(i) => {
                let s = pool[i];
                let found = sut.find(s);
                prop_assert_eq!(found.is_some(), model.contains_key(&s));
                prop_assert_eq!(found.as_ref(), live.get(&s));
            }
            OpI::Resize(n) => {
                let old = buckets.get();
                buckets = BucketCount::new(n).expect("strategy yields positive counts");
                let moved = sut.resize(buckets);
                let mut expected: BTreeSet<i64> = BTreeSet::new();
                for (s, b) in model.iter_mut() {
                    let to = buckets.select(*s);
                    if to != *b {
                        expected.insert(*s);
                        *b = to;
                    }
                }
                let got: BTreeSet<i64> = moved.iter().map(|r| r.state).collect();
                prop_assert_eq!(got, expected);
                for r in &moved {
                    prop_assert_eq!(Some(r.handle), live.get(&r.state).copied());
                    if n > old {
                        prop_assert!(r.to >= old && r.to < n, "grow relocates into new buckets");
                    } else {
                        prop_assert!(r.from >= n && r.from < old, "shrink relocates out of removed buckets");
                    }
                }
            }
            OpI::Iterate => {
                let seen: HashMap<i64, i32> = sut.iter().map(|(_, s, b)| (s, b)).collect();
                prop_assert_eq!(&seen, &model);
            }
            OpI::Load => {
                let load = sut.load();
                prop_assert_eq!(load.len(), buckets.get() as usize);
                let mut want = vec![0usize; load.len()];
                for &b in model.values() {
                    want[b as usize] += 1;
                }
                prop_assert_eq!(load, want);
            }
        }

        // Post-conditions after each op
        for &h in &stale {
            prop_assert!(sut.bucket(h).is_none());
        }
        for (s, &h) in &live {
            prop_assert_eq!(sut.bucket(h), model.get(s).copied());
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((buckets, pool, ops) in arb_scenario()) {
        let sut = Placement::new(BucketCount::new(buckets).unwrap());
        run_state_machine(sut, &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress equality resolution.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((buckets, pool, ops) in arb_scenario()) {
        let sut = Placement::with_hasher(BucketCount::new(buckets).unwrap(), ConstBuildHasher);
        run_state_machine(sut, &pool, ops)?;
    }
}
