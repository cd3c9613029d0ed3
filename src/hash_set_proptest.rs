#![cfg(test)]

// Property tests for HashSet kept inside the crate so they can validate
// bucket placement and counters through `debug_validate`.

use crate::hash_set::{HashSet, BUCKET_COUNT};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet as StdHashSet};
use std::fmt;
use std::hash::{BuildHasher, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations so shrinking moves toward earlier keys.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize),
    Erase(usize),
    Remove(usize),
    Find(usize),
    Contains(String),
    Walk,
    Clear,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => idx.clone().prop_map(OpI::Insert),
            2 => idx.clone().prop_map(OpI::Erase),
            1 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Find),
            1 => prop_oneof![contains_pool.prop_map(|s: String| s), "[a-z]{0,5}".prop_map(|s| s)]
                .prop_map(OpI::Contains),
            1 => Just(OpI::Walk),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Walk the set with the global cursor and return what it visited.
fn walk<S>(sut: &HashSet<Key, S>) -> Vec<Key> {
    let mut out = Vec::new();
    let mut c = sut.begin();
    while c != sut.end() {
        out.push(sut[c].clone());
        c = sut.next(c);
    }
    out
}

fn run_state_machine<S>(mut sut: HashSet<Key, S>, pool: Vec<String>, ops: Vec<OpI>) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    let mut model: StdHashSet<Key> = StdHashSet::new();
    for op in ops {
        match op {
            OpI::Insert(i) => {
                let k = key_from(&pool, i);
                let already = model.contains(&k);
                let (c, added) = sut.insert(k.clone()).unwrap();
                prop_assert_eq!(added, !already, "insert reports whether it added");
                prop_assert_eq!(sut.get_at(c), Some(&k));
                prop_assert_eq!(c.bucket(), sut.bucket_index(&k));
                model.insert(k);
            }
            OpI::Erase(i) => {
                let k = key_from(&pool, i);
                let before = walk(&sut);
                let next = sut.erase(&k);
                if model.remove(&k) {
                    // The returned cursor is the element that followed `k`
                    // in the global walk, or end.
                    let pos = before.iter().position(|x| *x == k).unwrap();
                    prop_assert_eq!(sut.get_at(next), before.get(pos + 1));
                } else {
                    prop_assert!(next.is_end());
                }
            }
            OpI::Remove(i) => {
                let k = key_from(&pool, i);
                let removed = sut.remove(k.0.as_str());
                prop_assert_eq!(removed.is_some(), model.remove(&k));
            }
            OpI::Find(i) => {
                let k = key_from(&pool, i);
                let c = sut.find(&k);
                prop_assert_eq!(!c.is_end(), model.contains(&k));
                if !c.is_end() {
                    prop_assert_eq!(&sut[c], &k);
                }
            }
            OpI::Contains(s) => {
                let has_model = model.iter().any(|k| k.0 == s);
                prop_assert_eq!(sut.contains(s.as_str()), has_model);
            }
            OpI::Walk => {
                let visited = walk(&sut);
                prop_assert_eq!(visited.len(), sut.len(), "walk visits exactly len elements");
                let unique: BTreeSet<_> = visited.iter().cloned().collect();
                prop_assert_eq!(unique.len(), visited.len(), "walk repeats nothing");
                let m: BTreeSet<_> = model.iter().cloned().collect();
                prop_assert_eq!(unique, m);
                let by_iter: Vec<Key> = sut.iter().cloned().collect();
                prop_assert_eq!(by_iter, visited);
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.begin(), sut.end());
            }
        }

        sut.debug_validate();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        let bucket_total: usize = (0..BUCKET_COUNT).map(|i| sut.bucket_size(i)).sum();
        prop_assert_eq!(bucket_total, sut.len());
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashSet.
// Invariants exercised across random operation sequences:
// - Duplicates are rejected and reported; `len` tracks the model.
// - `find`/`contains` parity, including borrowed `&str` lookups.
// - `erase` returns the element that followed in the global walk.
// - The global walk and `iter` visit every element exactly once.
// - Every element sits in the bucket its hash selects.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(HashSet::new(), pool, ops)?;
    }
}

// Collision variant using a constant hasher so every element chains in
// bucket 0.
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

// Property: same invariants as above under worst-case collisions.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(HashSet::with_hasher(ConstBuildHasher), pool, ops)?;
    }
}

// Property: inserting N distinct values then finding each returns an equal value.
proptest! {
    #[test]
    fn prop_insert_find_round_trip(values in proptest::collection::btree_set(any::<u64>(), 0..200)) {
        let mut sut: HashSet<u64> = HashSet::new();
        for &v in &values {
            prop_assert!(sut.insert(v).unwrap().1);
        }
        prop_assert_eq!(sut.len(), values.len());
        for v in &values {
            let c = sut.find(v);
            prop_assert_eq!(sut.get_at(c), Some(v));
        }
        sut.debug_validate();
    }
}
