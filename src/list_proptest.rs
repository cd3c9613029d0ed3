#![cfg(test)]

// Property tests for List kept inside the crate so they can check the
// link structure through `debug_validate` after every step.

use crate::error::Error;
use crate::list::{Cursor, List};
use proptest::prelude::*;
use std::collections::VecDeque;

// Positions are indices into the model, reduced modulo its length at
// execution time, so they shrink toward the front of the list.
#[derive(Clone, Debug)]
enum Op {
    PushBack(i32),
    PushFront(i32),
    PopBack,
    PopFront,
    Insert(usize, i32),
    InsertAtEnd(i32),
    Erase(usize),
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::PushBack),
        4 => any::<i32>().prop_map(Op::PushFront),
        2 => Just(Op::PopBack),
        2 => Just(Op::PopFront),
        3 => (0usize..64, any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        1 => any::<i32>().prop_map(Op::InsertAtEnd),
        3 => (0usize..64).prop_map(Op::Erase),
        1 => Just(Op::Clear),
    ]
}

fn cursor_at<T>(list: &List<T>, index: usize) -> Cursor {
    let mut c = list.begin();
    for _ in 0..index {
        c = list.next(c);
    }
    c
}

// Property: state-machine equivalence against VecDeque.
// Invariants exercised across random operation sequences:
// - `len()` equals pushes/inserts minus pops/erases.
// - Forward traversal matches the model; backward traversal is its reverse.
// - `erase` returns the cursor of the follower (end after the last).
// - `front`/`back` agree with the model, or report `EmptyContainer`.
// - Link invariants hold after every step (`debug_validate`).
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_list_matches_vecdeque(ops in proptest::collection::vec(arb_op(), 1..80)) {
        let mut sut: List<i32> = List::new();
        let mut model: VecDeque<i32> = VecDeque::new();

        for op in ops {
            match op {
                Op::PushBack(v) => {
                    sut.push_back(v).unwrap();
                    model.push_back(v);
                }
                Op::PushFront(v) => {
                    sut.push_front(v).unwrap();
                    model.push_front(v);
                }
                Op::PopBack => prop_assert_eq!(sut.pop_back(), model.pop_back()),
                Op::PopFront => prop_assert_eq!(sut.pop_front(), model.pop_front()),
                Op::Insert(i, v) => {
                    let idx = if model.is_empty() { 0 } else { i % model.len() };
                    let at = cursor_at(&sut, idx);
                    let c = sut.insert(at, v).unwrap();
                    model.insert(idx, v);
                    prop_assert_eq!(sut.get(c), Some(&v));
                }
                Op::InsertAtEnd(v) => {
                    let c = sut.insert(Cursor::END, v).unwrap();
                    model.push_back(v);
                    prop_assert_eq!(c, sut.rbegin());
                }
                Op::Erase(i) => {
                    if model.is_empty() {
                        prop_assert!(sut.erase(sut.begin()).is_end());
                    } else {
                        let idx = i % model.len();
                        let next = sut.erase(cursor_at(&sut, idx));
                        model.remove(idx);
                        prop_assert_eq!(sut.get(next), model.get(idx));
                    }
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                }
            }

            sut.debug_validate();
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            let forward: Vec<i32> = sut.iter().copied().collect();
            let expected: Vec<i32> = model.iter().copied().collect();
            prop_assert_eq!(&forward, &expected);
            let backward: Vec<i32> = sut.iter().rev().copied().collect();
            let expected_rev: Vec<i32> = model.iter().rev().copied().collect();
            prop_assert_eq!(backward, expected_rev);
            match model.front() {
                Some(v) => prop_assert_eq!(sut.front(), Ok(v)),
                None => prop_assert_eq!(sut.front(), Err(Error::EmptyContainer)),
            }
            match model.back() {
                Some(v) => prop_assert_eq!(sut.back(), Ok(v)),
                None => prop_assert_eq!(sut.back(), Err(Error::EmptyContainer)),
            }
        }
    }
}

// Property: a cursor keeps resolving to its own element through any
// sequence of pushes and of erases that spare it, and resolves to nothing
// once erased.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_cursor_tracks_its_element(
        prefix in proptest::collection::vec(any::<i32>(), 0..10),
        suffix in proptest::collection::vec(any::<i32>(), 0..10),
        erase_mask in proptest::collection::vec(any::<bool>(), 20),
    ) {
        let mut sut: List<i32> = prefix.iter().copied().collect();
        let pinned = sut.insert(Cursor::END, i32::MIN).unwrap();
        sut.extend(suffix.iter().copied());

        let mut c = sut.begin();
        let mut i = 0;
        while !c.is_end() {
            c = if c != pinned && erase_mask.get(i).copied().unwrap_or(false) {
                sut.erase(c)
            } else {
                sut.next(c)
            };
            i += 1;
        }
        sut.push_front(0).unwrap();
        prop_assert_eq!(sut.get(pinned), Some(&i32::MIN));
        sut.debug_validate();

        sut.erase(pinned);
        prop_assert_eq!(sut.get(pinned), None);
        sut.debug_validate();
    }
}

// Property: with a node limit, failed pushes never change the list.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_limit_is_strong(limit in 0usize..6, values in proptest::collection::vec(any::<i32>(), 0..12)) {
        let mut sut: List<i32> = List::with_limit(limit);
        for v in values {
            let before: Vec<i32> = sut.iter().copied().collect();
            match sut.push_back(v) {
                Ok(()) => prop_assert!(before.len() < limit),
                Err(e) => {
                    prop_assert_eq!(e, Error::AllocationFailure { limit });
                    let after: Vec<i32> = sut.iter().copied().collect();
                    prop_assert_eq!(after, before);
                }
            }
            prop_assert!(sut.len() <= limit);
        }
        sut.debug_validate();
    }
}
