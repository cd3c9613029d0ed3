// List integration suite.
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Order: forward iteration yields insertion order; backward is its reverse.
// - Cursors: a cursor keeps naming its element until that element is removed,
//   and resolves to nothing afterwards.
// - Boundaries: front/back on an empty list report EmptyContainer; pops are
//   no-ops that return None.
// - Failure: a refused allocation leaves the list exactly as it was.
// - Ownership: clone is deep, swap and move transfer nodes without copying.
use chained_collections::{list, Cursor, Error, List};
use std::cell::Cell;
use std::rc::Rc;

// Test: appends and prepends keep their relative order.
// Assumes: push_back links after tail, push_front before head.
// Verifies: iteration order in both directions and the boundary accessors.
#[test]
fn push_both_ends_orders_elements() {
    let mut l = List::new();
    l.push_back(2).unwrap();
    l.push_back(3).unwrap();
    l.push_front(1).unwrap();
    l.push_front(0).unwrap();

    assert_eq!(l.len(), 4);
    assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    assert_eq!(l.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1, 0]);
    assert_eq!(l.front(), Ok(&0));
    assert_eq!(l.back(), Ok(&3));
}

// Test: empty-list boundaries.
// Assumes: no element exists to read or remove.
// Verifies: front/back error out, pops return None and change nothing.
#[test]
fn empty_list_boundaries() {
    let mut l: List<String> = List::new();
    assert_eq!(l.front(), Err(Error::EmptyContainer));
    assert_eq!(l.back(), Err(Error::EmptyContainer));
    assert!(l.front_mut().is_err());
    assert_eq!(l.pop_back(), None);
    assert_eq!(l.pop_front(), None);
    assert!(l.is_empty());
    assert_eq!(l.begin(), l.end());
    assert!(l.rbegin().is_end());
}

// Test: insert before a cursor, including end and the head.
// Assumes: insert(position) links the new node immediately before position.
// Verifies: placement and the returned cursor naming the new element.
#[test]
fn insert_before_cursor() {
    let mut l = List::from([1, 3]);
    let three = l.next(l.begin());
    let two = l.insert(three, 2).unwrap();
    assert_eq!(l[two], 2);

    let zero = l.insert(l.begin(), 0).unwrap();
    assert_eq!(zero, l.begin());

    let four = l.insert(l.end(), 4).unwrap();
    assert_eq!(four, l.rbegin());

    assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
}

// Test: erase returns the follower and keeps unrelated cursors alive.
// Assumes: erase unlinks one node in O(1).
// Verifies: erase of middle, tail and end; untouched cursors still resolve.
#[test]
fn erase_returns_follower() {
    let mut l = List::from(['a', 'b', 'c']);
    let a = l.begin();
    let b = l.next(a);
    let c = l.next(b);

    let after_b = l.erase(b);
    assert_eq!(after_b, c);
    assert_eq!(l.get(a), Some(&'a'));
    assert_eq!(l.get(c), Some(&'c'));
    assert_eq!(l.get(b), None, "erased cursor resolves to nothing");

    assert!(l.erase(c).is_end(), "erasing the tail yields end");
    assert!(l.erase(l.end()).is_end(), "erasing end is a no-op");
    assert_eq!(l.len(), 1);
    assert_eq!(l.front(), l.back());
}

// Test: a stale cursor never aliases a later element.
// Assumes: node slots are reused after removal.
// Verifies: get/insert/erase on the stale cursor see nothing.
#[test]
fn stale_cursor_does_not_alias_new_element() {
    let mut l = List::new();
    l.push_back(10).unwrap();
    let old = l.begin();
    assert_eq!(l.pop_front(), Some(10));
    l.push_back(20).unwrap();

    assert_eq!(l.get(old), None);
    assert_eq!(l.insert(old, 5), Err(Error::InvalidCursor));
    assert!(l.erase(old).is_end());
    assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![20]);
}

// Test: cursor navigation at both ends.
// Assumes: next(tail) and prev(head) give end; prev(end) gives tail.
// Verifies: a full backward walk starting from end.
#[test]
fn cursor_navigation_wraps_through_end() {
    let l = List::from([1, 2, 3]);
    assert!(l.next(l.rbegin()).is_end());
    assert!(l.prev(l.begin()).is_end());
    assert!(l.next(l.end()).is_end());

    let mut seen = Vec::new();
    let mut c = l.prev(l.end());
    while !c.is_end() {
        seen.push(l[c]);
        c = l.prev(c);
    }
    assert_eq!(seen, vec![3, 2, 1]);
}

// Test: mutation through cursors and iterators.
// Assumes: get_mut/IndexMut/iter_mut hand out exclusive access per element.
// Verifies: writes land on the intended element.
#[test]
fn mutate_through_cursor_and_iter_mut() {
    let mut l = List::from([1, 2, 3]);
    let mid = l.next(l.begin());
    l[mid] *= 10;
    *l.get_mut(l.rbegin()).unwrap() += 100;
    *l.front_mut().unwrap() = -1;
    assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![-1, 20, 103]);

    for v in l.iter_mut() {
        *v += 1;
    }
    for v in &mut l {
        *v *= 2;
    }
    assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![0, 42, 208]);
}

// Test: search by value and by predicate.
// Assumes: find_by scans forward from the head.
// Verifies: first match wins; absence yields end.
#[test]
fn find_first_match() {
    let l = List::from([5, 7, 7, 9]);
    let c = l.find_by(|v| *v == 7);
    assert_eq!(c, l.next(l.begin()));
    assert!(l.find_by(|v| *v > 100).is_end());
    assert!(l.contains(&9));
    assert!(!l.contains(&6));
}

// Test: clone is a deep, independent copy.
// Assumes: Clone allocates a fresh node chain.
// Verifies: equality after clone, independence after mutation.
#[test]
fn clone_is_deep() {
    let mut a = List::from([String::from("x"), String::from("y")]);
    let b = a.clone();
    assert_eq!(a, b);
    a.push_back("z".into()).unwrap();
    a.front_mut().unwrap().push('!');
    assert_ne!(a, b);
    assert_eq!(b.iter().cloned().collect::<Vec<_>>(), vec!["x", "y"]);
}

// Test: move and swap transfer ownership without copying elements.
// Assumes: elements are counted only on Clone.
// Verifies: zero clones across move and swap; cursors follow their nodes.
#[test]
fn move_and_swap_transfer_without_copies() {
    #[derive(Debug)]
    struct Counted(Rc<Cell<usize>>);
    impl Clone for Counted {
        fn clone(&self) -> Self {
            self.0.set(self.0.get() + 1);
            Counted(self.0.clone())
        }
    }

    let clones = Rc::new(Cell::new(0));
    let mut a = List::new();
    for _ in 0..3 {
        a.push_back(Counted(clones.clone())).unwrap();
    }
    let first = a.begin();

    let moved = a;
    let mut b = moved;
    let mut c = List::new();
    c.push_back(Counted(clones.clone())).unwrap();

    list::swap(&mut b, &mut c);
    assert_eq!(clones.get(), 0);
    assert_eq!(b.len(), 1);
    assert_eq!(c.len(), 3);
    assert!(c.get(first).is_some(), "cursor follows its node across swap");

    c.swap(&mut b);
    assert_eq!(b.len(), 3);
    assert_eq!(clones.get(), 0);
}

// Test: every element is dropped exactly once.
// Assumes: pop/erase/clear and the list's own drop release nodes.
// Verifies: drop count after each kind of release.
#[test]
fn elements_drop_exactly_once() {
    struct Tracked(Rc<Cell<usize>>);
    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    let drops = Rc::new(Cell::new(0));
    let mut l = List::new();
    for _ in 0..6 {
        l.push_back(Tracked(drops.clone())).unwrap();
    }
    drop(l.pop_front());
    assert_eq!(drops.get(), 1);
    l.erase(l.begin());
    assert_eq!(drops.get(), 2);
    l.clear();
    assert_eq!(drops.get(), 6);
    l.clear();
    assert_eq!(drops.get(), 6, "clear is idempotent");

    l.push_back(Tracked(drops.clone())).unwrap();
    drop(l);
    assert_eq!(drops.get(), 7);
}

// Test: node limit makes allocation failure observable.
// Assumes: with_limit caps the element count.
// Verifies: push/insert/try_extend fail at the limit and leave the list as it was.
#[test]
fn limit_refusals_leave_list_unchanged() {
    let mut l = List::with_limit(3);
    l.push_back(1).unwrap();
    l.push_back(2).unwrap();
    assert_eq!(l.try_extend([3, 4]), Err(Error::AllocationFailure { limit: 3 }));
    assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![1, 2]);

    l.push_front(0).unwrap();
    assert_eq!(l.push_back(9), Err(Error::AllocationFailure { limit: 3 }));
    assert_eq!(l.push_front(9), Err(Error::AllocationFailure { limit: 3 }));
    assert_eq!(l.insert(l.begin(), 9), Err(Error::AllocationFailure { limit: 3 }));
    assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(l.limit(), 3);

    l.pop_back();
    l.push_back(3).unwrap();
    assert_eq!(l.back(), Ok(&3));
}

// Test: assign replaces contents all-or-nothing.
// Assumes: assign checks the limit before releasing the old chain.
// Verifies: success replaces and stales old cursors; failure keeps the
// previous contents and their cursors.
#[test]
fn assign_is_all_or_nothing() {
    let mut l = List::with_limit(3);
    l.try_extend([1, 2]).unwrap();
    let old = l.begin();
    l.assign([7, 8, 9]).unwrap();
    assert_eq!(l.get(old), None);
    assert_eq!(l.insert(old, 0), Err(Error::InvalidCursor));
    let seven = l.begin();
    assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![7, 8, 9]);

    assert!(l.assign([1, 2, 3, 4]).is_err());
    assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![7, 8, 9]);
    assert_eq!(l.get(seven), Some(&7));
}

// Test: clear and clone_from invalidate cursors into the old contents.
// Assumes: both reuse the list's arena rather than replacing it.
// Verifies: an old cursor resolves to nothing even after new elements
// occupy the released slots.
#[test]
fn clear_and_clone_from_stale_cursors() {
    let mut l = List::from([1, 2, 3]);
    let first = l.begin();
    l.clear();
    l.push_back(1).unwrap();
    assert_eq!(l.get(first), None);

    let again = l.begin();
    l.clone_from(&List::from([4, 5]));
    assert_eq!(l.get(again), None);
    assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![4, 5]);
}

// Test: sized constructors.
// Assumes: from_elem clones the seed, with_len uses Default.
// Verifies: lengths and contents.
#[test]
fn sized_constructors() {
    let l = List::from_elem("ab".to_string(), 3).unwrap();
    assert_eq!(l.len(), 3);
    assert!(l.iter().all(|s| s == "ab"));

    let z: List<u8> = List::with_len(4).unwrap();
    assert_eq!(z.iter().copied().collect::<Vec<_>>(), vec![0; 4]);

    let e: List<u8> = List::with_len(0).unwrap();
    assert!(e.is_empty());
}

// Test: owning iteration from both ends.
// Assumes: IntoIter pops from the list it owns.
// Verifies: double-ended consumption and exact size hints.
#[test]
fn into_iter_consumes_from_both_ends() {
    let l: List<i32> = (1..=5).collect();
    let mut it = l.into_iter();
    assert_eq!(it.len(), 5);
    assert_eq!(it.next(), Some(1));
    assert_eq!(it.next_back(), Some(5));
    assert_eq!(it.len(), 3);
    assert_eq!(it.collect::<Vec<_>>(), vec![2, 3, 4]);
}

// Test: dereferencing end panics.
// Assumes: Index has no element to return for end.
// Verifies: the panic in every build profile.
#[test]
#[should_panic(expected = "dereferenced an end or stale list cursor")]
fn index_end_panics() {
    let l = List::from([1]);
    let _value: i32 = l[Cursor::END];
}

// Test: Debug renders like a sequence.
// Assumes: Debug delegates to debug_list over iter.
// Verifies: formatting of an empty and a non-empty list.
#[test]
fn debug_formats_as_sequence() {
    let l = List::from([1, 2]);
    assert_eq!(format!("{l:?}"), "[1, 2]");
    let e: List<u8> = List::default();
    assert_eq!(format!("{e:?}"), "[]");
}
