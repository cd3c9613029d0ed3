//! Layout inspection for tests.
//!
//! Compiled for the crate's own unit tests and, for integration tests,
//! behind the `test_internals` feature. Production builds keep the
//! representation private.

use crate::hash_set::{HashSet, BUCKET_COUNT};
use crate::list::{Cursor, List};
use core::hash::{BuildHasher, Hash};

impl<T> List<T> {
    /// Walk the chain in both directions and assert every link invariant:
    /// boundary links are empty, `next.prev == self`, the chain is acyclic,
    /// and both walks cover exactly `len()` nodes.
    pub fn debug_validate(&self) {
        let len = self.len();
        match len {
            0 => assert!(self.head.is_none() && self.tail.is_none(), "empty list with links"),
            1 => assert!(self.head.is_some() && self.head == self.tail, "singleton head != tail"),
            _ => assert!(self.head.is_some() && self.tail.is_some() && self.head != self.tail),
        }

        let mut forward = 0usize;
        let mut prev = None;
        let mut at = self.head;
        while let Some(k) = at {
            let node = self.nodes.get(k).expect("forward link to released node");
            assert_eq!(node.prev, prev, "prev link mismatch");
            forward += 1;
            assert!(forward <= len, "forward walk longer than len: cycle");
            prev = Some(k);
            at = node.next;
        }
        assert_eq!(prev, self.tail, "forward walk did not end at tail");
        assert_eq!(forward, len, "forward walk length");

        let mut backward = 0usize;
        let mut next = None;
        let mut at = self.tail;
        while let Some(k) = at {
            let node = self.nodes.get(k).expect("backward link to released node");
            assert_eq!(node.next, next, "next link mismatch");
            backward += 1;
            assert!(backward <= len, "backward walk longer than len: cycle");
            next = Some(k);
            at = node.prev;
        }
        assert_eq!(next, self.head, "backward walk did not end at head");
        assert_eq!(backward, len, "backward walk length");
    }

    /// `(prev, node, next)` for every node in forward order.
    pub fn node_links(&self) -> Vec<(Cursor, Cursor, Cursor)> {
        let mut out = Vec::with_capacity(self.len());
        let mut at = self.head;
        while let Some(k) = at {
            let Some(node) = self.nodes.get(k) else { break };
            out.push((
                node.prev.map_or(Cursor::END, Cursor::at),
                Cursor::at(k),
                node.next.map_or(Cursor::END, Cursor::at),
            ));
            at = node.next;
        }
        out
    }
}

impl<T, S> HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Assert that every bucket is well linked, every element sits in the
    /// bucket its hash selects, and the element counter matches the buckets.
    pub fn debug_validate(&self) {
        let mut total = 0usize;
        for (i, bucket) in self.buckets.iter().enumerate() {
            bucket.debug_validate();
            for value in bucket.iter() {
                assert_eq!(self.bucket_index(value), i, "element in the wrong bucket");
            }
            total += bucket.len();
        }
        assert_eq!(self.buckets.len(), BUCKET_COUNT);
        assert_eq!(total, self.len(), "element counter out of sync with buckets");
    }
}
