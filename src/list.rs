//! List: doubly-linked sequence container with stable cursors.
//!
//! Nodes live in a generational arena owned by the list; `head`, `tail`
//! and the per-node `prev`/`next` links are arena keys. A `Cursor` is a
//! copyable position that stays meaningful while *other* elements are
//! inserted or removed, and resolves to nothing once its own element is
//! gone.

use crate::error::Error;
use crate::node::{Node, NodeKey};
use core::fmt;
use core::iter::FusedIterator;
use core::ops::{Index, IndexMut};
use slotmap::{SecondaryMap, SlotMap};
use std::collections::VecDeque;

/// Upper bound on the number of elements one list can hold; the arena's
/// key space.
pub const MAX_LEN: usize = (u32::MAX - 1) as usize;

/// Position inside a `List`: either a live element or end-of-sequence.
///
/// Cursors own nothing. They are only meaningful for the list that
/// produced them; resolving a cursor against a different list is a caller
/// error that yields an unspecified element or `None`, never unsafety.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Cursor(Option<NodeKey>);

impl Cursor {
    /// The end-of-sequence position shared by every list.
    pub const END: Cursor = Cursor(None);

    #[inline]
    pub(crate) fn at(key: NodeKey) -> Self {
        Cursor(Some(key))
    }

    #[inline]
    pub(crate) fn key(&self) -> Option<NodeKey> {
        self.0
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.0.is_none()
    }

    pub fn value<'a, T>(&self, list: &'a List<T>) -> Option<&'a T> {
        list.get(*self)
    }

    pub fn value_mut<'a, T>(&self, list: &'a mut List<T>) -> Option<&'a mut T> {
        list.get_mut(*self)
    }
}

/// Doubly-linked sequence container.
///
/// Not synchronized: concurrent mutation needs an external lock.
pub struct List<T> {
    pub(crate) nodes: SlotMap<NodeKey, Node<T>>,
    pub(crate) head: Option<NodeKey>,
    pub(crate) tail: Option<NodeKey>,
    limit: usize,
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self::with_limit(MAX_LEN)
    }

    /// Create a list that refuses to hold more than `limit` elements.
    ///
    /// Pushes beyond the limit fail with `Error::AllocationFailure`.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
            limit: limit.min(MAX_LEN),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn refuse(&self) -> Error {
        tracing::debug!(limit = self.limit, len = self.len(), "node allocation refused");
        Error::AllocationFailure { limit: self.limit }
    }

    fn alloc(
        &mut self,
        value: T,
        prev: Option<NodeKey>,
        next: Option<NodeKey>,
    ) -> Result<NodeKey, Error> {
        if self.len() >= self.limit || self.nodes.try_reserve(1).is_err() {
            return Err(self.refuse());
        }
        Ok(self.nodes.insert(Node::new(value, prev, next)))
    }

    fn link_back(&mut self, value: T) -> Result<NodeKey, Error> {
        let old_tail = self.tail;
        let key = self.alloc(value, old_tail, None)?;
        match old_tail {
            Some(t) => self.nodes[t].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        Ok(key)
    }

    fn link_front(&mut self, value: T) -> Result<NodeKey, Error> {
        let old_head = self.head;
        let key = self.alloc(value, None, old_head)?;
        match old_head {
            Some(h) => self.nodes[h].prev = Some(key),
            None => self.tail = Some(key),
        }
        self.head = Some(key);
        Ok(key)
    }

    /// Detach and release a live node, re-linking its neighbours.
    /// Returns `None` (and changes nothing) for a stale key.
    fn unlink(&mut self, key: NodeKey) -> Option<Node<T>> {
        let node = self.nodes.remove(key)?;
        match node.prev {
            Some(p) => self.nodes[p].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.nodes[n].prev = node.prev,
            None => self.tail = node.prev,
        }
        Some(node)
    }

    pub fn push_back(&mut self, value: T) -> Result<(), Error> {
        self.link_back(value).map(|_| ())
    }

    pub fn push_front(&mut self, value: T) -> Result<(), Error> {
        self.link_front(value).map(|_| ())
    }

    /// Remove the last element. On an empty list this does nothing and
    /// returns `None`.
    pub fn pop_back(&mut self) -> Option<T> {
        let key = self.tail?;
        self.unlink(key).map(|n| n.value)
    }

    /// Remove the first element. On an empty list this does nothing and
    /// returns `None`.
    pub fn pop_front(&mut self) -> Option<T> {
        let key = self.head?;
        self.unlink(key).map(|n| n.value)
    }

    /// Insert `value` immediately before `position` and return its cursor.
    ///
    /// `Cursor::END` appends. On an empty list the value becomes the sole
    /// element whatever `position` is. A stale cursor on a non-empty list
    /// is rejected with `Error::InvalidCursor`.
    pub fn insert(&mut self, position: Cursor, value: T) -> Result<Cursor, Error> {
        let at = match position.key() {
            Some(at) if !self.is_empty() => at,
            _ => return self.link_back(value).map(Cursor::at),
        };
        let before = match self.nodes.get(at) {
            Some(node) => node.prev,
            None => return Err(Error::InvalidCursor),
        };
        let key = self.alloc(value, before, Some(at))?;
        match before {
            Some(p) => self.nodes[p].next = Some(key),
            None => self.head = Some(key),
        }
        self.nodes[at].prev = Some(key);
        Ok(Cursor::at(key))
    }

    /// Remove the element at `position` and return the cursor of the
    /// element that followed it.
    ///
    /// An end or stale `position` is a no-op that returns `Cursor::END`.
    pub fn erase(&mut self, position: Cursor) -> Cursor {
        match position.key().and_then(|k| self.unlink(k)) {
            Some(node) => Cursor(node.next),
            None => Cursor::END,
        }
    }

    /// Like `erase`, but hands the removed value back.
    pub fn remove(&mut self, position: Cursor) -> Option<T> {
        position
            .key()
            .and_then(|k| self.unlink(k))
            .map(|n| n.value)
    }

    pub fn front(&self) -> Result<&T, Error> {
        self.head
            .map(|k| &self.nodes[k].value)
            .ok_or(Error::EmptyContainer)
    }

    pub fn back(&self) -> Result<&T, Error> {
        self.tail
            .map(|k| &self.nodes[k].value)
            .ok_or(Error::EmptyContainer)
    }

    pub fn front_mut(&mut self) -> Result<&mut T, Error> {
        let k = self.head.ok_or(Error::EmptyContainer)?;
        Ok(&mut self.nodes[k].value)
    }

    pub fn back_mut(&mut self) -> Result<&mut T, Error> {
        let k = self.tail.ok_or(Error::EmptyContainer)?;
        Ok(&mut self.nodes[k].value)
    }

    /// Release every element. Cursors into the list all become stale.
    pub fn clear(&mut self) {
        let released = self.len();
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        if released > 0 {
            tracing::trace!(released, "list cleared");
        }
    }

    #[inline]
    pub fn begin(&self) -> Cursor {
        Cursor(self.head)
    }

    /// Cursor at the last element (end if empty).
    #[inline]
    pub fn rbegin(&self) -> Cursor {
        Cursor(self.tail)
    }

    #[inline]
    pub fn end(&self) -> Cursor {
        Cursor::END
    }

    /// Step forward. End stays at end; a stale cursor yields end.
    pub fn next(&self, cursor: Cursor) -> Cursor {
        Cursor(
            cursor
                .key()
                .and_then(|k| self.nodes.get(k))
                .and_then(|n| n.next),
        )
    }

    /// Step backward. End steps to the last element and the first element
    /// steps to end; a stale cursor yields end.
    pub fn prev(&self, cursor: Cursor) -> Cursor {
        match cursor.key() {
            None => Cursor(self.tail),
            Some(k) => Cursor(self.nodes.get(k).and_then(|n| n.prev)),
        }
    }

    pub fn get(&self, cursor: Cursor) -> Option<&T> {
        cursor
            .key()
            .and_then(|k| self.nodes.get(k))
            .map(|n| &n.value)
    }

    pub fn get_mut(&mut self, cursor: Cursor) -> Option<&mut T> {
        cursor
            .key()
            .and_then(|k| self.nodes.get_mut(k))
            .map(|n| &mut n.value)
    }

    /// Cursor of the first element satisfying `pred`, or end.
    pub fn find_by<F>(&self, mut pred: F) -> Cursor
    where
        F: FnMut(&T) -> bool,
    {
        let mut at = self.head;
        while let Some(k) = at {
            let node = &self.nodes[k];
            if pred(&node.value) {
                return Cursor::at(k);
            }
            at = node.next;
        }
        Cursor::END
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        !self.find_by(|v| v == value).is_end()
    }

    /// Append every item, or none: if a push fails, the items already
    /// appended by this call are removed again before the error returns.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
    {
        let before = self.len();
        for value in iter {
            if let Err(e) = self.push_back(value) {
                let added = self.len() - before;
                for _ in 0..added {
                    self.pop_back();
                }
                tracing::trace!(rolled_back = added, "list extend rolled back");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Replace the contents with `iter`. All-or-nothing: on failure the
    /// list keeps its previous contents.
    ///
    /// The arena is reused, so every cursor taken before the call is stale
    /// afterwards, even on an element equal to a new one.
    pub fn assign<I>(&mut self, iter: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = iter.into_iter().collect();
        if values.len() > self.limit {
            return Err(self.refuse());
        }
        let extra = values.len().saturating_sub(self.len());
        if self.nodes.try_reserve(extra).is_err() {
            return Err(self.refuse());
        }
        self.clear();
        self.try_extend(values)
    }

    /// Exchange contents with `other` without touching any node.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let mut slots = SecondaryMap::with_capacity(self.nodes.len());
        for (key, node) in self.nodes.iter_mut() {
            let Node { value, next, .. } = node;
            slots.insert(key, (value, *next));
        }
        let mut ordered = VecDeque::with_capacity(slots.len());
        let mut at = self.head;
        while let Some(key) = at {
            match slots.remove(key) {
                Some((value, next)) => {
                    ordered.push_back(value);
                    at = next;
                }
                None => break,
            }
        }
        IterMut {
            inner: ordered.into_iter(),
        }
    }

    fn with_capacity_and_limit(capacity: usize, limit: usize) -> Result<Self, Error> {
        let mut list = Self::with_limit(limit);
        if capacity > list.limit || list.nodes.try_reserve(capacity).is_err() {
            return Err(list.refuse());
        }
        Ok(list)
    }
}

impl<T: Clone> List<T> {
    /// A list holding `n` clones of `value`.
    pub fn from_elem(value: T, n: usize) -> Result<Self, Error> {
        let mut list = Self::with_capacity_and_limit(n, MAX_LEN)?;
        list.try_extend(core::iter::repeat(value).take(n))?;
        Ok(list)
    }
}

impl<T: Default> List<T> {
    /// A list holding `n` default values.
    pub fn with_len(n: usize) -> Result<Self, Error> {
        let mut list = Self::with_capacity_and_limit(n, MAX_LEN)?;
        list.try_extend(core::iter::repeat_with(T::default).take(n))?;
        Ok(list)
    }
}

/// Free-standing swap, O(1).
pub fn swap<T>(a: &mut List<T>, b: &mut List<T>) {
    a.swap(b);
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for List<T> {
    /// Deep copy into a fresh chain; the copy shares no node with `self`.
    fn clone(&self) -> Self {
        let mut copy = Self {
            nodes: SlotMap::with_capacity_and_key(self.len()),
            head: None,
            tail: None,
            limit: self.limit,
        };
        copy.extend(self.iter().cloned());
        copy
    }

    /// Reuses the arena of `self`: cursors into the old contents go stale
    /// instead of resolving to the copied elements.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.limit = source.limit;
        self.extend(source.iter().cloned());
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T> Index<Cursor> for List<T> {
    type Output = T;

    /// # Panics
    /// If `cursor` is end or stale.
    fn index(&self, cursor: Cursor) -> &T {
        match self.get(cursor) {
            Some(v) => v,
            None => panic!("dereferenced an end or stale list cursor"),
        }
    }
}

impl<T> IndexMut<Cursor> for List<T> {
    fn index_mut(&mut self, cursor: Cursor) -> &mut T {
        match self.get_mut(cursor) {
            Some(v) => v,
            None => panic!("dereferenced an end or stale list cursor"),
        }
    }
}

impl<T> Extend<T> for List<T> {
    /// # Panics
    /// If the list reaches its node limit; use `try_extend` to get the
    /// error instead.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if let Err(e) = self.push_back(value) {
                panic!("{e}");
            }
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

/// Borrowing iterator in list order.
pub struct Iter<'a, T> {
    nodes: &'a SlotMap<NodeKey, Node<T>>,
    front: Option<NodeKey>,
    back: Option<NodeKey>,
    remaining: usize,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.front?)?;
        self.remaining -= 1;
        self.front = node.next;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.back?)?;
        self.remaining -= 1;
        self.back = node.prev;
        Some(&node.value)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Mutable iterator in list order.
pub struct IterMut<'a, T> {
    inner: std::collections::vec_deque::IntoIter<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}
impl<'a, T> FusedIterator for IterMut<'a, T> {}

/// Owning iterator; pops from either end.
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
