//! HashSet: fixed-bucket chained hash set built on `List`.
//!
//! Ten buckets, each a `List<T>`. An element lives in bucket
//! `hash(element) % BUCKET_COUNT`; collisions chain inside that bucket's
//! list. There is no rehashing, so lookups cost O(bucket length).

use crate::error::Error;
use crate::list::{self, Cursor, List, MAX_LEN};
use crate::reentrancy::ReentryCheck;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::ops::Index;
use hashbrown::hash_map::DefaultHashBuilder;

/// Number of buckets in every set.
pub const BUCKET_COUNT: usize = 10;

/// Position in a whole set: a bucket plus a position inside that bucket.
///
/// Either denotes a live element or equals `SetCursor::END`. Advancing
/// with `HashSet::next` crosses into the next non-empty bucket.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SetCursor {
    bucket: usize,
    node: Cursor,
}

impl SetCursor {
    /// One past the last bucket.
    pub const END: SetCursor = SetCursor {
        bucket: BUCKET_COUNT,
        node: Cursor::END,
    };

    #[inline]
    pub fn is_end(&self) -> bool {
        self.node.is_end()
    }

    /// Bucket the cursor points into (`BUCKET_COUNT` at end).
    pub fn bucket(&self) -> usize {
        self.bucket
    }

    pub fn value<'a, T, S>(&self, set: &'a HashSet<T, S>) -> Option<&'a T> {
        set.get_at(*self)
    }
}

/// Position inside one bucket; never crosses into another bucket.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LocalCursor {
    bucket: usize,
    node: Cursor,
}

impl LocalCursor {
    #[inline]
    pub fn is_end(&self) -> bool {
        self.node.is_end()
    }

    pub fn bucket(&self) -> usize {
        self.bucket
    }

    pub fn value<'a, T, S>(&self, set: &'a HashSet<T, S>) -> Option<&'a T> {
        set.get_local(*self)
    }
}

/// Chained hash set with `BUCKET_COUNT` fixed buckets.
///
/// Elements are immutable once inserted: changing one in place could move
/// it to a different bucket. Not synchronized; wrap it in a lock to share
/// it between threads.
pub struct HashSet<T, S = DefaultHashBuilder> {
    hasher: S,
    pub(crate) buckets: [List<T>; BUCKET_COUNT],
    len: usize,
    limit: usize,
    reentrancy: ReentryCheck,
}

impl<T> HashSet<T>
where
    T: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// Create a set that refuses to hold more than `limit` elements.
    pub fn with_limit(limit: usize) -> Self {
        Self::with_hasher_and_limit(Default::default(), limit)
    }

    /// Create a set sized for `buckets` buckets.
    ///
    /// The bucket count is fixed, so the request is only a hint: the set
    /// always has `BUCKET_COUNT` buckets and never rehashes.
    pub fn with_bucket_count(buckets: usize) -> Self {
        if buckets != BUCKET_COUNT {
            tracing::debug!(requested = buckets, fixed = BUCKET_COUNT, "bucket count hint ignored");
        }
        Self::new()
    }
}

impl<T, S> HashSet<T, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_hasher_and_limit(hasher, MAX_LEN)
    }

    pub fn with_hasher_and_limit(hasher: S, limit: usize) -> Self {
        Self {
            hasher,
            buckets: core::array::from_fn(|_| List::new()),
            len: 0,
            limit: limit.min(MAX_LEN),
            reentrancy: ReentryCheck::new(),
        }
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        BUCKET_COUNT
    }

    /// Number of elements in bucket `i`.
    ///
    /// # Panics
    /// If `i >= BUCKET_COUNT`.
    pub fn bucket_size(&self, i: usize) -> usize {
        self.buckets[i].len()
    }

    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        if self.len > 0 {
            tracing::trace!(released = self.len, "hash set cleared");
        }
        self.len = 0;
    }

    /// Normalize `(bucket, node)`: a live node stays put; an exhausted
    /// bucket moves on to the first element of the next non-empty bucket,
    /// or to `SetCursor::END` when none remains.
    fn settle(&self, bucket: usize, node: Cursor) -> SetCursor {
        if !node.is_end() {
            return SetCursor { bucket, node };
        }
        match (bucket + 1..BUCKET_COUNT).find(|&b| !self.buckets[b].is_empty()) {
            Some(b) => SetCursor {
                bucket: b,
                node: self.buckets[b].begin(),
            },
            None => SetCursor::END,
        }
    }

    /// First element of the first non-empty bucket, or end.
    pub fn begin(&self) -> SetCursor {
        self.settle(0, self.buckets[0].begin())
    }

    #[inline]
    pub fn end(&self) -> SetCursor {
        SetCursor::END
    }

    /// Advance past `cursor`, chaining into later buckets as needed.
    /// End stays at end; a stale cursor yields end.
    pub fn next(&self, cursor: SetCursor) -> SetCursor {
        match self.buckets.get(cursor.bucket) {
            Some(bucket) if bucket.get(cursor.node).is_some() => {
                self.settle(cursor.bucket, bucket.next(cursor.node))
            }
            _ => SetCursor::END,
        }
    }

    pub fn get_at(&self, cursor: SetCursor) -> Option<&T> {
        self.buckets.get(cursor.bucket)?.get(cursor.node)
    }

    /// # Panics
    /// If `i >= BUCKET_COUNT`.
    pub fn local_begin(&self, i: usize) -> LocalCursor {
        LocalCursor {
            bucket: i,
            node: self.buckets[i].begin(),
        }
    }

    /// # Panics
    /// If `i >= BUCKET_COUNT`.
    pub fn local_end(&self, i: usize) -> LocalCursor {
        assert!(i < BUCKET_COUNT, "bucket index {i} out of range");
        LocalCursor {
            bucket: i,
            node: Cursor::END,
        }
    }

    /// Advance within the cursor's bucket; the end of the bucket is final.
    pub fn local_next(&self, cursor: LocalCursor) -> LocalCursor {
        let node = self
            .buckets
            .get(cursor.bucket)
            .map_or(Cursor::END, |b| b.next(cursor.node));
        LocalCursor {
            bucket: cursor.bucket,
            node,
        }
    }

    pub fn get_local(&self, cursor: LocalCursor) -> Option<&T> {
        self.buckets.get(cursor.bucket)?.get(cursor.node)
    }

    /// Borrowing iterator over bucket `i` only.
    ///
    /// # Panics
    /// If `i >= BUCKET_COUNT`.
    pub fn bucket_iter(&self, i: usize) -> list::Iter<'_, T> {
        self.buckets[i].iter()
    }

    /// Borrowing iterator over every element, bucket by bucket.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
            remaining: self.len,
        }
    }

    /// Exchange contents with `other`: ten bucket headers and the counters
    /// move, nodes stay where they are.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.hasher, &mut other.hasher);
        core::mem::swap(&mut self.buckets, &mut other.buckets);
        core::mem::swap(&mut self.len, &mut other.len);
        core::mem::swap(&mut self.limit, &mut other.limit);
    }
}

impl<T, S> HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Bucket that `value` belongs to: its hash modulo `BUCKET_COUNT`.
    pub fn bucket_index<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(value) % BUCKET_COUNT as u64) as usize
    }

    fn locate<Q>(&self, value: &Q) -> (usize, Cursor)
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let bucket = self.bucket_index(value);
        let node = self.buckets[bucket].find_by(|v| v.borrow() == value);
        (bucket, node)
    }

    /// Cursor to the element equal to `value`, or end.
    pub fn find<Q>(&self, value: &Q) -> SetCursor
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        match self.locate(value) {
            (_, node) if node.is_end() => SetCursor::END,
            (bucket, node) => SetCursor { bucket, node },
        }
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        !self.locate(value).1.is_end()
    }

    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let (bucket, node) = self.locate(value);
        self.buckets[bucket].get(node)
    }

    /// Insert `value` unless an equal element is present.
    ///
    /// Returns the cursor of the element now in the set and whether this
    /// call added it. A duplicate leaves the set untouched and reports
    /// `false`. At the node limit the set is left unchanged and
    /// `Error::AllocationFailure` is returned.
    pub fn insert(&mut self, value: T) -> Result<(SetCursor, bool), Error> {
        let _g = self.reentrancy.enter();
        let (bucket, found) = self.locate(&value);
        if !found.is_end() {
            return Ok((SetCursor { bucket, node: found }, false));
        }
        if self.len >= self.limit {
            tracing::debug!(limit = self.limit, len = self.len, "hash set insert refused");
            return Err(Error::AllocationFailure { limit: self.limit });
        }
        let node = self.buckets[bucket].insert(Cursor::END, value)?;
        self.len += 1;
        Ok((SetCursor { bucket, node }, true))
    }

    /// Remove the element equal to `value` and return the cursor just past
    /// it, chained into the next non-empty bucket when it was the last of
    /// its own. Absent values leave the set alone and yield end.
    pub fn erase<Q>(&mut self, value: &Q) -> SetCursor
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let (bucket, node) = self.locate(value);
        if node.is_end() {
            return SetCursor::END;
        }
        let next = self.buckets[bucket].erase(node);
        self.len -= 1;
        self.settle(bucket, next)
    }

    /// Remove and return the element equal to `value`.
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let (bucket, node) = self.locate(value);
        let removed = self.buckets[bucket].remove(node)?;
        self.len -= 1;
        Some(removed)
    }

    /// Insert every value, or none: on failure the elements added by this
    /// call are removed again before the error returns.
    pub fn insert_all<I>(&mut self, values: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
    {
        let mut added: Vec<SetCursor> = Vec::new();
        for value in values {
            match self.insert(value) {
                Ok((cursor, true)) => added.push(cursor),
                Ok((_, false)) => {}
                Err(e) => {
                    for cursor in added.iter().rev() {
                        self.buckets[cursor.bucket].erase(cursor.node);
                    }
                    self.len -= added.len();
                    tracing::trace!(rolled_back = added.len(), "hash set insert_all rolled back");
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Replace the contents with `values`. All-or-nothing.
    ///
    /// Buckets keep their arenas, so every cursor taken before the call is
    /// stale afterwards, even on an element that is assigned again.
    pub fn assign<I>(&mut self, values: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        S: Clone,
    {
        let values: Vec<T> = values.into_iter().collect();
        let distinct = {
            let mut seen =
                hashbrown::HashSet::with_capacity_and_hasher(values.len(), self.hasher.clone());
            values.iter().filter(|v| seen.insert(*v)).count()
        };
        if distinct > self.limit {
            tracing::debug!(limit = self.limit, requested = distinct, "hash set assign refused");
            return Err(Error::AllocationFailure { limit: self.limit });
        }
        self.clear();
        self.insert_all(values)
    }
}

/// Free-standing swap; O(BUCKET_COUNT), no node is touched.
pub fn swap<T, S>(a: &mut HashSet<T, S>, b: &mut HashSet<T, S>) {
    a.swap(b);
}

impl<T, S: Default> Default for HashSet<T, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T: Clone, S: Clone> Clone for HashSet<T, S> {
    /// Copies every bucket as is; the hasher is cloned so each element
    /// keeps its bucket.
    fn clone(&self) -> Self {
        Self {
            hasher: self.hasher.clone(),
            buckets: self.buckets.clone(),
            len: self.len,
            limit: self.limit,
            reentrancy: ReentryCheck::new(),
        }
    }

    /// Copies bucket by bucket into the existing arenas: cursors into the
    /// old contents go stale instead of resolving to the copies.
    fn clone_from(&mut self, source: &Self) {
        self.hasher = source.hasher.clone();
        for (dst, src) in self.buckets.iter_mut().zip(source.buckets.iter()) {
            dst.clone_from(src);
        }
        self.len = source.len;
        self.limit = source.limit;
    }
}

impl<T: fmt::Debug, S> fmt::Debug for HashSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> PartialEq for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
}

impl<T, S> Index<SetCursor> for HashSet<T, S> {
    type Output = T;

    /// # Panics
    /// If `cursor` is end or stale.
    fn index(&self, cursor: SetCursor) -> &T {
        match self.get_at(cursor) {
            Some(v) => v,
            None => panic!("dereferenced an end or stale set cursor"),
        }
    }
}

impl<T, S> Index<LocalCursor> for HashSet<T, S> {
    type Output = T;

    fn index(&self, cursor: LocalCursor) -> &T {
        match self.get_local(cursor) {
            Some(v) => v,
            None => panic!("dereferenced an end or stale set cursor"),
        }
    }
}

impl<T, S> Extend<T> for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// # Panics
    /// If the set reaches its node limit; `insert_all` returns the error
    /// instead.
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            if let Err(e) = self.insert(value) {
                panic!("{e}");
            }
        }
    }
}

impl<T, S> FromIterator<T> for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut set = Self::with_hasher(S::default());
        set.extend(values);
        set
    }
}

impl<T, const N: usize> From<[T; N]> for HashSet<T>
where
    T: Eq + Hash,
{
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

/// Borrowing iterator over all buckets in index order.
pub struct Iter<'a, T> {
    buckets: core::slice::Iter<'a, List<T>>,
    current: Option<list::Iter<'a, T>>,
    remaining: usize,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            current: self.current.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            if let Some(value) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(value);
            }
            self.current = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Owning iterator; drains bucket by bucket.
pub struct IntoIter<T> {
    buckets: core::array::IntoIter<List<T>, BUCKET_COUNT>,
    current: Option<list::IntoIter<T>>,
    remaining: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if let Some(value) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(value);
            }
            self.current = Some(self.buckets.next()?.into_iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T, S> IntoIterator for HashSet<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            remaining: self.len,
            buckets: self.buckets.into_iter(),
            current: None,
        }
    }
}

impl<'a, T, S> IntoIterator for &'a HashSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
