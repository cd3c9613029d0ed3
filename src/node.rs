//! Node storage for `List`.
//!
//! A node owns one value and carries non-owning links to its neighbours.
//! Links are generational arena keys rather than pointers, so a link that
//! outlives its target resolves to nothing instead of dangling.

slotmap::new_key_type! {
    /// Arena key of a single node.
    pub(crate) struct NodeKey;
}

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) prev: Option<NodeKey>,
    pub(crate) next: Option<NodeKey>,
}

impl<T> Node<T> {
    #[inline]
    pub(crate) fn new(value: T, prev: Option<NodeKey>, next: Option<NodeKey>) -> Self {
        Self { value, prev, next }
    }
}
