//! Error kinds shared by `List` and `HashSet`.

/// Failure modes of the fallible container operations.
///
/// Every operation that returns one of these leaves the container exactly
/// as it was before the call.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// A node could not be obtained: the container already holds `limit`
    /// elements, which is either its configured node limit or the arena's
    /// key-space bound.
    #[error("unable to allocate a new node: container is at its limit of {limit} elements")]
    AllocationFailure { limit: usize },

    /// `front`/`back` on an empty list.
    #[error("unable to access data from an empty container")]
    EmptyContainer,

    /// The cursor refers to an element that has already been removed.
    #[error("cursor does not refer to a live element")]
    InvalidCursor,
}
