//! chained-collections: a doubly-linked `List` with stable cursors and a
//! fixed-bucket chained `HashSet` whose buckets are `List`s.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: get node ownership and link fix-up right once, in `List`, and
//!   build the hash set purely by delegation to it.
//! - Layers:
//!   - Node: one value plus non-owning `prev`/`next` links (arena keys).
//!   - List<T>: owns its nodes in a generational arena; O(1) push, pop,
//!     insert-before and erase; `Cursor` positions that survive unrelated
//!     mutation.
//!   - HashSet<T, S>: ten `List<T>` buckets chosen by
//!     `hash(value) % BUCKET_COUNT`; set semantics; `SetCursor` walks all
//!     buckets, `LocalCursor` stays in one.
//!
//! Constraints
//! - Single-threaded: no internal locking. Containers are `Send` when
//!   their contents are; share them across threads behind a lock.
//!   `HashSet` is `!Sync` in every build profile.
//! - Fixed bucket count, no rehashing.
//! - Every mutation is all-or-nothing: a failed operation leaves the
//!   container exactly as it was.
//!
//! Ownership
//! - A list exclusively owns its nodes; every node is released on
//!   pop/erase/clear or when the list drops, through the arena.
//! - The set owns its buckets and never touches nodes directly.
//! - Cursors own nothing. Generational keys make a cursor to a removed
//!   element resolve to nothing instead of to whatever reuses the slot.
//!
//! Failure semantics
//! - `Error::AllocationFailure`: a node could not be obtained (node limit
//!   or arena key space). Both containers take an optional node limit so
//!   the failure path is reachable and testable.
//! - `Error::EmptyContainer`: `front`/`back` on an empty list.
//! - `Error::InvalidCursor`: inserting before a stale cursor.
//! - Dereferencing end or a stale cursor through `Index` panics in every
//!   build; `get`-style accessors return `None` instead.
//!
//! Reentrancy
//! - The set calls user `Hash`/`Eq` while scanning a bucket. A debug-only
//!   check panics if that user code re-enters the same set; release builds
//!   compile it away.

mod error;
pub mod hash_set;
mod hash_set_proptest;
#[cfg(any(test, feature = "test_internals"))]
mod inspect;
pub mod list;
mod list_proptest;
mod node;
mod reentrancy;

// Public surface
pub use error::Error;
pub use hash_set::{HashSet, LocalCursor, SetCursor, BUCKET_COUNT};
pub use list::{Cursor, List, MAX_LEN};
