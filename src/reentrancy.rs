//! Debug-only reentrancy check for hash set entry points.
//!
//! `HashSet` calls user code (`Hash`, `Eq`) while it scans a bucket. A
//! user impl that reaches back into the same set during that scan sees a
//! half-finished operation, so debug builds panic on nested entry. Release
//! builds compile the check away.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-set nesting counter. Entry points start with
/// `let _g = self.reentrancy.enter();`.
///
/// `Send` but never `Sync`, in every build profile.
#[derive(Debug, Default)]
pub(crate) struct ReentryCheck {
    #[cfg(debug_assertions)]
    depth: Cell<u32>,
    _nosync: PhantomData<Cell<()>>,
}

impl ReentryCheck {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            depth: Cell::new(0),
            _nosync: PhantomData,
        }
    }

    /// Mark the start of an operation. Panics in debug builds if one is
    /// already running on this set.
    #[inline]
    pub(crate) fn enter(&self) -> Entered<'_> {
        #[cfg(debug_assertions)]
        {
            let d = self.depth.get();
            assert!(d == 0, "reentrant call into HashSet during a bucket scan");
            self.depth.set(d + 1);
            Entered { check: self }
        }

        #[cfg(not(debug_assertions))]
        {
            Entered { _z: PhantomData }
        }
    }

    #[cfg(all(test, debug_assertions))]
    pub(crate) fn depth(&self) -> u32 {
        self.depth.get()
    }
}

/// Marks a running operation; leaving scope (or unwinding) ends it.
pub(crate) struct Entered<'a> {
    #[cfg(debug_assertions)]
    check: &'a ReentryCheck,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for Entered<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            let d = self.check.depth.get();
            debug_assert!(d > 0);
            self.check.depth.set(d - 1);
        }
    }
}
