//! Test utilities for chuck development.
//!
//! Provides destructor accounting ([`DropCounter`], [`Tracked`]) for
//! checking that containers and allocators run each destructor exactly
//! once, and a [`CountingAllocator`] global allocator for leak checks.

#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod counting;

pub use counting::{AllocStats, CountingAllocator};

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Shared tally of destroyed [`Tracked`] values.
///
/// Clones share the tally, so a counter can be handed to code under test
/// and inspected afterwards.
#[derive(Clone, Default)]
pub struct DropCounter {
    drops: Rc<Cell<usize>>,
}

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `value` so that dropping it bumps this counter.
    pub fn track<T>(&self, value: T) -> Tracked<T> {
        Tracked {
            value,
            drops: Rc::clone(&self.drops),
        }
    }

    /// Number of tracked values dropped so far.
    pub fn drops(&self) -> usize {
        self.drops.get()
    }
}

/// A value that reports its own drop to a [`DropCounter`].
pub struct Tracked<T> {
    pub value: T,
    drops: Rc<Cell<usize>>,
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

impl<T: Clone> Clone for Tracked<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            drops: Rc::clone(&self.drops),
        }
    }
}

impl<T: PartialEq> PartialEq for Tracked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Tracked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tracked").field(&self.value).finish()
    }
}
