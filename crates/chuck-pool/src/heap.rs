//! Pass-through allocator over the global heap.
//!
//! [`HeapAllocator`] acquires and releases every request individually. It is
//! the default storage strategy for containers and the baseline the pool is
//! benchmarked against.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::PoolError;
use crate::traits::ElementAllocator;

/// Stateless allocator backed by [`std::alloc`].
///
/// All instances share the global heap, so any two compare as sharing
/// storage.
pub struct HeapAllocator<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> HeapAllocator<T> {
    /// Create a heap allocator.
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    fn layout(n: usize) -> Result<Layout, PoolError> {
        Layout::array::<T>(n).map_err(|_| PoolError::CapacityOverflow {
            requested: n,
            element_size: std::mem::size_of::<T>(),
        })
    }
}

impl<T> Clone for HeapAllocator<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for HeapAllocator<T> {}

impl<T> Default for HeapAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for HeapAllocator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HeapAllocator")
    }
}

// SAFETY: every allocation is a distinct `alloc::alloc` block laid out for
// `n` values of `T`, live until `deallocate` frees it with the same layout.
// All instances draw from and return to the one global heap, so any two
// may release each other's storage.
unsafe impl<T> ElementAllocator for HeapAllocator<T> {
    type Value = T;
    type Rebind<U> = HeapAllocator<U>;

    fn rebind<U>(&self) -> HeapAllocator<U> {
        HeapAllocator::new()
    }

    fn allocate(&self, n: usize) -> Result<NonNull<T>, PoolError> {
        if n == 0 {
            return Err(PoolError::ZeroSized);
        }
        let layout = Self::layout(n)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        // SAFETY: `layout` has non-zero size, checked above.
        let raw = unsafe { alloc::alloc(layout) };
        match NonNull::new(raw.cast::<T>()) {
            Some(ptr) => Ok(ptr),
            None => alloc::handle_alloc_error(layout),
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<T>, n: usize) {
        let Ok(layout) = Self::layout(n) else {
            return;
        };
        if layout.size() != 0 {
            // SAFETY: the caller guarantees `ptr` came from `allocate(n)`,
            // which used this same layout.
            unsafe { alloc::dealloc(ptr.as_ptr().cast::<u8>(), layout) };
        }
    }

    fn shares_storage(&self, _other: &Self) -> bool {
        true
    }
}
