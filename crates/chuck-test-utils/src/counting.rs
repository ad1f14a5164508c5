//! Global allocator wrapper that tallies heap traffic.
//!
//! Install it with `#[global_allocator]` in an integration test binary that
//! holds a single test; the tallies are process-wide, so concurrent tests
//! in the same binary would see each other's allocations.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Forwards to [`System`] and counts allocations, frees, and live bytes.
pub struct CountingAllocator {
    allocations: AtomicUsize,
    deallocations: AtomicUsize,
    live_bytes: AtomicUsize,
}

/// A point-in-time copy of a [`CountingAllocator`]'s tallies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocStats {
    pub allocations: usize,
    pub deallocations: usize,
    pub live_bytes: usize,
}

impl AllocStats {
    /// Allocations not yet matched by a free.
    pub fn live_allocations(&self) -> usize {
        self.allocations.saturating_sub(self.deallocations)
    }
}

impl CountingAllocator {
    pub const fn new() -> Self {
        Self {
            allocations: AtomicUsize::new(0),
            deallocations: AtomicUsize::new(0),
            live_bytes: AtomicUsize::new(0),
        }
    }

    pub fn stats(&self) -> AllocStats {
        AllocStats {
            allocations: self.allocations.load(Ordering::SeqCst),
            deallocations: self.deallocations.load(Ordering::SeqCst),
            live_bytes: self.live_bytes.load(Ordering::SeqCst),
        }
    }
}

impl Default for CountingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: every call is forwarded unchanged to `System`; the counters do
// not affect the returned memory.
unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: forwarded with the caller's layout.
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            self.allocations.fetch_add(1, Ordering::SeqCst);
            self.live_bytes.fetch_add(layout.size(), Ordering::SeqCst);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        self.deallocations.fetch_add(1, Ordering::SeqCst);
        self.live_bytes.fetch_sub(layout.size(), Ordering::SeqCst);
        // SAFETY: forwarded with the caller's pointer and layout.
        unsafe { System.dealloc(ptr, layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: forwarded with the caller's arguments.
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            self.live_bytes.fetch_add(new_size, Ordering::SeqCst);
            self.live_bytes.fetch_sub(layout.size(), Ordering::SeqCst);
        }
        new_ptr
    }
}
