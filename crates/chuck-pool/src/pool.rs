//! The shared pool handle.
//!
//! [`ChuckAllocator`] is a cheap handle onto a [`ChunkList`]. Cloning a
//! handle aliases the same chunks; the chunks are released in bulk when
//! the last handle is dropped. Individual deallocation is a no-op: storage
//! handed out stays reserved until teardown, which suits append-only
//! workloads such as container nodes and is a poor fit for long-running,
//! high-churn use.
//!
//! Reference counting is non-atomic, so handles are neither `Send` nor
//! `Sync`. A pool must stay on the thread that created it.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::cell::RefCell;
use std::fmt;
use std::ptr::NonNull;
use std::rc::Rc;

use crate::chunk::{ChunkInfo, ChunkList};
use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::traits::ElementAllocator;

/// Handle onto a shared pool of `T` chunks.
///
/// ```
/// use chuck_pool::{ChuckAllocator, ElementAllocator};
///
/// let pool = ChuckAllocator::<u32>::new();
/// let first = pool.allocate(10).unwrap();
/// pool.allocate(20).unwrap();
///
/// // A clone sees the same chunks and fills the gap in the first one.
/// let alias = pool.clone();
/// let third = alias.allocate(5).unwrap();
/// assert_eq!(third.as_ptr(), first.as_ptr().wrapping_add(10));
/// assert_eq!(pool.chunk_count(), 2);
/// ```
pub struct ChuckAllocator<T> {
    shared: Rc<RefCell<ChunkList<T>>>,
}

impl<T> ChuckAllocator<T> {
    /// Create a handle onto a new, empty pool with the default config.
    pub fn new() -> Self {
        Self::from_list(ChunkList::new(PoolConfig::new()))
    }

    /// Create a handle onto a new, empty pool.
    ///
    /// Fails with [`PoolError::CapacityOverflow`] if a chunk of
    /// `chunk_size` elements of `T` cannot be laid out, since no default
    /// chunk could ever be created.
    pub fn with_config(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        Layout::array::<T>(config.chunk_size).map_err(|_| PoolError::CapacityOverflow {
            requested: config.chunk_size,
            element_size: std::mem::size_of::<T>(),
        })?;
        Ok(Self::from_list(ChunkList::new(config)))
    }

    fn from_list(list: ChunkList<T>) -> Self {
        Self {
            shared: Rc::new(RefCell::new(list)),
        }
    }

    /// Number of live handles aliasing this pool, including `self`.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.shared)
    }

    /// Number of chunks created so far.
    pub fn chunk_count(&self) -> usize {
        self.shared.borrow().chunk_count()
    }

    /// Bookkeeping snapshot of every chunk, in creation order.
    pub fn chunks(&self) -> Vec<ChunkInfo<T>> {
        self.shared.borrow().infos()
    }

    /// Elements handed out across all chunks.
    pub fn used(&self) -> usize {
        self.shared.borrow().used()
    }

    /// Total capacity across all chunks, in elements.
    pub fn capacity(&self) -> usize {
        self.shared.borrow().capacity()
    }

    /// Bytes held by all chunk buffers.
    pub fn memory_bytes(&self) -> usize {
        self.shared.borrow().memory_bytes()
    }

    /// Whether `ptr` points into storage owned by this pool.
    ///
    /// Always `false` for zero-sized `T`.
    pub fn owns(&self, ptr: *const T) -> bool {
        self.shared.borrow().contains(ptr)
    }

    /// The configuration this pool sizes new chunks by.
    pub fn config(&self) -> PoolConfig {
        self.shared.borrow().config()
    }
}

impl<T> Default for ChuckAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ChuckAllocator<T> {
    /// Alias the same pool.
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }

    /// Release the current pool reference, then alias `source`'s pool.
    ///
    /// A no-op when both handles already alias the same pool.
    fn clone_from(&mut self, source: &Self) {
        if !Rc::ptr_eq(&self.shared, &source.shared) {
            self.shared = Rc::clone(&source.shared);
        }
    }
}

impl<T> fmt::Debug for ChuckAllocator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.shared.borrow();
        f.debug_struct("ChuckAllocator")
            .field("handles", &Rc::strong_count(&self.shared))
            .field("chunks", &list.chunk_count())
            .field("used", &list.used())
            .field("capacity", &list.capacity())
            .finish()
    }
}

// SAFETY: `ChunkList::alloc` carves each range from the unused tail of a
// chunk sized and aligned for `T`, and the cursor only moves forward, so
// ranges never overlap. Chunks are freed only when the last `Rc` handle
// drops. `shares_storage` is `Rc::ptr_eq`, true only for handles on the
// same chunk list.
unsafe impl<T> ElementAllocator for ChuckAllocator<T> {
    type Value = T;
    type Rebind<U> = ChuckAllocator<U>;

    /// A new, empty pool of `U` with this pool's configuration.
    ///
    /// Chunks are typed by element, so the rebound pool never shares
    /// storage with `self`.
    fn rebind<U>(&self) -> ChuckAllocator<U> {
        ChuckAllocator::from_list(ChunkList::new(self.config()))
    }

    fn allocate(&self, n: usize) -> Result<NonNull<T>, PoolError> {
        self.shared.borrow_mut().alloc(n)
    }

    /// Intentionally does nothing. Storage is reclaimed only when the last
    /// handle drops.
    unsafe fn deallocate(&self, _ptr: NonNull<T>, _n: usize) {}

    fn shares_storage(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chuck_test_utils::DropCounter;

    #[test]
    fn new_pool_is_empty_with_one_handle() {
        let pool = ChuckAllocator::<u32>::new();
        assert_eq!(pool.handle_count(), 1);
        assert_eq!(pool.chunk_count(), 0);
        assert_eq!(pool.memory_bytes(), 0);
    }

    #[test]
    fn first_allocation_is_chunk_base() {
        let pool = ChuckAllocator::<u32>::new();
        let p = pool.allocate(10).unwrap();
        let chunks = pool.chunks();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].capacity, 16);
        assert_eq!(chunks[0].space_available, 6);
        assert_eq!(p, chunks[0].base);
    }

    #[test]
    fn oversized_request_gets_dedicated_chunk() {
        let pool = ChuckAllocator::<u32>::new();
        pool.allocate(10).unwrap();
        let p = pool.allocate(20).unwrap();
        let chunks = pool.chunks();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].capacity, 20);
        assert_eq!(chunks[1].space_available, 0);
        assert_eq!(p, chunks[1].base);
    }

    #[test]
    fn clone_shares_chunks_both_ways() {
        let pool = ChuckAllocator::<u32>::new();
        let alias = pool.clone();
        assert_eq!(pool.handle_count(), 2);

        alias.allocate(3).unwrap();
        assert_eq!(pool.chunk_count(), 1);
        assert_eq!(pool.chunks()[0].space_available, 13);

        pool.allocate(100).unwrap();
        assert_eq!(alias.chunk_count(), 2);
        assert!(pool.shares_storage(&alias));
    }

    #[test]
    fn dropping_alias_decrements_count() {
        let pool = ChuckAllocator::<u8>::new();
        let alias = pool.clone();
        alias.allocate(4).unwrap();
        drop(alias);
        assert_eq!(pool.handle_count(), 1);
        assert_eq!(pool.used(), 4);
    }

    #[test]
    fn clone_from_releases_old_pool_and_aliases_new() {
        let a = ChuckAllocator::<u8>::new();
        let mut b = ChuckAllocator::<u8>::new();
        let b_alias = b.clone();
        assert_eq!(b_alias.handle_count(), 2);

        b.clone_from(&a);
        assert!(b.shares_storage(&a));
        assert_eq!(a.handle_count(), 2);
        assert_eq!(b_alias.handle_count(), 1);
    }

    #[test]
    fn clone_from_same_pool_is_noop() {
        let a = ChuckAllocator::<u8>::new();
        let mut b = a.clone();
        b.clone_from(&a);
        assert_eq!(a.handle_count(), 2);
        let c = b.clone();
        b.clone_from(&c);
        assert_eq!(a.handle_count(), 3);
    }

    #[test]
    fn deallocate_never_recycles() {
        let pool = ChuckAllocator::<u64>::new();
        let p = pool.allocate(2).unwrap();
        unsafe { pool.deallocate(p, 2) };
        let q = pool.allocate(2).unwrap();
        assert_ne!(p, q);
        assert_eq!(pool.used(), 4);
    }

    #[test]
    fn zero_request_rejected_without_growth() {
        let pool = ChuckAllocator::<u64>::new();
        assert_eq!(pool.allocate(0), Err(PoolError::ZeroSized));
        assert_eq!(pool.chunk_count(), 0);
    }

    #[test]
    fn with_config_validates() {
        let err = ChuckAllocator::<u8>::with_config(PoolConfig::new().with_chunk_size(0));
        assert!(matches!(err, Err(PoolError::InvalidConfig { .. })));

        let pool = ChuckAllocator::<u8>::with_config(PoolConfig::new().with_chunk_size(64)).unwrap();
        pool.allocate(1).unwrap();
        assert_eq!(pool.capacity(), 64);
    }

    #[test]
    fn with_config_rejects_chunks_too_large_for_element() {
        let config = PoolConfig::new().with_chunk_size(usize::MAX / 2);
        assert!(config.validate().is_ok());
        assert!(matches!(
            ChuckAllocator::<u64>::with_config(config),
            Err(PoolError::CapacityOverflow { requested, element_size: 8 })
                if requested == usize::MAX / 2
        ));
        assert!(ChuckAllocator::<u8>::with_config(config).is_ok());
    }

    #[test]
    fn rebind_keeps_config_but_not_storage() {
        let pool =
            ChuckAllocator::<u8>::with_config(PoolConfig::new().with_chunk_size(32)).unwrap();
        pool.allocate(1).unwrap();
        let wide: ChuckAllocator<u64> = pool.rebind();
        assert_eq!(wide.config().chunk_size, 32);
        assert_eq!(wide.chunk_count(), 0);
        assert_eq!(wide.handle_count(), 1);
    }

    #[test]
    fn owns_reports_pool_membership() {
        let pool = ChuckAllocator::<u32>::new();
        let p = pool.allocate(1).unwrap();
        let other = 0u32;
        assert!(pool.owns(p.as_ptr()));
        assert!(!pool.owns(&other));
    }

    #[test]
    fn construct_and_destroy_in_place() {
        let counter = DropCounter::new();
        let pool = ChuckAllocator::<chuck_test_utils::Tracked<String>>::new();
        let p = pool.allocate(2).unwrap();
        unsafe {
            pool.construct_at(p, counter.track("a".to_string()));
            pool.construct_at(p.add(1), counter.track("b".to_string()));
            assert_eq!((*p.add(1).as_ptr()).value, "b");
            pool.destroy_at(p);
            assert_eq!(counter.drops(), 1);
            pool.destroy_at(p.add(1));
        }
        assert_eq!(counter.drops(), 2);
        // Storage outlives the destroyed values.
        assert_eq!(pool.used(), 2);
    }

    #[test]
    fn debug_shows_bookkeeping() {
        let pool = ChuckAllocator::<u8>::new();
        pool.allocate(3).unwrap();
        let text = format!("{pool:?}");
        assert!(text.contains("chunks: 1"));
        assert!(text.contains("used: 3"));
    }
}
