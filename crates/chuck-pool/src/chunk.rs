//! Raw, fixed-capacity chunks and the first-fit chunk list.
//!
//! A [`Chunk`] is a single uninitialized buffer of `T` with a bump cursor
//! that only moves forward. A [`ChunkList`] owns every chunk of a pool in
//! creation order and serves requests first-fit, appending a new chunk
//! when nothing fits.
//!
//! This is the only module of the crate that touches raw memory. Every
//! `unsafe` block carries a `// SAFETY:` comment.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::NonNull;

use smallvec::SmallVec;

use crate::config::PoolConfig;
use crate::error::PoolError;

/// A contiguous buffer of `capacity` uninitialized `T` slots.
///
/// Slots are handed out from the front in request order and never taken
/// back. The buffer is freed exactly once, when the chunk is dropped; the
/// chunk never runs destructors of values placed in it.
pub struct Chunk<T> {
    data: NonNull<T>,
    capacity: usize,
    space_available: usize,
    _owns: PhantomData<T>,
}

impl<T> Chunk<T> {
    /// Acquire a buffer for `capacity` elements.
    ///
    /// Zero-sized `T` never touches the system allocator. Exhaustion of the
    /// system allocator aborts via [`alloc::handle_alloc_error`].
    pub fn new(capacity: usize) -> Result<Self, PoolError> {
        let layout = Self::layout(capacity)?;
        let data = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            // SAFETY: `layout` has non-zero size, checked above.
            let raw = unsafe { alloc::alloc(layout) };
            match NonNull::new(raw.cast::<T>()) {
                Some(ptr) => ptr,
                None => alloc::handle_alloc_error(layout),
            }
        };
        Ok(Self {
            data,
            capacity,
            space_available: capacity,
            _owns: PhantomData,
        })
    }

    fn layout(capacity: usize) -> Result<Layout, PoolError> {
        Layout::array::<T>(capacity).map_err(|_| PoolError::CapacityOverflow {
            requested: capacity,
            element_size: std::mem::size_of::<T>(),
        })
    }

    /// Carve `n` slots off the unused tail of the buffer.
    ///
    /// The returned range starts at offset `capacity - space_available`.
    /// Returns `None` if fewer than `n` slots remain.
    pub fn carve(&mut self, n: usize) -> Option<NonNull<T>> {
        if n > self.space_available {
            return None;
        }
        let offset = self.used();
        self.space_available -= n;
        // SAFETY: `offset + n <= capacity`, so the pointer stays within (or
        // one past the end of) the buffer acquired in `new`.
        Some(unsafe { self.data.add(offset) })
    }

    /// Base address of the buffer.
    pub fn base(&self) -> NonNull<T> {
        self.data
    }

    /// Total capacity in elements.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Elements not yet handed out.
    pub fn space_available(&self) -> usize {
        self.space_available
    }

    /// Elements handed out so far.
    pub fn used(&self) -> usize {
        self.capacity - self.space_available
    }

    /// Size of the backing buffer in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.capacity * std::mem::size_of::<T>()
    }

    /// Whether `ptr` points at a slot of this chunk.
    pub fn contains(&self, ptr: *const T) -> bool {
        let size = std::mem::size_of::<T>();
        if size == 0 {
            return false;
        }
        let start = self.data.as_ptr() as usize;
        let addr = ptr as usize;
        addr >= start && addr < start + self.capacity * size
    }

    /// Bookkeeping snapshot of this chunk.
    pub fn info(&self) -> ChunkInfo<T> {
        ChunkInfo {
            base: self.data,
            capacity: self.capacity,
            space_available: self.space_available,
        }
    }
}

impl<T> Drop for Chunk<T> {
    fn drop(&mut self) {
        let Ok(layout) = Self::layout(self.capacity) else {
            return;
        };
        if layout.size() != 0 {
            // SAFETY: `data` was returned by `alloc::alloc` with this exact
            // layout in `new` and is released only here.
            unsafe { alloc::dealloc(self.data.as_ptr().cast::<u8>(), layout) };
        }
    }
}

/// Point-in-time view of one chunk's bookkeeping.
#[derive(Debug, PartialEq, Eq)]
pub struct ChunkInfo<T> {
    /// Base address of the chunk's buffer.
    pub base: NonNull<T>,
    /// Total capacity in elements.
    pub capacity: usize,
    /// Elements not yet handed out.
    pub space_available: usize,
}

impl<T> Clone for ChunkInfo<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ChunkInfo<T> {}

impl<T> ChunkInfo<T> {
    /// Elements handed out so far.
    pub fn used(&self) -> usize {
        self.capacity - self.space_available
    }
}

/// All chunks of one pool, in creation order.
///
/// Requests are served first-fit: the earliest chunk with enough room wins,
/// even if a later chunk would fit more tightly. When no chunk fits, a new
/// chunk of `max(chunk_size, n)` elements is appended.
pub struct ChunkList<T> {
    chunks: SmallVec<[Chunk<T>; 4]>,
    config: PoolConfig,
}

impl<T> ChunkList<T> {
    /// Create an empty chunk list. No memory is acquired until the first
    /// allocation.
    pub fn new(config: PoolConfig) -> Self {
        Self {
            chunks: SmallVec::new(),
            config,
        }
    }

    /// Hand out `n` contiguous uninitialized slots.
    pub fn alloc(&mut self, n: usize) -> Result<NonNull<T>, PoolError> {
        if n == 0 {
            return Err(PoolError::ZeroSized);
        }

        if let Some(ptr) = self.chunks.iter_mut().find_map(|chunk| chunk.carve(n)) {
            return Ok(ptr);
        }

        let capacity = self.config.chunk_size.max(n);
        let mut chunk = Chunk::new(capacity)?;
        tracing::trace!(
            capacity,
            requested = n,
            chunk_index = self.chunks.len(),
            "created pool chunk"
        );
        let ptr = chunk.carve(n).ok_or(PoolError::CapacityOverflow {
            requested: n,
            element_size: std::mem::size_of::<T>(),
        })?;
        self.chunks.push(chunk);
        Ok(ptr)
    }

    /// Number of chunks created so far.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Bookkeeping snapshot of every chunk, in creation order.
    pub fn infos(&self) -> Vec<ChunkInfo<T>> {
        self.chunks.iter().map(Chunk::info).collect()
    }

    /// Elements handed out across all chunks.
    pub fn used(&self) -> usize {
        self.chunks.iter().map(Chunk::used).sum()
    }

    /// Total capacity across all chunks, in elements.
    pub fn capacity(&self) -> usize {
        self.chunks.iter().map(Chunk::capacity).sum()
    }

    /// Bytes held by all chunk buffers.
    pub fn memory_bytes(&self) -> usize {
        self.chunks.iter().map(Chunk::memory_bytes).sum()
    }

    /// Whether `ptr` points into any chunk of this list.
    pub fn contains(&self, ptr: *const T) -> bool {
        self.chunks.iter().any(|chunk| chunk.contains(ptr))
    }

    /// The configuration new chunks are sized by.
    pub fn config(&self) -> PoolConfig {
        self.config
    }
}

impl<T> Drop for ChunkList<T> {
    fn drop(&mut self) {
        tracing::debug!(
            chunks = self.chunks.len(),
            bytes = self.memory_bytes(),
            "releasing pool"
        );
    }
}
