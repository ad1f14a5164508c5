//! Chunked bump allocation with shared, reference-counted pools.
//!
//! A pool hands out uninitialized element storage from a growing list of
//! fixed-capacity chunks and never takes any of it back until the whole
//! pool is torn down. Handles onto a pool are cheap to clone; every clone
//! sees, and extends, the same chunks.
//!
//! # Architecture
//!
//! ```text
//! ChuckAllocator<T> (handle, Clone = alias)
//! └── Rc<RefCell<ChunkList<T>>> (shared pool state)
//!     ├── PoolConfig (chunk_size, default 16 elements)
//!     └── Chunk<T>[] (creation order, first-fit)
//!         └── raw buffer + space_available cursor
//! ```
//!
//! # Allocation
//!
//! `allocate(n)` scans chunks in creation order and carves `n` slots from
//! the unused tail of the first chunk with room. If none has room, a chunk
//! of `max(chunk_size, n)` slots is appended and its base returned.
//! `deallocate` is a no-op.
//!
//! # Storage strategies
//!
//! Containers are generic over [`ElementAllocator`]. Two strategies ship
//! here: the pool itself and [`HeapAllocator`], a pass-through to the
//! global allocator.
//!
//! # Threading
//!
//! Pools are single-threaded. Handles are `!Send` and `!Sync`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod chunk;
pub mod config;
pub mod error;
pub mod heap;
pub mod pool;
pub mod traits;

// Public re-exports for the primary API surface.
pub use chunk::ChunkInfo;
pub use config::{PoolConfig, DEFAULT_CHUNK_SIZE};
pub use error::PoolError;
pub use heap::HeapAllocator;
pub use pool::ChuckAllocator;
pub use traits::ElementAllocator;
