//! Chuck: a pooled chunk allocator and the containers built on it.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the chuck sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use chuck::prelude::*;
//!
//! let pool = ChuckAllocator::<i32>::new();
//! let alias = pool.clone();
//!
//! let first = pool.allocate(10).unwrap();
//! pool.allocate(20).unwrap();
//!
//! // Aliases share chunks: this lands in the gap left in the first one.
//! let third = alias.allocate(5).unwrap();
//! assert_eq!(third.as_ptr(), first.as_ptr().wrapping_add(10));
//!
//! // Containers take any storage strategy. The list rebinds `pool` to its
//! // node type, which makes a fresh pool with the same config: nodes live
//! // in `list.node_allocator()`, not in `pool`.
//! let mut list = List::new_in(pool);
//! list.extend([3, 1, 2]);
//! list.sort();
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
//! assert_eq!(list.node_allocator().used(), 3);
//! assert_eq!(list.allocator().used(), 35);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`pool`] | `chuck-pool` | Chunk pool, heap allocator, allocator trait, config, errors |
//! | [`list`] | `chuck-list` | Doubly linked list, iterators, cursors |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Allocation strategies (`chuck-pool`).
///
/// [`pool::ChuckAllocator`] is the shared chunk pool;
/// [`pool::HeapAllocator`] passes through to the global allocator. Both
/// implement [`pool::ElementAllocator`].
pub use chuck_pool as pool;

/// Containers generic over an allocation strategy (`chuck-list`).
pub use chuck_list as list;

/// Common imports for typical chuck usage.
///
/// ```rust
/// use chuck::prelude::*;
/// ```
pub mod prelude {
    // Allocation
    pub use chuck_pool::{
        ChuckAllocator, ElementAllocator, HeapAllocator, PoolConfig, PoolError,
        DEFAULT_CHUNK_SIZE,
    };

    // Containers
    pub use chuck_list::{Cursor, CursorMut, List};
}
