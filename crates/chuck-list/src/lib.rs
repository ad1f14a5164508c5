//! A doubly linked list generic over chuck storage strategies.
//!
//! [`List`] allocates one node per element through an
//! [`ElementAllocator`](chuck_pool::ElementAllocator). With the default
//! [`HeapAllocator`](chuck_pool::HeapAllocator) every node is an
//! individual heap allocation; with a
//! [`ChuckAllocator`](chuck_pool::ChuckAllocator) nodes are bump-allocated
//! from a shared pool and released together when the pool's last handle
//! goes away.
//!
//! # Structure
//!
//! ```text
//! List<T, A>
//! ├── head / tail links, len
//! ├── A (allocator as given)
//! └── A::Rebind<Node<T>> (node allocator)
//!     └── Node { value, prev, next }
//! ```
//!
//! Positional editing (insert, erase, splice in the middle) goes through
//! [`CursorMut`]. Iterators are double-ended; reverse iteration is
//! `.rev()`.
//!
//! Moving elements between lists relinks nodes only when both node
//! allocators share storage. Otherwise values move into fresh nodes, so no
//! node outlives the pool that holds it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod cursor;
pub mod iter;
pub mod list;

pub use cursor::{Cursor, CursorMut};
pub use iter::{IntoIter, Iter, IterMut};
pub use list::{List, Node};
