//! The storage-strategy interface containers are generic over.

#![allow(unsafe_code)]

use std::ptr::{self, NonNull};

use crate::error::PoolError;

/// A typed source of raw, uninitialized element storage.
///
/// Containers take an `ElementAllocator` as a type parameter and call only
/// the operations below. Handles are cheap to clone; whether clones share
/// storage is up to the implementation and observable through
/// [`shares_storage`](ElementAllocator::shares_storage).
///
/// # Safety
///
/// Containers write through and link together the pointers this trait
/// hands out without further checks, so implementors must guarantee:
///
/// - A successful `allocate(n)` returns storage that is aligned for
///   `Value`, valid for reads and writes of `n` values, and disjoint from
///   every other live allocation of this allocator and of any allocator it
///   shares storage with.
/// - That storage stays valid until it is passed to `deallocate`, or, for
///   strategies whose `deallocate` does nothing, until the last handle
///   sharing the storage is dropped.
/// - `shares_storage(a, b)` returns `true` only if storage obtained from
///   either handle may be released through the other and stays valid as
///   long as either handle is alive.
/// - Clones of a handle and the value moved out of it keep all of the
///   above for storage handed out before the clone or move.
///
/// ```compile_fail
/// use std::ptr::NonNull;
/// use chuck_pool::{ElementAllocator, PoolError};
///
/// #[derive(Clone)]
/// struct Dangling;
///
/// // Rejected: implementing the trait requires `unsafe impl`.
/// impl ElementAllocator for Dangling {
///     type Value = u64;
///     type Rebind<U> = chuck_pool::HeapAllocator<U>;
///     fn rebind<U>(&self) -> Self::Rebind<U> { chuck_pool::HeapAllocator::new() }
///     fn allocate(&self, _n: usize) -> Result<NonNull<u64>, PoolError> {
///         Ok(NonNull::dangling())
///     }
///     unsafe fn deallocate(&self, _ptr: NonNull<u64>, _n: usize) {}
///     fn shares_storage(&self, _other: &Self) -> bool { true }
/// }
/// ```
pub unsafe trait ElementAllocator: Clone {
    /// The element type this allocator hands out storage for.
    type Value;

    /// The same strategy, handing out storage for `U` instead.
    ///
    /// A container of `T` uses this to allocate its internal node type.
    type Rebind<U>: ElementAllocator<Value = U>;

    /// Obtain an allocator of `U` configured like this one.
    fn rebind<U>(&self) -> Self::Rebind<U>;

    /// Hand out storage for `n` contiguous, uninitialized values.
    fn allocate(&self, n: usize) -> Result<NonNull<Self::Value>, PoolError>;

    /// Return storage previously obtained from [`allocate`] with the same `n`.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate(n)` on this allocator or on one that
    /// [`shares_storage`] with it, and must not be used afterwards. Any
    /// value in the range must already have been destroyed or moved out.
    ///
    /// [`allocate`]: ElementAllocator::allocate
    /// [`shares_storage`]: ElementAllocator::shares_storage
    unsafe fn deallocate(&self, ptr: NonNull<Self::Value>, n: usize);

    /// Whether storage from `self` may be released through `other` and
    /// vice versa.
    fn shares_storage(&self, other: &Self) -> bool;

    /// Move `value` into the uninitialized slot at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes and properly aligned. Any value
    /// previously at `ptr` is overwritten without being dropped.
    unsafe fn construct_at<U>(&self, ptr: NonNull<U>, value: U) {
        // SAFETY: upheld by the caller.
        unsafe { ptr.as_ptr().write(value) }
    }

    /// Run the destructor of the value at `ptr` without releasing storage.
    ///
    /// # Safety
    ///
    /// `ptr` must point to an initialized value that is not used again
    /// until it is re-initialized.
    unsafe fn destroy_at<U>(&self, ptr: NonNull<U>) {
        // SAFETY: upheld by the caller.
        unsafe { ptr::drop_in_place(ptr.as_ptr()) }
    }
}
