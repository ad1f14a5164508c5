//! The list itself: node storage, linking, and whole-list operations.

#![allow(unsafe_code)]

use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use chuck_pool::{ElementAllocator, HeapAllocator, PoolError};

use crate::cursor::{Cursor, CursorMut};
use crate::iter::{IntoIter, Iter, IterMut};

pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

/// A list node as seen by the node allocator.
///
/// Opaque outside this crate; it only appears in the type of
/// [`List::node_allocator`].
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) prev: Link<T>,
    pub(crate) next: Link<T>,
}

/// A doubly linked list whose nodes come from an [`ElementAllocator`].
///
/// `A` is an allocator of `T`; nodes are allocated through its rebound
/// form `A::Rebind<Node<T>>`.
///
/// ```
/// use chuck_list::List;
/// use chuck_pool::ChuckAllocator;
///
/// let mut list = List::new_in(ChuckAllocator::<u32>::new());
/// list.push_back(2);
/// list.push_back(1);
/// list.push_front(3);
/// list.sort();
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
/// assert_eq!(list.node_allocator().chunk_count(), 1);
/// ```
pub struct List<T, A = HeapAllocator<T>>
where
    A: ElementAllocator<Value = T>,
{
    pub(crate) head: Link<T>,
    pub(crate) tail: Link<T>,
    pub(crate) len: usize,
    alloc: A,
    nodes: A::Rebind<Node<T>>,
    _owns: PhantomData<Node<T>>,
}

#[cold]
fn node_alloc_failed(err: PoolError) -> ! {
    panic!("list node allocation failed: {err}")
}

impl<T, A> List<T, A>
where
    A: ElementAllocator<Value = T> + Default,
{
    /// Create an empty list with a default-constructed allocator.
    pub fn new() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A> List<T, A>
where
    A: ElementAllocator<Value = T>,
{
    /// Create an empty list whose nodes come from `alloc` rebound to the
    /// node type.
    pub fn new_in(alloc: A) -> Self {
        let nodes = alloc.rebind();
        Self::from_parts(alloc, nodes)
    }

    fn from_parts(alloc: A, nodes: A::Rebind<Node<T>>) -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            alloc,
            nodes,
            _owns: PhantomData,
        }
    }

    /// Create a list of `count` clones of `value`.
    pub fn from_elem(count: usize, value: T, alloc: A) -> Self
    where
        T: Clone,
    {
        let mut list = Self::new_in(alloc);
        list.resize_with(count, || value.clone());
        list
    }

    /// Create a list of `count` default values.
    pub fn with_len(count: usize, alloc: A) -> Self
    where
        T: Default,
    {
        let mut list = Self::new_in(alloc);
        list.resize_with(count, T::default);
        list
    }

    /// The allocator this list was created with.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// The allocator nodes are actually drawn from.
    pub fn node_allocator(&self) -> &A::Rebind<Node<T>> {
        &self.nodes
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Upper bound on the number of elements the address space can hold.
    pub fn max_len(&self) -> usize {
        isize::MAX as usize / mem::size_of::<Node<T>>().max(1)
    }

    /// The first element, if any.
    pub fn front(&self) -> Option<&T> {
        // SAFETY: linked nodes are initialized and owned by `self`.
        self.head.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Mutable access to the first element.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        // SAFETY: as above; `&mut self` guarantees exclusivity.
        self.head.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// The last element, if any.
    pub fn back(&self) -> Option<&T> {
        // SAFETY: linked nodes are initialized and owned by `self`.
        self.tail.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Mutable access to the last element.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        // SAFETY: as above; `&mut self` guarantees exclusivity.
        self.tail.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Whether any element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Front-to-back iterator over shared references.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.head, self.tail, self.len)
    }

    /// Front-to-back iterator over mutable references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.head, self.tail, self.len)
    }

    /// Read-only cursor on the first element (the ghost position if empty).
    pub fn cursor_front(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, self.head, 0)
    }

    /// Read-only cursor on the last element (the ghost position if empty).
    pub fn cursor_back(&self) -> Cursor<'_, T, A> {
        let index = self.len.saturating_sub(1);
        Cursor::new(self, self.tail, index)
    }

    /// Editing cursor on the first element (the ghost position if empty).
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, A> {
        let head = self.head;
        CursorMut::new(self, head, 0)
    }

    /// Editing cursor on the last element (the ghost position if empty).
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T, A> {
        let tail = self.tail;
        let index = self.len.saturating_sub(1);
        CursorMut::new(self, tail, index)
    }

    /// Append `value`.
    ///
    /// # Panics
    ///
    /// If the node allocator fails; see [`try_push_back`](List::try_push_back).
    pub fn push_back(&mut self, value: T) {
        if let Err(err) = self.try_push_back(value) {
            node_alloc_failed(err);
        }
    }

    /// Append `value`, reporting allocator failure instead of panicking.
    pub fn try_push_back(&mut self, value: T) -> Result<(), PoolError> {
        let node = self.try_new_node(value)?;
        // SAFETY: `node` is fresh and detached.
        unsafe { self.link_before(node, None) };
        Ok(())
    }

    /// Prepend `value`.
    ///
    /// # Panics
    ///
    /// If the node allocator fails; see [`try_push_front`](List::try_push_front).
    pub fn push_front(&mut self, value: T) {
        if let Err(err) = self.try_push_front(value) {
            node_alloc_failed(err);
        }
    }

    /// Prepend `value`, reporting allocator failure instead of panicking.
    pub fn try_push_front(&mut self, value: T) -> Result<(), PoolError> {
        let node = self.try_new_node(value)?;
        // SAFETY: `node` is fresh and detached; `head` is linked or `None`.
        unsafe { self.link_before(node, self.head) };
        Ok(())
    }

    /// Remove and return the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        let node = self.tail?;
        // SAFETY: `node` is linked into `self`; it is detached before
        // being freed.
        unsafe {
            self.unlink(node);
            Some(self.free_node(node))
        }
    }

    /// Remove and return the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        let node = self.head?;
        // SAFETY: as in `pop_back`.
        unsafe {
            self.unlink(node);
            Some(self.free_node(node))
        }
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        while let Some(node) = self.head {
            // SAFETY: `node` is linked into `self`; it is detached before
            // being destroyed.
            unsafe {
                self.unlink(node);
                self.destroy_node(node);
            }
        }
    }

    /// Grow with default values or shrink from the back to `count`.
    pub fn resize(&mut self, count: usize)
    where
        T: Default,
    {
        self.resize_with(count, T::default);
    }

    /// Grow with values from `f` or shrink from the back to `count`.
    pub fn resize_with(&mut self, count: usize, mut f: impl FnMut() -> T) {
        while self.len > count {
            self.pop_back();
        }
        while self.len < count {
            self.push_back(f());
        }
    }

    /// Exchange contents and allocators with `other`.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Move every element of `other` to the back of `self`, leaving `other`
    /// empty.
    ///
    /// Nodes are relinked when both lists draw from the same storage;
    /// otherwise values are moved into fresh nodes.
    pub fn append(&mut self, other: &mut Self) {
        if self.shares_node_storage(other) {
            // SAFETY: both lists' nodes may be released through either
            // allocator.
            unsafe { self.splice_nodes_before(other, None) };
        } else {
            while let Some(value) = other.pop_front() {
                self.push_back(value);
            }
        }
    }

    /// Merge the sorted `other` into sorted `self`, leaving `other` empty.
    ///
    /// Stable: among equal elements, those already in `self` come first.
    pub fn merge(&mut self, other: &mut Self)
    where
        T: Ord,
    {
        self.merge_by(other, |a, b| a < b);
    }

    /// [`merge`](List::merge) with a custom strict ordering.
    pub fn merge_by(&mut self, other: &mut Self, mut is_less: impl FnMut(&T, &T) -> bool) {
        let shared = self.shares_node_storage(other);
        let mut at = self.head;
        while let Some(incoming) = other.head {
            // SAFETY: `at` and `incoming` are linked into `self` and
            // `other` respectively; nodes are detached before relinking.
            unsafe {
                while let Some(node) = at {
                    if is_less(&(*incoming.as_ptr()).value, &(*node.as_ptr()).value) {
                        break;
                    }
                    at = (*node.as_ptr()).next;
                }
                if at.is_none() {
                    break;
                }
                other.unlink(incoming);
                let node = if shared {
                    incoming
                } else {
                    let value = other.free_node(incoming);
                    self.new_node(value)
                };
                self.link_before(node, at);
            }
        }
        self.append(other);
    }

    /// Drop every element equal to `value`. Returns how many were dropped.
    pub fn remove(&mut self, value: &T) -> usize
    where
        T: PartialEq,
    {
        let before = self.len;
        self.retain(|v| v != value);
        before - self.len
    }

    /// Keep only the elements for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        let mut cur = self.head;
        while let Some(node) = cur {
            // SAFETY: `node` is linked into `self`; `next` is read before
            // `node` may be destroyed.
            unsafe {
                cur = (*node.as_ptr()).next;
                if !keep(&(*node.as_ptr()).value) {
                    self.unlink(node);
                    self.destroy_node(node);
                }
            }
        }
    }

    /// Reverse the order of the elements in place.
    pub fn reverse(&mut self) {
        let mut cur = self.head;
        while let Some(node) = cur {
            // SAFETY: `node` is linked into `self` and uniquely borrowed.
            unsafe {
                let node = &mut *node.as_ptr();
                mem::swap(&mut node.prev, &mut node.next);
                cur = node.prev;
            }
        }
        mem::swap(&mut self.head, &mut self.tail);
    }

    /// Drop consecutive duplicates, keeping the first of each run.
    pub fn dedup(&mut self)
    where
        T: PartialEq,
    {
        self.dedup_by(|a, b| a == b);
    }

    /// [`dedup`](List::dedup) with a custom equivalence. `same(kept, next)`
    /// decides whether `next` is a duplicate of the run's first element.
    pub fn dedup_by(&mut self, mut same: impl FnMut(&T, &T) -> bool) {
        let Some(mut keep) = self.head else {
            return;
        };
        // SAFETY: `keep` and `next` are linked into `self`; `next` is
        // detached before it is destroyed.
        unsafe {
            while let Some(next) = (*keep.as_ptr()).next {
                if same(&(*keep.as_ptr()).value, &(*next.as_ptr()).value) {
                    self.unlink(next);
                    self.destroy_node(next);
                } else {
                    keep = next;
                }
            }
        }
    }

    /// Stable sort in ascending order.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp);
    }

    /// Stable sort with a comparator. Nodes are relinked, values never
    /// move; if `compare` panics the list is left unchanged.
    pub fn sort_by(&mut self, mut compare: impl FnMut(&T, &T) -> std::cmp::Ordering) {
        if self.len < 2 {
            return;
        }
        let mut order = Vec::with_capacity(self.len);
        let mut cur = self.head;
        while let Some(node) = cur {
            order.push(node);
            // SAFETY: `node` is linked into `self`.
            cur = unsafe { (*node.as_ptr()).next };
        }
        // SAFETY: every pointer in `order` is a live node of `self`.
        order.sort_by(|a, b| unsafe { compare(&(*a.as_ptr()).value, &(*b.as_ptr()).value) });

        self.head = None;
        self.tail = None;
        self.len = 0;
        for node in order {
            // SAFETY: the chain was reset above, so every node is relinked
            // exactly once.
            unsafe { self.link_before(node, None) };
        }
    }

    pub(crate) fn shares_node_storage(&self, other: &Self) -> bool {
        self.nodes.shares_storage(&other.nodes)
    }

    fn try_new_node(&self, value: T) -> Result<NonNull<Node<T>>, PoolError> {
        let node = self.nodes.allocate(1)?;
        let init = Node {
            value,
            prev: None,
            next: None,
        };
        // SAFETY: `node` is fresh, uninitialized storage for one node.
        unsafe { self.nodes.construct_at(node, init) };
        Ok(node)
    }

    pub(crate) fn new_node(&self, value: T) -> NonNull<Node<T>> {
        match self.try_new_node(value) {
            Ok(node) => node,
            Err(err) => node_alloc_failed(err),
        }
    }

    /// Link a detached node immediately before `at`, or at the back when
    /// `at` is `None`.
    ///
    /// # Safety
    ///
    /// `node` must be detached and releasable through `self.nodes`; `at`
    /// must be `None` or linked into `self`.
    pub(crate) unsafe fn link_before(&mut self, node: NonNull<Node<T>>, at: Link<T>) {
        // SAFETY: upheld by the caller.
        unsafe {
            let prev = match at {
                Some(at) => (*at.as_ptr()).prev,
                None => self.tail,
            };
            (*node.as_ptr()).prev = prev;
            (*node.as_ptr()).next = at;
            match prev {
                Some(prev) => (*prev.as_ptr()).next = Some(node),
                None => self.head = Some(node),
            }
            match at {
                Some(at) => (*at.as_ptr()).prev = Some(node),
                None => self.tail = Some(node),
            }
        }
        self.len += 1;
    }

    /// Detach `node` from the chain without freeing it.
    ///
    /// # Safety
    ///
    /// `node` must be linked into `self`.
    pub(crate) unsafe fn unlink(&mut self, node: NonNull<Node<T>>) {
        // SAFETY: upheld by the caller.
        unsafe {
            let node = &mut *node.as_ptr();
            match node.prev {
                Some(prev) => (*prev.as_ptr()).next = node.next,
                None => self.head = node.next,
            }
            match node.next {
                Some(next) => (*next.as_ptr()).prev = node.prev,
                None => self.tail = node.prev,
            }
            node.prev = None;
            node.next = None;
        }
        self.len -= 1;
    }

    /// Move the value out of a detached node and release the node.
    ///
    /// # Safety
    ///
    /// `node` must be detached, initialized, and not used again.
    pub(crate) unsafe fn free_node(&self, node: NonNull<Node<T>>) -> T {
        // SAFETY: upheld by the caller; the read moves the value out, so
        // the slot is logically uninitialized before deallocation.
        unsafe {
            let Node { value, .. } = node.as_ptr().read();
            self.nodes.deallocate(node, 1);
            value
        }
    }

    /// Drop the value in a detached node and release the node.
    ///
    /// # Safety
    ///
    /// Same as [`free_node`](List::free_node).
    unsafe fn destroy_node(&self, node: NonNull<Node<T>>) {
        // SAFETY: upheld by the caller.
        unsafe {
            self.nodes.destroy_at(node);
            self.nodes.deallocate(node, 1);
        }
    }

    /// Relink every node of `other` before `at` (the back when `None`),
    /// leaving `other` empty.
    ///
    /// # Safety
    ///
    /// `other`'s nodes must be releasable through `self.nodes`; `at` must
    /// be `None` or linked into `self`.
    pub(crate) unsafe fn splice_nodes_before(&mut self, other: &mut Self, at: Link<T>) {
        let (Some(first), Some(last)) = (other.head.take(), other.tail.take()) else {
            return;
        };
        let count = mem::take(&mut other.len);
        // SAFETY: upheld by the caller; `first..=last` is a well-formed
        // chain detached from `other` above.
        unsafe {
            let prev = match at {
                Some(at) => (*at.as_ptr()).prev,
                None => self.tail,
            };
            (*first.as_ptr()).prev = prev;
            (*last.as_ptr()).next = at;
            match prev {
                Some(prev) => (*prev.as_ptr()).next = Some(first),
                None => self.head = Some(first),
            }
            match at {
                Some(at) => (*at.as_ptr()).prev = Some(last),
                None => self.tail = Some(last),
            }
        }
        self.len += count;
    }
}

impl<T, A> Drop for List<T, A>
where
    A: ElementAllocator<Value = T>,
{
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, A> Default for List<T, A>
where
    A: ElementAllocator<Value = T> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A> Clone for List<T, A>
where
    T: Clone,
    A: ElementAllocator<Value = T>,
{
    /// Element-wise copy whose nodes come from the same node allocator.
    fn clone(&self) -> Self {
        let mut out = Self::from_parts(self.alloc.clone(), self.nodes.clone());
        out.extend(self.iter().cloned());
        out
    }
}

impl<T, A> Extend<T> for List<T, A>
where
    A: ElementAllocator<Value = T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T, A> Extend<&'a T> for List<T, A>
where
    T: Copy + 'a,
    A: ElementAllocator<Value = T>,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, A> FromIterator<T> for List<T, A>
where
    A: ElementAllocator<Value = T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, A> IntoIterator for List<T, A>
where
    A: ElementAllocator<Value = T>,
{
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        IntoIter::new(self)
    }
}

impl<'a, T, A> IntoIterator for &'a List<T, A>
where
    A: ElementAllocator<Value = T>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, A> IntoIterator for &'a mut List<T, A>
where
    A: ElementAllocator<Value = T>,
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T, A> PartialEq for List<T, A>
where
    T: PartialEq,
    A: ElementAllocator<Value = T>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T, A> Eq for List<T, A>
where
    T: Eq,
    A: ElementAllocator<Value = T>,
{
}

impl<T, A> fmt::Debug for List<T, A>
where
    T: fmt::Debug,
    A: ElementAllocator<Value = T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chuck_pool::ChuckAllocator;
    use chuck_test_utils::DropCounter;

    fn collect<T: Clone, A: ElementAllocator<Value = T>>(list: &List<T, A>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn push_and_pop_both_ends() {
        let mut list: List<i32> = List::new();
        list.push_back(2);
        list.push_back(3);
        list.push_front(1);
        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&3));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn front_and_back_mut_edit_in_place() {
        let mut list: List<i32> = [1, 2, 3].into_iter().collect();
        *list.front_mut().unwrap() = 10;
        *list.back_mut().unwrap() += 5;
        assert_eq!(collect(&list), [10, 2, 8]);
    }

    #[test]
    fn from_elem_and_with_len() {
        let list = List::from_elem(3, "x".to_string(), HeapAllocator::new());
        assert_eq!(collect(&list), ["x", "x", "x"]);
        let zeros = List::<u8>::with_len(4, HeapAllocator::new());
        assert_eq!(collect(&zeros), [0, 0, 0, 0]);
    }

    #[test]
    fn resize_grows_and_shrinks() {
        let mut list: List<i32> = [1, 2, 3, 4].into_iter().collect();
        list.resize(2);
        assert_eq!(collect(&list), [1, 2]);
        list.resize(4);
        assert_eq!(collect(&list), [1, 2, 0, 0]);
    }

    #[test]
    fn clear_drops_every_value_once() {
        let counter = DropCounter::new();
        let mut list: List<_> = List::new();
        for i in 0..5 {
            list.push_back(counter.track(i));
        }
        list.clear();
        assert_eq!(counter.drops(), 5);
        assert!(list.is_empty());
        list.push_back(counter.track(9));
        drop(list);
        assert_eq!(counter.drops(), 6);
    }

    #[test]
    fn remove_drops_all_matches() {
        let mut list: List<i32> = [1, 2, 1, 3, 1].into_iter().collect();
        assert_eq!(list.remove(&1), 3);
        assert_eq!(collect(&list), [2, 3]);
        assert_eq!(list.remove(&7), 0);
    }

    #[test]
    fn retain_keeps_order() {
        let mut list: List<i32> = (1..=10).collect();
        list.retain(|v| v % 3 == 0);
        assert_eq!(collect(&list), [3, 6, 9]);
        assert_eq!(list.back(), Some(&9));
    }

    #[test]
    fn reverse_relinks_both_directions() {
        let mut list: List<i32> = (1..=4).collect();
        list.reverse();
        assert_eq!(collect(&list), [4, 3, 2, 1]);
        assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
        let mut empty: List<i32> = List::new();
        empty.reverse();
        assert!(empty.is_empty());
    }

    #[test]
    fn dedup_removes_consecutive_runs_only() {
        let mut list: List<i32> = [1, 1, 2, 2, 2, 1, 3, 3].into_iter().collect();
        list.dedup();
        assert_eq!(collect(&list), [1, 2, 1, 3]);
        assert_eq!(list.back(), Some(&3));
    }

    #[test]
    fn sort_is_stable() {
        let mut list: List<(i32, char)> =
            [(2, 'a'), (1, 'b'), (2, 'c'), (0, 'd'), (1, 'e')].into_iter().collect();
        list.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            collect(&list),
            [(0, 'd'), (1, 'b'), (1, 'e'), (2, 'a'), (2, 'c')]
        );
        assert_eq!(list.iter().rev().next(), Some(&(2, 'c')));
    }

    #[test]
    fn merge_interleaves_sorted_lists() {
        let mut a: List<i32> = [1, 3, 5, 7].into_iter().collect();
        let mut b: List<i32> = [0, 3, 4, 9, 10].into_iter().collect();
        a.merge(&mut b);
        assert_eq!(collect(&a), [0, 1, 3, 3, 4, 5, 7, 9, 10]);
        assert!(b.is_empty());
        assert_eq!(a.len(), 9);
    }

    #[test]
    fn merge_into_empty_takes_everything() {
        let mut a: List<i32> = List::new();
        let mut b: List<i32> = [1, 2].into_iter().collect();
        a.merge(&mut b);
        assert_eq!(collect(&a), [1, 2]);
    }

    #[test]
    fn append_between_separate_pools_moves_values() {
        let mut a = List::new_in(ChuckAllocator::<i32>::new());
        let mut b = List::new_in(ChuckAllocator::<i32>::new());
        a.extend([1, 2]);
        b.extend([3, 4]);
        assert!(!a.shares_node_storage(&b));
        a.append(&mut b);
        drop(b);
        assert_eq!(collect(&a), [1, 2, 3, 4]);
        assert_eq!(a.node_allocator().used(), 4);
    }

    #[test]
    fn append_within_one_pool_relinks_nodes() {
        let mut a = List::new_in(ChuckAllocator::<i32>::new());
        a.extend([1, 2]);
        let mut b = a.clone();
        b.clear();
        b.extend([3, 4]);
        assert!(a.shares_node_storage(&b));
        let used = a.node_allocator().used();
        a.append(&mut b);
        assert_eq!(collect(&a), [1, 2, 3, 4]);
        assert_eq!(a.node_allocator().used(), used);
    }

    #[test]
    fn clone_draws_nodes_from_same_pool() {
        let mut list = List::new_in(ChuckAllocator::<u8>::new());
        list.extend([1, 2, 3]);
        let copy = list.clone();
        assert_eq!(copy, list);
        assert!(copy.node_allocator().shares_storage(list.node_allocator()));
        assert_eq!(list.node_allocator().used(), 6);
    }

    #[test]
    fn swap_exchanges_contents() {
        let mut a: List<i32> = [1].into_iter().collect();
        let mut b: List<i32> = [2, 3].into_iter().collect();
        a.swap(&mut b);
        assert_eq!(collect(&a), [2, 3]);
        assert_eq!(collect(&b), [1]);
    }

    #[test]
    fn pool_backed_list_never_reuses_popped_nodes() {
        let mut list = List::new_in(ChuckAllocator::<u64>::new());
        list.push_back(1);
        list.pop_back();
        list.push_back(2);
        assert_eq!(list.node_allocator().used(), 2);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn debug_lists_elements() {
        let list: List<i32> = [1, 2].into_iter().collect();
        assert_eq!(format!("{list:?}"), "[1, 2]");
    }

    #[test]
    fn max_len_is_positive() {
        let list: List<u64> = List::new();
        assert!(list.max_len() > 0);
    }
}
