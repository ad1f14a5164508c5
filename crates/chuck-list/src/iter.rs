//! Borrowing and owning iterators. All are double-ended, so reverse
//! traversal is `.rev()`.

#![allow(unsafe_code)]

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use chuck_pool::ElementAllocator;

use crate::list::{Link, List, Node};

/// Shared iterator over a [`List`].
pub struct Iter<'a, T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    _marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(head: Link<T>, tail: Link<T>, len: usize) -> Self {
        Self {
            head,
            tail,
            len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|node| {
            // SAFETY: `len > 0`, so `node` is a live node of the borrowed
            // list that has not been yielded from either end.
            let node = unsafe { &*node.as_ptr() };
            self.len -= 1;
            self.head = node.next;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.tail.map(|node| {
            // SAFETY: as in `next`.
            let node = unsafe { &*node.as_ptr() };
            self.len -= 1;
            self.tail = node.prev;
            &node.value
        })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Mutable iterator over a [`List`].
pub struct IterMut<'a, T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    _marker: PhantomData<&'a mut Node<T>>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(head: Link<T>, tail: Link<T>, len: usize) -> Self {
        Self {
            head,
            tail,
            len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|node| {
            // SAFETY: `len > 0`, so `node` is live and has not been yielded;
            // each node is yielded at most once, so the borrows are disjoint.
            let node = unsafe { &mut *node.as_ptr() };
            self.len -= 1;
            self.head = node.next;
            &mut node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        self.tail.map(|node| {
            // SAFETY: as in `next`.
            let node = unsafe { &mut *node.as_ptr() };
            self.len -= 1;
            self.tail = node.prev;
            &mut node.value
        })
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over a [`List`].
pub struct IntoIter<T, A>
where
    A: ElementAllocator<Value = T>,
{
    list: List<T, A>,
}

impl<T, A> IntoIter<T, A>
where
    A: ElementAllocator<Value = T>,
{
    pub(crate) fn new(list: List<T, A>) -> Self {
        Self { list }
    }
}

impl<T, A> Iterator for IntoIter<T, A>
where
    A: ElementAllocator<Value = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, A> DoubleEndedIterator for IntoIter<T, A>
where
    A: ElementAllocator<Value = T>,
{
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T, A> ExactSizeIterator for IntoIter<T, A> where A: ElementAllocator<Value = T> {}

impl<T, A> FusedIterator for IntoIter<T, A> where A: ElementAllocator<Value = T> {}

#[cfg(test)]
mod tests {
    use crate::List;
    use chuck_test_utils::DropCounter;

    #[test]
    fn iter_meets_in_the_middle() {
        let list: List<i32> = (1..=5).collect();
        let mut it = list.iter();
        assert_eq!(it.len(), 5);
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&5));
        assert_eq!(it.next(), Some(&2));
        assert_eq!(it.next_back(), Some(&4));
        assert_eq!(it.next(), Some(&3));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn iter_mut_edits_every_element() {
        let mut list: List<i32> = (1..=4).collect();
        for v in list.iter_mut() {
            *v *= 10;
        }
        for v in (&mut list).into_iter().rev().take(1) {
            *v += 1;
        }
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [10, 20, 30, 41]);
    }

    #[test]
    fn into_iter_yields_owned_values_from_both_ends() {
        let list: List<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let mut it = list.into_iter();
        assert_eq!(it.next_back().as_deref(), Some("c"));
        assert_eq!(it.collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn partially_consumed_into_iter_drops_the_rest() {
        let counter = DropCounter::new();
        let list: List<_> = (0..4).map(|i| counter.track(i)).collect();
        let mut it = list.into_iter();
        drop(it.next());
        assert_eq!(counter.drops(), 1);
        drop(it);
        assert_eq!(counter.drops(), 4);
    }

    #[test]
    fn iter_debug_shows_remaining() {
        let list: List<i32> = (1..=3).collect();
        let mut it = list.iter();
        it.next();
        assert_eq!(format!("{it:?}"), "[2, 3]");
    }
}
