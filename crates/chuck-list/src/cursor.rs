//! Positional access and in-place editing.
//!
//! A cursor rests either on an element or on the "ghost" position, which
//! sits between the back and the front of the list. Moving past either end
//! lands on the ghost; moving again wraps around. The ghost's index is the
//! list length.

#![allow(unsafe_code)]

use chuck_pool::ElementAllocator;

use crate::list::{Link, List};

/// Read-only cursor over a [`List`].
pub struct Cursor<'a, T, A>
where
    A: ElementAllocator<Value = T>,
{
    index: usize,
    current: Link<T>,
    list: &'a List<T, A>,
}

impl<'a, T, A> Cursor<'a, T, A>
where
    A: ElementAllocator<Value = T>,
{
    pub(crate) fn new(list: &'a List<T, A>, current: Link<T>, index: usize) -> Self {
        Self {
            index,
            current,
            list,
        }
    }

    /// Position of the current element, `None` on the ghost.
    pub fn index(&self) -> Option<usize> {
        self.current.map(|_| self.index)
    }

    /// The element under the cursor, `None` on the ghost.
    pub fn current(&self) -> Option<&'a T> {
        // SAFETY: `current` is a live node of the borrowed list.
        self.current.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// The element after the cursor. From the ghost, the front.
    pub fn peek_next(&self) -> Option<&'a T> {
        let next = match self.current {
            // SAFETY: `node` is a live node of the borrowed list.
            Some(node) => unsafe { (*node.as_ptr()).next },
            None => self.list.head,
        };
        // SAFETY: linked nodes are live for the borrow.
        next.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// The element before the cursor. From the ghost, the back.
    pub fn peek_prev(&self) -> Option<&'a T> {
        let prev = match self.current {
            // SAFETY: `node` is a live node of the borrowed list.
            Some(node) => unsafe { (*node.as_ptr()).prev },
            None => self.list.tail,
        };
        // SAFETY: linked nodes are live for the borrow.
        prev.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Step towards the back, through the ghost and around to the front.
    pub fn move_next(&mut self) {
        match self.current {
            Some(node) => {
                // SAFETY: `node` is a live node of the borrowed list.
                self.current = unsafe { (*node.as_ptr()).next };
                self.index += 1;
            }
            None => {
                self.current = self.list.head;
                self.index = 0;
            }
        }
    }

    /// Step towards the front, through the ghost and around to the back.
    pub fn move_prev(&mut self) {
        match self.current {
            Some(node) => {
                // SAFETY: `node` is a live node of the borrowed list.
                self.current = unsafe { (*node.as_ptr()).prev };
                self.index = self.index.checked_sub(1).unwrap_or(self.list.len);
            }
            None => {
                self.current = self.list.tail;
                self.index = self.list.len.saturating_sub(1);
            }
        }
    }
}

impl<T, A> Clone for Cursor<'_, T, A>
where
    A: ElementAllocator<Value = T>,
{
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            current: self.current,
            list: self.list,
        }
    }
}

/// Editing cursor over a [`List`].
///
/// Insertions and removals happen relative to the current position, so
/// building or pruning the middle of a list never walks it twice.
pub struct CursorMut<'a, T, A>
where
    A: ElementAllocator<Value = T>,
{
    index: usize,
    current: Link<T>,
    list: &'a mut List<T, A>,
}

impl<'a, T, A> CursorMut<'a, T, A>
where
    A: ElementAllocator<Value = T>,
{
    pub(crate) fn new(list: &'a mut List<T, A>, current: Link<T>, index: usize) -> Self {
        Self {
            index,
            current,
            list,
        }
    }

    /// Position of the current element, `None` on the ghost.
    pub fn index(&self) -> Option<usize> {
        self.current.map(|_| self.index)
    }

    /// The element under the cursor, `None` on the ghost.
    pub fn current(&mut self) -> Option<&mut T> {
        // SAFETY: `current` is a live node of the exclusively borrowed list.
        self.current.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// The element after the cursor. From the ghost, the front.
    pub fn peek_next(&mut self) -> Option<&mut T> {
        let next = match self.current {
            // SAFETY: `node` is a live node of the borrowed list.
            Some(node) => unsafe { (*node.as_ptr()).next },
            None => self.list.head,
        };
        // SAFETY: linked nodes are live; `&mut self` keeps the borrow unique.
        next.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// The element before the cursor. From the ghost, the back.
    pub fn peek_prev(&mut self) -> Option<&mut T> {
        let prev = match self.current {
            // SAFETY: `node` is a live node of the borrowed list.
            Some(node) => unsafe { (*node.as_ptr()).prev },
            None => self.list.tail,
        };
        // SAFETY: linked nodes are live; `&mut self` keeps the borrow unique.
        prev.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Step towards the back, through the ghost and around to the front.
    pub fn move_next(&mut self) {
        match self.current {
            Some(node) => {
                // SAFETY: `node` is a live node of the borrowed list.
                self.current = unsafe { (*node.as_ptr()).next };
                self.index += 1;
            }
            None => {
                self.current = self.list.head;
                self.index = 0;
            }
        }
    }

    /// Step towards the front, through the ghost and around to the back.
    pub fn move_prev(&mut self) {
        match self.current {
            Some(node) => {
                // SAFETY: `node` is a live node of the borrowed list.
                self.current = unsafe { (*node.as_ptr()).prev };
                self.index = self.index.checked_sub(1).unwrap_or(self.list.len);
            }
            None => {
                self.current = self.list.tail;
                self.index = self.list.len.saturating_sub(1);
            }
        }
    }

    /// A read-only view at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, T, A> {
        Cursor::new(&*self.list, self.current, self.index)
    }

    /// Insert `value` before the current element, or at the back when on
    /// the ghost. The cursor stays where it was.
    pub fn insert_before(&mut self, value: T) {
        let node = self.list.new_node(value);
        // SAFETY: `node` is fresh; `current` is linked or the ghost.
        unsafe { self.list.link_before(node, self.current) };
        self.index += 1;
    }

    /// Insert `value` after the current element, or at the front when on
    /// the ghost. The cursor stays where it was.
    pub fn insert_after(&mut self, value: T) {
        let node = self.list.new_node(value);
        let at = match self.current {
            // SAFETY: `current` is a live node of the borrowed list.
            Some(current) => unsafe { (*current.as_ptr()).next },
            None => self.list.head,
        };
        // SAFETY: `node` is fresh; `at` is linked or `None`.
        unsafe { self.list.link_before(node, at) };
        if self.current.is_none() {
            self.index = self.list.len;
        }
    }

    /// Insert `count` clones of `value` before the current position.
    pub fn insert_n_before(&mut self, count: usize, value: &T)
    where
        T: Clone,
    {
        for _ in 0..count {
            self.insert_before(value.clone());
        }
    }

    /// Remove and return the current element, moving to the next one.
    ///
    /// Returns `None` on the ghost.
    pub fn remove_current(&mut self) -> Option<T> {
        let node = self.current?;
        // SAFETY: `node` is linked into the list; its successor is read
        // before it is detached and freed.
        unsafe {
            self.current = (*node.as_ptr()).next;
            self.list.unlink(node);
            Some(self.list.free_node(node))
        }
    }

    /// Move every element of `other` in before the current position (at the
    /// back when on the ghost).
    ///
    /// Nodes are relinked when both lists draw from the same storage;
    /// otherwise values are moved into fresh nodes.
    pub fn splice_before(&mut self, mut other: List<T, A>) {
        if self.list.shares_node_storage(&other) {
            let count = other.len();
            // SAFETY: both lists' nodes may be released through either
            // allocator; `current` is linked or the ghost.
            unsafe { self.list.splice_nodes_before(&mut other, self.current) };
            self.index += count;
        } else {
            while let Some(value) = other.pop_front() {
                self.insert_before(value);
            }
        }
    }
}
