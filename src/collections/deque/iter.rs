//! Iterators over a [`SegDeque`].
//!
//! `Iter` and `IterMut` walk a `[head, tail)` window of raw cursors and keep
//! an exact remaining count, so `len`, `nth` and `nth_back` are O(1).

use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::slice;

use super::cursor::RawCursor;
use super::SegDeque;

/// Shared iterator, created by [`SegDeque::iter`].
pub struct Iter<'a, T> {
    head: RawCursor<T>,
    tail: RawCursor<T>,
    remaining: usize,
    marker: PhantomData<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    /// # Safety
    /// `[head, tail)` must be the `remaining` live elements of a deque
    /// borrowed for `'a`.
    pub(super) unsafe fn new(head: RawCursor<T>, tail: RawCursor<T>, remaining: usize) -> Self {
        Self {
            head,
            tail,
            remaining,
            marker: PhantomData,
        }
    }
}

// SAFETY: behaves like `&'a [T]`.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

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

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // SAFETY: `head` is live; stepping lands at most on `tail`.
        unsafe {
            let item = &*self.head.cur;
            self.head.step_forward();
            Some(item)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.remaining {
            self.head = self.tail;
            self.remaining = 0;
            return None;
        }
        // SAFETY: `n < remaining`, the jump stays inside `[head, tail)`.
        unsafe { self.head.offset(n as isize) };
        self.remaining -= n;
        self.next()
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // SAFETY: a live element precedes `tail`.
        unsafe {
            self.tail.step_backward();
            Some(&*self.tail.cur)
        }
    }

    fn nth_back(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.remaining {
            self.tail = self.head;
            self.remaining = 0;
            return None;
        }
        // SAFETY: `n < remaining`.
        unsafe { self.tail.offset(-(n as isize)) };
        self.remaining -= n;
        self.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable iterator, created by [`SegDeque::iter_mut`].
pub struct IterMut<'a, T> {
    head: RawCursor<T>,
    tail: RawCursor<T>,
    remaining: usize,
    marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    /// # Safety
    /// As [`Iter::new`], with the deque borrowed mutably for `'a`.
    pub(super) unsafe fn new(head: RawCursor<T>, tail: RawCursor<T>, remaining: usize) -> Self {
        Self {
            head,
            tail,
            remaining,
            marker: PhantomData,
        }
    }
}

// SAFETY: behaves like `&'a mut [T]`.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // SAFETY: each live element is yielded at most once.
        unsafe {
            let item = &mut *self.head.cur;
            self.head.step_forward();
            Some(item)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn nth(&mut self, n: usize) -> Option<&'a mut T> {
        if n >= self.remaining {
            self.head = self.tail;
            self.remaining = 0;
            return None;
        }
        // SAFETY: `n < remaining`.
        unsafe { self.head.offset(n as isize) };
        self.remaining -= n;
        self.next()
    }

    fn last(mut self) -> Option<&'a mut T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // SAFETY: a live, not yet yielded element precedes `tail`.
        unsafe {
            self.tail.step_backward();
            Some(&mut *self.tail.cur)
        }
    }

    fn nth_back(&mut self, n: usize) -> Option<&'a mut T> {
        if n >= self.remaining {
            self.tail = self.head;
            self.remaining = 0;
            return None;
        }
        // SAFETY: `n < remaining`.
        unsafe { self.tail.offset(-(n as isize)) };
        self.remaining -= n;
        self.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator, created by [`SegDeque::into_iter`].
///
/// Buffers are released as the iterator drains past them.
pub struct IntoIter<T> {
    inner: SegDeque<T>,
}

impl<T> IntoIter<T> {
    pub(super) fn new(inner: SegDeque<T>) -> Self {
        Self { inner }
    }
}

impl<T: Clone> Clone for IntoIter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.inner.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

/// Per-buffer slices of the live elements, created by
/// [`SegDeque::segments`].
pub struct Segments<'a, T> {
    head: RawCursor<T>,
    tail: RawCursor<T>,
    marker: PhantomData<&'a T>,
}

impl<T> Segments<'_, T> {
    /// # Safety
    /// `[head, tail)` must be live elements of a deque borrowed for `'a`.
    pub(super) unsafe fn new(head: RawCursor<T>, tail: RawCursor<T>) -> Self {
        Self {
            head,
            tail,
            marker: PhantomData,
        }
    }
}

// SAFETY: behaves like `&'a [T]`.
unsafe impl<T: Sync> Send for Segments<'_, T> {}
unsafe impl<T: Sync> Sync for Segments<'_, T> {}

impl<T> Clone for Segments<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Iterator for Segments<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<&'a [T]> {
        if self.head == self.tail {
            return None;
        }
        // SAFETY: `head < tail`; the run ends at `tail` or at the end of the
        // head buffer, and the next buffer exists while `head.node < tail.node`.
        unsafe {
            if self.head.node == self.tail.node {
                let len = self.tail.cur.offset_from(self.head.cur) as usize;
                let run = slice::from_raw_parts(self.head.cur, len);
                self.head = self.tail;
                Some(run)
            } else {
                let run = slice::from_raw_parts(self.head.cur, self.head.room());
                self.head.set_node(self.head.node.add(1));
                self.head.cur = self.head.first;
                Some(run)
            }
        }
    }
}

impl<T> FusedIterator for Segments<'_, T> {}
