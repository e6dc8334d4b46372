//! Random-access positions over a segmented deque.
//!
//! A position is `(cur, first, last, node)`: the live element pointer, the
//! bounds of the buffer it sits in, and a pointer to that buffer's map slot.
//! Stepping within a buffer is plain pointer arithmetic; stepping off either
//! end of a buffer re-reads the neighbouring map slot. Jumps of any length
//! cost O(1): the node is found by floor division of the element offset.
//!
//! ## Invalidation
//! A [`RawCursor`] caches the buffer bounds of its slot and the address of the
//! slot itself. Anything that reallocates or recenters the map (growth at
//! either end), creates or releases buffers (push, pop, insert, erase, clear)
//! leaves previously computed raw cursors dangling. The deque re-derives its
//! own `start`/`finish` after every such operation; the public [`Cursor`]
//! borrows the deque, so the borrow checker rules out stale cursors.

use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::ptr::{self, NonNull};

use super::map::Slot;
use super::node::Node;

/// Index of the node `offset` elements past the first slot of the current
/// node, rounding toward negative infinity.
///
/// Truncating division would send `offset = -1` to node `0` instead of node
/// `-1`; every negative offset needs the floored quotient.
#[inline]
pub(crate) const fn node_offset(offset: isize, capacity: isize) -> isize {
    if offset >= 0 {
        offset / capacity
    } else {
        -((-offset - 1) / capacity) - 1
    }
}

/// Unchecked position inside a deque.
pub(crate) struct RawCursor<T> {
    pub(crate) cur: *mut T,
    pub(crate) first: *mut T,
    pub(crate) last: *mut T,
    pub(crate) node: *mut Slot<T>,
}

impl<T> Clone for RawCursor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawCursor<T> {}

impl<T> RawCursor<T> {
    const CAPACITY: isize = Node::<T>::CAPACITY as isize;

    /// Cursor on the first slot of the buffer stored in `node`.
    ///
    /// # Safety
    /// `node` must point into a live map.
    #[inline]
    pub(crate) unsafe fn at_node(node: *mut Slot<T>) -> Self {
        let mut cursor = Self {
            cur: ptr::null_mut(),
            first: ptr::null_mut(),
            last: ptr::null_mut(),
            node,
        };
        cursor.set_node(node);
        cursor.cur = cursor.first;
        cursor
    }

    /// Re-targets the cursor at `node`, refreshing the cached buffer bounds.
    /// `cur` is left for the caller to fix up.
    ///
    /// # Safety
    /// `node` must point into a live map.
    #[inline]
    pub(crate) unsafe fn set_node(&mut self, node: *mut Slot<T>) {
        self.node = node;
        self.first = (*node).map_or(ptr::null_mut(), NonNull::as_ptr);
        self.last = self.first.wrapping_add(Node::<T>::CAPACITY);
    }

    /// Elements between the buffer start and `cur`.
    #[inline]
    pub(crate) unsafe fn offset_in_node(&self) -> usize {
        self.cur.offset_from(self.first) as usize
    }

    /// Slots from `cur` to the end of the buffer, `cur` included.
    #[inline]
    pub(crate) unsafe fn room(&self) -> usize {
        self.last.offset_from(self.cur) as usize
    }

    /// `++`: one element forward, moving to the next buffer at its end.
    ///
    /// # Safety
    /// The resulting position must lie inside the deque's `[start, finish]`.
    #[inline]
    pub(crate) unsafe fn step_forward(&mut self) {
        self.cur = self.cur.add(1);
        if self.cur == self.last {
            self.set_node(self.node.add(1));
            self.cur = self.first;
        }
    }

    /// `--`: one element backward, moving to the previous buffer first when
    /// sitting on a buffer start.
    ///
    /// # Safety
    /// The resulting position must lie inside the deque's `[start, finish]`.
    #[inline]
    pub(crate) unsafe fn step_backward(&mut self) {
        if self.cur == self.first {
            self.set_node(self.node.sub(1));
            self.cur = self.last;
        }
        self.cur = self.cur.sub(1);
    }

    /// `+= n` for signed `n`.
    ///
    /// # Safety
    /// The resulting position must lie on an allocated buffer of the same map.
    #[inline]
    pub(crate) unsafe fn offset(&mut self, n: isize) {
        let offset = n + self.cur.offset_from(self.first);
        if (0..Self::CAPACITY).contains(&offset) {
            self.cur = self.cur.offset(n);
        } else {
            let node_offset = node_offset(offset, Self::CAPACITY);
            self.set_node(self.node.offset(node_offset));
            self.cur = self
                .first
                .add((offset - node_offset * Self::CAPACITY) as usize);
        }
    }

    /// `self + n`.
    ///
    /// # Safety
    /// Same as [`RawCursor::offset`].
    #[inline]
    #[must_use]
    pub(crate) unsafe fn plus(self, n: isize) -> Self {
        let mut cursor = self;
        cursor.offset(n);
        cursor
    }

    /// `self - origin`: full buffers between the two nodes plus the partial
    /// buffers at either end.
    ///
    /// # Safety
    /// Both cursors must be valid positions of the same deque.
    #[inline]
    pub(crate) unsafe fn distance(&self, origin: &Self) -> isize {
        Self::CAPACITY * (self.node.offset_from(origin.node) - 1)
            + self.cur.offset_from(self.first)
            + origin.last.offset_from(origin.cur)
    }

    /// The contiguous run of slots ending right before `cur`, as
    /// `(end pointer, length)`. On a buffer start this is the whole previous
    /// buffer.
    #[inline]
    unsafe fn segment_before(&self) -> (*mut T, usize) {
        if self.cur == self.first {
            let prev = self.node.sub(1);
            let first = (*prev).map_or(ptr::null_mut(), NonNull::as_ptr);
            (first.add(Node::<T>::CAPACITY), Node::<T>::CAPACITY)
        } else {
            (self.cur, self.offset_in_node())
        }
    }
}

impl<T> PartialEq for RawCursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cur == other.cur
    }
}

impl<T> Eq for RawCursor<T> {}

impl<T> PartialOrd for RawCursor<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for RawCursor<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.node == other.node {
            self.cur.cmp(&other.cur)
        } else {
            self.node.cmp(&other.node)
        }
    }
}

/// Moves `count` elements starting at `src` to the slots starting at `dst`,
/// front to back, one buffer run at a time. Use when `dst` precedes `src`.
///
/// # Safety
/// Both ranges must lie on allocated buffers of the same map; the source
/// elements are logically moved out (their slots become uninitialized unless
/// overwritten by the copy itself).
pub(crate) unsafe fn copy_forward<T>(src: RawCursor<T>, dst: RawCursor<T>, count: usize) {
    let (mut src, mut dst, mut remaining) = (src, dst, count);
    while remaining > 0 {
        let step = remaining.min(src.room()).min(dst.room());
        ptr::copy(src.cur, dst.cur, step);
        remaining -= step;
        if remaining == 0 {
            break;
        }
        src.offset(step as isize);
        dst.offset(step as isize);
    }
}

/// Moves the `count` elements ending right before `src_end` so they end right
/// before `dst_end`, back to front. Use when `dst_end` follows `src_end`.
///
/// # Safety
/// Same as [`copy_forward`].
pub(crate) unsafe fn copy_backward<T>(src_end: RawCursor<T>, dst_end: RawCursor<T>, count: usize) {
    let (mut src, mut dst, mut remaining) = (src_end, dst_end, count);
    while remaining > 0 {
        let (src_ptr, src_len) = src.segment_before();
        let (dst_ptr, dst_len) = dst.segment_before();
        let step = remaining.min(src_len).min(dst_len);
        ptr::copy(src_ptr.sub(step), dst_ptr.sub(step), step);
        remaining -= step;
        if remaining == 0 {
            break;
        }
        src.offset(-(step as isize));
        dst.offset(-(step as isize));
    }
}

/// Calls `f(ptr, len)` once per contiguous run of slots in `[from, to)`,
/// front to back.
///
/// # Safety
/// `from <= to` must both be valid positions of the same deque.
pub(crate) unsafe fn for_each_run<T>(
    from: RawCursor<T>,
    to: RawCursor<T>,
    mut f: impl FnMut(*mut T, usize),
) {
    let mut pos = from;
    while pos.node != to.node {
        f(pos.cur, pos.room());
        pos.set_node(pos.node.add(1));
        pos.cur = pos.first;
    }
    let len = to.cur.offset_from(pos.cur) as usize;
    if len > 0 {
        f(pos.cur, len);
    }
}

/// A read-only random-access position in a [`SegDeque`](super::SegDeque).
///
/// Obtained from [`SegDeque::cursor_front`](super::SegDeque::cursor_front),
/// [`SegDeque::cursor_end`](super::SegDeque::cursor_end) or
/// [`SegDeque::cursor_at`](super::SegDeque::cursor_at). A cursor ranges over
/// `0..=len`; `len` is the one-past-the-end position, where [`Cursor::get`]
/// yields `None`. Arithmetic that would leave that range panics.
///
/// Cursors hold a shared borrow of the deque: every mutation, including the
/// map reallocation that growth at either end may trigger, requires the
/// cursors to be gone first.
///
/// ```rust
/// use segdeque::SegDeque;
///
/// let d: SegDeque<u64> = (0..300).collect();
/// let begin = d.cursor_front();
/// let it = begin + 250;
/// assert_eq!(it.get(), Some(&250));
/// assert_eq!((it - 249).get(), Some(&1));
/// assert_eq!(it - begin, 250);
/// assert_eq!(d.cursor_end() - begin, 300);
/// ```
pub struct Cursor<'a, T> {
    raw: RawCursor<T>,
    index: usize,
    len: usize,
    marker: PhantomData<&'a T>,
}

impl<'a, T> Cursor<'a, T> {
    /// # Safety
    /// `raw` must be the position `index` of a deque of length `len` that
    /// stays borrowed for `'a`.
    #[inline]
    pub(crate) unsafe fn new(raw: RawCursor<T>, index: usize, len: usize) -> Self {
        Self {
            raw,
            index,
            len,
            marker: PhantomData,
        }
    }

    /// Logical index of the position (`len` for the end position).
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The element under the cursor, or `None` at the end position.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        if self.index < self.len {
            // SAFETY: `index < len`, so `cur` addresses a live element.
            Some(unsafe { &*self.raw.cur })
        } else {
            None
        }
    }

    /// The element `n` positions away (`it[n]`), or `None` outside the deque.
    pub fn peek(&self, n: isize) -> Option<&'a T> {
        let target = self.target(n)?;
        if target >= self.len {
            return None;
        }
        // SAFETY: `target < len`, the jump lands on a live element.
        Some(unsafe { &*self.raw.plus(n).cur })
    }

    /// Advances one position.
    ///
    /// # Panics
    /// Panics at the end position.
    pub fn move_next(&mut self) {
        assert!(self.index < self.len, "cursor moved past the end of the deque");
        // SAFETY: `index < len`, the next position is at most the end.
        unsafe { self.raw.step_forward() };
        self.index += 1;
    }

    /// Steps back one position.
    ///
    /// # Panics
    /// Panics at the front position.
    pub fn move_prev(&mut self) {
        assert!(self.index > 0, "cursor moved before the front of the deque");
        // SAFETY: `index > 0`, the previous position holds an element.
        unsafe { self.raw.step_backward() };
        self.index -= 1;
    }

    /// Moves by `n` positions in either direction.
    ///
    /// # Panics
    /// Panics if the target lies outside `0..=len`.
    pub fn move_by(&mut self, n: isize) {
        let target = self
            .target(n)
            .filter(|&t| t <= self.len)
            .unwrap_or_else(|| panic!("cursor offset {n} out of range from index {}", self.index));
        // SAFETY: `target <= len`, so the jump lands inside `[start, finish]`.
        unsafe { self.raw.offset(n) };
        self.index = target;
    }

    /// Signed distance `self - origin`, computed from the buffer layout.
    pub fn offset_from(&self, origin: &Self) -> isize {
        // SAFETY: both cursors come from the same borrowed deque.
        let distance = unsafe { self.raw.distance(&origin.raw) };
        debug_assert_eq!(distance, self.index as isize - origin.index as isize);
        distance
    }

    #[inline]
    fn target(&self, n: isize) -> Option<usize> {
        self.index.checked_add_signed(n)
    }
}

// SAFETY: a cursor only hands out shared references to elements.
unsafe impl<T: Sync> Send for Cursor<'_, T> {}
unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("element", &self.get())
            .finish()
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Cursor<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T> AddAssign<isize> for Cursor<'_, T> {
    fn add_assign(&mut self, n: isize) {
        self.move_by(n);
    }
}

impl<T> SubAssign<isize> for Cursor<'_, T> {
    fn sub_assign(&mut self, n: isize) {
        self.move_by(-n);
    }
}

impl<'a, T> Add<isize> for Cursor<'a, T> {
    type Output = Cursor<'a, T>;

    fn add(mut self, n: isize) -> Self::Output {
        self.move_by(n);
        self
    }
}

impl<'a, T> Add<Cursor<'a, T>> for isize {
    type Output = Cursor<'a, T>;

    fn add(self, cursor: Cursor<'a, T>) -> Self::Output {
        cursor + self
    }
}

impl<'a, T> Sub<isize> for Cursor<'a, T> {
    type Output = Cursor<'a, T>;

    fn sub(mut self, n: isize) -> Self::Output {
        self.move_by(-n);
        self
    }
}

impl<'a, T> Sub<Cursor<'a, T>> for Cursor<'a, T> {
    type Output = isize;

    fn sub(self, origin: Cursor<'a, T>) -> isize {
        self.offset_from(&origin)
    }
}
