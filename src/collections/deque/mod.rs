//! `SegDeque` - a segmented double-ended queue.
//!
//! Elements live in fixed-capacity node buffers; a map of buffer handles keeps
//! the buffers in logical order with free slots at both ends. Growth at either
//! end allocates a new buffer (and occasionally re-lays the map) without ever
//! moving existing elements, so references obtained before a `push_*` would
//! stay valid in C++ terms; in Rust the borrow checker still ends them.
//!
//! ## Complexity
//! - `push_*`/`pop_*`: amortized O(1), one buffer allocation every `B` pushes.
//! - `get`/`Index`/cursor jumps: O(1).
//! - `insert`/`remove` in the middle: O(min(i, len - i)), the shorter side moves.
//!
//! ## Invariants
//! - `start <= finish`; `len == finish - start`.
//! - `finish.cur < finish.last`: the buffer holding the one-past-the-end
//!   position always exists, so `push_back` into a non-full buffer never
//!   allocates.
//! - Every map slot in `[start.node, finish.node]` holds a buffer.

mod cursor;
mod iter;
mod map;
mod node;
mod serde_impl;

#[cfg(feature = "proptest")]
mod arbitrary;

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::mem;
use core::ops::{Bound, Index, IndexMut, RangeBounds};
use core::ptr;

use self::cursor::{copy_backward, copy_forward, for_each_run, RawCursor};
use self::map::NodeMap;
use self::node::Node;
use crate::error::{handle_reserve, DequeError, Result};

pub use self::cursor::Cursor;
pub use self::iter::{IntoIter, Iter, IterMut, Segments};
pub use self::map::INITIAL_MAP_SIZE;
pub use self::node::{buffer_capacity, BUFFER_BYTES};

/// A double-ended queue stored as a sequence of fixed-size buffers.
///
/// ```rust
/// use segdeque::SegDeque;
///
/// let mut d = SegDeque::new();
/// d.push_back(2);
/// d.push_back(3);
/// d.push_front(1);
/// assert_eq!(d[0], 1);
/// assert_eq!(d.len(), 3);
/// assert_eq!(d.pop_back(), Some(3));
/// assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
/// ```
pub struct SegDeque<T> {
    map: NodeMap<T>,
    start: RawCursor<T>,
    finish: RawCursor<T>,
    marker: PhantomData<T>,
}

// SAFETY: the deque uniquely owns its buffers and elements, like `Vec<T>`.
unsafe impl<T: Send> Send for SegDeque<T> {}
unsafe impl<T: Sync> Sync for SegDeque<T> {}

/// Which end moved to open or close a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GapSide {
    Front,
    Back,
}

impl<T> SegDeque<T> {
    const MAX_LEN: usize = isize::MAX as usize / mem::size_of::<T>();

    fn from_parts(map: NodeMap<T>, start: RawCursor<T>, finish: RawCursor<T>) -> Self {
        Self {
            map,
            start,
            finish,
            marker: PhantomData,
        }
    }

    /// Creates an empty deque holding one buffer.
    ///
    /// # Panics
    /// Aborts through [`std::alloc::handle_alloc_error`] if the first buffer
    /// cannot be allocated.
    pub fn new() -> Self {
        handle_reserve(Self::try_new())
    }

    /// Fallible [`SegDeque::new`].
    pub fn try_new() -> Result<Self> {
        Self::initialize(0)
    }

    /// Creates an empty deque with buffers for `capacity` elements pushed at
    /// the back.
    pub fn with_capacity(capacity: usize) -> Self {
        handle_reserve(Self::try_with_capacity(capacity))
    }

    /// Fallible [`SegDeque::with_capacity`].
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        Self::check_len(capacity)?;
        Self::initialize(capacity)
    }

    /// Creates a deque of `len` clones of `value`.
    ///
    /// If a clone panics, the elements built so far are dropped and the panic
    /// continues.
    pub fn from_elem(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut deque = Self::with_capacity(len);
        deque.resize(len, value);
        deque
    }

    /// Creates a deque of `len` default values.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut deque = Self::with_capacity(len);
        deque.resize_with(len, T::default);
        deque
    }

    fn check_len(len: usize) -> Result<()> {
        if len > Self::MAX_LEN {
            Err(DequeError::CapacityOverflow)
        } else {
            Ok(())
        }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        debug_assert!(self.start <= self.finish);
        // SAFETY: `start` and `finish` are valid positions of this deque with
        // `start <= finish`.
        unsafe { self.finish.distance(&self.start) as usize }
    }

    /// `true` when the deque holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.finish
    }

    /// Largest length a deque of `T` can reach.
    #[inline]
    pub fn max_size(&self) -> usize {
        Self::MAX_LEN
    }

    /// Elements per node buffer for this element type.
    #[inline]
    pub const fn buffer_capacity() -> usize {
        Node::<T>::CAPACITY
    }

    /// Node buffers currently allocated, reserved spares included.
    pub fn buffer_count(&self) -> usize {
        self.map.buffer_count()
    }

    /// Makes sure `additional` elements can be pushed at the back without
    /// allocating. Leaves the deque unchanged on error.
    ///
    /// ```rust
    /// use segdeque::{DequeError, SegDeque};
    ///
    /// let mut d: SegDeque<u8> = SegDeque::new();
    /// assert_eq!(d.try_reserve_back(usize::MAX), Err(DequeError::CapacityOverflow));
    /// assert!(d.try_reserve_back(10_000).is_ok());
    /// ```
    pub fn try_reserve_back(&mut self, additional: usize) -> Result<()> {
        self.check_additional(additional)?;
        self.reserve_elements_at_back(additional)
    }

    /// Makes sure `additional` elements can be pushed at the front without
    /// allocating. Leaves the deque unchanged on error.
    pub fn try_reserve_front(&mut self, additional: usize) -> Result<()> {
        self.check_additional(additional)?;
        self.reserve_elements_at_front(additional)
    }

    /// Infallible [`SegDeque::try_reserve_back`].
    pub fn reserve_back(&mut self, additional: usize) {
        handle_reserve(self.try_reserve_back(additional));
    }

    /// Infallible [`SegDeque::try_reserve_front`].
    pub fn reserve_front(&mut self, additional: usize) {
        handle_reserve(self.try_reserve_front(additional));
    }

    /// Releases reserved buffers outside the live elements.
    pub fn shrink_to_fit(&mut self) {
        let start = self.map.index_of(self.start.node);
        let finish = self.map.index_of(self.finish.node);
        self.map.release_outside(start, finish);
    }

    fn check_additional(&self, additional: usize) -> Result<()> {
        let total = self
            .len()
            .checked_add(additional)
            .ok_or(DequeError::CapacityOverflow)?;
        Self::check_len(total)
    }

    fn reserve_elements_at_back(&mut self, additional: usize) -> Result<()> {
        // SAFETY: `finish` is valid; `room() >= 1` by the finish invariant.
        let vacancies = unsafe { self.finish.room() } - 1;
        if additional > vacancies {
            self.new_elements_at_back(additional - vacancies)?;
        }
        Ok(())
    }

    fn reserve_elements_at_front(&mut self, additional: usize) -> Result<()> {
        // SAFETY: `start` is valid.
        let vacancies = unsafe { self.start.offset_in_node() };
        if additional > vacancies {
            self.new_elements_at_front(additional - vacancies)?;
        }
        Ok(())
    }

    /// Raw position of `index`.
    ///
    /// # Safety
    /// `index <= len`.
    #[inline]
    unsafe fn raw_at(&self, index: usize) -> RawCursor<T> {
        debug_assert!(index <= self.len());
        self.start.plus(index as isize)
    }

    /// Returns the element at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len() {
            // SAFETY: `index < len`, the position holds a live element.
            Some(unsafe { &*self.raw_at(index).cur })
        } else {
            None
        }
    }

    /// Mutable [`SegDeque::get`].
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len() {
            // SAFETY: as in `get`, with exclusive access through `&mut self`.
            Some(unsafe { &mut *self.raw_at(index).cur })
        } else {
            None
        }
    }

    /// Checked access reporting the index and length on failure.
    ///
    /// ```rust
    /// use segdeque::{segdeque, DequeError};
    ///
    /// let d = segdeque![1, 2, 3];
    /// assert_eq!(d.at(2), Ok(&3));
    /// assert_eq!(d.at(3), Err(DequeError::OutOfRange { index: 3, len: 3 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.len();
        self.get(index).ok_or(DequeError::OutOfRange { index, len })
    }

    /// Mutable [`SegDeque::at`].
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len();
        self.get_mut(index).ok_or(DequeError::OutOfRange { index, len })
    }

    /// The first element, or `None` when empty.
    pub fn front(&self) -> Option<&T> {
        // SAFETY: a non-empty deque holds a live element at `start`.
        (!self.is_empty()).then(|| unsafe { &*self.start.cur })
    }

    /// Mutable [`SegDeque::front`].
    pub fn front_mut(&mut self) -> Option<&mut T> {
        // SAFETY: as in `front`.
        (!self.is_empty()).then(|| unsafe { &mut *self.start.cur })
    }

    /// The last element, or `None` when empty.
    pub fn back(&self) -> Option<&T> {
        // SAFETY: a non-empty deque holds a live element right before
        // `finish`.
        (!self.is_empty()).then(|| unsafe { &*self.finish.plus(-1).cur })
    }

    /// Mutable [`SegDeque::back`].
    pub fn back_mut(&mut self) -> Option<&mut T> {
        // SAFETY: as in `back`.
        (!self.is_empty()).then(|| unsafe { &mut *self.finish.plus(-1).cur })
    }

    /// Appends an element.
    #[inline]
    pub fn push_back(&mut self, value: T) {
        self.emplace_back(value);
    }

    /// Prepends an element.
    #[inline]
    pub fn push_front(&mut self, value: T) {
        self.emplace_front(value);
    }

    /// Appends an element and returns a reference to it.
    pub fn emplace_back(&mut self, value: T) -> &mut T {
        // SAFETY: after the reservation the slot at `finish` is free and the
        // buffer after it exists when `finish` sits on its buffer's last slot.
        unsafe {
            if self.finish.room() == 1 {
                handle_reserve(self.reserve_elements_at_back(1));
            }
            let slot = self.finish.cur;
            slot.write(value);
            self.finish.step_forward();
            &mut *slot
        }
    }

    /// Prepends an element and returns a reference to it.
    pub fn emplace_front(&mut self, value: T) -> &mut T {
        // SAFETY: after the reservation a free slot exists right before
        // `start`, in the same or the previous buffer.
        unsafe {
            if self.start.cur == self.start.first {
                handle_reserve(self.reserve_elements_at_front(1));
            }
            self.start.step_backward();
            self.start.cur.write(value);
            &mut *self.start.cur
        }
    }

    /// Removes the last element, releasing its buffer when it empties.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: non-empty, so the position before `finish` is live.
        unsafe {
            let node = self.finish.node;
            self.finish.step_backward();
            if self.finish.node != node {
                self.map.release(self.map.index_of(node));
            }
            Some(self.finish.cur.read())
        }
    }

    /// Removes the first element, releasing its buffer when it empties.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: non-empty, so `start` is live and the next position is at
        // most `finish`.
        unsafe {
            let value = self.start.cur.read();
            let node = self.start.node;
            self.start.step_forward();
            if self.start.node != node {
                self.map.release(self.map.index_of(node));
            }
            Some(value)
        }
    }

    /// Opens `count` uninitialized slots at `index`, shifting the shorter
    /// side outward. The gap counts toward `len` afterwards.
    ///
    /// # Safety
    /// `index <= len`. The caller must fill the gap or close it again.
    unsafe fn open_gap(&mut self, index: usize, count: usize) -> Result<GapSide> {
        let len = self.len();
        debug_assert!(index <= len && count > 0);
        self.check_additional(count)?;
        if index < len / 2 {
            self.reserve_elements_at_front(count)?;
            let new_start = self.start.plus(-(count as isize));
            copy_forward(self.start, new_start, index);
            self.start = new_start;
            Ok(GapSide::Front)
        } else {
            self.reserve_elements_at_back(count)?;
            let new_finish = self.finish.plus(count as isize);
            copy_backward(self.finish, new_finish, len - index);
            self.finish = new_finish;
            Ok(GapSide::Back)
        }
    }

    /// Removes `count` dead slots at `index` by shifting `side` inward, and
    /// releases buffers the moved end leaves behind.
    ///
    /// # Safety
    /// `index + count <= len` and the slots in the gap hold no live elements.
    unsafe fn close_gap(&mut self, index: usize, count: usize, side: GapSide) {
        let len = self.len();
        debug_assert!(index + count <= len);
        match side {
            GapSide::Front => {
                let new_start = self.start.plus(count as isize);
                copy_backward(self.raw_at(index), new_start.plus(index as isize), index);
                let from = self.map.index_of(self.start.node);
                let to = self.map.index_of(new_start.node);
                self.start = new_start;
                self.map.release_range(from, to);
            }
            GapSide::Back => {
                let dst = self.raw_at(index);
                copy_forward(dst.plus(count as isize), dst, len - index - count);
                let new_finish = self.finish.plus(-(count as isize));
                let from = self.map.index_of(new_finish.node) + 1;
                let to = self.map.index_of(self.finish.node) + 1;
                self.finish = new_finish;
                self.map.release_range(from, to);
            }
        }
    }

    /// Inserts `value` at `index`, shifting whichever side is shorter.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        let len = self.len();
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
        if index == 0 {
            self.push_front(value);
        } else if index == len {
            self.push_back(value);
        } else {
            // SAFETY: `index <= len`; the one-slot gap is filled right away.
            unsafe {
                handle_reserve(self.open_gap(index, 1));
                self.raw_at(index).cur.write(value);
            }
        }
    }

    /// Inserts `count` clones of `value` at `index`.
    ///
    /// If a clone panics, the clones made so far are dropped and the deque is
    /// restored before the panic continues.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn insert_n(&mut self, index: usize, count: usize, value: T)
    where
        T: Clone,
    {
        self.insert_with(index, count, || value.clone());
    }

    /// Inserts the items of `iter` at `index`, in order.
    ///
    /// The iterator is drained into a buffer first, so a panicking iterator
    /// leaves the deque untouched.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn insert_many<I>(&mut self, index: usize, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let len = self.len();
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
        let mut items: Vec<T> = iter.into_iter().collect();
        let count = items.len();
        if count == 0 {
            return;
        }
        // SAFETY: the gap of `count` slots is filled by moving every item out
        // of `items`, whose length is zeroed so they are not dropped twice.
        unsafe {
            handle_reserve(self.open_gap(index, count));
            let dst = self.raw_at(index);
            let mut src = items.as_ptr();
            items.set_len(0);
            for_each_run(dst, dst.plus(count as isize), |run, n| {
                ptr::copy_nonoverlapping(src, run, n);
                src = src.add(n);
            });
        }
    }

    fn insert_with(&mut self, index: usize, count: usize, mut make: impl FnMut() -> T) {
        let len = self.len();
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
        if count == 0 {
            return;
        }
        // SAFETY: `open_gap` makes `[index, index + count)` writable; the
        // guard either sees it completely filled or closes it again.
        unsafe {
            let side = handle_reserve(self.open_gap(index, count));
            let mut slot = self.raw_at(index);
            let mut fill = GapFill {
                deque: self,
                index,
                count,
                side,
                filled: 0,
            };
            while fill.filled < count {
                slot.cur.write(make());
                fill.filled += 1;
                slot.step_forward();
            }
        }
    }

    /// Removes and returns the element at `index`, shifting the shorter side.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let len = self.len();
        if index >= len {
            return None;
        }
        let side = if index < len / 2 {
            GapSide::Front
        } else {
            GapSide::Back
        };
        // SAFETY: `index < len`; the element is moved out before its slot is
        // closed over.
        unsafe {
            let value = self.raw_at(index).cur.read();
            self.close_gap(index, 1, side);
            Some(value)
        }
    }

    /// Drops the elements in `range`, shifting whichever remaining side is
    /// shorter.
    ///
    /// If a destructor panics, the remaining elements of the range are leaked
    /// and the gap is still closed.
    ///
    /// # Panics
    /// Panics if the range is decreasing or ends past `len`.
    ///
    /// ```rust
    /// use segdeque::SegDeque;
    ///
    /// let mut d: SegDeque<i32> = (0..10).collect();
    /// d.remove_range(2..5);
    /// assert_eq!(d, [0, 1, 5, 6, 7, 8, 9]);
    /// ```
    pub fn remove_range<R>(&mut self, range: R)
    where
        R: RangeBounds<usize>,
    {
        let len = self.len();
        let (from, to) = resolve_range(&range, len);
        let count = to - from;
        if count == 0 {
            return;
        }
        let side = if from < (len - count) / 2 {
            GapSide::Front
        } else {
            GapSide::Back
        };
        // SAFETY: `from + count <= len`; the guard closes the gap after the
        // victims are dropped, even if a destructor panics.
        unsafe {
            let first = self.raw_at(from);
            let last = first.plus(count as isize);
            let _close = CloseOnDrop {
                deque: self,
                index: from,
                count,
                side,
            };
            for_each_run(first, last, |run, n| {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(run, n));
            });
        }
    }

    /// Shortens the deque to `len` elements, dropping the rest.
    pub fn truncate(&mut self, len: usize) {
        let old_len = self.len();
        if len >= old_len {
            return;
        }
        // SAFETY: `len < old_len`. `finish` moves before the drops, so a
        // panicking destructor leaks the tail instead of exposing it.
        unsafe {
            let new_finish = self.raw_at(len);
            let old_finish = mem::replace(&mut self.finish, new_finish);
            let from = self.map.index_of(new_finish.node) + 1;
            let to = self.map.index_of(old_finish.node) + 1;
            for_each_run(new_finish, old_finish, |run, n| {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(run, n));
            });
            self.map.release_range(from, to);
        }
    }

    /// Drops every element and releases every buffer but one.
    pub fn clear(&mut self) {
        self.truncate(0);
        self.recenter_empty();
        trace_event!(map_size = self.map.size(), "deque cleared");
    }

    /// Resizes to `new_len`, appending clones of `value` or truncating.
    ///
    /// A panicking clone leaves the deque as it was.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        let len = self.len();
        if new_len <= len {
            self.truncate(new_len);
        } else {
            self.extend_with(new_len - len, || value.clone());
        }
    }

    /// Resizes to `new_len`, appending values produced by `f` or truncating.
    pub fn resize_with(&mut self, new_len: usize, f: impl FnMut() -> T) {
        let len = self.len();
        if new_len <= len {
            self.truncate(new_len);
        } else {
            self.extend_with(new_len - len, f);
        }
    }

    fn extend_with(&mut self, count: usize, mut make: impl FnMut() -> T) {
        self.reserve_back(count);
        let guard = TruncateOnUnwind {
            len: self.len(),
            deque: self,
        };
        for _ in 0..count {
            guard.deque.push_back(make());
        }
        mem::forget(guard);
    }

    /// Exchanges the contents of two deques without moving any element.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Replaces the contents with the items of `iter`, reusing existing
    /// elements' slots.
    pub fn assign<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = iter.into_iter();
        let mut written = 0;
        for slot in self.iter_mut() {
            match iter.next() {
                Some(value) => {
                    *slot = value;
                    written += 1;
                }
                None => break,
            }
        }
        self.truncate(written);
        self.extend(iter);
    }

    /// Replaces the contents with `count` clones of `value`.
    pub fn assign_n(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        let keep = self.len().min(count);
        self.truncate(keep);
        self.for_each_mut(|slot| slot.clone_from(&value));
        self.resize(count, value);
    }

    /// Cursor on the first element (equal to the end cursor when empty).
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        // SAFETY: `start` is position 0 of this deque.
        unsafe { Cursor::new(self.start, 0, self.len()) }
    }

    /// Cursor on the one-past-the-end position.
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        let len = self.len();
        // SAFETY: `finish` is position `len`.
        unsafe { Cursor::new(self.finish, len, len) }
    }

    /// Cursor on `index`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn cursor_at(&self, index: usize) -> Cursor<'_, T> {
        let len = self.len();
        assert!(index <= len, "cursor index (is {index}) should be <= len (is {len})");
        // SAFETY: `index <= len`.
        unsafe { Cursor::new(self.raw_at(index), index, len) }
    }

    /// Front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        // SAFETY: `[start, finish)` are this deque's live elements.
        unsafe { Iter::new(self.start, self.finish, self.len()) }
    }

    /// Front-to-back iterator over mutable references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        // SAFETY: as in `iter`, with exclusive access.
        unsafe { IterMut::new(self.start, self.finish, self.len()) }
    }

    /// The live elements as one slice per buffer, front to back.
    ///
    /// ```rust
    /// use segdeque::SegDeque;
    ///
    /// let d: SegDeque<u64> = (0..100).collect();
    /// let sizes: Vec<usize> = d.segments().map(<[u64]>::len).collect();
    /// assert_eq!(sizes.iter().sum::<usize>(), 100);
    /// assert!(sizes.iter().all(|&n| n <= SegDeque::<u64>::buffer_capacity()));
    /// ```
    pub fn segments(&self) -> Segments<'_, T> {
        // SAFETY: as in `iter`.
        unsafe { Segments::new(self.start, self.finish) }
    }

    /// Calls `f` on every element, one buffer at a time.
    pub fn for_each(&self, mut f: impl FnMut(&T)) {
        for segment in self.segments() {
            segment.iter().for_each(&mut f);
        }
    }

    /// Calls `f` on every element mutably, one buffer at a time.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut T)) {
        // SAFETY: the runs cover exactly the live elements and `&mut self`
        // guarantees exclusivity.
        unsafe {
            for_each_run(self.start, self.finish, |run, n| {
                core::slice::from_raw_parts_mut(run, n).iter_mut().for_each(&mut f);
            });
        }
    }
}

/// Resolves `range` against `len`.
///
/// # Panics
/// Panics on a decreasing range or one ending past `len`.
fn resolve_range<R: RangeBounds<usize>>(range: &R, len: usize) -> (usize, usize) {
    let from = match range.start_bound() {
        Bound::Included(&n) => n,
        Bound::Excluded(&n) => n.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let to = match range.end_bound() {
        Bound::Included(&n) => n.saturating_add(1),
        Bound::Excluded(&n) => n,
        Bound::Unbounded => len,
    };
    assert!(from <= to, "range start {from} is greater than range end {to}");
    assert!(to <= len, "range end {to} out of range for deque of length {len}");
    (from, to)
}

/// Fills a gap opened by `open_gap`. If dropped before the gap is full, drops
/// the filled elements newest first and closes the gap.
struct GapFill<'a, T> {
    deque: &'a mut SegDeque<T>,
    index: usize,
    count: usize,
    side: GapSide,
    filled: usize,
}

impl<T> Drop for GapFill<'_, T> {
    fn drop(&mut self) {
        if self.filled == self.count {
            return;
        }
        // SAFETY: exactly `[index, index + filled)` of the gap is initialized.
        unsafe {
            let mut pos = self.deque.raw_at(self.index + self.filled);
            for _ in 0..self.filled {
                pos.step_backward();
                ptr::drop_in_place(pos.cur);
            }
            self.deque.close_gap(self.index, self.count, self.side);
        }
    }
}

/// Closes a range whose elements were dropped (or leaked) by `remove_range`.
struct CloseOnDrop<'a, T> {
    deque: &'a mut SegDeque<T>,
    index: usize,
    count: usize,
    side: GapSide,
}

impl<T> Drop for CloseOnDrop<'_, T> {
    fn drop(&mut self) {
        // SAFETY: the range holds no live element by the time this runs.
        unsafe { self.deque.close_gap(self.index, self.count, self.side) };
    }
}

/// Pops appended elements back off until `len` is restored.
struct TruncateOnUnwind<'a, T> {
    deque: &'a mut SegDeque<T>,
    len: usize,
}

impl<T> Drop for TruncateOnUnwind<'_, T> {
    fn drop(&mut self) {
        while self.deque.len() > self.len {
            self.deque.pop_back();
        }
    }
}

impl<T> Drop for SegDeque<T> {
    fn drop(&mut self) {
        if mem::needs_drop::<T>() {
            // SAFETY: the runs cover exactly the live elements; the map frees
            // the buffers afterwards.
            unsafe {
                for_each_run(self.start, self.finish, |run, n| {
                    ptr::drop_in_place(ptr::slice_from_raw_parts_mut(run, n));
                });
            }
        }
    }
}

impl<T> Default for SegDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SegDeque<T> {
    fn clone(&self) -> Self {
        let mut deque = Self::with_capacity(self.len());
        deque.extend(self.iter().cloned());
        deque
    }

    fn clone_from(&mut self, source: &Self) {
        let common = self.len().min(source.len());
        self.truncate(common);
        for (dst, src) in self.iter_mut().zip(source.iter()) {
            dst.clone_from(src);
        }
        self.extend(source.iter().skip(common).cloned());
    }
}

impl<T: fmt::Debug> fmt::Debug for SegDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for SegDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SegDeque<T> {}

impl<T: PartialEq> PartialEq<Vec<T>> for SegDeque<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: PartialEq> PartialEq<&[T]> for SegDeque<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for SegDeque<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.len() == N && self.iter().eq(other.iter())
    }
}

impl<T: PartialOrd> PartialOrd for SegDeque<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for SegDeque<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for SegDeque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        self.for_each(|elem| elem.hash(state));
    }
}

impl<T> Index<usize> for SegDeque<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        let len = self.len();
        self.get(index)
            .unwrap_or_else(|| panic!("index out of bounds: the len is {len} but the index is {index}"))
    }
}

impl<T> IndexMut<usize> for SegDeque<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        self.get_mut(index)
            .unwrap_or_else(|| panic!("index out of bounds: the len is {len} but the index is {index}"))
    }
}

impl<T> FromIterator<T> for SegDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut deque = Self::with_capacity(iter.size_hint().0);
        deque.extend(iter);
        deque
    }
}

impl<T> From<Vec<T>> for SegDeque<T> {
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for SegDeque<T> {
    fn from(array: [T; N]) -> Self {
        array.into_iter().collect()
    }
}

impl<T> Extend<T> for SegDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve_back(iter.size_hint().0);
        iter.for_each(|value| self.push_back(value));
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for SegDeque<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> IntoIterator for SegDeque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a SegDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SegDeque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
