//! The map: an owned array of node-buffer handles with slack at both ends.
//!
//! ## Layout
//! ```text
//!   slot:   0     1     2     3     4     5     6     7
//!         [ -- ][ -- ][ B0 ][ B1 ][ B2 ][ -- ][ -- ][ -- ]
//!                       ^start.node       ^finish.node
//! ```
//! The active span `[start.node, finish.node]` holds the buffers with live
//! elements. Free slots on either side absorb growth at that end; when a side
//! runs out, the map is recentered in place or replaced by a larger array.
//! Only the handles move, never the elements.
//!
//! A `Some` slot outside the active span is a reserved spare buffer. It is
//! owned by the map like any other and released on reallocation or drop.

use core::alloc::Layout;
use core::mem;
use core::ptr::{self, NonNull};
use std::alloc;

use super::cursor::RawCursor;
use super::node::Node;
use super::SegDeque;
use crate::error::{DequeError, Result};

/// Smallest map ever allocated.
pub const INITIAL_MAP_SIZE: usize = 8;

/// A map entry: the handle of one node buffer, if any.
pub(crate) type Slot<T> = Option<NonNull<T>>;

/// Owned array of [`Slot`]s. Frees every buffer it still holds on drop.
pub(crate) struct NodeMap<T> {
    slots: NonNull<Slot<T>>,
    size: usize,
}

impl<T> NodeMap<T> {
    /// Allocates a map of `size` empty slots.
    pub(crate) fn try_with_size(size: usize) -> Result<Self> {
        debug_assert!(size > 0);
        let layout = Self::layout(size)?;
        // SAFETY: `size > 0` and slots are pointer-sized, so the layout is
        // non-zero.
        let raw = unsafe { alloc::alloc(layout) }.cast::<Slot<T>>();
        let Some(slots) = NonNull::new(raw) else {
            warn_event!(bytes = layout.size(), "map allocation failed");
            return Err(DequeError::AllocFailed { layout });
        };
        for i in 0..size {
            // SAFETY: `i < size`, inside the fresh allocation.
            unsafe { slots.as_ptr().add(i).write(None) };
        }
        Ok(Self { slots, size })
    }

    fn layout(size: usize) -> Result<Layout> {
        Layout::array::<Slot<T>>(size).map_err(|_| DequeError::CapacityOverflow)
    }

    #[inline]
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// Pointer to slot `index`.
    #[inline]
    pub(crate) fn slot(&self, index: usize) -> *mut Slot<T> {
        debug_assert!(index < self.size);
        // SAFETY: `index < size`.
        unsafe { self.slots.as_ptr().add(index) }
    }

    /// Index of the slot `node` points to.
    #[inline]
    pub(crate) fn index_of(&self, node: *const Slot<T>) -> usize {
        // SAFETY: callers only pass slot pointers of this map.
        let index = unsafe { node.offset_from(self.slots.as_ptr()) };
        debug_assert!(index >= 0 && (index as usize) < self.size);
        index as usize
    }

    #[inline]
    fn get(&self, index: usize) -> Slot<T> {
        // SAFETY: `slot` checks the index in debug builds; every slot is
        // initialized at construction.
        unsafe { *self.slot(index) }
    }

    #[inline]
    fn set(&mut self, index: usize, value: Slot<T>) {
        // SAFETY: as in `get`.
        unsafe { *self.slot(index) = value };
    }

    /// Number of buffers currently held, spares included.
    pub(crate) fn buffer_count(&self) -> usize {
        (0..self.size).filter(|&i| self.get(i).is_some()).count()
    }

    /// Gives every empty slot in `from..to` a buffer.
    ///
    /// The range must lie outside the active span. On failure every buffer in
    /// the range is released again before the error is returned.
    pub(crate) fn allocate_range(&mut self, from: usize, to: usize) -> Result<()> {
        let mut guard = AllocGuard {
            map: self,
            from,
            next: from,
        };
        while guard.next < to {
            let index = guard.next;
            if guard.map.get(index).is_none() {
                let buffer = Node::<T>::allocate()?;
                guard.map.set(index, Some(buffer));
            }
            guard.next += 1;
        }
        guard.defuse();
        Ok(())
    }

    /// Releases the buffer in slot `index`, if any.
    pub(crate) fn release(&mut self, index: usize) {
        if let Some(buffer) = self.get(index) {
            self.set(index, None);
            // SAFETY: the buffer came from `Node::allocate` and its elements
            // are gone; the slot no longer refers to it.
            unsafe { Node::deallocate(buffer) };
        }
    }

    /// Releases every buffer in `from..to`.
    pub(crate) fn release_range(&mut self, from: usize, to: usize) {
        for index in from..to {
            self.release(index);
        }
    }

    /// Releases every buffer outside `keep_from..=keep_to`.
    pub(crate) fn release_outside(&mut self, keep_from: usize, keep_to: usize) {
        self.release_range(0, keep_from);
        self.release_range(keep_to + 1, self.size);
    }

    /// Widens `from..=to` over the buffers held in the adjacent slots.
    fn held_span(&self, mut from: usize, mut to: usize) -> (usize, usize) {
        while from > 0 && self.get(from - 1).is_some() {
            from -= 1;
        }
        while to + 1 < self.size && self.get(to + 1).is_some() {
            to += 1;
        }
        (from, to)
    }

    /// Moves the `count` handles at `from` so they start at `to`, emptying
    /// every other slot. Spares must be released beforehand.
    fn recenter(&mut self, from: usize, count: usize, to: usize) {
        debug_assert!(to + count <= self.size);
        // SAFETY: both ranges lie inside the array; `copy` handles overlap.
        unsafe { ptr::copy(self.slot(from), self.slot(to), count) };
        for index in (0..to).chain(to + count..self.size) {
            self.set(index, None);
        }
    }

    /// Hands the `count` handles at `from` over to `dst` starting at `to`.
    fn transfer(&mut self, from: usize, count: usize, dst: &mut Self, to: usize) {
        debug_assert!(to + count <= dst.size);
        for offset in 0..count {
            dst.set(to + offset, self.get(from + offset));
            self.set(from + offset, None);
        }
    }
}

impl<T> Drop for NodeMap<T> {
    fn drop(&mut self) {
        self.release_range(0, self.size);
        // SAFETY: the array was allocated in `try_with_size` with exactly this
        // size and alignment.
        unsafe {
            let layout = Layout::from_size_align_unchecked(
                mem::size_of::<Slot<T>>() * self.size,
                mem::align_of::<Slot<T>>(),
            );
            alloc::dealloc(self.slots.as_ptr().cast::<u8>(), layout);
        }
    }
}

/// Releases `from..next` unless defused; used to roll back a partially
/// completed `allocate_range`.
struct AllocGuard<'a, T> {
    map: &'a mut NodeMap<T>,
    from: usize,
    next: usize,
}

impl<T> AllocGuard<'_, T> {
    fn defuse(mut self) {
        self.next = self.from;
    }
}

impl<T> Drop for AllocGuard<'_, T> {
    fn drop(&mut self) {
        self.map.release_range(self.from, self.next);
    }
}

impl<T> SegDeque<T> {
    /// Builds an empty deque whose map already holds buffers for `len_hint`
    /// elements, centered in an array of at least [`INITIAL_MAP_SIZE`] slots.
    pub(super) fn initialize(len_hint: usize) -> Result<Self> {
        let num_nodes = (len_hint / Node::<T>::CAPACITY)
            .checked_add(1)
            .ok_or(DequeError::CapacityOverflow)?;
        let map_size = num_nodes
            .checked_add(2)
            .ok_or(DequeError::CapacityOverflow)?
            .max(INITIAL_MAP_SIZE);
        let mut map = NodeMap::try_with_size(map_size)?;
        let first = (map_size - num_nodes) / 2;
        map.allocate_range(first, first + num_nodes)?;
        // SAFETY: slot `first` was just given a buffer.
        let start = unsafe { RawCursor::at_node(map.slot(first)) };
        Ok(Self::from_parts(map, start, start))
    }

    /// Makes sure `new_elems` slots past the finish buffer are allocated.
    pub(super) fn new_elements_at_back(&mut self, new_elems: usize) -> Result<()> {
        let new_nodes = new_elems.div_ceil(Node::<T>::CAPACITY);
        self.reserve_map_at_back(new_nodes)?;
        let first = self.map.index_of(self.finish.node) + 1;
        self.map.allocate_range(first, first + new_nodes)
    }

    /// Makes sure `new_elems` slots before the start buffer are allocated.
    pub(super) fn new_elements_at_front(&mut self, new_elems: usize) -> Result<()> {
        let new_nodes = new_elems.div_ceil(Node::<T>::CAPACITY);
        self.reserve_map_at_front(new_nodes)?;
        let start = self.map.index_of(self.start.node);
        self.map.allocate_range(start - new_nodes, start)
    }

    fn reserve_map_at_back(&mut self, nodes_to_add: usize) -> Result<()> {
        let finish = self.map.index_of(self.finish.node);
        let needed = nodes_to_add
            .checked_add(1)
            .ok_or(DequeError::CapacityOverflow)?;
        if needed > self.map.size() - finish {
            self.reallocate_map(nodes_to_add, false)?;
        }
        Ok(())
    }

    fn reserve_map_at_front(&mut self, nodes_to_add: usize) -> Result<()> {
        if nodes_to_add > self.map.index_of(self.start.node) {
            self.reallocate_map(nodes_to_add, true)?;
        }
        Ok(())
    }

    /// Re-lays the active span, together with the spare buffers adjacent to
    /// it, so that `nodes_to_add` free slots exist on the requested side.
    /// Leaves the deque untouched on failure.
    fn reallocate_map(&mut self, nodes_to_add: usize, add_at_front: bool) -> Result<()> {
        let start = self.map.index_of(self.start.node);
        let finish = self.map.index_of(self.finish.node);
        let (held_from, held_to) = self.map.held_span(start, finish);
        let held = held_to - held_from + 1;
        let new_num_nodes = held
            .checked_add(nodes_to_add)
            .ok_or(DequeError::CapacityOverflow)?;
        let front_pad = if add_at_front { nodes_to_add } else { 0 };
        let old_size = self.map.size();

        let new_from = if new_num_nodes
            .checked_mul(2)
            .is_some_and(|needed| old_size >= needed)
        {
            let new_from = (old_size - new_num_nodes) / 2 + front_pad;
            self.map.release_outside(held_from, held_to);
            self.map.recenter(held_from, held, new_from);
            new_from
        } else {
            let new_size = old_size
                .checked_add(old_size.max(nodes_to_add))
                .and_then(|size| size.checked_add(2))
                .ok_or(DequeError::CapacityOverflow)?;
            let mut new_map = NodeMap::try_with_size(new_size)?;
            let new_from = (new_size - new_num_nodes) / 2 + front_pad;
            self.map.release_outside(held_from, held_to);
            self.map.transfer(held_from, held, &mut new_map, new_from);
            self.map = new_map;
            new_from
        };

        debug_event!(
            old_size,
            new_size = self.map.size(),
            live_nodes = finish - start + 1,
            spare_nodes = held - (finish - start + 1),
            nodes_to_add,
            add_at_front,
            "deque map re-laid"
        );

        // SAFETY: the handles now live at `new_from..new_from + held` of the
        // current map; the buffers themselves did not move, so `cur` stays
        // valid.
        unsafe {
            self.start.set_node(self.map.slot(new_from + (start - held_from)));
            self.finish.set_node(self.map.slot(new_from + (finish - held_from)));
        }
        Ok(())
    }

    /// Puts an empty deque back in the `initialize(0)` layout: the start
    /// buffer moves to the middle slot, every other buffer is released.
    pub(super) fn recenter_empty(&mut self) {
        debug_assert!(self.is_empty());
        let keep = self.map.index_of(self.start.node);
        self.map.release_outside(keep, keep);
        let middle = (self.map.size() - 1) / 2;
        self.map.recenter(keep, 1, middle);
        // SAFETY: slot `middle` now holds the kept buffer.
        self.start = unsafe { RawCursor::at_node(self.map.slot(middle)) };
        self.finish = self.start;
    }
}
