//! # `segdeque` - Segmented Double-Ended Queue
//!
//! A double-ended queue stored as a map of fixed-size node buffers instead of
//! one ring buffer. Growth at either end allocates a single buffer and never
//! moves existing elements; random access stays O(1) through cursors that
//! jump across buffers with one floor division.
//!
//! ## Layout
//!
//! ```text
//!   map:   [ -- ][ B0 ][ B1 ][ B2 ][ -- ]
//!                  |     |     |
//!                  v     v     v
//!   B0:  [ . . . a b ]  B1: [ c d e f g ]  B2: [ h . . . . ]
//!                 ^start                          ^finish
//! ```
//!
//! - **Node buffers** hold `buffer_capacity(size_of::<T>())` slots, about
//!   [`BUFFER_BYTES`] bytes each.
//! - **The map** keeps buffer handles in logical order with free slots on
//!   both sides; it is recentered or reallocated when one side runs out.
//! - **Cursors** `(cur, first, last, node)` give O(1) `+ n`, `- n` and
//!   distance, including negative jumps over several buffers.
//!
//! ## Complexity
//!
//! | Operation              | Cost                         |
//! |------------------------|------------------------------|
//! | `push_*` / `pop_*`     | amortized O(1)               |
//! | `get`, `[]`, cursor ±n | O(1)                         |
//! | `insert` / `remove`    | O(min(i, len - i))           |
//! | map growth             | O(number of buffers)         |
//!
//! ## Features
//!
//! - `tracing`: debug/trace events for map re-layout, `clear` and failed
//!   buffer allocations.
//! - `proptest`: `Arbitrary` for `SegDeque<T>`.
//!
//! ## Example
//!
//! ```rust
//! use segdeque::{segdeque, Queue, SegDeque};
//!
//! let mut d: SegDeque<i32> = segdeque![2, 3];
//! d.push_front(1);
//! d.push_back(4);
//! assert_eq!(d[0], 1);
//! assert_eq!(d.cursor_end() - d.cursor_front(), 4);
//!
//! let mut q: Queue<i32> = Queue::from(d);
//! assert_eq!(q.pop(), Some(1));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

#[macro_use]
mod macros;

pub mod collections;
pub mod error;

pub use collections::deque::{buffer_capacity, BUFFER_BYTES, INITIAL_MAP_SIZE};
pub use collections::{Cursor, FifoSequence, IntoIter, Iter, IterMut, Queue, SegDeque, Segments};
pub use error::{DequeError, Result};

// Compile-time layout checks.
const _: () = {
    use core::mem;

    // The deque is a map handle plus two cursors of four pointers each.
    assert!(mem::size_of::<SegDeque<u64>>() <= mem::size_of::<usize>() * 10);
    // Empty `Option<NonNull<_>>` slots cost nothing over a raw pointer.
    assert!(mem::size_of::<Option<core::ptr::NonNull<u64>>>() == mem::size_of::<usize>());
    assert!(buffer_capacity(4) == 128);
};
