//! Sequence containers.
//!
//! - `deque`: the segmented double-ended queue and its cursors/iterators
//! - `queue`: a FIFO adapter over any [`FifoSequence`]

pub mod deque;
pub mod queue;

pub use deque::{Cursor, IntoIter, Iter, IterMut, SegDeque, Segments};
pub use queue::{FifoSequence, Queue};
