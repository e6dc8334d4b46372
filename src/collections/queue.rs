//! `Queue` - a FIFO adapter over any front-poppable, back-pushable sequence.
//!
//! The adapter only goes through [`FifoSequence`]; it never sees buffers or
//! cursors of the sequence underneath. [`SegDeque`] is the default backing
//! store, [`VecDeque`] works as well.
//!
//! ```rust
//! use segdeque::Queue;
//!
//! let mut q: Queue<&str> = Queue::new();
//! q.push("a");
//! q.push("b");
//! assert_eq!(q.front(), Some(&"a"));
//! assert_eq!(q.pop(), Some("a"));
//! assert_eq!(q.len(), 1);
//! ```

use core::fmt;
use core::marker::PhantomData;
use std::collections::VecDeque;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::deque::SegDeque;

/// The operations a [`Queue`] needs from its backing sequence.
pub trait FifoSequence {
    /// Element type.
    type Item;

    /// The element popped next.
    fn front(&self) -> Option<&Self::Item>;
    /// The element pushed last.
    fn back(&self) -> Option<&Self::Item>;
    /// Mutable [`FifoSequence::front`].
    fn front_mut(&mut self) -> Option<&mut Self::Item>;
    /// Mutable [`FifoSequence::back`].
    fn back_mut(&mut self) -> Option<&mut Self::Item>;
    /// Appends `value`.
    fn push_back(&mut self, value: Self::Item);
    /// Removes the first element.
    fn pop_front(&mut self) -> Option<Self::Item>;
    /// Number of elements.
    fn len(&self) -> usize;

    /// `true` when [`FifoSequence::len`] is zero.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> FifoSequence for SegDeque<T> {
    type Item = T;

    fn front(&self) -> Option<&T> {
        SegDeque::front(self)
    }

    fn back(&self) -> Option<&T> {
        SegDeque::back(self)
    }

    fn front_mut(&mut self) -> Option<&mut T> {
        SegDeque::front_mut(self)
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        SegDeque::back_mut(self)
    }

    fn push_back(&mut self, value: T) {
        SegDeque::push_back(self, value);
    }

    fn pop_front(&mut self) -> Option<T> {
        SegDeque::pop_front(self)
    }

    fn len(&self) -> usize {
        SegDeque::len(self)
    }

    fn is_empty(&self) -> bool {
        SegDeque::is_empty(self)
    }
}

impl<T> FifoSequence for VecDeque<T> {
    type Item = T;

    fn front(&self) -> Option<&T> {
        VecDeque::front(self)
    }

    fn back(&self) -> Option<&T> {
        VecDeque::back(self)
    }

    fn front_mut(&mut self) -> Option<&mut T> {
        VecDeque::front_mut(self)
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        VecDeque::back_mut(self)
    }

    fn push_back(&mut self, value: T) {
        VecDeque::push_back(self, value);
    }

    fn pop_front(&mut self) -> Option<T> {
        VecDeque::pop_front(self)
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

/// First-in, first-out queue backed by `S`.
pub struct Queue<T, S = SegDeque<T>> {
    seq: S,
    marker: PhantomData<T>,
}

impl<T, S> Queue<T, S> {
    /// Wraps an existing sequence; its front becomes the queue's front.
    pub fn from_sequence(seq: S) -> Self {
        Self {
            seq,
            marker: PhantomData,
        }
    }

    /// Unwraps the backing sequence.
    pub fn into_inner(self) -> S {
        self.seq
    }

    /// The backing sequence.
    pub fn as_sequence(&self) -> &S {
        &self.seq
    }

    /// Exchanges the contents of two queues.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.seq, &mut other.seq);
    }
}

impl<T, S> Queue<T, S>
where
    S: FifoSequence<Item = T>,
{
    /// Creates an empty queue over `S::default()`.
    pub fn new() -> Self
    where
        S: Default,
    {
        Self::from_sequence(S::default())
    }

    /// The oldest element.
    pub fn front(&self) -> Option<&T> {
        self.seq.front()
    }

    /// The newest element.
    pub fn back(&self) -> Option<&T> {
        self.seq.back()
    }

    /// Mutable [`Queue::front`].
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.seq.front_mut()
    }

    /// Mutable [`Queue::back`].
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.seq.back_mut()
    }

    /// Number of queued elements.
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Adds `value` at the back.
    pub fn push(&mut self, value: T) {
        self.seq.push_back(value);
    }

    /// Adds `value` at the back and returns a reference to it.
    pub fn emplace(&mut self, value: T) -> &mut T {
        self.seq.push_back(value);
        match self.seq.back_mut() {
            Some(value) => value,
            None => unreachable!("sequence is empty right after push_back"),
        }
    }

    /// Removes the oldest element.
    pub fn pop(&mut self) -> Option<T> {
        self.seq.pop_front()
    }
}

impl<T, S: Default + FifoSequence<Item = T>> Default for Queue<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: Clone> Clone for Queue<T, S> {
    fn clone(&self) -> Self {
        Self::from_sequence(self.seq.clone())
    }
}

impl<T, S: fmt::Debug> fmt::Debug for Queue<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Queue").field(&self.seq).finish()
    }
}

impl<T, S: PartialEq> PartialEq for Queue<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl<T, S: Eq> Eq for Queue<T, S> {}

impl<T, S> From<S> for Queue<T, S>
where
    S: FifoSequence<Item = T>,
{
    fn from(seq: S) -> Self {
        Self::from_sequence(seq)
    }
}

impl<T, S> FromIterator<T> for Queue<T, S>
where
    S: FifoSequence<Item = T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T, S> Extend<T> for Queue<T, S>
where
    S: FifoSequence<Item = T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T, S: Serialize> Serialize for Queue<T, S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        self.seq.serialize(serializer)
    }
}

impl<'de, T, S: Deserialize<'de>> Deserialize<'de> for Queue<T, S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        S::deserialize(deserializer).map(Self::from_sequence)
    }
}
