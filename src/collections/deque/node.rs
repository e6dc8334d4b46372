//! Node buffers: fixed-capacity blocks of uninitialized element slots.
//!
//! Every buffer of a given `SegDeque<T>` holds the same number of slots,
//! [`buffer_capacity`]`(size_of::<T>())`. Elements inside a buffer are
//! constructed and destroyed one by one by the deque; this module only hands
//! out and takes back raw storage through the global allocator.

use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;
use std::alloc;

use crate::error::{DequeError, Result};

/// Target size in bytes of one node buffer.
pub const BUFFER_BYTES: usize = 512;

/// Number of elements of `elem_size` bytes stored per node buffer.
///
/// Small elements share a buffer of roughly [`BUFFER_BYTES`]; elements of
/// `BUFFER_BYTES` or more get one slot per buffer.
///
/// # Panics
/// Panics if `elem_size` is zero.
///
/// ```rust
/// use segdeque::buffer_capacity;
///
/// assert_eq!(buffer_capacity(4), 128);
/// assert_eq!(buffer_capacity(24), 21);
/// assert_eq!(buffer_capacity(4096), 1);
/// ```
pub const fn buffer_capacity(elem_size: usize) -> usize {
    assert!(elem_size != 0, "zero-sized elements have no buffer layout");
    if elem_size < BUFFER_BYTES {
        BUFFER_BYTES / elem_size
    } else {
        1
    }
}

/// Per-element-type buffer geometry and storage management.
pub(crate) struct Node<T>(PhantomData<T>);

impl<T> Node<T> {
    /// Slots per buffer. Evaluating it for a zero-sized `T` fails the build.
    pub(crate) const CAPACITY: usize = {
        assert!(
            mem::size_of::<T>() != 0,
            "SegDeque does not support zero-sized element types"
        );
        buffer_capacity(mem::size_of::<T>())
    };

    #[inline]
    pub(crate) fn layout() -> Result<Layout> {
        Layout::array::<T>(Self::CAPACITY).map_err(|_| DequeError::CapacityOverflow)
    }

    /// Allocates one uninitialized buffer.
    pub(crate) fn allocate() -> Result<NonNull<T>> {
        let layout = Self::layout()?;
        // SAFETY: `layout` has non-zero size because `T` is not zero-sized
        // and `CAPACITY >= 1`.
        let raw = unsafe { alloc::alloc(layout) };
        match NonNull::new(raw.cast::<T>()) {
            Some(ptr) => Ok(ptr),
            None => {
                warn_event!(bytes = layout.size(), "node buffer allocation failed");
                Err(DequeError::AllocFailed { layout })
            }
        }
    }

    /// Returns a buffer to the allocator without touching its slots.
    ///
    /// # Safety
    /// `ptr` must come from [`Node::allocate`] for the same `T`, must not be
    /// freed twice, and every element constructed in it must already be
    /// dropped or moved out.
    pub(crate) unsafe fn deallocate(ptr: NonNull<T>) {
        // `allocate` succeeded with this size and alignment, so they form a
        // valid layout.
        let layout = Layout::from_size_align_unchecked(
            mem::size_of::<T>() * Self::CAPACITY,
            mem::align_of::<T>(),
        );
        alloc::dealloc(ptr.as_ptr().cast::<u8>(), layout);
    }
}
