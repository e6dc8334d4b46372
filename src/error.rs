//! Error type shared by the fallible deque operations.

use core::alloc::Layout;

/// Errors reported by checked access and fallible reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DequeError {
    /// A checked access asked for an element past the end.
    #[error("index {index} out of range for deque of length {len}")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the deque at the time of the call.
        len: usize,
    },
    /// The requested size does not fit in the address space.
    #[error("capacity overflow")]
    CapacityOverflow,
    /// The global allocator returned null for a node buffer or the map.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocFailed {
        /// Layout of the allocation that failed.
        layout: Layout,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = DequeError> = core::result::Result<T, E>;

/// Turns a reservation error into the std-style abort/panic used by the
/// infallible APIs.
#[inline]
pub(crate) fn handle_reserve<R>(result: Result<R>) -> R {
    match result {
        Ok(value) => value,
        Err(DequeError::AllocFailed { layout }) => std::alloc::handle_alloc_error(layout),
        Err(DequeError::CapacityOverflow) => panic!("capacity overflow"),
        Err(err @ DequeError::OutOfRange { .. }) => unreachable!("{err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_index_and_len() {
        let err = DequeError::OutOfRange { index: 7, len: 3 };
        assert_eq!(err.to_string(), "index 7 out of range for deque of length 3");
    }

    #[test]
    fn alloc_failed_message_reports_size() {
        let layout = Layout::array::<u64>(64).unwrap();
        let err = DequeError::AllocFailed { layout };
        assert_eq!(err.to_string(), "memory allocation of 512 bytes failed");
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn handle_reserve_panics_on_overflow() {
        handle_reserve::<()>(Err(DequeError::CapacityOverflow));
    }
}
