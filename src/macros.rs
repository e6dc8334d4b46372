//! Crate macros: the `segdeque!` constructor and the internal tracing shims.

/// Creates a [`SegDeque`](crate::SegDeque) containing the arguments.
///
/// Mirrors `vec!`: a list of elements, or `value; count` for `count` clones
/// of `value`.
///
/// ```rust
/// use segdeque::segdeque;
///
/// let d = segdeque![1, 2, 3];
/// assert_eq!(d.len(), 3);
///
/// let filled = segdeque![9; 4];
/// assert_eq!(filled.iter().copied().collect::<Vec<_>>(), vec![9, 9, 9, 9]);
/// ```
#[macro_export]
macro_rules! segdeque {
    () => {
        $crate::SegDeque::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::SegDeque::from_elem($n, $elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::SegDeque::from([$($x),+])
    };
}

#[cfg(feature = "tracing")]
macro_rules! debug_event {
    ($($arg:tt)+) => {
        tracing::debug!($($arg)+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_event {
    ($($arg:tt)+) => {};
}

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($($arg:tt)+) => {
        tracing::trace!($($arg)+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($($arg:tt)+) => {};
}

#[cfg(feature = "tracing")]
macro_rules! warn_event {
    ($($arg:tt)+) => {
        tracing::warn!($($arg)+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! warn_event {
    ($($arg:tt)+) => {};
}

#[cfg(test)]
mod tests {
    #[test]
    fn segdeque_macro_forms() {
        let empty: crate::SegDeque<i32> = segdeque![];
        assert!(empty.is_empty());

        let listed = segdeque![1, 2, 3,];
        assert_eq!(listed.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);

        let filled = segdeque![String::from("x"); 3];
        assert_eq!(filled.len(), 3);
        assert!(filled.iter().all(|s| s == "x"));
    }
}
