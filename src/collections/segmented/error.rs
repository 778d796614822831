use core::alloc::Layout;
use core::fmt;

/// The error type for [`SegDeque`](super::SegDeque) operations that can fail.
///
/// Popping from an empty deque is not an error; it returns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DequeError {
    /// A checked access named a position at or past the end.
    OutOfRange {
        /// The requested logical index.
        index: usize,
        /// The number of elements at the time of the access.
        len: usize,
    },
    /// `front`/`back` was called on an empty deque.
    Empty,
    /// The global allocator could not satisfy a block or directory request.
    AllocFailed {
        /// Layout of the request that failed.
        layout: Layout,
    },
    /// The grown directory or its capacity would not fit in `usize`.
    CapacityOverflow,
}

impl fmt::Display for DequeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index out of bounds: the len is {len} but the index is {index}")
            }
            Self::Empty => f.write_str("deque is empty"),
            Self::AllocFailed { layout } => write!(
                f,
                "memory allocation of {} bytes (align {}) failed",
                layout.size(),
                layout.align()
            ),
            Self::CapacityOverflow => f.write_str("capacity overflow"),
        }
    }
}

impl std::error::Error for DequeError {}

/// Reports an error from an infallible path.
///
/// Allocation failures go through the global allocation error handler, the
/// same way `Box`/`Vec` report them; everything else panics.
#[cold]
#[inline(never)]
pub(crate) fn fatal(err: DequeError) -> ! {
    match err {
        DequeError::AllocFailed { layout } => std::alloc::handle_alloc_error(layout),
        other => panic!("{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            DequeError::OutOfRange { index: 7, len: 3 }.to_string(),
            "index out of bounds: the len is 3 but the index is 7"
        );
        assert_eq!(DequeError::Empty.to_string(), "deque is empty");
        assert_eq!(DequeError::CapacityOverflow.to_string(), "capacity overflow");

        let layout = Layout::new::<[u64; 4]>();
        assert_eq!(
            DequeError::AllocFailed { layout }.to_string(),
            "memory allocation of 32 bytes (align 8) failed"
        );
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<DequeError>();
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn fatal_panics_on_overflow() {
        fatal(DequeError::CapacityOverflow);
    }
}
