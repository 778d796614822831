//! # `segdeque` - Segmented-Array Double-Ended Queue
//!
//! A double-ended queue stored as a growable *directory* of fixed-size blocks.
//! Each block is allocated on its own and never moves once filled, so growing
//! the container relocates block pointers only, never element payloads.
//!
//! ## Performance Characteristics
//!
//! - **Push/Pop (both ends)**: O(1) amortized; a push that runs off the
//!   directory edge triggers one O(directory length) growth step.
//! - **Indexed access**: O(1), two dependent loads (directory, then block).
//! - **Growth**: doubles the directory and re-centers the occupied window, so
//!   alternating pushes at both ends cannot thrash.
//!
//! ## Architecture
//!
//! 1. **Directory** (`Vec<Box<[MaybeUninit<T>; BLOCK]>>`): pure storage.
//! 2. **Window**: five coupled cursors (`pivot`, first/last block, first/last
//!    slot) plus the length; the only mutable index state.
//! 3. **Boundary operations**: `push_front`, `push_back`, `pop_front`,
//!    `pop_back`.
//! 4. **Growth plan**: the pure re-centering computation applied by the
//!    directory when a push would leave it.
//!
//! ## Example
//!
//! ```rust
//! use segdeque::SegDeque;
//!
//! let mut deque: SegDeque<i32> = SegDeque::new();
//! deque.push_back(1);
//! deque.push_back(2);
//! deque.push_front(0);
//!
//! assert_eq!(deque.len(), 3);
//! assert_eq!(deque[0], 0);
//! assert_eq!(deque.back(), Ok(&2));
//! assert_eq!(deque.iter().copied().collect::<Vec<_>>(), [0, 1, 2]);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod collections;

pub use collections::segmented::{
    BlocksIter, BlocksIterMut, Cursor, DequeError, Dump, IntoIter, Iter, IterMut, SegDeque,
    DEFAULT_BLOCK,
};

#[cfg(feature = "proptest")]
pub use collections::segmented::strategy;

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // Directory handle plus six index words, nothing else.
    assert!(mem::size_of::<SegDeque<u64>>() <= mem::size_of::<Vec<usize>>() + 6 * mem::size_of::<usize>());

    // Cursors are a reference plus a (block, slot) pair.
    assert!(mem::size_of::<Cursor<'static, u64>>() == 3 * mem::size_of::<usize>());

    // A block of the default size is one allocation of exactly BLOCK elements.
    assert!(mem::size_of::<[mem::MaybeUninit<u64>; DEFAULT_BLOCK]>() == DEFAULT_BLOCK * 8);
};
