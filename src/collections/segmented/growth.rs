//! Directory growth planning.
//!
//! Growth doubles the directory and keeps every occupied block at the same
//! offset from the pivot, with the pivot moved to the middle of the new
//! directory. Only the plan lives here; [`Directory::regrow`] carries it out
//! and [`Window::relocate`] updates the cursors.
//!
//! [`Directory::regrow`]: super::directory::Directory::regrow
//! [`Window::relocate`]: super::window::Window::relocate

use super::error::DequeError;
use super::window::Window;

/// Where one growth step moves the occupied blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GrowthPlan {
    pub(crate) old_len: usize,
    pub(crate) new_len: usize,
    pub(crate) new_pivot: usize,
    /// First and last directory entries moved, in the old directory.
    pub(crate) old_first_block: usize,
    pub(crate) old_last_block: usize,
    /// The same entries in the new directory.
    pub(crate) new_first_block: usize,
    pub(crate) new_last_block: usize,
}

impl GrowthPlan {
    /// Plans doubling a directory of `blocks` entries holding `window`.
    ///
    /// # Errors
    /// Returns [`DequeError::CapacityOverflow`] if the doubled directory, or
    /// its element capacity, does not fit in `usize`.
    pub(crate) fn for_window<const BLOCK: usize>(
        window: &Window<BLOCK>,
        blocks: usize,
    ) -> Result<Self, DequeError> {
        debug_assert!(blocks >= 2);
        debug_assert!(window.pivot < blocks - 1);
        debug_assert!(window.first_block <= window.last_block && window.last_block < blocks);

        let new_len = blocks
            .checked_mul(2)
            .filter(|len| len.checked_mul(BLOCK).is_some())
            .ok_or(DequeError::CapacityOverflow)?;
        let new_pivot = new_len / 2 - 1;

        // `pivot < blocks - 1 == new_pivot`, so the shift is at least one block
        // and the window gains free blocks on both sides.
        let shift = new_pivot - window.pivot;

        Ok(Self {
            old_len: blocks,
            new_len,
            new_pivot,
            old_first_block: window.first_block,
            old_last_block: window.last_block,
            new_first_block: window.first_block + shift,
            new_last_block: window.last_block + shift,
        })
    }

    /// Number of blocks carried over from the old directory.
    #[inline]
    pub(crate) const fn kept(&self) -> usize {
        self.old_last_block - self.old_first_block + 1
    }

    /// Number of fresh blocks the new directory needs.
    #[inline]
    pub(crate) const fn fresh(&self) -> usize {
        self.new_len - self.kept()
    }
}
