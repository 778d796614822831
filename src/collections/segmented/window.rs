//! Index state of a segmented deque: where the live elements sit inside the
//! block directory.
//!
//! Positions are tracked both as `(block, slot)` pairs and, for arithmetic, as
//! *linear* positions `block * BLOCK + slot`. `BLOCK` is a power of two, so the
//! conversion is a shift and a mask.

use super::growth::GrowthPlan;

/// The live window inside the directory.
///
/// `(first_block, first_slot)` is the slot the next `push_front` writes and
/// `(last_block, last_slot)` is the slot the next `push_back` writes. Live
/// elements sit strictly between the two, so an empty window has the cursors
/// adjacent.
///
/// Invariants, given a directory of `blocks` entries:
/// - `first_block <= last_block < blocks`
/// - `first_slot < BLOCK` and `last_slot < BLOCK`
/// - `tail() == head() + len + 1`
/// - `pivot < blocks - 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window<const BLOCK: usize> {
    /// Directory entry treated as the centre since the last growth.
    pub(crate) pivot: usize,
    pub(crate) first_block: usize,
    pub(crate) first_slot: usize,
    pub(crate) last_block: usize,
    pub(crate) last_slot: usize,
    pub(crate) len: usize,
}

impl<const BLOCK: usize> Window<BLOCK> {
    const SHIFT: u32 = BLOCK.trailing_zeros();
    const MASK: usize = BLOCK - 1;

    /// An empty window centred in block 0.
    pub(crate) const fn new() -> Self {
        Self {
            pivot: 0,
            first_block: 0,
            first_slot: BLOCK / 2 - 1,
            last_block: 0,
            last_slot: BLOCK / 2,
            len: 0,
        }
    }

    /// Splits a linear position into `(block, slot)`.
    #[inline(always)]
    pub(crate) const fn split(pos: usize) -> (usize, usize) {
        (pos >> Self::SHIFT, pos & Self::MASK)
    }

    /// Joins `(block, slot)` into a linear position.
    #[inline(always)]
    pub(crate) const fn join(block: usize, slot: usize) -> usize {
        (block << Self::SHIFT) | slot
    }

    /// Linear position of the front cursor (one before the first element).
    #[inline(always)]
    pub(crate) const fn head(&self) -> usize {
        Self::join(self.first_block, self.first_slot)
    }

    /// Linear position of the back cursor (one past the last element).
    #[inline(always)]
    pub(crate) const fn tail(&self) -> usize {
        Self::join(self.last_block, self.last_slot)
    }

    /// Maps a logical index to its `(block, slot)`.
    ///
    /// Does not check `index < len`.
    #[inline(always)]
    pub(crate) const fn locate(&self, index: usize) -> (usize, usize) {
        Self::split(self.head() + 1 + index)
    }

    /// Returns `true` if the linear position `pos` holds a live element.
    #[inline(always)]
    pub(crate) const fn is_live(&self, pos: usize) -> bool {
        self.head() < pos && pos < self.tail()
    }

    /// Pushes possible at the front before the directory must grow.
    #[inline]
    pub(crate) const fn front_room(&self) -> usize {
        self.head()
    }

    /// Pushes possible at the back before the directory must grow.
    #[inline]
    pub(crate) const fn back_room(&self, blocks: usize) -> usize {
        blocks * BLOCK - 1 - self.tail()
    }

    /// The front cursor sits on slot 0 of block 0: a `push_front` would
    /// retreat out of the directory.
    #[inline(always)]
    pub(crate) const fn front_is_blocked(&self) -> bool {
        self.first_block == 0 && self.first_slot == 0
    }

    /// The back cursor sits on the last slot of the last block: a `push_back`
    /// would advance out of the directory.
    #[inline(always)]
    pub(crate) const fn back_is_blocked(&self, blocks: usize) -> bool {
        self.last_block + 1 == blocks && self.last_slot == Self::MASK
    }

    /// Hands out the back cursor's slot and advances the cursor past it.
    ///
    /// Callers must have ruled out [`back_is_blocked`](Self::back_is_blocked).
    #[inline]
    pub(crate) fn claim_back(&mut self) -> (usize, usize) {
        let claimed = (self.last_block, self.last_slot);
        self.last_slot += 1;
        if self.last_slot == BLOCK {
            self.last_slot = 0;
            self.last_block += 1;
        }
        self.len += 1;
        claimed
    }

    /// Hands out the front cursor's slot and retreats the cursor before it.
    ///
    /// Callers must have ruled out [`front_is_blocked`](Self::front_is_blocked).
    #[inline]
    pub(crate) fn claim_front(&mut self) -> (usize, usize) {
        let claimed = (self.first_block, self.first_slot);
        if self.first_slot == 0 {
            self.first_slot = Self::MASK;
            self.first_block -= 1;
        } else {
            self.first_slot -= 1;
        }
        self.len += 1;
        claimed
    }

    /// Retreats the back cursor onto the last element and returns its slot,
    /// or `None` if the window is empty.
    #[inline]
    pub(crate) fn release_back(&mut self) -> Option<(usize, usize)> {
        if self.len == 0 {
            return None;
        }
        if self.last_slot == 0 {
            self.last_slot = Self::MASK;
            self.last_block -= 1;
        } else {
            self.last_slot -= 1;
        }
        self.len -= 1;
        Some((self.last_block, self.last_slot))
    }

    /// Advances the front cursor onto the first element and returns its slot,
    /// or `None` if the window is empty.
    #[inline]
    pub(crate) fn release_front(&mut self) -> Option<(usize, usize)> {
        if self.len == 0 {
            return None;
        }
        self.first_slot += 1;
        if self.first_slot == BLOCK {
            self.first_slot = 0;
            self.first_block += 1;
        }
        self.len -= 1;
        Some((self.first_block, self.first_slot))
    }

    /// Empties the window, leaving the front cursor where it is.
    pub(crate) fn collapse(&mut self) {
        let (block, slot) = Self::split(self.head() + 1);
        self.last_block = block;
        self.last_slot = slot;
        self.len = 0;
    }

    /// Moves the window to where `plan` put its blocks.
    pub(crate) fn relocate(&mut self, plan: &GrowthPlan) {
        self.pivot = plan.new_pivot;
        self.first_block = plan.new_first_block;
        self.last_block = plan.new_last_block;
    }
}
