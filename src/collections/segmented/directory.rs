//! Block storage: the directory of individually allocated blocks.
//!
//! Blocks are `Box<[MaybeUninit<T>; BLOCK]>`. Dropping a block frees its memory
//! but never drops element values; the deque drops live elements itself.

use core::alloc::Layout;
use core::mem::{self, MaybeUninit};
use core::ptr::NonNull;
use std::alloc;

use super::error::DequeError;
use super::growth::GrowthPlan;

/// One fixed-capacity block of uninitialised slots.
pub(crate) type Block<T, const BLOCK: usize> = Box<[MaybeUninit<T>; BLOCK]>;

/// Ordered, owning sequence of blocks. Every entry holds a block.
pub(crate) struct Directory<T, const BLOCK: usize> {
    blocks: Vec<Block<T, BLOCK>>,
}

impl<T, const BLOCK: usize> Directory<T, BLOCK> {
    /// Allocates a directory of `len` fresh blocks.
    pub(crate) fn try_with_len(len: usize) -> Result<Self, DequeError> {
        let mut blocks = Vec::new();
        try_reserve_blocks(&mut blocks, len)?;
        for _ in 0..len {
            blocks.push(try_new_block()?);
        }
        Ok(Self { blocks })
    }

    /// Number of directory entries.
    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the slot at `(block, slot)`.
    ///
    /// # Safety
    /// `block < self.len()` and `slot < BLOCK`.
    #[inline(always)]
    pub(crate) unsafe fn slot(&self, block: usize, slot: usize) -> &MaybeUninit<T> {
        debug_assert!(block < self.blocks.len() && slot < BLOCK);
        self.blocks.get_unchecked(block).get_unchecked(slot)
    }

    /// Returns the slot at `(block, slot)` mutably.
    ///
    /// # Safety
    /// `block < self.len()` and `slot < BLOCK`.
    #[inline(always)]
    pub(crate) unsafe fn slot_mut(&mut self, block: usize, slot: usize) -> &mut MaybeUninit<T> {
        debug_assert!(block < self.blocks.len() && slot < BLOCK);
        self.blocks.get_unchecked_mut(block).get_unchecked_mut(slot)
    }

    /// All blocks in directory order.
    #[inline]
    pub(crate) fn as_slice(&self) -> &[Block<T, BLOCK>] {
        &self.blocks
    }

    /// All blocks in directory order, mutably.
    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [Block<T, BLOCK>] {
        &mut self.blocks
    }

    /// Carries out `plan`: moves the blocks in
    /// `[plan.old_first_block, plan.old_last_block]` to their new entries,
    /// frees every other old block and fills the rest with fresh blocks.
    ///
    /// Every allocation happens before the old directory is touched, so on
    /// error the directory is unchanged.
    pub(crate) fn regrow(&mut self, plan: &GrowthPlan) -> Result<(), DequeError> {
        debug_assert_eq!(plan.old_len, self.blocks.len());

        let mut fresh = Vec::new();
        try_reserve_blocks(&mut fresh, plan.fresh())?;
        for _ in 0..plan.fresh() {
            fresh.push(try_new_block()?);
        }
        let mut grown = Vec::new();
        try_reserve_blocks(&mut grown, plan.new_len)?;

        let mut fresh = fresh.into_iter();
        grown.extend(fresh.by_ref().take(plan.new_first_block));
        // Blocks skipped or left over by this iterator hold no live elements
        // and are freed when it drops.
        grown.extend(
            mem::take(&mut self.blocks)
                .into_iter()
                .skip(plan.old_first_block)
                .take(plan.kept()),
        );
        grown.extend(fresh);

        debug_assert_eq!(grown.len(), plan.new_len);
        self.blocks = grown;
        Ok(())
    }
}

/// Allocates one uninitialised block.
pub(crate) fn try_new_block<T, const BLOCK: usize>() -> Result<Block<T, BLOCK>, DequeError> {
    let layout = Layout::new::<[MaybeUninit<T>; BLOCK]>();
    if layout.size() == 0 {
        // SAFETY: a dangling, aligned pointer is a valid `Box` of a zero-sized value.
        return Ok(unsafe { Box::from_raw(NonNull::<[MaybeUninit<T>; BLOCK]>::dangling().as_ptr()) });
    }
    // SAFETY: `layout` has non-zero size.
    let raw = unsafe { alloc::alloc(layout) }.cast::<[MaybeUninit<T>; BLOCK]>();
    let ptr = NonNull::new(raw).ok_or(DequeError::AllocFailed { layout })?;
    // SAFETY:
    // - `ptr` comes from the global allocator with the layout `Box` uses for this type.
    // - An uninitialised `[MaybeUninit<T>; BLOCK]` is a valid value.
    Ok(unsafe { Box::from_raw(ptr.as_ptr()) })
}

fn try_reserve_blocks<T, const BLOCK: usize>(
    blocks: &mut Vec<Block<T, BLOCK>>,
    additional: usize,
) -> Result<(), DequeError> {
    blocks.try_reserve_exact(additional).map_err(|_| {
        match Layout::array::<Block<T, BLOCK>>(blocks.len().saturating_add(additional)) {
            Ok(layout) => DequeError::AllocFailed { layout },
            Err(_) => DequeError::CapacityOverflow,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_blocks(dir: &mut Directory<usize, 4>) {
        for (i, block) in dir.as_mut_slice().iter_mut().enumerate() {
            block[0].write(i);
        }
    }

    fn block_addr(dir: &Directory<usize, 4>, i: usize) -> *const MaybeUninit<usize> {
        dir.as_slice()[i][..].as_ptr()
    }

    #[test]
    fn with_len_allocates_every_entry() {
        let dir = Directory::<u32, 8>::try_with_len(4).unwrap();
        assert_eq!(dir.len(), 4);
        assert_eq!(dir.as_slice().len(), 4);
    }

    #[test]
    fn slot_access_round_trips() {
        let mut dir = Directory::<u32, 8>::try_with_len(2).unwrap();
        unsafe {
            dir.slot_mut(1, 7).write(42);
            assert_eq!(dir.slot(1, 7).assume_init_read(), 42);
        }
    }

    #[test]
    fn regrow_moves_window_blocks_without_copying() {
        let mut dir = Directory::<usize, 4>::try_with_len(4).unwrap();
        tag_blocks(&mut dir);
        let kept: Vec<_> = (1..=2).map(|i| block_addr(&dir, i)).collect();

        let plan = GrowthPlan {
            old_len: 4,
            new_len: 8,
            new_pivot: 3,
            old_first_block: 1,
            old_last_block: 2,
            new_first_block: 3,
            new_last_block: 4,
        };
        dir.regrow(&plan).unwrap();

        assert_eq!(dir.len(), 8);
        assert_eq!(block_addr(&dir, 3), kept[0]);
        assert_eq!(block_addr(&dir, 4), kept[1]);
        unsafe {
            assert_eq!(dir.slot(3, 0).assume_init_read(), 1);
            assert_eq!(dir.slot(4, 0).assume_init_read(), 2);
        }
    }

    #[test]
    fn regrow_fills_every_entry_with_distinct_blocks() {
        let mut dir = Directory::<usize, 4>::try_with_len(2).unwrap();
        let plan = GrowthPlan {
            old_len: 2,
            new_len: 4,
            new_pivot: 1,
            old_first_block: 0,
            old_last_block: 0,
            new_first_block: 1,
            new_last_block: 1,
        };
        dir.regrow(&plan).unwrap();
        let mut addrs: Vec<_> = (0..dir.len()).map(|i| block_addr(&dir, i)).collect();
        addrs.sort();
        addrs.dedup();
        assert_eq!(addrs.len(), 4);
    }

    #[test]
    fn zero_sized_blocks() {
        let mut dir = Directory::<(), 16>::try_with_len(2).unwrap();
        unsafe {
            dir.slot_mut(1, 15).write(());
        }
        assert_eq!(dir.len(), 2);
    }
}
