//! Random-access cursors over a [`SegDeque`].
//!
//! A cursor is a `(block, slot)` position stepped with the same carry
//! arithmetic as indexed access. It ranges from the slot just before the first
//! element (the "ghost" front) to the slot just past the last one (the end),
//! and clamps at both.

use core::fmt;

use super::window::Window;
use super::{SegDeque, DEFAULT_BLOCK};

impl<T, const BLOCK: usize> SegDeque<T, BLOCK> {
    /// Returns a cursor on the first element, or on the end if empty.
    pub fn cursor_front(&self) -> Cursor<'_, T, BLOCK> {
        Cursor::at(self, self.window.head() + 1)
    }

    /// Returns a cursor one past the last element.
    pub fn cursor_end(&self) -> Cursor<'_, T, BLOCK> {
        Cursor::at(self, self.window.tail())
    }

    /// Returns a cursor on the element at `index`, clamped to the end.
    pub fn cursor_at(&self, index: usize) -> Cursor<'_, T, BLOCK> {
        let pos = self.window.head() + 1 + index.min(self.window.len);
        Cursor::at(self, pos)
    }
}

/// A position inside a [`SegDeque`], holding a block index and an in-block slot.
///
/// Two cursors are equal when *both* their block and their slot are equal.
pub struct Cursor<'a, T, const BLOCK: usize = DEFAULT_BLOCK> {
    deque: &'a SegDeque<T, BLOCK>,
    block: usize,
    slot: usize,
}

impl<'a, T, const BLOCK: usize> Cursor<'a, T, BLOCK> {
    fn at(deque: &'a SegDeque<T, BLOCK>, pos: usize) -> Self {
        let (block, slot) = Window::<BLOCK>::split(pos);
        Self { deque, block, slot }
    }

    #[inline(always)]
    fn position(&self) -> usize {
        Window::<BLOCK>::join(self.block, self.slot)
    }

    #[inline]
    fn set_position(&mut self, pos: usize) {
        let window = &self.deque.window;
        let (block, slot) = Window::<BLOCK>::split(pos.clamp(window.head(), window.tail()));
        self.block = block;
        self.slot = slot;
    }

    /// Directory entry the cursor points into.
    #[inline]
    pub fn block(&self) -> usize {
        self.block
    }

    /// Slot within [`block`](Self::block).
    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Logical index of the element under the cursor, or `None` on the ghost
    /// front or the end.
    pub fn index(&self) -> Option<usize> {
        let pos = self.position();
        let window = &self.deque.window;
        window.is_live(pos).then(|| pos - window.head() - 1)
    }

    /// The element under the cursor, or `None` on the ghost front or the end.
    pub fn get(&self) -> Option<&'a T> {
        let deque: &'a SegDeque<T, BLOCK> = self.deque;
        self.index().and_then(|index| deque.get(index))
    }

    /// Returns `true` if the cursor is one past the last element.
    pub fn is_end(&self) -> bool {
        self.position() == self.deque.window.tail()
    }

    /// Steps one element towards the back, stopping at the end.
    pub fn move_next(&mut self) {
        self.set_position(self.position() + 1);
    }

    /// Steps one element towards the front, stopping at the ghost front.
    pub fn move_prev(&mut self) {
        self.set_position(self.position().saturating_sub(1));
    }

    /// Moves by `offset` elements (negative towards the front), clamped to
    /// `[ghost front, end]`.
    pub fn seek(&mut self, offset: isize) {
        self.set_position(self.position().saturating_add_signed(offset));
    }

    /// Returns a copy of this cursor moved by `offset`.
    #[must_use]
    pub fn offset(&self, offset: isize) -> Self {
        let mut moved = self.clone();
        moved.seek(offset);
        moved
    }

    /// Signed distance in elements from `other` to `self`.
    #[allow(clippy::cast_possible_wrap)]
    pub fn distance_from(&self, other: &Self) -> isize {
        self.position() as isize - other.position() as isize
    }
}

impl<'a, T, const BLOCK: usize> Clone for Cursor<'a, T, BLOCK> {
    fn clone(&self) -> Self {
        Self {
            deque: self.deque,
            block: self.block,
            slot: self.slot,
        }
    }
}

impl<'a, T, const BLOCK: usize> PartialEq for Cursor<'a, T, BLOCK> {
    fn eq(&self, other: &Self) -> bool {
        self.block == other.block && self.slot == other.slot
    }
}

impl<'a, T, const BLOCK: usize> Eq for Cursor<'a, T, BLOCK> {}

impl<'a, T, const BLOCK: usize> fmt::Debug for Cursor<'a, T, BLOCK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("block", &self.block)
            .field("slot", &self.slot)
            .field("index", &self.index())
            .finish()
    }
}
