//! `SegDeque` — a double-ended queue over a segmented array.
//!
//! ## Memory Layout
//!
//! ```text
//!   directory            blocks (BLOCK slots each)
//!   [0] ──────────────►  [ _  _  _  _  _  _  _  _ ]
//!   [1] first_block ──►  [ _  _  _  a  b  c  d  e ]   first_slot = 2
//!   [2] ──────────────►  [ f  g  h  i  j  k  l  m ]
//!   [3] last_block ───►  [ n  o  _  _  _  _  _  _ ]   last_slot  = 2
//!   [4] ──────────────►  [ _  _  _  _  _  _  _  _ ]
//! ```
//!
//! The front cursor `(first_block, first_slot)` is where the next `push_front`
//! writes; the back cursor `(last_block, last_slot)` is where the next
//! `push_back` writes. When a push would step off either end of the directory,
//! the directory doubles and the occupied blocks are moved (as pointers) so
//! that they keep their distance from the middle of the new directory.
//!
//! ### Time Complexity
//! - **`push_front`/`push_back`**: O(1) amortized, O(directory) on growth
//! - **`pop_front`/`pop_back`**: O(1), never frees blocks
//! - **Indexed access**: O(1)
//!
//! ## Example
//! ```rust
//! use segdeque::SegDeque;
//!
//! // 200 alternating pushes overflow the initial two 64-slot blocks.
//! let mut deque = SegDeque::<u32>::new();
//! for i in 0..200 {
//!     if i % 2 == 0 { deque.push_back(i) } else { deque.push_front(i) }
//! }
//! assert_eq!(deque.len(), 200);
//! assert_eq!(deque.front(), Ok(&199));
//! assert_eq!(deque.back(), Ok(&198));
//! ```

mod cursor;
mod directory;
mod dump;
mod error;
mod growth;
mod iter;
#[cfg(feature = "parallel")]
mod parallel;
mod serde_impl;
#[cfg(feature = "proptest")]
pub mod strategy;
mod traits;
mod window;

use core::ptr;

pub use cursor::Cursor;
pub use dump::Dump;
pub use error::DequeError;
pub use iter::{BlocksIter, BlocksIterMut, IntoIter, Iter, IterMut};

use directory::Directory;
use error::fatal;
use growth::GrowthPlan;
use window::Window;

/// Block size used when none is given: 64 slots per block.
pub const DEFAULT_BLOCK: usize = 64;

/// Directory length of a freshly constructed deque.
const INITIAL_BLOCKS: usize = 2;

/// A double-ended queue stored in a directory of fixed-size blocks.
///
/// `BLOCK` is the number of slots per block and must be a power of two no
/// smaller than 2.
pub struct SegDeque<T, const BLOCK: usize = DEFAULT_BLOCK> {
    directory: Directory<T, BLOCK>,
    window: Window<BLOCK>,
}

impl<T, const BLOCK: usize> SegDeque<T, BLOCK> {
    const VALID_BLOCK: () = assert!(
        BLOCK >= 2 && BLOCK.is_power_of_two(),
        "SegDeque BLOCK must be a power of two >= 2"
    );

    /// Creates an empty deque with the initial two-block directory.
    ///
    /// # Panics
    /// Aborts through the allocation error handler if the initial blocks
    /// cannot be allocated.
    pub fn new() -> Self {
        Self::try_new().unwrap_or_else(|err| fatal(err))
    }

    /// Creates an empty deque, reporting allocation failure.
    ///
    /// # Errors
    /// Returns [`DequeError::AllocFailed`] if the initial blocks cannot be
    /// allocated.
    pub fn try_new() -> Result<Self, DequeError> {
        let () = Self::VALID_BLOCK;
        Ok(Self {
            directory: Directory::try_with_len(INITIAL_BLOCKS)?,
            window: Window::new(),
        })
    }

    /// Creates an empty deque with room for at least `capacity` pushes at
    /// either end before the directory grows.
    ///
    /// # Panics
    /// Panics on capacity overflow; aborts on allocation failure.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|err| fatal(err))
    }

    /// Fallible [`with_capacity`](Self::with_capacity).
    ///
    /// # Errors
    /// Returns [`DequeError::AllocFailed`] or [`DequeError::CapacityOverflow`].
    pub fn try_with_capacity(capacity: usize) -> Result<Self, DequeError> {
        let mut deque = Self::try_new()?;
        deque.try_reserve_back(capacity)?;
        deque.try_reserve_front(capacity)?;
        Ok(deque)
    }

    /// Builds a deque from a buffer by pushing each element at the back.
    pub fn from_slice(values: &[T]) -> Self
    where
        T: Clone,
    {
        let mut deque = Self::new();
        for value in values {
            deque.push_back(value.clone());
        }
        deque
    }

    /// Returns the number of elements.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.window.len
    }

    /// Returns `true` if the deque holds no elements.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.window.len == 0
    }

    /// Returns the number of slots across all blocks in the directory.
    ///
    /// Never decreases.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.directory.len() * BLOCK
    }

    /// Returns the number of blocks in the directory.
    #[inline]
    pub fn directory_len(&self) -> usize {
        self.directory.len()
    }

    /// Returns the block size parameter.
    #[inline(always)]
    pub const fn block_size() -> usize {
        BLOCK
    }

    // ---------------------------------------------------------------------
    // Access

    /// Returns a reference to the element at `index` without bounds checks.
    ///
    /// # Safety
    /// Caller must ensure `index < self.len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.window.len);
        let (block, slot) = self.window.locate(index);
        self.directory.slot(block, slot).assume_init_ref()
    }

    /// Returns a mutable reference to the element at `index` without bounds
    /// checks.
    ///
    /// # Safety
    /// Caller must ensure `index < self.len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.window.len);
        let (block, slot) = self.window.locate(index);
        self.directory.slot_mut(block, slot).assume_init_mut()
    }

    /// Returns a reference to the element at `index`, or `None` if out of
    /// bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.window.len {
            // SAFETY: `index < len`, so the slot is live.
            Some(unsafe { self.get_unchecked(index) })
        } else {
            None
        }
    }

    /// Returns a mutable reference to the element at `index`, or `None` if
    /// out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.window.len {
            // SAFETY: `index < len`, so the slot is live.
            Some(unsafe { self.get_unchecked_mut(index) })
        } else {
            None
        }
    }

    /// Bounds-checked access.
    ///
    /// # Errors
    /// Returns [`DequeError::OutOfRange`] if `index >= self.len()`.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, DequeError> {
        let len = self.window.len;
        self.get(index).ok_or(DequeError::OutOfRange { index, len })
    }

    /// Bounds-checked mutable access.
    ///
    /// # Errors
    /// Returns [`DequeError::OutOfRange`] if `index >= self.len()`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, DequeError> {
        let len = self.window.len;
        self.get_mut(index).ok_or(DequeError::OutOfRange { index, len })
    }

    /// Returns the first element.
    ///
    /// # Errors
    /// Returns [`DequeError::Empty`] if the deque is empty.
    #[inline]
    pub fn front(&self) -> Result<&T, DequeError> {
        self.get(0).ok_or(DequeError::Empty)
    }

    /// Returns the first element mutably.
    ///
    /// # Errors
    /// Returns [`DequeError::Empty`] if the deque is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T, DequeError> {
        self.get_mut(0).ok_or(DequeError::Empty)
    }

    /// Returns the last element.
    ///
    /// # Errors
    /// Returns [`DequeError::Empty`] if the deque is empty.
    #[inline]
    pub fn back(&self) -> Result<&T, DequeError> {
        match self.window.len.checked_sub(1) {
            Some(last) => self.get(last).ok_or(DequeError::Empty),
            None => Err(DequeError::Empty),
        }
    }

    /// Returns the last element mutably.
    ///
    /// # Errors
    /// Returns [`DequeError::Empty`] if the deque is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T, DequeError> {
        match self.window.len.checked_sub(1) {
            Some(last) => self.get_mut(last).ok_or(DequeError::Empty),
            None => Err(DequeError::Empty),
        }
    }

    /// Returns `true` if the deque holds an element equal to `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.blocks().any(|block| block.contains(value))
    }

    // ---------------------------------------------------------------------
    // Boundary operations

    /// Appends an element at the back.
    ///
    /// # Panics
    /// Panics on capacity overflow; aborts if growth cannot allocate.
    #[inline]
    pub fn push_back(&mut self, value: T) {
        if self.window.back_is_blocked(self.directory.len()) {
            self.grow();
        }
        let (block, slot) = self.window.claim_back();
        // SAFETY: `claim_back` hands out the free slot right after the live
        // window; growth above made sure its block exists.
        unsafe {
            self.directory.slot_mut(block, slot).write(value);
        }
    }

    /// Prepends an element at the front.
    ///
    /// # Panics
    /// Panics on capacity overflow; aborts if growth cannot allocate.
    #[inline]
    pub fn push_front(&mut self, value: T) {
        if self.window.front_is_blocked() {
            self.grow();
        }
        let (block, slot) = self.window.claim_front();
        // SAFETY: `claim_front` hands out the free slot right before the live
        // window, inside the directory.
        unsafe {
            self.directory.slot_mut(block, slot).write(value);
        }
    }

    /// Removes and returns the last element; `None` (and no change) if empty.
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        let (block, slot) = self.window.release_back()?;
        // SAFETY: the slot held the last live element and has just left the
        // window, so it is read exactly once.
        Some(unsafe { self.directory.slot(block, slot).assume_init_read() })
    }

    /// Removes and returns the first element; `None` (and no change) if empty.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        let (block, slot) = self.window.release_front()?;
        // SAFETY: the slot held the first live element and has just left the
        // window, so it is read exactly once.
        Some(unsafe { self.directory.slot(block, slot).assume_init_read() })
    }

    /// Drops every element. Blocks and capacity are kept.
    pub fn clear(&mut self) {
        let live = self.window;
        // Collapse first so a panicking destructor cannot cause a double drop.
        self.window.collapse();
        drop_live(&mut self.directory, &live);
    }

    // ---------------------------------------------------------------------
    // Growth

    /// Grows until `additional` more elements can be pushed at the back
    /// without further growth.
    ///
    /// # Errors
    /// Returns [`DequeError::AllocFailed`] or [`DequeError::CapacityOverflow`];
    /// the deque is unchanged by the failed step.
    pub fn try_reserve_back(&mut self, additional: usize) -> Result<(), DequeError> {
        check_request::<T>(additional)?;
        while self.window.back_room(self.directory.len()) < additional {
            self.try_grow()?;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(additional, blocks = self.directory.len(), "reserved at back");
        Ok(())
    }

    /// Grows until `additional` more elements can be pushed at the front
    /// without further growth.
    ///
    /// # Errors
    /// Returns [`DequeError::AllocFailed`] or [`DequeError::CapacityOverflow`];
    /// the deque is unchanged by the failed step.
    pub fn try_reserve_front(&mut self, additional: usize) -> Result<(), DequeError> {
        check_request::<T>(additional)?;
        while self.window.front_room() < additional {
            self.try_grow()?;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(additional, blocks = self.directory.len(), "reserved at front");
        Ok(())
    }

    /// Infallible [`try_reserve_back`](Self::try_reserve_back).
    ///
    /// # Panics
    /// Panics on capacity overflow; aborts on allocation failure.
    pub fn reserve_back(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve_back(additional) {
            fatal(err);
        }
    }

    /// Infallible [`try_reserve_front`](Self::try_reserve_front).
    ///
    /// # Panics
    /// Panics on capacity overflow; aborts on allocation failure.
    pub fn reserve_front(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve_front(additional) {
            fatal(err);
        }
    }

    #[cold]
    fn grow(&mut self) {
        if let Err(err) = self.try_grow() {
            fatal(err);
        }
    }

    /// Doubles the directory and re-centers the window. Element payloads are
    /// never touched.
    fn try_grow(&mut self) -> Result<(), DequeError> {
        let plan = GrowthPlan::for_window(&self.window, self.directory.len())?;
        self.directory.regrow(&plan)?;
        self.window.relocate(&plan);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            old_blocks = plan.old_len,
            new_blocks = plan.new_len,
            pivot = plan.new_pivot,
            first_block = plan.new_first_block,
            last_block = plan.new_last_block,
            len = self.window.len,
            "segdeque directory grown"
        );
        Ok(())
    }
}

/// Rejects requests for more elements than any allocation could hold.
fn check_request<T>(additional: usize) -> Result<(), DequeError> {
    let max = isize::MAX.unsigned_abs() / core::mem::size_of::<T>().max(1);
    if additional > max {
        return Err(DequeError::CapacityOverflow);
    }
    Ok(())
}

/// Drops the elements `window` marks live.
fn drop_live<T, const BLOCK: usize>(directory: &mut Directory<T, BLOCK>, window: &Window<BLOCK>) {
    if !core::mem::needs_drop::<T>() {
        return;
    }
    for block in BlocksIterMut::new(directory, window) {
        // SAFETY: every yielded slice covers live, initialised elements only,
        // and the caller has already removed them from the window.
        unsafe { ptr::drop_in_place(block) };
    }
}

impl<T, const BLOCK: usize> Drop for SegDeque<T, BLOCK> {
    fn drop(&mut self) {
        let live = self.window;
        self.window.collapse();
        drop_live(&mut self.directory, &live);
        // Blocks hold `MaybeUninit<T>`; dropping the directory frees them
        // without touching values.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn contents<T: Clone, const B: usize>(deque: &SegDeque<T, B>) -> Vec<T> {
        deque.iter().cloned().collect()
    }

    #[test]
    fn push_back_push_front_order() {
        let mut d = SegDeque::<i32>::new();
        d.push_back(1);
        d.push_back(2);
        d.push_front(0);
        assert_eq!(d.len(), 3);
        assert_eq!(contents(&d), [0, 1, 2]);
        assert_eq!(d.front(), Ok(&0));
        assert_eq!(d.back(), Ok(&2));
    }

    #[test]
    fn initial_layout() {
        let d = SegDeque::<u8, 4>::new();
        assert_eq!(d.directory_len(), 2);
        assert_eq!(d.capacity(), 8);
        assert_eq!(d.window, Window::new());
        assert!(d.is_empty());
        assert_eq!(SegDeque::<u8, 4>::block_size(), 4);
    }

    #[test]
    fn growth_at_back_keeps_values_and_doubles() {
        let mut d = SegDeque::<usize, 4>::new();
        let mut capacities = vec![d.capacity()];
        for i in 0..100 {
            d.push_back(i);
            capacities.push(d.capacity());
            for j in 0..=i {
                assert_eq!(d[j], j);
            }
        }
        assert!(capacities.windows(2).all(|w| w[0] <= w[1]));
        assert!(d.directory_len().is_power_of_two());
        assert!(d.directory_len() > 2);
    }

    #[test]
    fn growth_at_front_keeps_values() {
        let mut d = SegDeque::<usize, 4>::new();
        for i in 0..100 {
            d.push_front(i);
        }
        let expected: Vec<_> = (0..100).rev().collect();
        assert_eq!(contents(&d), expected);
    }

    #[test]
    fn growth_leaves_room_on_both_sides() {
        let mut d = SegDeque::<u8, 4>::new();
        d.push_front(1);
        // Front cursor now sits on (0, 0); the next push_front must grow.
        assert!(d.window.front_is_blocked());
        d.push_front(0);
        assert_eq!(d.directory_len(), 4);
        assert_eq!(d.window.front_room(), 3);
        assert!(d.window.last_block + 1 < d.directory_len());
        assert_eq!(contents(&d), [0, 1]);
    }

    #[test]
    fn alternating_pushes_do_not_thrash() {
        let mut d = SegDeque::<u32, 4>::new();
        for i in 0..64 {
            if i % 2 == 0 {
                d.push_back(i);
            } else {
                d.push_front(i);
            }
        }
        // 64 elements need 16 blocks plus the two cursor slots; doubling from
        // 2 should not overshoot past 64 entries.
        assert!(d.directory_len() <= 64);
        assert_eq!(d.len(), 64);
    }

    #[test]
    fn pop_on_empty_is_noop() {
        let mut d = SegDeque::<i32, 4>::new();
        let cap = d.capacity();
        assert_eq!(d.pop_back(), None);
        assert_eq!(d.pop_front(), None);
        assert_eq!(d.len(), 0);
        assert_eq!(d.capacity(), cap);
        assert_eq!(d.window, Window::new());
    }

    #[test]
    fn push_pop_round_trip() {
        let mut d = SegDeque::<i32, 4>::new();
        for i in 0..10 {
            d.push_back(i);
        }
        d.push_back(99);
        assert_eq!(d.pop_back(), Some(99));
        assert_eq!(contents(&d), (0..10).collect::<Vec<_>>());

        d.push_front(-1);
        assert_eq!(d.pop_front(), Some(-1));
        assert_eq!(contents(&d), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn pops_cross_block_boundaries() {
        let mut d = SegDeque::<i32, 2>::new();
        for i in 0..9 {
            d.push_back(i);
        }
        assert_eq!(d.pop_front(), Some(0));
        assert_eq!(d.pop_front(), Some(1));
        assert_eq!(d.pop_front(), Some(2));
        assert_eq!(d.pop_back(), Some(8));
        assert_eq!(d.pop_back(), Some(7));
        assert_eq!(contents(&d), [3, 4, 5, 6]);
        while d.pop_front().is_some() {}
        assert!(d.is_empty());
        assert_eq!(d.window.tail(), d.window.head() + 1);
    }

    #[test]
    fn checked_and_unchecked_access() {
        let mut d = SegDeque::<i32, 4>::from_slice(&[5, 6, 7]);
        assert_eq!(d.at(2), Ok(&7));
        assert_eq!(d.at(3), Err(DequeError::OutOfRange { index: 3, len: 3 }));
        assert_eq!(d.get(3), None);
        *d.at_mut(1).unwrap() = 60;
        assert_eq!(unsafe { *d.get_unchecked(1) }, 60);
        unsafe {
            *d.get_unchecked_mut(0) = 50;
        }
        assert_eq!(d.front(), Ok(&50));
    }

    #[test]
    fn front_back_on_empty_fail() {
        let mut d = SegDeque::<i32, 4>::new();
        assert_eq!(d.front(), Err(DequeError::Empty));
        assert_eq!(d.back(), Err(DequeError::Empty));
        assert_eq!(d.front_mut(), Err(DequeError::Empty));
        assert_eq!(d.back_mut(), Err(DequeError::Empty));
    }

    #[test]
    fn front_back_mut() {
        let mut d = SegDeque::<i32, 4>::from_slice(&[1, 2, 3]);
        *d.front_mut().unwrap() = 10;
        *d.back_mut().unwrap() = 30;
        assert_eq!(contents(&d), [10, 2, 30]);
    }

    #[test]
    fn with_capacity_avoids_growth() {
        let mut d = SegDeque::<u16, 8>::with_capacity(100);
        let blocks = d.directory_len();
        for i in 0..100 {
            d.push_back(i);
        }
        assert_eq!(d.directory_len(), blocks);

        let mut d = SegDeque::<u16, 8>::with_capacity(100);
        let blocks = d.directory_len();
        for i in 0..100 {
            d.push_front(i);
        }
        assert_eq!(d.directory_len(), blocks);
    }

    #[test]
    fn reserve_preserves_contents() {
        let mut d = SegDeque::<i32, 4>::from_slice(&[1, 2, 3]);
        d.reserve_front(50);
        d.reserve_back(50);
        assert!(d.window.front_room() >= 50);
        assert!(d.window.back_room(d.directory_len()) >= 50);
        assert_eq!(contents(&d), [1, 2, 3]);
    }

    #[test]
    fn reserve_overflow_is_reported() {
        let mut d = SegDeque::<u8, 4>::new();
        assert_eq!(d.try_reserve_back(usize::MAX), Err(DequeError::CapacityOverflow));
        // The failed step left the deque usable.
        d.push_back(1);
        assert_eq!(d.back(), Ok(&1));
    }

    #[test]
    fn clear_drops_and_keeps_capacity() {
        let counter = Rc::new(Cell::new(0));
        struct Bump(Rc<Cell<usize>>);
        impl Drop for Bump {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let mut d = SegDeque::<Bump, 4>::new();
        for _ in 0..20 {
            d.push_back(Bump(counter.clone()));
        }
        let cap = d.capacity();
        d.clear();
        assert_eq!(counter.get(), 20);
        assert!(d.is_empty());
        assert_eq!(d.capacity(), cap);

        d.push_front(Bump(counter.clone()));
        assert_eq!(d.len(), 1);
        drop(d);
        assert_eq!(counter.get(), 21);
    }

    #[test]
    fn drop_drops_every_live_element_once() {
        let counter = Rc::new(Cell::new(0));
        struct Bump(Rc<Cell<usize>>);
        impl Drop for Bump {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        {
            let mut d = SegDeque::<Bump, 4>::new();
            for i in 0..37 {
                if i % 3 == 0 {
                    d.push_front(Bump(counter.clone()));
                } else {
                    d.push_back(Bump(counter.clone()));
                }
            }
            // Popped values are dropped by the caller.
            drop(d.pop_front());
            drop(d.pop_back());
            assert_eq!(counter.get(), 2);
        }
        assert_eq!(counter.get(), 37);
        assert_eq!(Rc::strong_count(&counter), 1);
    }

    #[test]
    fn contains_searches_live_elements_only() {
        let mut d = SegDeque::<i32, 4>::new();
        for i in 0..10 {
            d.push_back(i);
        }
        d.pop_back();
        assert!(d.contains(&8));
        assert!(!d.contains(&9));
    }

    #[test]
    fn zero_sized_elements() {
        let mut d = SegDeque::<(), 4>::new();
        for _ in 0..100 {
            d.push_back(());
            d.push_front(());
        }
        assert_eq!(d.len(), 200);
        assert_eq!(d.pop_back(), Some(()));
        assert_eq!(d.iter().count(), 199);
    }
}
