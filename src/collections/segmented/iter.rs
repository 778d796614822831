//! Iterators over a [`SegDeque`]: per element, per block, and by value.

use core::fmt;
use core::iter::{Flatten, FusedIterator};
use core::mem::MaybeUninit;
use core::slice;

use super::directory::{Block, Directory};
use super::window::Window;
use super::{SegDeque, DEFAULT_BLOCK};

impl<T, const BLOCK: usize> SegDeque<T, BLOCK> {
    /// Returns a front-to-back iterator over `&T`.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, BLOCK> {
        Iter {
            directory: &self.directory,
            front: self.window.head() + 1,
            back: self.window.tail(),
        }
    }

    /// Returns a front-to-back iterator over `&mut T`.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T, BLOCK> {
        let remaining = self.window.len;
        IterMut {
            inner: self.blocks_mut().flatten(),
            remaining,
        }
    }

    /// Returns an iterator over the live part of each block, as slices.
    ///
    /// Every yielded slice is non-empty; concatenated they are the deque's
    /// contents in order.
    #[inline]
    pub fn blocks(&self) -> BlocksIter<'_, T, BLOCK> {
        BlocksIter::new(&self.directory, &self.window)
    }

    /// Returns an iterator over the live part of each block, as mutable slices.
    #[inline]
    pub fn blocks_mut(&mut self) -> BlocksIterMut<'_, T, BLOCK> {
        BlocksIterMut::new(&mut self.directory, &self.window)
    }
}

/// Range of directory entries holding live elements in linear positions
/// `[front, back)`.
#[inline]
fn live_blocks<const BLOCK: usize>(front: usize, back: usize) -> core::ops::Range<usize> {
    if front == back {
        return 0..0;
    }
    let (first, _) = Window::<BLOCK>::split(front);
    let (last, _) = Window::<BLOCK>::split(back - 1);
    first..last + 1
}

/// # Safety
/// Every slot in `slots` must be initialised.
#[inline(always)]
unsafe fn assume_init_slice<T>(slots: &[MaybeUninit<T>]) -> &[T] {
    &*(slots as *const [MaybeUninit<T>] as *const [T])
}

/// # Safety
/// Every slot in `slots` must be initialised.
#[inline(always)]
unsafe fn assume_init_slice_mut<T>(slots: &mut [MaybeUninit<T>]) -> &mut [T] {
    &mut *(slots as *mut [MaybeUninit<T>] as *mut [T])
}

/// Iterator over `&T`, produced by [`SegDeque::iter`].
///
/// Positions are resolved with the deque's block arithmetic, so `nth` and
/// `nth_back` are O(1).
pub struct Iter<'a, T, const BLOCK: usize = DEFAULT_BLOCK> {
    directory: &'a Directory<T, BLOCK>,
    /// Linear position of the next element from the front.
    front: usize,
    /// Linear position one past the next element from the back.
    back: usize,
}

impl<'a, T, const BLOCK: usize> Iter<'a, T, BLOCK> {
    #[inline(always)]
    fn read(&self, pos: usize) -> &'a T {
        let directory: &'a Directory<T, BLOCK> = self.directory;
        let (block, slot) = Window::<BLOCK>::split(pos);
        // SAFETY: callers only pass positions in `[front, back)`, which lie
        // inside the live window.
        unsafe { directory.slot(block, slot).assume_init_ref() }
    }
}

impl<'a, T, const BLOCK: usize> Iterator for Iter<'a, T, BLOCK> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let item = self.read(self.front);
        self.front += 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.back - self.front;
        (rem, Some(rem))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.back - self.front {
            self.front = self.back;
            return None;
        }
        self.front += n;
        self.next()
    }

    #[inline]
    fn count(self) -> usize {
        self.back - self.front
    }

    #[inline]
    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, T, const BLOCK: usize> DoubleEndedIterator for Iter<'a, T, BLOCK> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.read(self.back))
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.back - self.front {
            self.back = self.front;
            return None;
        }
        self.back -= n;
        self.next_back()
    }
}

impl<'a, T, const BLOCK: usize> ExactSizeIterator for Iter<'a, T, BLOCK> {}
impl<'a, T, const BLOCK: usize> FusedIterator for Iter<'a, T, BLOCK> {}

impl<'a, T, const BLOCK: usize> Clone for Iter<'a, T, BLOCK> {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T: fmt::Debug, const BLOCK: usize> fmt::Debug for Iter<'a, T, BLOCK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

/// Iterator over `&mut T`, produced by [`SegDeque::iter_mut`].
pub struct IterMut<'a, T, const BLOCK: usize = DEFAULT_BLOCK> {
    inner: Flatten<BlocksIterMut<'a, T, BLOCK>>,
    remaining: usize,
}

impl<'a, T, const BLOCK: usize> Iterator for IterMut<'a, T, BLOCK> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.remaining -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, const BLOCK: usize> DoubleEndedIterator for IterMut<'a, T, BLOCK> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let item = self.inner.next_back()?;
        self.remaining -= 1;
        Some(item)
    }
}

impl<'a, T, const BLOCK: usize> ExactSizeIterator for IterMut<'a, T, BLOCK> {}
impl<'a, T, const BLOCK: usize> FusedIterator for IterMut<'a, T, BLOCK> {}

/// Owning iterator, produced by [`SegDeque::into_iter`].
///
/// Elements not yet yielded are dropped with the iterator.
pub struct IntoIter<T, const BLOCK: usize = DEFAULT_BLOCK> {
    deque: SegDeque<T, BLOCK>,
}

impl<T, const BLOCK: usize> Iterator for IntoIter<T, BLOCK> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.deque.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.deque.len();
        (len, Some(len))
    }
}

impl<T, const BLOCK: usize> DoubleEndedIterator for IntoIter<T, BLOCK> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop_back()
    }
}

impl<T, const BLOCK: usize> ExactSizeIterator for IntoIter<T, BLOCK> {}
impl<T, const BLOCK: usize> FusedIterator for IntoIter<T, BLOCK> {}

/// Iterator over the live part of each block, produced by
/// [`SegDeque::blocks`].
pub struct BlocksIter<'a, T, const BLOCK: usize = DEFAULT_BLOCK> {
    blocks: slice::Iter<'a, Block<T, BLOCK>>,
    front: usize,
    back: usize,
}

impl<'a, T, const BLOCK: usize> BlocksIter<'a, T, BLOCK> {
    pub(crate) fn new(directory: &'a Directory<T, BLOCK>, window: &Window<BLOCK>) -> Self {
        let (front, back) = (window.head() + 1, window.tail());
        Self {
            blocks: directory.as_slice()[live_blocks::<BLOCK>(front, back)].iter(),
            front,
            back,
        }
    }
}

impl<'a, T, const BLOCK: usize> Iterator for BlocksIter<'a, T, BLOCK> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.blocks.next()?;
        let (index, start) = Window::<BLOCK>::split(self.front);
        let end = self.back.min(Window::<BLOCK>::join(index + 1, 0));
        let live = &block[start..start + (end - self.front)];
        self.front = end;
        // SAFETY: the slice lies inside the live window.
        Some(unsafe { assume_init_slice(live) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.blocks.size_hint()
    }
}

impl<'a, T, const BLOCK: usize> DoubleEndedIterator for BlocksIter<'a, T, BLOCK> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let block = self.blocks.next_back()?;
        let (index, _) = Window::<BLOCK>::split(self.back - 1);
        let start = self.front.max(Window::<BLOCK>::join(index, 0));
        let (_, lo) = Window::<BLOCK>::split(start);
        let live = &block[lo..lo + (self.back - start)];
        self.back = start;
        // SAFETY: the slice lies inside the live window.
        Some(unsafe { assume_init_slice(live) })
    }
}

impl<'a, T, const BLOCK: usize> ExactSizeIterator for BlocksIter<'a, T, BLOCK> {}
impl<'a, T, const BLOCK: usize> FusedIterator for BlocksIter<'a, T, BLOCK> {}

/// Iterator over the live part of each block as mutable slices, produced by
/// [`SegDeque::blocks_mut`].
pub struct BlocksIterMut<'a, T, const BLOCK: usize = DEFAULT_BLOCK> {
    blocks: slice::IterMut<'a, Block<T, BLOCK>>,
    front: usize,
    back: usize,
}

impl<'a, T, const BLOCK: usize> BlocksIterMut<'a, T, BLOCK> {
    pub(crate) fn new(directory: &'a mut Directory<T, BLOCK>, window: &Window<BLOCK>) -> Self {
        let (front, back) = (window.head() + 1, window.tail());
        Self {
            blocks: directory.as_mut_slice()[live_blocks::<BLOCK>(front, back)].iter_mut(),
            front,
            back,
        }
    }
}

impl<'a, T, const BLOCK: usize> Iterator for BlocksIterMut<'a, T, BLOCK> {
    type Item = &'a mut [T];

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.blocks.next()?;
        let (index, start) = Window::<BLOCK>::split(self.front);
        let end = self.back.min(Window::<BLOCK>::join(index + 1, 0));
        let live = &mut block[start..start + (end - self.front)];
        self.front = end;
        // SAFETY: the slice lies inside the live window, and each block is
        // yielded at most once.
        Some(unsafe { assume_init_slice_mut(live) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.blocks.size_hint()
    }
}

impl<'a, T, const BLOCK: usize> DoubleEndedIterator for BlocksIterMut<'a, T, BLOCK> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let block = self.blocks.next_back()?;
        let (index, _) = Window::<BLOCK>::split(self.back - 1);
        let start = self.front.max(Window::<BLOCK>::join(index, 0));
        let (_, lo) = Window::<BLOCK>::split(start);
        let live = &mut block[lo..lo + (self.back - start)];
        self.back = start;
        // SAFETY: as in `next`.
        Some(unsafe { assume_init_slice_mut(live) })
    }
}

impl<'a, T, const BLOCK: usize> ExactSizeIterator for BlocksIterMut<'a, T, BLOCK> {}
impl<'a, T, const BLOCK: usize> FusedIterator for BlocksIterMut<'a, T, BLOCK> {}

impl<T, const BLOCK: usize> IntoIterator for SegDeque<T, BLOCK> {
    type Item = T;
    type IntoIter = IntoIter<T, BLOCK>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { deque: self }
    }
}

impl<'a, T, const BLOCK: usize> IntoIterator for &'a SegDeque<T, BLOCK> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, BLOCK>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const BLOCK: usize> IntoIterator for &'a mut SegDeque<T, BLOCK> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, BLOCK>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
