//! Standard trait implementations for [`SegDeque`].

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Index, IndexMut};

use super::{DequeError, SegDeque};

impl<T, const BLOCK: usize> Default for SegDeque<T, BLOCK> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const BLOCK: usize> Clone for SegDeque<T, BLOCK> {
    fn clone(&self) -> Self {
        let mut out = Self::new();
        out.extend(self.iter().cloned());
        out
    }
}

impl<T: fmt::Debug, const BLOCK: usize> fmt::Debug for SegDeque<T, BLOCK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const BLOCK: usize> PartialEq for SegDeque<T, BLOCK> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, const BLOCK: usize> Eq for SegDeque<T, BLOCK> {}

impl<T: PartialEq, const BLOCK: usize> PartialEq<[T]> for SegDeque<T, BLOCK> {
    fn eq(&self, other: &[T]) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: PartialEq, const BLOCK: usize, const N: usize> PartialEq<[T; N]> for SegDeque<T, BLOCK> {
    fn eq(&self, other: &[T; N]) -> bool {
        *self == other[..]
    }
}

impl<T: PartialOrd, const BLOCK: usize> PartialOrd for SegDeque<T, BLOCK> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, const BLOCK: usize> Ord for SegDeque<T, BLOCK> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, const BLOCK: usize> Hash for SegDeque<T, BLOCK> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Length first, so that block boundaries never affect the hash.
        state.write_usize(self.len());
        for value in self {
            value.hash(state);
        }
    }
}

impl<T, const BLOCK: usize> Index<usize> for SegDeque<T, BLOCK> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(err) => out_of_range(err),
        }
    }
}

impl<T, const BLOCK: usize> IndexMut<usize> for SegDeque<T, BLOCK> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(err) => out_of_range(err),
        }
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn out_of_range(err: DequeError) -> ! {
    panic!("{err}")
}

impl<T, const BLOCK: usize> Extend<T> for SegDeque<T, BLOCK> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve_back(iter.size_hint().0);
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a, const BLOCK: usize> Extend<&'a T> for SegDeque<T, BLOCK> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, const BLOCK: usize> FromIterator<T> for SegDeque<T, BLOCK> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T, const BLOCK: usize> From<Vec<T>> for SegDeque<T, BLOCK> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Clone, const BLOCK: usize> From<&[T]> for SegDeque<T, BLOCK> {
    fn from(values: &[T]) -> Self {
        Self::from_slice(values)
    }
}

impl<T, const BLOCK: usize, const N: usize> From<[T; N]> for SegDeque<T, BLOCK> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T, const BLOCK: usize> From<SegDeque<T, BLOCK>> for Vec<T> {
    fn from(deque: SegDeque<T, BLOCK>) -> Self {
        let mut out = Vec::with_capacity(deque.len());
        out.extend(deque);
        out
    }
}
