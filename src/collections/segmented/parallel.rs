//! Block-parallel traversal (feature `parallel`).
//!
//! Blocks are disjoint allocations, so each live block slice is handed to a
//! separate `rayon` task.

use rayon::prelude::*;

use super::SegDeque;

impl<T: Send, const BLOCK: usize> SegDeque<T, BLOCK> {
    /// Calls `f` on every element, spreading whole blocks across the `rayon`
    /// thread pool. Visiting order is unspecified.
    pub fn par_for_each_mut<F>(&mut self, f: F)
    where
        F: Fn(&mut T) + Sync + Send,
    {
        let blocks: Vec<&mut [T]> = self.blocks_mut().collect();
        blocks
            .into_par_iter()
            .for_each(|block| block.iter_mut().for_each(&f));
    }

    /// Folds every block in parallel with `fold`, then combines the partial
    /// results with `reduce`.
    pub fn par_fold_blocks<A, F, R>(&self, identity: A, fold: F, reduce: R) -> A
    where
        T: Sync,
        A: Clone + Send + Sync,
        F: Fn(A, &T) -> A + Sync + Send,
        R: Fn(A, A) -> A + Sync + Send,
    {
        let blocks: Vec<&[T]> = self.blocks().collect();
        blocks
            .into_par_iter()
            .map(|block| block.iter().fold(identity.clone(), &fold))
            .reduce(|| identity.clone(), &reduce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_each_mut_touches_every_element() {
        let mut d: SegDeque<u64, 4> = (0..1000).collect();
        d.par_for_each_mut(|x| *x *= 2);
        assert!(d.iter().copied().eq((0..1000).map(|x| x * 2)));
    }

    #[test]
    fn fold_blocks_sums() {
        let mut d = SegDeque::<u64, 8>::new();
        for i in 0..500 {
            if i % 2 == 0 {
                d.push_back(i);
            } else {
                d.push_front(i);
            }
        }
        let sum = d.par_fold_blocks(0u64, |acc, x| acc + x, |a, b| a + b);
        assert_eq!(sum, (0..500).sum::<u64>());
    }
}
