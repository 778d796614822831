//! `proptest` strategies for [`SegDeque`] (feature `proptest`).
//!
//! Generated deques are built by a random mix of `push_front` and `push_back`,
//! so their window sits at arbitrary offsets inside the directory.

use core::fmt;
use core::ops::Range;

use proptest::collection::vec;
use proptest::prelude::*;

use super::SegDeque;

/// Which end a generated element is pushed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    /// `push_front`.
    Front,
    /// `push_back`.
    Back,
}

/// Strategy for a deque of `size` elements drawn from `element`.
pub fn seg_deque<S, const BLOCK: usize>(
    element: S,
    size: Range<usize>,
) -> impl Strategy<Value = SegDeque<S::Value, BLOCK>>
where
    S: Strategy,
    S::Value: fmt::Debug,
{
    let end = prop_oneof![Just(End::Front), Just(End::Back)];
    vec((end, element), size).prop_map(|pushes| {
        let mut deque = SegDeque::new();
        for (end, value) in pushes {
            match end {
                End::Front => deque.push_front(value),
                End::Back => deque.push_back(value),
            }
        }
        deque
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_len_in_range(d in seg_deque::<_, 4>(any::<u8>(), 0..64)) {
            prop_assert!(d.len() < 64);
            prop_assert_eq!(d.iter().count(), d.len());
        }
    }
}
