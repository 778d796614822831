//! Collections.
//!
//! - `segmented`: the block-directory double-ended queue, [`SegDeque`](segmented::SegDeque).

pub mod segmented;
