//! Diagnostic block dump.

use core::fmt;

use super::window::Window;
use super::{SegDeque, DEFAULT_BLOCK};

impl<T, const BLOCK: usize> SegDeque<T, BLOCK> {
    /// Returns a view that prints every block of the directory, one line per
    /// block, for debugging.
    ///
    /// Live elements are printed with `Debug`; free slots print as `_`. The
    /// header shows the index state. The format is not stable.
    ///
    /// ```rust
    /// use segdeque::SegDeque;
    ///
    /// let deque = SegDeque::<u8>::from_slice(&[1, 2, 3]);
    /// let dump = deque.dump().to_string();
    /// assert!(dump.contains("1 2 3"));
    /// ```
    pub fn dump(&self) -> Dump<'_, T, BLOCK> {
        Dump { deque: self }
    }
}

/// Block-by-block view of a [`SegDeque`], produced by [`SegDeque::dump`].
pub struct Dump<'a, T, const BLOCK: usize = DEFAULT_BLOCK> {
    deque: &'a SegDeque<T, BLOCK>,
}

impl<'a, T: fmt::Debug, const BLOCK: usize> fmt::Display for Dump<'a, T, BLOCK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let window = &self.deque.window;
        let directory = &self.deque.directory;
        writeln!(
            f,
            "blocks: {}, pivot: {}, first: ({}, {}), last: ({}, {}), len: {}",
            directory.len(),
            window.pivot,
            window.first_block,
            window.first_slot,
            window.last_block,
            window.last_slot,
            window.len,
        )?;
        for block in 0..directory.len() {
            let marker = if block == window.pivot { '*' } else { ' ' };
            write!(f, "{marker}{block:>4} |")?;
            for slot in 0..BLOCK {
                if window.is_live(Window::<BLOCK>::join(block, slot)) {
                    // SAFETY: the position is inside the live window.
                    let value = unsafe { directory.slot(block, slot).assume_init_ref() };
                    write!(f, " {value:?}")?;
                } else {
                    f.write_str(" _")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<'a, T: fmt::Debug, const BLOCK: usize> fmt::Debug for Dump<'a, T, BLOCK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
