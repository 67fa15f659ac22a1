//! Turns a block's "interesting positions" bitmask into an ordered tape of
//! token-start offsets, folding runs of newlines inside a token into a
//! single pseudo-entry instead of emitting one entry per `'\n'`.

use crate::bits::clear_lowest_bit;
use crate::block::{Block, BLOCK_SIZE};
use crate::state::ScanState;

/// Number of indices a single block typically contributes; sized so the
/// common case (few interesting bytes per block) stays branch-light.
pub const BLOCK_INDEXES: usize = 5;

/// Tape capacity: worst case a block is all newlines inside a quoted
/// region (64 line-feed entries), with headroom for the fast path's
/// unrolled writes plus one block of slack.
pub const TAPE_SIZE: usize = 256 * BLOCK_INDEXES + BLOCK_SIZE;

/// One entry on the position tape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapeEntry {
    /// A byte offset into the window.
    Position(u32),
    /// One or more newlines were elided inside a contiguous or quoted span;
    /// `lines` holds how many to credit to the file's line counter.
    LineFeed { lines: u32 },
}

/// A fixed-capacity, never-reallocated queue of [`TapeEntry`] values.
#[derive(Debug)]
pub struct Tape {
    entries: Vec<TapeEntry>,
    head: usize,
}

impl Tape {
    /// Creates an empty tape with the standard [`TAPE_SIZE`] capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(TAPE_SIZE)
    }

    /// Creates an empty tape with a caller-chosen capacity (useful for
    /// tests that want to exercise the capacity-exhaustion path cheaply).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            head: 0,
        }
    }

    /// Entries not yet consumed by the dispatcher.
    #[must_use]
    pub fn remaining_capacity(&self) -> usize {
        self.entries.capacity() - self.entries.len()
    }

    fn push(&mut self, entry: TapeEntry) {
        debug_assert!(self.entries.len() < self.entries.capacity());
        self.entries.push(entry);
    }

    /// Removes and returns the oldest unconsumed entry.
    pub fn pop_front(&mut self) -> Option<TapeEntry> {
        if self.head >= self.entries.len() {
            return None;
        }
        let entry = self.entries[self.head];
        self.head += 1;
        Some(entry)
    }

    /// Returns the oldest unconsumed entry without removing it.
    #[must_use]
    pub fn peek_front(&self) -> Option<TapeEntry> {
        self.entries.get(self.head).copied()
    }

    /// `true` once every pushed entry has been popped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head >= self.entries.len()
    }

    /// Drops all entries and resets to empty, retaining the allocation.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.head = 0;
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

/// Appends one tape entry per set bit of `block.bits`, in ascending
/// (source) order, folding elided newlines into [`TapeEntry::LineFeed`]
/// pseudo-entries as described in the module docs.
///
/// `window_base` is the byte offset of this block's first byte within the
/// window, added to each bit's position to produce an absolute offset.
pub fn index_block(tape: &mut Tape, window_base: u32, block: &Block, state: &mut ScanState) {
    let mut bits = block.bits;
    let count = bits.count_ones();

    let has_embedded_newlines =
        state.lines != 0 || (block.newline & (block.contiguous | block.in_quoted)) != 0;

    if has_embedded_newlines {
        let mut newline = block.newline;
        for _ in 0..count {
            let bit = bits & bits.wrapping_neg();
            bits ^= bit;
            let offset = window_base + bit.trailing_zeros();

            if bit & newline != 0 {
                tape.push(TapeEntry::LineFeed { lines: state.lines });
                state.lines = 0;
            } else {
                tape.push(TapeEntry::Position(offset));
                state.lines += (newline & !bit.wrapping_neg()).count_ones();
            }
            newline &= bit.wrapping_neg();
        }
    } else {
        for _ in 0..count {
            let offset = window_base + bits.trailing_zeros();
            tape.push(TapeEntry::Position(offset));
            bits = clear_lowest_bit(bits);
        }
    }
}
