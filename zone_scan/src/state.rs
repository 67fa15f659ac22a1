//! Carry state threaded from one 64-byte block scan to the next.

/// Scanner state carried across block boundaries.
///
/// `in_quoted` and `in_comment` are sign-extended masks (`0` or
/// `u64::MAX`) rather than booleans because [`crate::block::scan`] combines
/// them with other full-width masks via bitwise AND/XOR; collapsing them to
/// a single bit would lose the ability to do that without an extra branch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanState {
    /// The block ended mid backslash-run of odd length: the next block's
    /// first byte is escaped.
    pub is_escaped: bool,
    /// The block ended inside a quoted string.
    pub in_quoted: u64,
    /// The block ended inside a comment.
    pub in_comment: u64,
    /// The block's last byte was contiguous (non-delimiter, non-quoted,
    /// non-comment).
    pub follows_contiguous: bool,
    /// Newlines seen inside a contiguous or quoted span since the last
    /// emitted line-feed token; flushed into a [`crate::indexer::TapeEntry::LineFeed`]
    /// pseudo-entry once the span ends.
    pub lines: u32,
}
