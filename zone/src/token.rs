//! The logical tokens C4 hands to the grammar layer.

/// One logical token, borrowing its payload (if any) from the active
/// frame's window.
///
/// The borrow is tied to the `&mut Dispatcher` call that produced it, so
/// the type system — not a runtime assertion — forbids holding a token
/// across the next `next_token()` call, which may shuffle the window and
/// invalidate earlier offsets.
#[derive(Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// A bare (unquoted) run of non-blank, non-special bytes.
    Contiguous(&'a [u8]),
    /// The payload of a quoted string, excluding its delimiting quotes.
    Quoted(&'a [u8]),
    /// One or more newlines were crossed outside a group.
    LineFeed {
        /// How many newlines this token accounts for (always `>= 1`).
        lines: u32,
    },
    /// The active frame (and every includer above it) has been exhausted.
    EndOfFile,
}

impl Token<'_> {
    /// `true` for [`Token::EndOfFile`].
    #[must_use]
    pub const fn is_end_of_file(&self) -> bool {
        matches!(self, Token::EndOfFile)
    }
}
