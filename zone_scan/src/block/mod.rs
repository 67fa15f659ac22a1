//! Classifies one 64-byte block of zone-file text into role bitmasks.
//!
//! Unlike JSON, zone-file comments cannot be told apart from quoted strings
//! by a branch-free algorithm: a `;` inside a `"…"` string is literal, and a
//! `"` inside a comment is literal. [`find_delimiters`] resolves this by
//! iterating the block's delimiters in source order, each time committing to
//! whichever region (quote or comment) the lowest-set delimiter opens and
//! skipping over everything until that region's matching close.

use crate::bits::{find_escaped, follows, prefix_xor, sign_extend};
use crate::state::ScanState;

/// Number of bytes the scanner classifies in one call.
pub const BLOCK_SIZE: usize = 64;

/// Role bitmasks produced by classifying one block.
#[derive(Clone, Copy, Debug)]
pub struct Block {
    /// Positions the indexer should record: the first byte of every
    /// contiguous run, the first byte *after* every contiguous run ends
    /// (so the dispatcher can bound the run without re-scanning raw
    /// bytes), the opening quote of every quoted string, and every special
    /// byte (`(`, `)`, `\n`).
    pub bits: u64,
    /// Bytes that are part of a bare (unquoted, uncommented) token.
    pub contiguous: u64,
    /// Bytes inside a quoted string, including its delimiting quotes.
    pub in_quoted: u64,
    /// Bytes inside a comment.
    pub in_comment: u64,
    /// `'\n'` bytes, regardless of context.
    pub newline: u64,
    /// Unescaped `"` bytes that open or close a quoted string.
    pub quoted: u64,
}

fn mask_where(input: &[u8; BLOCK_SIZE], pred: impl Fn(u8) -> bool) -> u64 {
    let mut mask = 0u64;
    for (i, &byte) in input.iter().enumerate() {
        if pred(byte) {
            mask |= 1 << i;
        }
    }
    mask
}

const fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

const fn is_special(byte: u8) -> bool {
    // `;` is deliberately excluded: a comment's opening semicolon is always
    // masked out by `in_comment` at its own position (the same toggle
    // semantics that mask a quote's opening `"`), so indexing it here would
    // be dead weight.
    matches!(byte, b'(' | b')' | b'"' | b'\n')
}

/// Resolves which delimiters in the block open a quoted string and which
/// open a comment, honoring carry-in state from the previous block.
///
/// `quotes` and `semicolons` must be disjoint (both are pre-filtered to
/// exclude escaped bytes by the caller). Returns `(quoted, comment)`.
#[must_use]
pub fn find_delimiters(
    quotes: u64,
    semicolons: u64,
    newlines: u64,
    in_quoted: u64,
    in_comment: u64,
) -> (u64, u64) {
    debug_assert_eq!(quotes & semicolons, 0);

    let mut starts = quotes | semicolons;

    // Carry over whichever region (if any) was already open at block start.
    let mut end = (newlines & in_comment) | (quotes & in_quoted);
    end &= end.wrapping_neg();

    let mut delimiters = end;
    starts &= !((in_comment | in_quoted) ^ (end.wrapping_neg().wrapping_sub(end)));

    while starts != 0 {
        let start = starts.wrapping_neg() & starts;
        let quote = quotes & start;
        let semicolon = semicolons & start;

        end = (newlines & semicolon.wrapping_neg()) | (quotes & (quote.wrapping_neg().wrapping_sub(quote)));
        end &= end.wrapping_neg();

        delimiters |= end | start;
        starts &= end.wrapping_neg().wrapping_sub(end);
    }

    (delimiters & quotes, delimiters & !quotes)
}

/// Classifies one 64-byte block, updating `state` with the carry for the
/// next call.
#[must_use]
pub fn scan(input: &[u8; BLOCK_SIZE], state: &mut ScanState) -> Block {
    let newline = mask_where(input, |b| b == b'\n');
    let backslash = mask_where(input, |b| b == b'\\');
    let escaped = find_escaped(backslash, &mut state.is_escaped);

    let quotes = mask_where(input, |b| b == b'"') & !escaped;
    let semicolons = mask_where(input, |b| b == b';') & !escaped;

    let in_quoted_carry = state.in_quoted;
    let in_comment_carry = state.in_comment;

    let (quoted, in_quoted, in_comment) = if in_comment_carry != 0 || semicolons != 0 {
        let (quoted, comment) = find_delimiters(quotes, semicolons, newline, in_quoted_carry, in_comment_carry);
        let in_quoted = in_quoted_carry ^ prefix_xor(quoted);
        let in_comment = in_comment_carry ^ prefix_xor(comment);
        state.in_quoted = sign_extend(in_quoted);
        state.in_comment = sign_extend(in_comment);
        (quoted, in_quoted, in_comment)
    } else {
        let in_quoted = in_quoted_carry ^ prefix_xor(quotes);
        state.in_quoted = sign_extend(in_quoted);
        (quotes, in_quoted, in_comment_carry)
    };

    let blank = mask_where(input, is_blank) & !(escaped | in_quoted | in_comment);
    let special = mask_where(input, is_special) & !(escaped | in_quoted | in_comment);

    let contiguous = !(blank | special | quoted) & !(in_quoted | in_comment);
    let follows_contiguous = follows(contiguous, &mut state.follows_contiguous);

    // Whatever immediately follows a contiguous run and isn't itself
    // contiguous terminates it: a blank, a comment-opening `;`, or a
    // delimiter already covered by `special`/`quoted` below (harmless
    // overlap, since `bits` is a set).
    let contiguous_end = follows_contiguous & !contiguous;

    let bits = (contiguous & !follows_contiguous) | contiguous_end | (quoted & in_quoted) | special;

    Block {
        bits,
        contiguous,
        in_quoted,
        in_comment,
        newline,
        quoted,
    }
}
