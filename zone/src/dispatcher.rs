//! C4: drives the scanner and indexer block by block, manages the window
//! and file-frame stack, resolves `( )` grouping, and turns tape entries
//! into logical [`Token`]s.
//!
//! Grounded on `original_source/src/scanner.h`'s `step()` state machine
//! (the `switch (*token->data)` over `\0`/`\n`/`"`/`(`/`)`/default). Unlike
//! the original, which resets its tape to a single carried-over entry on
//! every call and leaves span-length resolution to downstream consumers
//! (who re-scan with a classification table), this dispatcher keeps
//! consuming from one tape until it runs dry and computes token payload
//! slices itself, matching the data model's "data borrows from the
//! window" design.

use zone_scan::{index_block, scan, TapeEntry, BLOCK_SIZE};

use crate::error::{raise, Error};
use crate::frame::FileFrame;
use crate::log::LogRecord;
use crate::options::Options;
use crate::token::Token;

const fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r')
}

/// A token already pulled off the tape but not yet handed to the caller,
/// stored by value so [`Dispatcher::peek_is_directive`] can look at it
/// without tying up the borrow `next_token` would otherwise return.
enum PendingToken {
    Contiguous(Vec<u8>),
    Quoted(Vec<u8>),
    LineFeed(u32),
    EndOfFile,
}

/// Owns the file-frame stack and drives token production.
pub struct Dispatcher<'a, L: FnMut(LogRecord<'_>)> {
    frames: Vec<FileFrame>,
    options: &'a Options,
    log: L,
    pending: Option<PendingToken>,
    pending_buf: Vec<u8>,
    pending_start_of_line: bool,
}

impl<'a, L: FnMut(LogRecord<'_>)> Dispatcher<'a, L> {
    /// Creates a dispatcher with `root` as the sole, active frame.
    pub fn new(options: &'a Options, log: L, root: FileFrame) -> Self {
        Self {
            frames: vec![root],
            options,
            log,
            pending: None,
            pending_buf: Vec::new(),
            pending_start_of_line: true,
        }
    }

    /// The options this parse was started with.
    #[must_use]
    pub fn options(&self) -> &Options {
        self.options
    }

    /// The active (innermost, top-of-stack) frame.
    #[must_use]
    pub fn current_frame(&self) -> &FileFrame {
        &self.frames[self.frames.len() - 1]
    }

    /// The active frame, mutably.
    pub fn current_frame_mut(&mut self) -> &mut FileFrame {
        let top = self.frames.len() - 1;
        &mut self.frames[top]
    }

    /// Pushes a freshly opened `$INCLUDE`d source as the new active frame.
    /// The core's own `parse` loop calls this after a `SourceOpener`
    /// succeeds; resolving the path and deciding whether `$INCLUDE` is
    /// permitted is the loop's job, not this method's.
    pub fn push_include(&mut self, frame: FileFrame) {
        self.frames.push(frame);
    }

    /// Looks at the next token just far enough to decide whether it opens
    /// a directive line (a start-of-line [`Token::Contiguous`] beginning
    /// with `prefix`), without losing it: the token is stashed and
    /// replayed verbatim by the next [`Dispatcher::next_token`] call,
    /// whether or not the caller acts on the directive itself.
    ///
    /// `$INCLUDE` is the only directive the core recognizes this way;
    /// `$ORIGIN`/`$TTL` are left for the grammar layer to notice on its own
    /// first call to `next_token`.
    ///
    /// # Errors
    ///
    /// Propagates whatever `next_token` would return for this token.
    pub fn peek_is_directive(&mut self, prefix: &[u8]) -> Result<bool, Error> {
        if self.pending.is_none() {
            self.fill_pending()?;
        }
        Ok(match &self.pending {
            Some(PendingToken::Contiguous(bytes)) => self.pending_start_of_line && bytes.as_slice() == prefix,
            _ => false,
        })
    }

    /// Discards the currently stashed lookahead token, returning its bytes
    /// if it was a [`Token::Contiguous`]. Used once the core has decided a
    /// peeked token is a directive it handles itself, so it is never
    /// replayed.
    pub fn take_peeked_contiguous(&mut self) -> Option<Vec<u8>> {
        match self.pending.take() {
            Some(PendingToken::Contiguous(bytes)) => Some(bytes),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Looks at the next token just far enough to tell whether the active
    /// frame (and every includer above it) is exhausted, without losing
    /// it: stashed and replayed the same way as [`Dispatcher::peek_is_directive`].
    ///
    /// # Errors
    ///
    /// Propagates whatever `next_token` would return for this token.
    pub fn peek_is_end_of_file(&mut self) -> Result<bool, Error> {
        if self.pending.is_none() {
            self.fill_pending()?;
        }
        Ok(matches!(self.pending, Some(PendingToken::EndOfFile)))
    }

    fn fill_pending(&mut self) -> Result<(), Error> {
        let start_of_line = self.current_frame().start_of_line;
        let pending = match self.next_token()? {
            Token::Contiguous(bytes) => PendingToken::Contiguous(bytes.to_vec()),
            Token::Quoted(bytes) => PendingToken::Quoted(bytes.to_vec()),
            Token::LineFeed { lines } => PendingToken::LineFeed(lines),
            Token::EndOfFile => PendingToken::EndOfFile,
        };
        self.pending_start_of_line = start_of_line;
        self.pending = Some(pending);
        Ok(())
    }

    pub(crate) fn emit_log(&mut self, record: LogRecord<'_>) {
        if self.options.log_categories.effective().contains(record.categories) {
            (self.log)(record);
        }
    }

    /// Ensures the active frame's tape has at least one unconsumed entry,
    /// or that it is genuinely at end-of-file with nothing left to index.
    /// Scans further blocks, and shuffles/refills the window, as needed.
    fn ensure_tape_entry(&mut self, idx: usize) -> Result<(), Error> {
        loop {
            if self.frames[idx].tape.peek_front().is_some() {
                return Ok(());
            }
            if self.frames[idx].end_of_file {
                return Ok(());
            }

            let unscanned = self.frames[idx].window.unscanned_len();
            let room = self.frames[idx].tape.remaining_capacity();

            if unscanned >= BLOCK_SIZE {
                if room < BLOCK_SIZE {
                    // Tape is known-empty here (peek_front() returned None
                    // above); reclaim its allocation before the next push.
                    self.frames[idx].tape.reset();
                }
                self.scan_full_block(idx);
                continue;
            }

            if self.frames[idx].source.is_some() {
                self.shuffle_and_refill(idx)?;
                continue;
            }

            self.scan_short_block(idx);
            self.frames[idx].end_of_file = true;
        }
    }

    fn scan_full_block(&mut self, idx: usize) {
        let frame = &mut self.frames[idx];
        let offset = frame.window.scanned();
        let input = frame.window.block_at(offset);
        let block = scan(&input, &mut frame.scan_state);
        index_block(&mut frame.tape, offset as u32, &block, &mut frame.scan_state);
        frame.window.advance_scanned(BLOCK_SIZE);
    }

    fn scan_short_block(&mut self, idx: usize) {
        let frame = &mut self.frames[idx];
        let offset = frame.window.scanned();
        let length = frame.window.unscanned_len();
        if length == 0 {
            return;
        }
        let input = frame.window.block_at(offset);
        let mut block = scan(&input, &mut frame.scan_state);
        if length < BLOCK_SIZE {
            let clear = !((1u64 << length) - 1);
            block.bits &= !clear;
            block.contiguous &= !clear;
        }
        index_block(&mut frame.tape, offset as u32, &block, &mut frame.scan_state);
        frame.window.advance_scanned(length);
    }

    fn shuffle_and_refill(&mut self, idx: usize) -> Result<(), Error> {
        let frame = &mut self.frames[idx];
        frame.window.shuffle();
        let read = match frame.source.as_deref_mut() {
            Some(source) => frame.window.refill(source)?,
            None => 0,
        };
        if read == 0 {
            frame.source = None;
        }
        Ok(())
    }

    /// Produces the next logical token from the active frame, popping
    /// exhausted includer frames as needed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Syntax` for unbalanced grouping or an unterminated
    /// quoted string, or propagates an I/O error from the active source.
    pub fn next_token(&mut self) -> Result<Token<'_>, Error> {
        if let Some(pending) = self.pending.take() {
            return Ok(match pending {
                PendingToken::Contiguous(bytes) => {
                    self.pending_buf = bytes;
                    Token::Contiguous(&self.pending_buf)
                }
                PendingToken::Quoted(bytes) => {
                    self.pending_buf = bytes;
                    Token::Quoted(&self.pending_buf)
                }
                PendingToken::LineFeed(lines) => Token::LineFeed { lines },
                PendingToken::EndOfFile => Token::EndOfFile,
            });
        }
        loop {
            let idx = self.frames.len() - 1;
            self.ensure_tape_entry(idx)?;

            let head = self.frames[idx].tape.peek_front();
            match head {
                None => {
                    let grouped = self.frames[idx].grouped;
                    let name = self.frames[idx].name.clone();
                    let line = self.frames[idx].line;
                    if grouped {
                        return Err(raise!(
                            |r| self.emit_log(r),
                            Syntax,
                            "{name}:{line}: missing closing ')'"
                        ));
                    }
                    if idx > 0 {
                        self.frames.pop();
                        continue;
                    }
                    return Ok(Token::EndOfFile);
                }
                Some(TapeEntry::LineFeed { lines }) => {
                    // The pseudo-entry carries no position of its own; the
                    // newline it stands for is always the next literal '\n'
                    // byte from the cursor onward (the fold never elides the
                    // newline that closes out a token, only the ones before
                    // it - see `zone_scan::indexer`).
                    let from = self.frames[idx].window.cursor();
                    let newline_offset = self.find_next_newline(idx, from);
                    self.frames[idx].tape.pop_front();
                    self.frames[idx].window.advance_cursor_to(newline_offset + 1);
                    self.frames[idx].line += lines + 1;
                    if self.frames[idx].grouped {
                        continue;
                    }
                    let next_byte = self.frames[idx].window.byte_at(newline_offset + 1);
                    self.frames[idx].start_of_line = !is_blank(next_byte);
                    return Ok(Token::LineFeed { lines: lines + 1 });
                }
                Some(TapeEntry::Position(offset)) => {
                    let offset = offset as usize;
                    let byte = self.frames[idx].window.byte_at(offset);
                    match byte {
                        b'\n' => {
                            self.frames[idx].tape.pop_front();
                            self.frames[idx].window.advance_cursor_to(offset + 1);
                            self.frames[idx].line += 1;
                            if self.frames[idx].grouped {
                                continue;
                            }
                            let next_byte = self.frames[idx].window.byte_at(offset + 1);
                            self.frames[idx].start_of_line = !is_blank(next_byte);
                            return Ok(Token::LineFeed { lines: 1 });
                        }
                        b'(' => {
                            if self.frames[idx].grouped {
                                let name = self.frames[idx].name.clone();
                                let line = self.frames[idx].line;
                                return Err(raise!(
                                    |r| self.emit_log(r),
                                    Syntax,
                                    "{name}:{line}: nested '('"
                                ));
                            }
                            self.frames[idx].grouped = true;
                            self.frames[idx].tape.pop_front();
                            self.frames[idx].window.advance_cursor_to(offset + 1);
                        }
                        b')' => {
                            if !self.frames[idx].grouped {
                                let name = self.frames[idx].name.clone();
                                let line = self.frames[idx].line;
                                return Err(raise!(
                                    |r| self.emit_log(r),
                                    Syntax,
                                    "{name}:{line}: unmatched ')'"
                                ));
                            }
                            self.frames[idx].grouped = false;
                            self.frames[idx].tape.pop_front();
                            self.frames[idx].window.advance_cursor_to(offset + 1);
                        }
                        b' ' | b'\t' | b'\r' | b';' => {
                            // A pure boundary marker: the byte that ends the
                            // contiguous run just before it (a blank, or a
                            // comment-opening `;`), never a token of its
                            // own. Neither blanks nor comment bodies are
                            // otherwise represented on the tape at all.
                            self.frames[idx].tape.pop_front();
                            self.frames[idx].window.advance_cursor_to(offset + 1);
                        }
                        b'"' => {
                            self.frames[idx].tape.pop_front();
                            self.frames[idx].window.advance_cursor_to(offset + 1);
                            self.ensure_tape_entry(idx)?;
                            let payload_start = self.frames[idx].window.cursor();
                            let close = self.frames[idx].tape.peek_front();
                            let end = match close {
                                Some(TapeEntry::Position(p)) => p as usize,
                                _ => {
                                    let name = self.frames[idx].name.clone();
                                    return Err(raise!(
                                        |r| self.emit_log(r),
                                        Syntax,
                                        "{name}: unterminated quoted string"
                                    ));
                                }
                            };
                            self.frames[idx].tape.pop_front();
                            self.frames[idx].window.advance_cursor_to(end + 1);
                            let slice = self.frames[idx].window.slice(payload_start, end);
                            return Ok(Token::Quoted(slice));
                        }
                        _ => {
                            self.frames[idx].tape.pop_front();
                            self.frames[idx].window.advance_cursor_to(offset);
                            self.ensure_tape_entry(idx)?;
                            let start = self.frames[idx].window.cursor();
                            let end = match self.frames[idx].tape.peek_front() {
                                Some(TapeEntry::Position(p)) => p as usize,
                                Some(TapeEntry::LineFeed { .. }) => {
                                    self.find_next_newline(idx, start)
                                }
                                None => self.frames[idx].window.len(),
                            };
                            self.frames[idx].window.advance_cursor_to(end);
                            let slice = self.frames[idx].window.slice(start, end);
                            return Ok(Token::Contiguous(slice));
                        }
                    }
                }
            }
        }
    }

    /// Locates the literal `'\n'` byte a `LineFeed` pseudo-entry stands in
    /// for, starting from `from`. Used both to bound a contiguous run whose
    /// terminating newline was folded away, and to find the actual newline
    /// position when the pseudo-entry itself is the tape head: a contiguous
    /// run can never itself contain an unescaped special byte, so this is
    /// the only byte left that can mark either boundary.
    fn find_next_newline(&self, idx: usize, from: usize) -> usize {
        let frame = &self.frames[idx];
        let scanned = frame.window.scanned();
        frame
            .window
            .slice(from, scanned)
            .iter()
            .position(|&b| b == b'\n')
            .map_or(scanned, |i| from + i)
    }
}
