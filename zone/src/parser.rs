//! Entry points: `parse_file`/`parse_str` drive a [`Dispatcher`] over a
//! caller's [`RecordGrammar`]/[`SourceOpener`] pair.
//!
//! `$INCLUDE` is the only directive this module recognizes itself;
//! `$ORIGIN`/`$TTL` are left for the grammar layer to notice on the first
//! token of each record it is handed, per the crate's module docs.

use std::fs::File;
use std::io::{Cursor, Read};

use crate::buffers::Buffers;
use crate::dispatcher::Dispatcher;
use crate::error::{raise, Error};
use crate::frame::FileFrame;
use crate::grammar::{RecordGrammar, SourceOpener};
use crate::log::LogRecord;
use crate::options::Options;
use crate::token::Token;

/// Parses a zone file read from `path`.
///
/// # Errors
///
/// Returns `Error::Io` if `path` cannot be opened, or whatever error
/// `grammar`/`opener` raise while the file is driven through them.
pub fn parse_file<G, O, L>(
    path: &str,
    options: &Options,
    buffers: &mut Buffers,
    grammar: &mut G,
    opener: &mut O,
    log: L,
) -> Result<(), Error>
where
    G: RecordGrammar<L>,
    O: SourceOpener,
    L: FnMut(LogRecord<'_>),
{
    let source: Box<dyn Read> = Box::new(File::open(path)?);
    let root = FileFrame::new(path.to_string(), source);
    run(root, options, buffers, grammar, opener, log)
}

/// Parses zone-file text already held in memory, reported as `"<string>"`
/// in diagnostics and `$INCLUDE` resolution.
///
/// # Errors
///
/// Whatever error `grammar`/`opener` raise while `text` is driven through
/// them.
pub fn parse_str<G, O, L>(
    text: &str,
    options: &Options,
    buffers: &mut Buffers,
    grammar: &mut G,
    opener: &mut O,
    log: L,
) -> Result<(), Error>
where
    G: RecordGrammar<L>,
    O: SourceOpener,
    L: FnMut(LogRecord<'_>),
{
    let source: Box<dyn Read> = Box::new(Cursor::new(text.as_bytes().to_vec()));
    let root = FileFrame::new("<string>".to_string(), source);
    run(root, options, buffers, grammar, opener, log)
}

fn run<G, O, L>(
    root: FileFrame,
    options: &Options,
    buffers: &mut Buffers,
    grammar: &mut G,
    opener: &mut O,
    log: L,
) -> Result<(), Error>
where
    G: RecordGrammar<L>,
    O: SourceOpener,
    L: FnMut(LogRecord<'_>),
{
    let mut dispatcher = Dispatcher::new(options, log, root);
    loop {
        if dispatcher.peek_is_end_of_file()? {
            return Ok(());
        }
        if dispatcher.peek_is_directive(b"$INCLUDE")? {
            handle_include(&mut dispatcher, options, opener)?;
            continue;
        }
        grammar.parse_record(&mut dispatcher, buffers)?;
    }
}

fn handle_include<L, O>(dispatcher: &mut Dispatcher<'_, L>, options: &Options, opener: &mut O) -> Result<(), Error>
where
    L: FnMut(LogRecord<'_>),
    O: SourceOpener,
{
    if options.no_includes {
        let name = dispatcher.current_frame().name.clone();
        return Err(raise!(
            |r| dispatcher.emit_log(r),
            NotPermitted,
            "{name}: $INCLUDE is disabled"
        ));
    }
    dispatcher.take_peeked_contiguous();
    let includer_name = dispatcher.current_frame().name.clone();
    let path = next_argument(dispatcher)?;
    // The rest of the `$INCLUDE` line belongs to this directive, not to
    // whatever record follows it; consume through the line's own
    // LINE_FEED before switching the active frame, so the includer
    // resumes exactly where the new frame should hand control back.
    consume_rest_of_line(dispatcher)?;
    let (source, resolved_name) = opener.open(&path, &includer_name)?;
    dispatcher.push_include(FileFrame::new(resolved_name, source));
    Ok(())
}

fn consume_rest_of_line<L: FnMut(LogRecord<'_>)>(dispatcher: &mut Dispatcher<'_, L>) -> Result<(), Error> {
    loop {
        match dispatcher.next_token()? {
            Token::LineFeed { .. } | Token::EndOfFile => return Ok(()),
            Token::Contiguous(_) | Token::Quoted(_) => {}
        }
    }
}

fn next_argument<L: FnMut(LogRecord<'_>)>(dispatcher: &mut Dispatcher<'_, L>) -> Result<String, Error> {
    let bytes = match dispatcher.next_token()? {
        Token::Contiguous(bytes) | Token::Quoted(bytes) => bytes.to_vec(),
        Token::LineFeed { .. } | Token::EndOfFile => {
            let name = dispatcher.current_frame().name.clone();
            return Err(raise!(
                |r| dispatcher.emit_log(r),
                Syntax,
                "{name}: $INCLUDE requires a path argument"
            ));
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests;
