#![allow(clippy::unwrap_used, reason = "tests may panic")]

use std::io::Cursor;

use pretty_assertions::assert_eq;

use super::*;
use crate::buffers::Buffers;

/// Drains one record's worth of tokens into owned strings per call,
/// stopping at the first `LINE_FEED`/`EndOfFile`. Good enough to exercise
/// the core's `parse` loop without any real RR-type knowledge.
struct DrainGrammar {
    records: Vec<Vec<String>>,
}

impl DrainGrammar {
    fn new() -> Self {
        Self { records: Vec::new() }
    }
}

impl<L: FnMut(LogRecord<'_>)> RecordGrammar<L> for DrainGrammar {
    fn parse_record(&mut self, dispatcher: &mut Dispatcher<'_, L>, _buffers: &mut Buffers) -> Result<(), Error> {
        let mut record = Vec::new();
        loop {
            match dispatcher.next_token()? {
                Token::Contiguous(bytes) => record.push(String::from_utf8_lossy(bytes).into_owned()),
                Token::Quoted(bytes) => record.push(String::from_utf8_lossy(bytes).into_owned()),
                Token::LineFeed { .. } | Token::EndOfFile => break,
            }
        }
        self.records.push(record);
        Ok(())
    }
}

struct RejectingOpener;

impl SourceOpener for RejectingOpener {
    fn open(&mut self, path: &str, _includer_name: &str) -> Result<(Box<dyn Read>, String), Error> {
        Err(Error::NotAFile(path.to_string()))
    }
}

struct InMemoryOpener {
    contents: &'static str,
}

impl SourceOpener for InMemoryOpener {
    fn open(&mut self, path: &str, _includer_name: &str) -> Result<(Box<dyn Read>, String), Error> {
        let source: Box<dyn Read> = Box::new(Cursor::new(self.contents.as_bytes().to_vec()));
        Ok((source, path.to_string()))
    }
}

#[test]
fn parse_str_hands_each_record_to_the_grammar() {
    let options = Options::default();
    let mut buffers = Buffers::new(1, 1).unwrap();
    let mut grammar = DrainGrammar::new();
    let mut opener = RejectingOpener;

    parse_str(
        "a 3600 IN A 1.2.3.4\nb IN A 5.6.7.8\n",
        &options,
        &mut buffers,
        &mut grammar,
        &mut opener,
        |_: LogRecord<'_>| {},
    )
    .unwrap();

    assert_eq!(
        grammar.records,
        vec![
            vec!["a", "3600", "IN", "A", "1.2.3.4"],
            vec!["b", "IN", "A", "5.6.7.8"],
        ]
    );
}

#[test]
fn include_is_rejected_when_disabled() {
    let options = Options {
        no_includes: true,
        ..Options::default()
    };
    let mut buffers = Buffers::new(1, 1).unwrap();
    let mut grammar = DrainGrammar::new();
    let mut opener = RejectingOpener;

    let err = parse_str(
        "$INCLUDE other.zone\n",
        &options,
        &mut buffers,
        &mut grammar,
        &mut opener,
        |_: LogRecord<'_>| {},
    );

    assert!(matches!(err, Err(Error::NotPermitted(_))));
}

#[test]
fn include_pushes_a_new_frame_and_resumes_the_includer() {
    let options = Options::default();
    let mut buffers = Buffers::new(1, 1).unwrap();
    let mut grammar = DrainGrammar::new();
    let mut opener = InMemoryOpener {
        contents: "nested IN A 9.9.9.9\n",
    };

    parse_str(
        "$INCLUDE other.zone\nafter IN A 1.1.1.1\n",
        &options,
        &mut buffers,
        &mut grammar,
        &mut opener,
        |_: LogRecord<'_>| {},
    )
    .unwrap();

    assert_eq!(
        grammar.records,
        vec![vec!["nested", "IN", "A", "9.9.9.9"], vec!["after", "IN", "A", "1.1.1.1"],]
    );
}

#[test]
fn include_after_a_multiline_quoted_record_is_still_recognized() {
    // The preceding record's last token is a quoted string spanning a
    // newline, which folds its embedded newline into the same `LineFeed`
    // pseudo-entry as the one that ends the record; `$INCLUDE` on the very
    // next line must still be recognized as a directive, not swallowed as
    // an ordinary record token.
    let options = Options::default();
    let mut buffers = Buffers::new(1, 1).unwrap();
    let mut grammar = DrainGrammar::new();
    let mut opener = InMemoryOpener {
        contents: "nested IN A 9.9.9.9\n",
    };

    parse_str(
        "x TXT \"a\n b\"\n$INCLUDE other.zone\nafter IN A 1.1.1.1\n",
        &options,
        &mut buffers,
        &mut grammar,
        &mut opener,
        |_: LogRecord<'_>| {},
    )
    .unwrap();

    assert_eq!(
        grammar.records,
        vec![
            vec!["x", "TXT", "a\n b"],
            vec!["nested", "IN", "A", "9.9.9.9"],
            vec!["after", "IN", "A", "1.1.1.1"],
        ]
    );
}

#[test]
fn an_unreadable_path_surfaces_the_openers_error() {
    let options = Options::default();
    let mut buffers = Buffers::new(1, 1).unwrap();
    let mut grammar = DrainGrammar::new();
    let mut opener = RejectingOpener;

    let err = parse_str(
        "$INCLUDE missing.zone\n",
        &options,
        &mut buffers,
        &mut grammar,
        &mut opener,
        |_: LogRecord<'_>| {},
    );

    assert!(matches!(err, Err(Error::NotAFile(_))));
}
