//! Collaborator contracts the core invokes but never implements.
//!
//! RR parsing and RDATA encoding are explicitly out of scope (see the
//! crate's module docs); so is deciding how to open an included path. Both
//! are captured here as traits the core drives from its own `parse` loop.

use std::io::Read;

use crate::buffers::Buffers;
use crate::dispatcher::Dispatcher;
use crate::error::Error;
use crate::log::LogRecord;

/// Consumes tokens from a [`Dispatcher`] until a record is complete (and
/// the implementation has invoked whatever accept sink it closed over),
/// `$ORIGIN`/`$TTL` has been recognized and applied, or an error occurs.
///
/// `$INCLUDE` is deliberately **not** this trait's concern: recognizing it
/// and pushing/popping file frames is handled directly by the core's
/// `parse` loop, since "detect the directive and yield control" is inside
/// the stated scope (see the crate's Non-goals). The core only ever calls
/// this once it has peeked ahead and ruled that out, so the very first
/// call `parse_record` makes to `dispatcher.next_token()` transparently
/// replays the token the core already looked at.
///
/// Generic over the log sink type `L` so both callbacks stay statically
/// dispatched (monomorphized) rather than becoming `dyn Trait` objects.
pub trait RecordGrammar<L: FnMut(LogRecord<'_>)> {
    /// `buffers` is the caller-owned scratch pool passed down from
    /// `parse_file`/`parse_str`, handed through on every call so the
    /// implementation never has to stash its own reference to it.
    ///
    /// # Errors
    ///
    /// Any error aborts the parse; the core does not attempt recovery.
    fn parse_record(&mut self, dispatcher: &mut Dispatcher<'_, L>, buffers: &mut Buffers) -> Result<(), Error>;
}

/// Resolves an `$INCLUDE` path to a byte source.
///
/// Given a path string (as written in the zone file) and the name of the
/// frame that is including it, returns a fresh reader plus a canonical
/// name/path string used for diagnostics and recursive `$INCLUDE`
/// resolution.
pub trait SourceOpener {
    /// # Errors
    ///
    /// Returns `Error::Io` if the path cannot be opened, or
    /// `Error::NotAFile` if it resolves to something that is not a regular
    /// file.
    fn open(&mut self, path: &str, includer_name: &str) -> Result<(Box<dyn Read>, String), Error>;
}
