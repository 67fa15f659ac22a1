//! File handling, windowing, and the `parse_file`/`parse_str` entry points
//! for DNS zone-file text.
//!
//! # Architecture
//!
//! `zone` is the "driven" half of the zone parser's two-layer design:
//!
//! - **[`zone_scan`]**: classifies 64-byte blocks into role bitmasks and
//!   turns those into an ordered position tape. No window management, no
//!   file I/O, no grouping state, no diagnostics.
//! - **`zone`** (this crate): drives `zone_scan` block by block
//!   ([`dispatcher`]), manages the input window ([`window`]) and
//!   file-frame stack ([`frame`]), resolves `( )` grouping, and turns tape
//!   entries into logical [`token::Token`]s.
//!
//! RR parsing, RDATA encoding, and deciding how to open an `$INCLUDE`d path
//! are out of scope; they are collaborator contracts in [`grammar`] that a
//! caller implements and drives through [`parser::parse_file`]/
//! [`parser::parse_str`].

#![warn(missing_docs)]

pub mod buffers;
pub mod dispatcher;
pub mod error;
pub mod frame;
pub mod grammar;
pub mod log;
pub mod options;
pub mod parser;
pub mod token;
pub mod window;

pub use buffers::Buffers;
pub use dispatcher::Dispatcher;
pub use error::Error;
pub use frame::FileFrame;
pub use grammar::{RecordGrammar, SourceOpener};
pub use log::{LogCategories, LogRecord};
pub use options::Options;
pub use parser::{parse_file, parse_str};
pub use token::Token;
