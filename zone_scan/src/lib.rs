//! Low-level block scanner and position indexer for DNS zone-file text.
//!
//! This crate provides a standalone, pure scanning core with **zero
//! `zone_*` dependencies**. It is designed to be reusable by external tools
//! (linters, formatters, fuzzers) without pulling in file handling, the
//! options surface, or the record-grammar layer.
//!
//! # Architecture
//!
//! `zone_scan` is the "raw" half of the zone parser's two-layer design:
//!
//! - **`zone_scan`** (this crate): classifies 64-byte blocks into role
//!   bitmasks ([`block::scan`]) and turns those into an ordered position
//!   tape ([`indexer::index_block`]). No window management, no file I/O,
//!   no grouping state, no diagnostics.
//! - **`zone`**: drives this crate block by block, manages the input
//!   window and file-frame stack, resolves `( )` grouping, and turns tape
//!   entries into logical tokens.
//!
//! # Stability
//!
//! `Block` and `ScanState` fields are public so `zone` can thread state
//! across calls without indirection; [`indexer::TapeEntry`] may gain
//! variants as the tape format evolves.

#![warn(missing_docs)]

pub mod bits;
pub mod block;
pub mod indexer;
pub mod state;

pub use block::{scan, Block, BLOCK_SIZE};
pub use indexer::{index_block, Tape, TapeEntry, BLOCK_INDEXES, TAPE_SIZE};
pub use state::ScanState;
