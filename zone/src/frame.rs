//! One open source (top-level file or `$INCLUDE`d file/string) and
//! everything C4 needs to track about it.

use std::io::Read;

use zone_scan::{ScanState, Tape};

use crate::window::Window;

/// One frame of the file-frame stack.
///
/// Grounded on the original's `zone_file_t`: `includer`, `line`,
/// `last_type`/`last_class`/`last_ttl`, `grouped`, `start_of_line`,
/// `end_of_file`. The includer link itself is not a field here — frames
/// are held in a `Vec<FileFrame>` (a literal stack) by the parser, so the
/// previous element in that vector *is* the includer, for free.
pub struct FileFrame {
    /// Name used in diagnostics (a path, or `"<string>"` for `parse_str`).
    pub name: String,
    /// The underlying byte source; `None` once fully drained.
    pub source: Option<Box<dyn Read>>,
    /// The input window this frame reads blocks from.
    pub window: Window,
    /// Scanner carry state threaded across this frame's block scans.
    pub scan_state: ScanState,
    /// Position tape for this frame's window.
    pub tape: Tape,
    /// 1-based line counter.
    pub line: u32,
    /// `true` while lexically inside `( ... )`.
    pub grouped: bool,
    /// `true` when the next token would start the owner-name column.
    pub start_of_line: bool,
    /// `true` once the source has yielded its last byte and the window's
    /// tail has been fully tokenized.
    pub end_of_file: bool,
    /// Raw bytes of the most recently parsed owner name, if any. Encoding
    /// is the grammar layer's concern; the core only remembers the bytes
    /// so an omitted-owner record can inherit them.
    pub last_owner: Option<Vec<u8>>,
    /// Most recently parsed record class, if any.
    pub last_class: Option<u16>,
    /// Most recently parsed record type, if any.
    pub last_type: Option<u16>,
    /// Most recently parsed (or defaulted) TTL, if any.
    pub last_ttl: Option<u32>,
}

impl FileFrame {
    /// Creates a fresh frame for a newly opened source.
    #[must_use]
    pub fn new(name: String, source: Box<dyn Read>) -> Self {
        Self {
            name,
            source: Some(source),
            window: Window::new(),
            scan_state: ScanState::default(),
            tape: Tape::new(),
            line: 1,
            grouped: false,
            start_of_line: true,
            end_of_file: false,
            last_owner: None,
            last_class: None,
            last_type: None,
            last_ttl: None,
        }
    }
}
