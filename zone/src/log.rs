//! Caller-supplied diagnostics: a category bitmask plus the record shape
//! delivered to the log sink.

use bitflags::bitflags;

bitflags! {
    /// Which diagnostic categories a log sink wants to receive.
    ///
    /// Matches the original's category bitmask: empty at open time means
    /// "no categories selected", which is treated as "all enabled" rather
    /// than "none enabled" (see [`LogCategories::effective`]).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct LogCategories: u8 {
        /// Unrecoverable problems that abort the parse.
        const ERROR = 0b001;
        /// Recoverable oddities the caller may want to know about.
        const WARNING = 0b010;
        /// Informational progress messages (file opened, directive seen).
        const INFO = 0b100;
    }
}

impl LogCategories {
    /// The set actually honored: `self` if non-empty, otherwise every
    /// category (the "nothing selected" default).
    #[must_use]
    pub fn effective(self) -> Self {
        if self.is_empty() {
            Self::all()
        } else {
            self
        }
    }
}

impl Default for LogCategories {
    fn default() -> Self {
        Self::empty()
    }
}

/// One diagnostic message, handed to the caller's log sink.
#[derive(Clone, Copy, Debug)]
pub struct LogRecord<'a> {
    /// Which category this message belongs to (always a single bit).
    pub categories: LogCategories,
    /// Source file the message originated in (`file!()`).
    pub file: &'static str,
    /// Source line the message originated on (`line!()`).
    pub line: u32,
    /// The formatted message text.
    pub message: &'a str,
}
