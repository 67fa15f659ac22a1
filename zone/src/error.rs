//! Error taxonomy and the `raise!` macro that pairs logging with error
//! construction so the two can never drift apart.

use std::fmt;

use crate::log::{LogCategories, LogRecord};

/// Everything that can go wrong while parsing a zone file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed lexical structure: unterminated quoted string, unbalanced
    /// parentheses, a label longer than 63 octets, and similar.
    #[error("syntax error: {0}")]
    Syntax(String),
    /// An RR-specific violation, raised by the grammar layer.
    #[error("semantic error: {0}")]
    Semantic(String),
    /// A `Buffers` pool ran out of owner-name or RDATA scratch space.
    #[error("out of memory: {0}")]
    OutOfMemory(String),
    /// An invalid combination of `Options` was supplied at open time.
    #[error("bad parameter: {0}")]
    BadParameter(String),
    /// The underlying source could not be read.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// A recognized but unsupported directive or RR type.
    #[error("not implemented: {0}")]
    NotImplemented(String),
    /// A `SourceOpener` resolved a path to something that is not a regular
    /// file (a directory, a device, ...).
    #[error("not a file: {0}")]
    NotAFile(String),
    /// The operation is disallowed by the active `Options` (e.g. `$INCLUDE`
    /// with `no_includes` set).
    #[error("not permitted: {0}")]
    NotPermitted(String),
}

impl Error {
    /// Maps this error to the original implementation's signed,
    /// multiple-of-256 status numbering, for interop with code that expects
    /// the historical convention.
    #[must_use]
    pub const fn status(&self) -> i32 {
        match self {
            Self::Syntax(_) => -256,
            Self::Semantic(_) => -512,
            Self::OutOfMemory(_) => -768,
            Self::BadParameter(_) => -1024,
            Self::Io(_) => -1280,
            Self::NotImplemented(_) => -1536,
            Self::NotAFile(_) => -1792,
            Self::NotPermitted(_) => -2048,
        }
    }

    /// The log category this error family is reported under. All of them
    /// are `ERROR`; kept as a method rather than a constant so future
    /// variants cannot forget to pick one.
    #[must_use]
    pub const fn category(&self) -> LogCategories {
        LogCategories::ERROR
    }
}

/// Builds an [`Error`] and, if the `ERROR` category is enabled, reports it
/// through the caller's log sink in the same statement — mirroring the
/// original's `ZONE_LOG`/`zone_raise` pairing so logging and error
/// construction cannot drift apart.
macro_rules! raise {
    ($log:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $log($crate::log::LogRecord {
            categories: $crate::log::LogCategories::ERROR,
            file: file!(),
            line: line!(),
            message: &message,
        });
        $crate::error::Error::$variant(message)
    }};
}

pub(crate) use raise;

impl fmt::Display for LogRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.message)
    }
}
