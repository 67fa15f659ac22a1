//! Parse-time options, bootstrapped once per `parse_file`/`parse_str` call.

use crate::log::LogCategories;

/// Default class when a record omits one: `IN` (1).
pub const DEFAULT_CLASS: u16 = 1;

/// Default TTL when a record omits one and no `$TTL` directive was seen:
/// one hour.
pub const DEFAULT_TTL: u32 = 3600;

/// Options controlling a single parse.
///
/// Plain data, by value/reference, rather than a bitset plus callback
/// pointers — the callbacks themselves are separate generic parameters to
/// `parse_file`/`parse_str` (see the crate's module docs).
#[derive(Clone, Debug)]
pub struct Options {
    /// When set, the grammar layer tolerates records a primary server would
    /// reject (AXFR-leniency). The core scanner is indifferent to this flag;
    /// it is threaded through purely for the grammar layer to read.
    pub secondary: bool,
    /// When set, `$INCLUDE` directives raise [`crate::Error::NotPermitted`]
    /// instead of being honored.
    pub no_includes: bool,
    /// When set, the TTL parser (grammar layer) accepts `1h2m3s` notation.
    /// The core scanner is indifferent; this flag is threaded through purely
    /// for the grammar layer to read.
    pub friendly_ttls: bool,
    /// Human-readable origin domain name used to bootstrap the initial
    /// owner. Encoding it into wire format is the grammar layer's job; the
    /// core stores it verbatim.
    pub origin: String,
    /// TTL used by the grammar layer when a record omits one and no `$TTL`
    /// directive has been seen yet.
    pub default_ttl: u32,
    /// Class used by the grammar layer when a record omits one.
    pub default_class: u16,
    /// Which diagnostic categories to deliver to the log sink. Empty means
    /// "all categories" (see [`LogCategories::effective`]).
    pub log_categories: LogCategories,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            secondary: false,
            no_includes: false,
            friendly_ttls: false,
            origin: String::new(),
            default_ttl: DEFAULT_TTL,
            default_class: DEFAULT_CLASS,
            log_categories: LogCategories::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_select_every_log_category() {
        let options = Options::default();
        assert_eq!(options.log_categories.effective(), LogCategories::all());
    }
}
