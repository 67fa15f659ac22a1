//! Caller-owned scratch space for owner-name and RDATA bytes, reused across
//! records instead of allocated per record.

use crate::error::Error;

/// Owner-name buffer size: a wire-format name is at most 255 octets, plus a
/// byte of padding so the grammar layer can always write a trailing NUL.
pub const OWNER_BUFFER_SIZE: usize = 255 + 1;

/// RDATA buffer size: the largest wire-format RDATA is 65535 octets, plus a
/// byte of padding for the same reason.
pub const RDATA_BUFFER_SIZE: usize = 65_535 + 1;

/// A round-robin pool of owner-name and RDATA buffers handed to the
/// grammar layer as it completes records.
///
/// The original's `zone_buffers_t` is a flat array the caller sizes up
/// front, handed round-robin and never bounds-checked beyond what the
/// caller promised. This is supplemented (not a original behavior, since
/// the original never specifies what happens past `buffers->size`): both
/// accessors are fallible, so an empty pool is `Error::OutOfMemory` instead
/// of an out-of-bounds read.
pub struct Buffers {
    owners: Vec<Vec<u8>>,
    rdata: Vec<Vec<u8>>,
    owner_cursor: usize,
    rdata_cursor: usize,
}

impl Buffers {
    /// Allocates `owner_count` owner-name buffers and `rdata_count` RDATA
    /// buffers, each pre-sized to its maximum wire-format length.
    ///
    /// # Errors
    ///
    /// Returns `Error::BadParameter` if either count is zero.
    pub fn new(owner_count: usize, rdata_count: usize) -> Result<Self, Error> {
        if owner_count == 0 || rdata_count == 0 {
            return Err(Error::BadParameter(
                "a Buffers pool needs at least one owner buffer and one rdata buffer".to_string(),
            ));
        }
        Ok(Self {
            owners: (0..owner_count).map(|_| vec![0u8; OWNER_BUFFER_SIZE]).collect(),
            rdata: (0..rdata_count).map(|_| vec![0u8; RDATA_BUFFER_SIZE]).collect(),
            owner_cursor: 0,
            rdata_cursor: 0,
        })
    }

    /// Hands out the next owner-name buffer, round-robin.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfMemory` if the pool holds no owner buffers.
    pub fn next_owner(&mut self) -> Result<&mut [u8], Error> {
        if self.owners.is_empty() {
            return Err(Error::OutOfMemory("owner buffer pool exhausted".to_string()));
        }
        let index = self.owner_cursor;
        self.owner_cursor = (self.owner_cursor + 1) % self.owners.len();
        Ok(self.owners[index].as_mut_slice())
    }

    /// Hands out the next RDATA buffer, round-robin.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfMemory` if the pool holds no RDATA buffers.
    pub fn next_rdata(&mut self) -> Result<&mut [u8], Error> {
        if self.rdata.is_empty() {
            return Err(Error::OutOfMemory("rdata buffer pool exhausted".to_string()));
        }
        let index = self.rdata_cursor;
        self.rdata_cursor = (self.rdata_cursor + 1) % self.rdata.len();
        Ok(self.rdata[index].as_mut_slice())
    }
}
