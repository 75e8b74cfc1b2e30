//! Word-addressed memory regions.
//!
//! Buses carry plain [`Word`]s; a word only becomes an address when a memory
//! component interprets it as one. This module performs that interpretation:
//! 1. **Region tagging:** Identifies which memory rejected an address.
//! 2. **Range checking:** Converts a word into a cell index or fails with
//!    [`SimError::OutOfBoundsAddress`].

use std::fmt;

use super::Word;
use super::error::{SimError, SimResult};

/// A word-addressable storage region of the datapath.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// Main memory holding program, data and the stack.
    Main,
    /// The two-cell branch selector memory.
    Status,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => write!(f, "memory"),
            Self::Status => write!(f, "status memory"),
        }
    }
}

/// Converts a bus word into a cell index of a region with `size` cells.
///
/// # Arguments
///
/// * `region` - The region performing the access (used in the error).
/// * `address` - The word taken from the bus.
/// * `size` - Number of cells in the region.
///
/// # Returns
///
/// The index in `[0, size)`, or `OutOfBoundsAddress` for negative or too
/// large addresses.
#[inline]
pub fn to_index(region: Region, address: Word, size: usize) -> SimResult<usize> {
    match usize::try_from(address) {
        Ok(idx) if idx < size => Ok(idx),
        _ => Err(SimError::OutOfBoundsAddress {
            region,
            address,
            size,
        }),
    }
}
