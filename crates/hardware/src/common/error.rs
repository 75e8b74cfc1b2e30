//! Machine and loader error definitions.
//!
//! This module defines every way a run can stop other than a clean halt:
//! 1. **Fatal machine errors:** Out-of-range addresses, stack faults, bad
//!    register ids and an unfinished two-phase store.
//! 2. **Decode outcome:** `UnrecognizedOpcode`, which the control unit turns
//!    into an ordinary halt rather than a failure.
//! 3. **Loader errors:** I/O and parse failures while reading a machine image.

use std::io;

use thiserror::Error;

use super::Word;
use super::addr::Region;

/// Result type used by every micro-operation.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by datapath components and the control unit.
///
/// All variants except [`SimError::UnrecognizedOpcode`] are fatal: the
/// simulated hardware has no faulted-but-continuing state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// A memory or status memory access outside `[0, size)`.
    #[error("{region} address {address} is out of bounds [0, {size})")]
    OutOfBoundsAddress {
        /// Region that rejected the access.
        region: Region,
        /// The offending word.
        address: Word,
        /// Number of cells in the region.
        size: usize,
    },

    /// A push would move Top below Bottom.
    #[error("stack overflow: top {top} cannot move below bottom {bottom}")]
    StackOverflow {
        /// Top pointer before the push.
        top: Word,
        /// Bottom pointer.
        bottom: Word,
    },

    /// A pop on an empty stack.
    #[error("stack underflow: top {top} is at its empty position")]
    StackUnderflow {
        /// Top pointer at the time of the pop.
        top: Word,
    },

    /// The demux was asked to select a register that does not exist.
    #[error("invalid register id {id}: register file holds {count} registers")]
    InvalidRegisterId {
        /// The id taken from the bus.
        id: Word,
        /// Number of registers in the file.
        count: usize,
    },

    /// Decode found no microprogram for the word in IR.
    ///
    /// The control unit treats this as the program's halt signal.
    #[error("unrecognized opcode {opcode} at address {pc}")]
    UnrecognizedOpcode {
        /// The decoded word.
        opcode: Word,
        /// Address it was fetched from.
        pc: Word,
    },

    /// An instruction ended with memory still waiting for store data.
    #[error("two-phase store to address {address} never received its data word")]
    PendingStore {
        /// Address latched by the first store call.
        address: usize,
    },

    /// Configuration rejected by [`Config::validate`](crate::config::Config::validate).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SimError {
    /// Returns true if this error marks a normal end of program.
    pub const fn is_halt(&self) -> bool {
        matches!(self, Self::UnrecognizedOpcode { .. })
    }
}

/// Errors raised while reading or installing a machine image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read.
    #[error("could not read image: {0}")]
    Io(#[from] io::Error),

    /// A line is not a decimal word or an `address value` pair.
    #[error("line {line}: cannot parse {text:?} as a machine word")]
    Parse {
        /// One-based line number.
        line: usize,
        /// The offending line, trimmed.
        text: String,
    },

    /// Writing the image into memory failed.
    #[error(transparent)]
    Machine(#[from] SimError),
}
