//! Architectural registers.
//!
//! 1. **Register:** A word with an external port and one wired internal port.
//! 2. **Register file:** REG0..REGn behind a demux, REG0 being the accumulator.

/// Single datapath register.
pub mod register;

/// General-purpose register file and demux.
pub mod regfile;

pub use self::regfile::{Demux, RegisterFile};
pub use self::register::Register;
