//! Architecture constants.
//!
//! Defines the fixed facts of the machine: flag bit positions, the size of
//! the branch selector memory and the names used for registers in traces.

use super::Word;

/// Bit position of the Zero flag in the Flags register.
pub const FLAG_ZERO: u32 = 0;

/// Bit position of the Negative flag in the Flags register.
pub const FLAG_NEGATIVE: u32 = 1;

/// Number of cells in the status (branch selector) memory.
pub const STATUS_MEMORY_SIZE: usize = 2;

/// Status memory cell holding the fall-through address.
pub const STATUS_FALL_THROUGH: usize = 0;

/// Status memory cell holding the branch target address.
pub const STATUS_TARGET: usize = 1;

/// Register id of the accumulator (first entry of the register file).
pub const REG_ACCUMULATOR: usize = 0;

/// Register name prefix used by the assembler and the disassembler.
pub const REG_PREFIX: &str = "%reg";

/// Word that terminates a machine image produced by the assembler.
pub const IMAGE_SENTINEL: Word = -1;

/// Name of the program counter in traces and snapshots.
pub const PC_NAME: &str = "PC";

/// Name of the instruction register in traces and snapshots.
pub const IR_NAME: &str = "IR";

/// Name of the flags register in traces and snapshots.
pub const FLAGS_NAME: &str = "FLAGS";

/// Name of the stack top pointer register.
pub const STACK_TOP_NAME: &str = "STKTOP";

/// Name of the stack bottom pointer register.
pub const STACK_BOTTOM_NAME: &str = "STKBOT";
