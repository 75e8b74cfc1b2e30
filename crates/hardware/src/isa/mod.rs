//! Instruction set.
//!
//! The machine executes a closed set of 21 instructions, each an opcode word
//! followed by zero, one or two operand words.
//!
//! * `opcodes`: The instruction table (mnemonics, operand kinds, classes).
//! * `decode`: IR word to opcode, with the halt-on-unknown contract.
//! * `disasm`: Text rendering for traces and listings.

/// Opcode word to [`opcodes::Opcode`] decoding.
pub mod decode;

/// Disassembler for traces and program listings.
pub mod disasm;

/// The opcode table.
pub mod opcodes;

pub use self::opcodes::{InstClass, Opcode, OperandKind};
