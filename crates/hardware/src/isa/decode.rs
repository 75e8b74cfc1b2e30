//! Instruction decoder.
//!
//! Maps the word latched in IR to an [`Opcode`]. Operands are not decoded
//! here: each microprogram fetches its own operand words through the
//! datapath.

use crate::common::{SimError, SimResult, Word};
use crate::isa::opcodes::Opcode;

/// Decodes `word`, fetched from address `pc`.
///
/// # Returns
///
/// The opcode, or `UnrecognizedOpcode` carrying both the word and its
/// address. The control unit treats that error as a halt.
pub fn decode(word: Word, pc: Word) -> SimResult<Opcode> {
    Opcode::from_word(word).ok_or(SimError::UnrecognizedOpcode { opcode: word, pc })
}
