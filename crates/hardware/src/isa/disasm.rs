//! Instruction disassembler.
//!
//! Renders machine words as assembler text for instruction traces and the
//! CLI listing. Register operands print as `%regN`, addresses and immediates
//! as plain decimals:
//!
//! ```
//! use archc_core::isa::disasm::disassemble;
//!
//! assert_eq!(disassemble(&[16, 1, 100]), "addregmem %reg1 100");
//! assert_eq!(disassemble(&[11]), "ret");
//! ```

use std::fmt::Write as _;

use crate::common::Word;
use crate::common::constants::REG_PREFIX;
use crate::isa::opcodes::{Opcode, OperandKind};

/// One line of a program listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingLine {
    /// Address of the first word.
    pub address: usize,
    /// The words covered by this line.
    pub words: Vec<Word>,
    /// Rendered text.
    pub text: String,
}

/// Disassembles the instruction starting at `words[0]`.
///
/// Missing operand words render as `?`; a word that is not an opcode
/// renders as `.word N`.
pub fn disassemble(words: &[Word]) -> String {
    let Some(&first) = words.first() else {
        return String::new();
    };
    let Some(op) = Opcode::from_word(first) else {
        return format!(".word {first}");
    };
    let mut text = op.mnemonic().to_owned();
    for (i, kind) in op.operands().iter().enumerate() {
        match (kind, words.get(i + 1)) {
            (OperandKind::Register, Some(id)) => {
                let _ = write!(text, " {REG_PREFIX}{id}");
            }
            (_, Some(value)) => {
                let _ = write!(text, " {value}");
            }
            (_, None) => text.push_str(" ?"),
        }
    }
    text
}

/// Walks `cells[start..end]` linearly, one instruction or data word per line.
///
/// `end` is clamped to the slice length.
pub fn disassemble_program(cells: &[Word], start: usize, end: usize) -> Vec<ListingLine> {
    let end = end.min(cells.len());
    let mut lines = Vec::new();
    let mut address = start;
    while address < end {
        let len = Opcode::from_word(cells[address]).map_or(1, Opcode::size);
        let stop = (address + len).min(end);
        let words = cells[address..stop].to_vec();
        lines.push(ListingLine {
            address,
            text: disassemble(&words),
            words,
        });
        address += len;
    }
    lines
}
