//! The instruction table.
//!
//! Every instruction is one opcode word followed by a fixed number of operand
//! words. The table is closed: a word that is not listed here is not an
//! instruction, and reaching one halts the machine.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::common::Word;

/// Kind of word an operand slot holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperandKind {
    /// A main memory address.
    Address,
    /// A literal value.
    Immediate,
    /// A register file id.
    Register,
}

/// Broad instruction category used for statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum InstClass {
    /// Accumulator or register arithmetic, including compare.
    Arithmetic,
    /// Loads and stores between memory and registers.
    Memory,
    /// Unconditional jump.
    Jump,
    /// Conditional branch through the status memory.
    Branch,
    /// Register-to-register move.
    Register,
    /// CALL and RET.
    Subroutine,
}

/// One of the 21 instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Opcode {
    /// `Reg0 <- Reg0 + mem[addr]`
    Add,
    /// `Reg0 <- Reg0 - mem[addr]`
    Sub,
    /// `PC <- addr`
    Jmp,
    /// Jump if Zero is set.
    Jz,
    /// Jump if Negative is set.
    Jn,
    /// `Reg0 <- mem[addr]`
    Read,
    /// `mem[addr] <- Reg0`
    Store,
    /// `Reg0 <- imm`
    Ldi,
    /// `Reg0 <- Reg0 + 1`
    Inc,
    /// `regB <- regA`
    MoveRegReg,
    /// Push the return address and jump.
    Call,
    /// Pop the return address into PC.
    Ret,
    /// `regB <- regA + regB`
    AddRegReg,
    /// `regB <- regA - regB`
    SubRegReg,
    /// Jump if Zero is clear.
    Jnz,
    /// `mem[addr] <- mem[addr] + 1`
    IncMem,
    /// `regA <- regA + mem[addr]`
    AddRegMem,
    /// `regA <- regA - mem[addr]`
    SubRegMem,
    /// Set flags from `regA - regB` without storing.
    Cmp,
    /// Jump if equal (Zero set).
    Je,
    /// Jump if not equal (Zero clear).
    Jne,
}

use OperandKind::{Address as A, Immediate as I, Register as R};

impl Opcode {
    /// Every opcode, indexed by its word.
    pub const ALL: [Self; 21] = [
        Self::Add,
        Self::Sub,
        Self::Jmp,
        Self::Jz,
        Self::Jn,
        Self::Read,
        Self::Store,
        Self::Ldi,
        Self::Inc,
        Self::MoveRegReg,
        Self::Call,
        Self::Ret,
        Self::AddRegReg,
        Self::SubRegReg,
        Self::Jnz,
        Self::IncMem,
        Self::AddRegMem,
        Self::SubRegMem,
        Self::Cmp,
        Self::Je,
        Self::Jne,
    ];

    /// Looks up the opcode encoded by `word`.
    pub fn from_word(word: Word) -> Option<Self> {
        usize::try_from(word)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// The opcode's encoding.
    pub const fn word(self) -> Word {
        self as Word
    }

    /// Lowercase assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Jmp => "jmp",
            Self::Jz => "jz",
            Self::Jn => "jn",
            Self::Read => "read",
            Self::Store => "store",
            Self::Ldi => "ldi",
            Self::Inc => "inc",
            Self::MoveRegReg => "moveregreg",
            Self::Call => "call",
            Self::Ret => "ret",
            Self::AddRegReg => "addregreg",
            Self::SubRegReg => "subregreg",
            Self::Jnz => "jnz",
            Self::IncMem => "incmem",
            Self::AddRegMem => "addregmem",
            Self::SubRegMem => "subregmem",
            Self::Cmp => "cmp",
            Self::Je => "je",
            Self::Jne => "jne",
        }
    }

    /// Operand slots in encoding order.
    pub const fn operands(self) -> &'static [OperandKind] {
        match self {
            Self::Inc | Self::Ret => &[],
            Self::Ldi => &[I],
            Self::MoveRegReg | Self::AddRegReg | Self::SubRegReg | Self::Cmp => &[R, R],
            Self::AddRegMem | Self::SubRegMem => &[R, A],
            Self::Add
            | Self::Sub
            | Self::Jmp
            | Self::Jz
            | Self::Jn
            | Self::Read
            | Self::Store
            | Self::Call
            | Self::Jnz
            | Self::IncMem
            | Self::Je
            | Self::Jne => &[A],
        }
    }

    /// Number of operand words.
    pub const fn arity(self) -> usize {
        self.operands().len()
    }

    /// Total encoded length in words.
    pub const fn size(self) -> usize {
        1 + self.arity()
    }

    /// Statistics category.
    pub const fn class(self) -> InstClass {
        match self {
            Self::Add
            | Self::Sub
            | Self::Inc
            | Self::AddRegReg
            | Self::SubRegReg
            | Self::IncMem
            | Self::AddRegMem
            | Self::SubRegMem
            | Self::Cmp => InstClass::Arithmetic,
            Self::Read | Self::Store | Self::Ldi => InstClass::Memory,
            Self::Jmp => InstClass::Jump,
            Self::Jz | Self::Jn | Self::Jnz | Self::Je | Self::Jne => InstClass::Branch,
            Self::MoveRegReg => InstClass::Register,
            Self::Call | Self::Ret => InstClass::Subroutine,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Error returned when a mnemonic names no instruction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown mnemonic {0:?}")]
pub struct UnknownMnemonic(pub String);

impl FromStr for Opcode {
    type Err = UnknownMnemonic;

    /// Parses a mnemonic, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMnemonic(s.to_owned()))
    }
}
