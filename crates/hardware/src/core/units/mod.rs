//! Functional units.
//!
//! The ALU performs all datapath arithmetic, including the stack pointer
//! updates made by [`stack::Stack`].

/// Two-slot arithmetic logic unit.
pub mod alu;

/// Memory-resident stack addressed by Top/Bottom registers.
pub mod stack;

pub use self::alu::{Alu, AluOp, AluSlot};
pub use self::stack::Stack;
