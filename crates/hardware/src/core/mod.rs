//! Datapath and control.
//!
//! This module contains the simulated processor:
//! 1. **Architectural state:** Registers and the demux-addressed register file.
//! 2. **Units:** The two-slot ALU and the memory-resident stack.
//! 3. **Datapath:** All components and buses wired together.
//! 4. **Control:** The fetch/decode state machine and one microprogram per opcode.

/// Registers and the general-purpose register file.
pub mod arch;

/// Control unit state machine and microprograms.
pub mod control;

/// The wired collection of datapath components.
pub mod datapath;

/// Functional units (ALU, stack).
pub mod units;

pub use self::control::ControlUnit;
pub use self::datapath::Datapath;
