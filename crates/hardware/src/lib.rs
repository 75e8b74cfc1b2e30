//! Microprogrammed accumulator machine simulator library.
//!
//! This crate simulates a didactic computer at the register-transfer level:
//! 1. **Common:** The machine word, address checking, constants and errors.
//! 2. **SoC:** The external and internal buses, main memory with its
//!    two-phase store, and the two-cell status memory.
//! 3. **Core:** Registers, the register file and demux, the ALU, the stack
//!    and the control unit with one microprogram per instruction.
//! 4. **ISA:** The 21-instruction table, decoding and disassembly.
//! 5. **Simulation:** Image loading, the run loop, snapshots, configuration
//!    and statistics.

/// Common types and constants (word, regions, errors).
pub mod common;
/// Simulator configuration (defaults, JSON loading, validation).
pub mod config;
/// Datapath and control (registers, ALU, stack, control unit).
pub mod core;
/// Instruction set (opcode table, decode, disassembly).
pub mod isa;
/// Image loader, simulator facade and snapshots.
pub mod sim;
/// Buses and memories.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Microprogrammed control unit; owns the datapath.
pub use crate::core::ControlUnit;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
