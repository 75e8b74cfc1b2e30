//! # Unit Components
//!
//! Tests grouped by the library module they exercise.



/// Registers, ALU, stack and the control unit microprograms.
pub mod core;
