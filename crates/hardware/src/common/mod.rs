//! Common types shared by every datapath component.
//!
//! This module provides the fundamental building blocks of the simulator:
//! 1. **Word:** The single signed datum moved between all components.
//! 2. **Addresses:** Range-checked conversion of bus words into cell indices.
//! 3. **Constants:** Flag bit positions, wiring defaults and register names.
//! 4. **Error Handling:** Fatal machine errors and image loading errors.

/// Address conversion and memory region identifiers.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for the datapath, control unit and loader.
pub mod error;

pub use addr::Region;
pub use error::{LoadError, SimError, SimResult};

/// The architecture's word: a signed integer carried by every bus.
///
/// Arithmetic on words wraps on overflow.
pub type Word = i32;
