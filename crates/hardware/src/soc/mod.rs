//! Buses and memories.
//!
//! This module organizes the passive parts of the machine: the three datapath
//! buses, word-addressed main memory and the two-cell status memory used to
//! select branch targets.

/// External and internal datapath buses.
pub mod interconnect;

/// Main memory and status memory.
pub mod memory;

pub use self::interconnect::{Bus, Buses, InternalBus};
pub use self::memory::{Memory, StatusMemory, StorePhase};
