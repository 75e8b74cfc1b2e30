//! Datapath buses.
//!
//! Every transfer between components goes through one of three buses. This
//! module provides:
//! 1. **Bus:** A single-word latch. `put` overwrites it and `get` reads it
//!    without consuming it.
//! 2. **Wiring:** [`InternalBus`] names the internal bus a register's
//!    internal port is fixed to when the datapath is built.
//! 3. **Buses:** The external bus and both internal buses, owned together by
//!    the datapath and lent to components for each micro-operation.

use serde::Serialize;

use crate::common::Word;

/// A shared one-word channel.
///
/// The value persists until the next `put`; a bus that was never written
/// reads as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bus {
    data: Word,
}

impl Bus {
    /// Creates a bus holding 0.
    pub const fn new() -> Self {
        Self { data: 0 }
    }

    /// Drives `value` onto the bus, replacing whatever it held.
    #[inline]
    pub const fn put(&mut self, value: Word) {
        self.data = value;
    }

    /// Returns the current bus value.
    #[inline]
    pub const fn get(&self) -> Word {
        self.data
    }
}

/// Identifies one of the two internal buses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum InternalBus {
    /// Internal bus 1: PC and IR internal ports, ALU `store`/`read`.
    One,
    /// Internal bus 2: general-purpose registers, Flags, stack pointers,
    /// ALU `internal_store`/`internal_read`.
    Two,
}

/// The three buses of the datapath.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Buses {
    /// Bus shared with main memory, status memory and the demux.
    pub external: Bus,
    /// Internal bus 1.
    pub internal1: Bus,
    /// Internal bus 2.
    pub internal2: Bus,
}

impl Buses {
    /// Creates three buses holding 0.
    pub const fn new() -> Self {
        Self {
            external: Bus::new(),
            internal1: Bus::new(),
            internal2: Bus::new(),
        }
    }

    /// Returns the internal bus selected by `which`.
    #[inline]
    pub const fn internal(&self, which: InternalBus) -> &Bus {
        match which {
            InternalBus::One => &self.internal1,
            InternalBus::Two => &self.internal2,
        }
    }

    /// Returns the internal bus selected by `which` for writing.
    #[inline]
    pub const fn internal_mut(&mut self, which: InternalBus) -> &mut Bus {
        match which {
            InternalBus::One => &mut self.internal1,
            InternalBus::Two => &mut self.internal2,
        }
    }

    /// Drives 0 onto all three buses.
    pub const fn clear(&mut self) {
        self.external.put(0);
        self.internal1.put(0);
        self.internal2.put(0);
    }
}
