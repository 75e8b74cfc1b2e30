//! Single-word register with an external and an internal bus port.
//!
//! The external port always faces the external bus. The internal port is
//! wired to one internal bus when the register is built and never moves.

use crate::common::Word;
use crate::soc::interconnect::{Buses, InternalBus};

/// A named datapath register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Register {
    name: String,
    value: Word,
    internal: InternalBus,
}

impl Register {
    /// Creates a register holding 0 whose internal port is wired to
    /// `internal`.
    pub fn new(name: impl Into<String>, internal: InternalBus) -> Self {
        Self {
            name: name.into(),
            value: 0,
            internal,
        }
    }

    /// Register name used in traces.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Internal bus this register's internal port is wired to.
    pub const fn wiring(&self) -> InternalBus {
        self.internal
    }

    /// Current contents.
    #[inline]
    pub const fn value(&self) -> Word {
        self.value
    }

    /// Drives the value onto the external bus.
    #[inline]
    pub const fn read(&self, buses: &mut Buses) {
        buses.external.put(self.value);
    }

    /// Latches the external bus.
    #[inline]
    pub const fn store(&mut self, buses: &Buses) {
        self.value = buses.external.get();
    }

    /// Drives the value onto the wired internal bus.
    #[inline]
    pub const fn internal_read(&self, buses: &mut Buses) {
        buses.internal_mut(self.internal).put(self.value);
    }

    /// Latches the wired internal bus.
    #[inline]
    pub const fn internal_store(&mut self, buses: &Buses) {
        self.value = buses.internal(self.internal).get();
    }

    /// Returns bit `index` as 0 or 1.
    pub const fn bit(&self, index: u32) -> Word {
        (self.value >> index) & 1
    }

    /// Sets or clears bit `index`, leaving the other bits alone.
    pub const fn set_bit(&mut self, index: u32, on: bool) {
        if on {
            self.value |= 1 << index;
        } else {
            self.value &= !(1 << index);
        }
    }

    pub(crate) const fn clear(&mut self) {
        self.value = 0;
    }

    pub(crate) const fn set(&mut self, value: Word) {
        self.value = value;
    }
}
