//! General-purpose register file and its demultiplexer.
//!
//! Registers are addressed by id through the [`Demux`]: a microprogram puts a
//! register id on the external bus, selects it, and then talks to "the
//! selected register" through the file's own bus ports. Register 0 is the
//! accumulator used by the single-operand instructions.

use crate::common::constants::REG_ACCUMULATOR;
use crate::common::{SimError, SimResult, Word};
use crate::soc::interconnect::{Buses, InternalBus};

use super::register::Register;

/// Register selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Demux {
    selected: usize,
}

impl Demux {
    /// Selects register `id` of a file with `count` registers.
    ///
    /// An invalid id is rejected and the previous selection is kept.
    pub fn set_value(&mut self, id: Word, count: usize) -> SimResult<()> {
        match usize::try_from(id) {
            Ok(idx) if idx < count => {
                self.selected = idx;
                Ok(())
            }
            _ => Err(SimError::InvalidRegisterId { id, count }),
        }
    }

    /// Currently selected register id.
    #[inline]
    pub const fn value(&self) -> usize {
        self.selected
    }
}

/// The demux-addressable registers REG0..REGn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    registers: Vec<Register>,
    demux: Demux,
}

impl RegisterFile {
    /// Creates `count` registers named `REG0`.. wired to internal bus 2.
    pub fn new(count: usize) -> Self {
        Self {
            registers: (0..count)
                .map(|i| Register::new(format!("REG{i}"), InternalBus::Two))
                .collect(),
            demux: Demux::default(),
        }
    }

    /// Number of registers.
    #[inline]
    pub fn len(&self) -> usize {
        self.registers.len()
    }

    /// Returns true if the file holds no registers.
    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    /// Returns register `id`, if it exists.
    pub fn get(&self, id: usize) -> Option<&Register> {
        self.registers.get(id)
    }

    /// All registers in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Register> {
        self.registers.iter()
    }

    /// Register values in id order.
    pub fn values(&self) -> Vec<Word> {
        self.registers.iter().map(Register::value).collect()
    }

    /// The accumulator, register 0.
    #[inline]
    pub fn accumulator(&self) -> &Register {
        &self.registers[REG_ACCUMULATOR]
    }

    /// The accumulator, register 0, for latching.
    #[inline]
    pub fn accumulator_mut(&mut self) -> &mut Register {
        &mut self.registers[REG_ACCUMULATOR]
    }

    /// Points the demux at the register whose id is `id`.
    pub fn select(&mut self, id: Word) -> SimResult<()> {
        self.demux.set_value(id, self.registers.len())
    }

    /// Id currently selected by the demux.
    #[inline]
    pub const fn selected(&self) -> usize {
        self.demux.value()
    }

    /// Drives the selected register onto the external bus.
    pub fn read(&self, buses: &mut Buses) {
        self.registers[self.demux.value()].read(buses);
    }

    /// Latches the external bus into the selected register.
    pub fn store(&mut self, buses: &Buses) {
        self.registers[self.demux.value()].store(buses);
    }

    /// Drives the selected register onto internal bus 2.
    pub fn internal_read(&self, buses: &mut Buses) {
        self.registers[self.demux.value()].internal_read(buses);
    }

    /// Latches internal bus 2 into the selected register.
    pub fn internal_store(&mut self, buses: &Buses) {
        self.registers[self.demux.value()].internal_store(buses);
    }

    /// Zeroes every register and selects the accumulator.
    pub fn reset(&mut self) {
        self.registers.iter_mut().for_each(Register::clear);
        self.demux = Demux::default();
    }
}
