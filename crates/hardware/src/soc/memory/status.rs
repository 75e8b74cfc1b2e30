//! Branch selector memory.
//!
//! Two cells: index 0 holds the fall-through address and index 1 the branch
//! target. `select` turns a flag bit on the external bus into the address the
//! program counter loads next.

use crate::common::addr::to_index;
use crate::common::constants::{STATUS_FALL_THROUGH, STATUS_MEMORY_SIZE, STATUS_TARGET};
use crate::common::{Region, SimResult, Word};
use crate::soc::interconnect::Bus;

use super::Memory;

/// Two-cell memory used as the conditional branch multiplexer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMemory {
    inner: Memory,
}

impl StatusMemory {
    /// Creates a status memory with both cells at 0.
    pub fn new() -> Self {
        Self {
            inner: Memory::with_region(STATUS_MEMORY_SIZE, Region::Status),
        }
    }

    /// Writes the bus word into cell `slot` in one step.
    ///
    /// # Arguments
    ///
    /// * `slot` - `0` for the fall-through address, `1` for the target.
    /// * `bus` - The external bus holding the address to keep.
    pub fn store_in(&mut self, slot: usize, bus: &Bus) -> SimResult<()> {
        let slot = Word::try_from(slot).unwrap_or(Word::MAX);
        self.inner.poke(slot, bus.get())
    }

    /// Replaces the flag bit on the bus with the selected cell.
    ///
    /// A bus value of 1 selects the target; any other value selects the
    /// fall-through address.
    pub fn select(&self, bus: &mut Bus) -> SimResult<()> {
        let slot = if bus.get() == 1 {
            STATUS_TARGET
        } else {
            STATUS_FALL_THROUGH
        };
        let idx = to_index(Region::Status, slot as Word, STATUS_MEMORY_SIZE)?;
        bus.put(self.inner.cells()[idx]);
        Ok(())
    }

    /// Returns the fall-through cell and the target cell.
    pub fn cells(&self) -> (Word, Word) {
        let cells = self.inner.cells();
        (cells[STATUS_FALL_THROUGH], cells[STATUS_TARGET])
    }

    /// Zeroes both cells.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl Default for StatusMemory {
    fn default() -> Self {
        Self::new()
    }
}
