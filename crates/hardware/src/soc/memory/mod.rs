//! Word-addressed main memory.
//!
//! Main memory talks to the rest of the machine only through the external
//! bus. It provides:
//! 1. **Read:** Interprets the bus word as an address and replaces it with
//!    the stored word.
//! 2. **Two-phase store:** The first `store` latches an address, the second
//!    writes the bus word there. The phase is an explicit [`StorePhase`].
//! 3. **Status memory:** The two-cell branch selector in [`status`].
//!
//! `peek`, `poke` and `cells` bypass the buses and exist for loading images,
//! inspection and tests.

/// Two-cell branch selector memory.
pub mod status;

use tracing::trace;

use crate::common::addr::to_index;
use crate::common::{Region, SimResult, Word};
use crate::soc::interconnect::Bus;

pub use self::status::StatusMemory;

/// Progress of a two-phase store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorePhase {
    /// The next `store` call supplies an address.
    #[default]
    AwaitingAddress,
    /// The next `store` call supplies the data word for `address`.
    AwaitingData {
        /// Cell latched by the first `store` call.
        address: usize,
    },
}

/// Fixed-size array of words with a two-phase store protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<Word>,
    phase: StorePhase,
    region: Region,
}

impl Memory {
    /// Creates a zero-filled main memory of `size` words.
    pub fn new(size: usize) -> Self {
        Self::with_region(size, Region::Main)
    }

    pub(crate) fn with_region(size: usize, region: Region) -> Self {
        Self {
            cells: vec![0; size],
            phase: StorePhase::AwaitingAddress,
            region,
        }
    }

    /// Number of cells.
    #[inline]
    pub const fn size(&self) -> usize {
        self.cells.len()
    }

    /// Current phase of the store protocol.
    #[inline]
    pub const fn phase(&self) -> StorePhase {
        self.phase
    }

    /// Reads the cell addressed by the bus word back onto the bus.
    ///
    /// # Arguments
    ///
    /// * `bus` - The external bus; holds the address on entry and the stored
    ///   word on success.
    ///
    /// # Returns
    ///
    /// `OutOfBoundsAddress` if the bus word is not a valid cell, leaving the
    /// bus unchanged.
    pub fn read(&self, bus: &mut Bus) -> SimResult<()> {
        let idx = to_index(self.region, bus.get(), self.size())?;
        bus.put(self.cells[idx]);
        Ok(())
    }

    /// Advances the two-phase store protocol with the bus word.
    ///
    /// In `AwaitingAddress` the word is validated and latched. In
    /// `AwaitingData` it is written to the latched cell and the protocol
    /// returns to `AwaitingAddress`. A rejected address leaves the phase
    /// unchanged.
    pub fn store(&mut self, bus: &Bus) -> SimResult<()> {
        match self.phase {
            StorePhase::AwaitingAddress => {
                let address = to_index(self.region, bus.get(), self.size())?;
                self.phase = StorePhase::AwaitingData { address };
            }
            StorePhase::AwaitingData { address } => {
                let value = bus.get();
                trace!(region = %self.region, address, value, "store");
                self.cells[address] = value;
                self.phase = StorePhase::AwaitingAddress;
            }
        }
        Ok(())
    }

    /// Returns the word at `address` without touching any bus.
    pub fn peek(&self, address: Word) -> SimResult<Word> {
        let idx = to_index(self.region, address, self.size())?;
        Ok(self.cells[idx])
    }

    /// Writes `value` at `address` without touching any bus or the store
    /// phase.
    pub fn poke(&mut self, address: Word, value: Word) -> SimResult<()> {
        let idx = to_index(self.region, address, self.size())?;
        self.cells[idx] = value;
        Ok(())
    }

    /// All cells in address order.
    #[inline]
    pub fn cells(&self) -> &[Word] {
        &self.cells
    }

    /// Abandons any half-finished store.
    pub const fn reset_phase(&mut self) {
        self.phase = StorePhase::AwaitingAddress;
    }

    /// Zeroes every cell and abandons any half-finished store.
    pub fn clear(&mut self) {
        self.cells.fill(0);
        self.reset_phase();
    }
}
