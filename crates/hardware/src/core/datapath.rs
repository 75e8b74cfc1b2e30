//! The wired datapath.
//!
//! Owns every component and the three buses. Wiring is fixed at construction:
//! 1. **Internal bus 1:** PC and IR internal ports, ALU `store`/`read`.
//! 2. **Internal bus 2:** REG0..REGn, Flags, stack Top/Bottom, ALU
//!    `internal_store`/`internal_read`.
//! 3. **External bus:** Every register's external port, main memory, status
//!    memory and the demux.
//!
//! Only microprograms in [`crate::core::control`] drive the components; the
//! public API here is read-only.

use crate::common::Word;
use crate::common::constants::{FLAGS_NAME, IR_NAME, PC_NAME};
use crate::config::Config;
use crate::core::arch::{Register, RegisterFile};
use crate::core::units::{Alu, Stack};
use crate::soc::interconnect::{Buses, InternalBus};
use crate::soc::memory::{Memory, StatusMemory};

/// All datapath components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Datapath {
    pub(crate) buses: Buses,
    pub(crate) pc: Register,
    pub(crate) ir: Register,
    pub(crate) flags: Register,
    pub(crate) registers: RegisterFile,
    pub(crate) alu: Alu,
    pub(crate) memory: Memory,
    pub(crate) status: StatusMemory,
    pub(crate) stack: Stack,
}

impl Datapath {
    /// Builds and wires a datapath for `config`.
    ///
    /// The configuration is assumed to be validated.
    pub fn new(config: &Config) -> Self {
        let mut dp = Self {
            buses: Buses::new(),
            pc: Register::new(PC_NAME, InternalBus::One),
            ir: Register::new(IR_NAME, InternalBus::One),
            flags: Register::new(FLAGS_NAME, InternalBus::Two),
            registers: RegisterFile::new(config.registers.general_purpose),
            alu: Alu::new(),
            memory: Memory::new(config.memory.size),
            status: StatusMemory::new(),
            stack: Stack::new(config.stack),
        };
        dp.pc.set(config.general.entry_address);
        dp
    }

    /// Clears every register, the ALU, the buses and the status memory and
    /// sets PC to `entry`. Main memory contents survive; only a pending
    /// two-phase store is abandoned.
    pub fn reset(&mut self, entry: Word) {
        self.buses.clear();
        self.pc.set(entry);
        self.ir.clear();
        self.flags.clear();
        self.registers.reset();
        self.alu.reset();
        self.memory.reset_phase();
        self.status.clear();
        self.stack.reset();
    }

    /// The three buses.
    pub const fn buses(&self) -> &Buses {
        &self.buses
    }

    /// Program counter.
    pub const fn pc(&self) -> &Register {
        &self.pc
    }

    /// Instruction register.
    pub const fn ir(&self) -> &Register {
        &self.ir
    }

    /// Flags register.
    pub const fn flags(&self) -> &Register {
        &self.flags
    }

    /// General-purpose register file.
    pub const fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Arithmetic logic unit.
    pub const fn alu(&self) -> &Alu {
        &self.alu
    }

    /// Main memory.
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Status memory.
    pub const fn status(&self) -> &StatusMemory {
        &self.status
    }

    /// Stack pointers.
    pub const fn stack(&self) -> &Stack {
        &self.stack
    }
}
