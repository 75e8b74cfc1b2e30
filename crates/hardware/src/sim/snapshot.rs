//! Serializable machine state.
//!
//! A [`Snapshot`] copies everything an external driver may want to observe
//! after a step: registers, flags, stack pointers, buses, ALU slots, status
//! memory, main memory and the control state.

use serde::Serialize;

use crate::common::Word;
use crate::common::constants::{FLAG_NEGATIVE, FLAG_ZERO};
use crate::core::ControlUnit;
use crate::core::control::State;
use crate::core::units::alu::AluSlot;

/// Flags register contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FlagsSnapshot {
    /// Raw register value.
    pub raw: Word,
    /// Zero bit.
    pub zero: bool,
    /// Negative bit.
    pub negative: bool,
}

/// Stack pointer contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StackSnapshot {
    /// Top pointer.
    pub top: Word,
    /// Bottom pointer.
    pub bottom: Word,
    /// Words currently pushed.
    pub depth: usize,
}

/// Bus contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BusSnapshot {
    /// External bus.
    pub external: Word,
    /// Internal bus 1.
    pub internal1: Word,
    /// Internal bus 2.
    pub internal2: Word,
}

/// Full observable machine state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Control unit state.
    pub state: State,
    /// Whether the control unit has halted.
    pub halted: bool,
    /// Program counter.
    pub pc: Word,
    /// Instruction register.
    pub ir: Word,
    /// General-purpose registers, REG0 first.
    pub registers: Vec<Word>,
    /// Flags register.
    pub flags: FlagsSnapshot,
    /// Stack pointers.
    pub stack: StackSnapshot,
    /// The three buses.
    pub buses: BusSnapshot,
    /// ALU slots `[acc0, acc1]`.
    pub alu: [Word; 2],
    /// Status memory `[fall_through, target]`.
    pub status: [Word; 2],
    /// Main memory.
    pub memory: Vec<Word>,
}

impl Snapshot {
    /// Copies the observable state of `cu`.
    pub fn capture(cu: &ControlUnit) -> Self {
        let dp = cu.datapath();
        let flags = dp.flags();
        let (fall_through, target) = dp.status().cells();
        Self {
            state: cu.state(),
            halted: cu.is_halted(),
            pc: dp.pc().value(),
            ir: dp.ir().value(),
            registers: dp.registers().values(),
            flags: FlagsSnapshot {
                raw: flags.value(),
                zero: flags.bit(FLAG_ZERO) == 1,
                negative: flags.bit(FLAG_NEGATIVE) == 1,
            },
            stack: StackSnapshot {
                top: dp.stack().peek(),
                bottom: dp.stack().bottom(),
                depth: dp.stack().depth(),
            },
            buses: BusSnapshot {
                external: dp.buses().external.get(),
                internal1: dp.buses().internal1.get(),
                internal2: dp.buses().internal2.get(),
            },
            alu: [
                dp.alu().operand(AluSlot::Acc0),
                dp.alu().operand(AluSlot::Acc1),
            ],
            status: [fall_through, target],
            memory: dp.memory().cells().to_vec(),
        }
    }

    /// Renders the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
