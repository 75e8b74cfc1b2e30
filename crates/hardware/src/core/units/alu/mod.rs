//! Arithmetic Logic Unit (ALU).
//!
//! The ALU owns two operand slots, acc0 and acc1. Operands arrive over the
//! internal buses and every operation writes its result to acc1:
//! - `store`/`read` move a slot from/to internal bus 1.
//! - `internal_store`/`internal_read` move a slot from/to internal bus 2.
//!
//! Arithmetic wraps on overflow.

use serde::Serialize;

use crate::common::Word;
use crate::soc::interconnect::Buses;

/// One of the two ALU operand slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AluSlot {
    /// First operand.
    Acc0,
    /// Second operand and result.
    Acc1,
}

/// Operation performed by [`Alu::execute`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// `acc1 = acc0 + acc1`
    Add,
    /// `acc1 = acc0 - acc1`
    Sub,
    /// `acc1 = acc1 + 1`
    Inc,
}

/// Two-slot arithmetic unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Alu {
    acc: [Word; 2],
}

impl Alu {
    /// Creates an ALU with both slots at 0.
    pub const fn new() -> Self {
        Self { acc: [0; 2] }
    }

    #[inline]
    const fn index(slot: AluSlot) -> usize {
        match slot {
            AluSlot::Acc0 => 0,
            AluSlot::Acc1 => 1,
        }
    }

    /// Latches internal bus 1 into `slot`.
    #[inline]
    pub const fn store(&mut self, slot: AluSlot, buses: &Buses) {
        self.acc[Self::index(slot)] = buses.internal1.get();
    }

    /// Drives `slot` onto internal bus 1.
    #[inline]
    pub const fn read(&self, slot: AluSlot, buses: &mut Buses) {
        buses.internal1.put(self.acc[Self::index(slot)]);
    }

    /// Latches internal bus 2 into `slot`.
    #[inline]
    pub const fn internal_store(&mut self, slot: AluSlot, buses: &Buses) {
        self.acc[Self::index(slot)] = buses.internal2.get();
    }

    /// Drives `slot` onto internal bus 2.
    #[inline]
    pub const fn internal_read(&self, slot: AluSlot, buses: &mut Buses) {
        buses.internal2.put(self.acc[Self::index(slot)]);
    }

    /// Applies `op` to the slots, leaving the result in acc1.
    pub const fn execute(&mut self, op: AluOp) {
        let [a, b] = self.acc;
        self.acc[1] = match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Inc => b.wrapping_add(1),
        };
    }

    /// Loads `a` and `b` directly and leaves `a - b` in acc1.
    ///
    /// acc0 keeps `a`, so a caller may read it back afterwards.
    pub const fn compare(&mut self, a: Word, b: Word) {
        self.acc = [a, b];
        self.execute(AluOp::Sub);
    }

    /// Current value of `slot`.
    #[inline]
    pub const fn operand(&self, slot: AluSlot) -> Word {
        self.acc[Self::index(slot)]
    }

    /// Zeroes both slots.
    pub const fn reset(&mut self) {
        self.acc = [0; 2];
    }
}
