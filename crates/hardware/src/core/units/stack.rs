//! Downward-growing stack in main memory.
//!
//! The stack is described by two registers: Top, which points at the most
//! recently pushed word, and Bottom, the lowest address a push may use. While
//! the stack is empty Top holds its configured empty value and the cell at
//! that address is never written.
//!
//! Pointer arithmetic runs on the ALU over internal bus 2 and memory accesses
//! go through the external bus, like every other micro-operation.

use tracing::trace;

use crate::common::constants::{STACK_BOTTOM_NAME, STACK_TOP_NAME};
use crate::common::{SimError, SimResult, Word};
use crate::config::StackConfig;
use crate::core::arch::register::Register;
use crate::core::units::alu::{Alu, AluOp, AluSlot};
use crate::soc::interconnect::{Buses, InternalBus};
use crate::soc::memory::Memory;

/// Stack pointer pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stack {
    top: Register,
    bottom: Register,
    empty_top: Word,
}

impl Stack {
    /// Creates an empty stack over `[config.bottom, config.top)`.
    pub fn new(config: StackConfig) -> Self {
        let mut stack = Self {
            top: Register::new(STACK_TOP_NAME, InternalBus::Two),
            bottom: Register::new(STACK_BOTTOM_NAME, InternalBus::Two),
            empty_top: config.top,
        };
        stack.bottom.set(config.bottom);
        stack.reset();
        stack
    }

    /// Pushes `value`.
    ///
    /// Decrements Top through the ALU, then writes `value` at the new Top
    /// with a two-phase store. Leaves `value` on the external bus.
    ///
    /// # Returns
    ///
    /// `StackOverflow` if the new Top would fall below Bottom. Nothing is
    /// modified in that case.
    pub fn push(
        &mut self,
        value: Word,
        memory: &mut Memory,
        alu: &mut Alu,
        buses: &mut Buses,
    ) -> SimResult<()> {
        self.top.internal_read(buses);
        alu.internal_store(AluSlot::Acc0, buses);
        buses.internal2.put(1);
        alu.internal_store(AluSlot::Acc1, buses);
        alu.execute(AluOp::Sub);
        let new_top = alu.operand(AluSlot::Acc1);

        alu.compare(new_top, self.bottom.value());
        if alu.operand(AluSlot::Acc1) < 0 {
            return Err(SimError::StackOverflow {
                top: self.top.value(),
                bottom: self.bottom.value(),
            });
        }
        alu.internal_read(AluSlot::Acc0, buses);
        self.top.internal_store(buses);

        self.top.read(buses);
        memory.store(&buses.external)?;
        buses.external.put(value);
        memory.store(&buses.external)?;
        trace!(top = new_top, value, "push");
        Ok(())
    }

    /// Pops the word at Top and moves Top up by one.
    ///
    /// The popped word is returned and left on the external bus.
    ///
    /// # Returns
    ///
    /// `StackUnderflow` if the stack is empty.
    pub fn pop(&mut self, memory: &Memory, alu: &mut Alu, buses: &mut Buses) -> SimResult<Word> {
        if self.is_empty() {
            return Err(SimError::StackUnderflow {
                top: self.top.value(),
            });
        }
        self.top.read(buses);
        memory.read(&mut buses.external)?;
        let value = buses.external.get();

        self.top.internal_read(buses);
        alu.internal_store(AluSlot::Acc1, buses);
        alu.execute(AluOp::Inc);
        alu.internal_read(AluSlot::Acc1, buses);
        self.top.internal_store(buses);
        trace!(top = self.top.value(), value, "pop");
        Ok(value)
    }

    /// Address held by Top, without modifying it.
    #[inline]
    pub const fn peek(&self) -> Word {
        self.top.value()
    }

    /// Address held by Bottom.
    #[inline]
    pub const fn bottom(&self) -> Word {
        self.bottom.value()
    }

    /// Number of words currently on the stack.
    pub const fn depth(&self) -> usize {
        (self.empty_top - self.top.value()) as usize
    }

    /// Returns true if no word has been pushed.
    pub const fn is_empty(&self) -> bool {
        self.top.value() == self.empty_top
    }

    /// Returns true if the next push would overflow.
    pub const fn is_full(&self) -> bool {
        self.top.value() <= self.bottom.value()
    }

    /// Returns Top to its empty position.
    pub const fn reset(&mut self) {
        self.top.set(self.empty_top);
    }
}
