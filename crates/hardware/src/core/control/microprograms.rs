//! Microprograms.
//!
//! One fixed micro-operation sequence per opcode. Buses hold a single word
//! and are overwritten by the next writer, so the order of every step below
//! is part of the contract: swapping two lines reads a stale bus without any
//! error being raised.
//!
//! Conventions shared by all sequences:
//! 1. **Entry:** PC points at the opcode word.
//! 2. **Operands:** Fetched by advancing PC and reading memory at PC.
//! 3. **Exit:** PC points at the next instruction, either advanced past the
//!    last operand or loaded from a jump target.
//! 4. **Flags:** Arithmetic results pass through internal bus 2 (or 1 for
//!    INCMEM) and both flag bits are recomputed from that value.

use crate::common::constants::{FLAG_NEGATIVE, FLAG_ZERO, STATUS_FALL_THROUGH, STATUS_TARGET};
use crate::common::{SimResult, Word};
use crate::core::datapath::Datapath;
use crate::core::units::alu::{AluOp, AluSlot};
use crate::isa::opcodes::Opcode;

/// Flag test performed by a conditional branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Condition {
    Zero,
    NotZero,
    Negative,
}

/// Runs the microprogram for `op`.
pub(super) fn execute(dp: &mut Datapath, op: Opcode) -> SimResult<()> {
    match op {
        Opcode::Add => accumulate(dp, AluOp::Add),
        Opcode::Sub => accumulate(dp, AluOp::Sub),
        Opcode::Jmp => jump(dp),
        Opcode::Jz | Opcode::Je => branch(dp, Condition::Zero),
        Opcode::Jn => branch(dp, Condition::Negative),
        Opcode::Jnz | Opcode::Jne => branch(dp, Condition::NotZero),
        Opcode::Read => read(dp),
        Opcode::Store => store(dp),
        Opcode::Ldi => load_immediate(dp),
        Opcode::Inc => {
            increment(dp);
            Ok(())
        }
        Opcode::MoveRegReg => move_register(dp),
        Opcode::Call => call(dp),
        Opcode::Ret => ret(dp),
        Opcode::AddRegReg => register_pair(dp, AluOp::Add, true),
        Opcode::SubRegReg => register_pair(dp, AluOp::Sub, true),
        Opcode::Cmp => register_pair(dp, AluOp::Sub, false),
        Opcode::IncMem => increment_memory(dp),
        Opcode::AddRegMem => register_memory(dp, AluOp::Add),
        Opcode::SubRegMem => register_memory(dp, AluOp::Sub),
    }
}

/// `PC <- PC + 1` through the ALU on internal bus 1.
///
/// Leaves the new PC in acc1 and on internal bus 1; acc0 is untouched.
fn advance_pc(dp: &mut Datapath) {
    dp.pc.internal_read(&mut dp.buses);
    dp.alu.store(AluSlot::Acc1, &dp.buses);
    dp.alu.execute(AluOp::Inc);
    dp.alu.read(AluSlot::Acc1, &mut dp.buses);
    dp.pc.internal_store(&dp.buses);
}

/// Advances PC to the next word and reads it onto the external bus.
fn fetch_operand(dp: &mut Datapath) -> SimResult<()> {
    advance_pc(dp);
    dp.pc.read(&mut dp.buses);
    dp.memory.read(&mut dp.buses.external)
}

/// Clears both flag bits and sets them from `result`.
fn update_flags(dp: &mut Datapath, result: Word) {
    dp.flags.set_bit(FLAG_ZERO, false);
    dp.flags.set_bit(FLAG_NEGATIVE, false);
    if result == 0 {
        dp.flags.set_bit(FLAG_ZERO, true);
    }
    if result < 0 {
        dp.flags.set_bit(FLAG_NEGATIVE, true);
    }
}

/// ADD, SUB: `Reg0 <- Reg0 op mem[addr]`.
fn accumulate(dp: &mut Datapath, op: AluOp) -> SimResult<()> {
    advance_pc(dp);
    dp.registers.accumulator().internal_read(&mut dp.buses);
    dp.alu.internal_store(AluSlot::Acc0, &dp.buses);

    dp.pc.read(&mut dp.buses);
    dp.memory.read(&mut dp.buses.external)?;
    dp.memory.read(&mut dp.buses.external)?;
    dp.registers.accumulator_mut().store(&dp.buses);
    dp.registers.accumulator().internal_read(&mut dp.buses);
    dp.alu.internal_store(AluSlot::Acc1, &dp.buses);

    dp.alu.execute(op);
    dp.alu.internal_read(AluSlot::Acc1, &mut dp.buses);
    let result = dp.buses.internal2.get();
    update_flags(dp, result);
    dp.registers.accumulator_mut().internal_store(&dp.buses);
    advance_pc(dp);
    Ok(())
}

/// JMP: `PC <- addr`.
fn jump(dp: &mut Datapath) -> SimResult<()> {
    fetch_operand(dp)?;
    dp.pc.store(&dp.buses);
    Ok(())
}

/// JZ, JN, JNZ, JE, JNE.
///
/// Both candidate addresses are written to the status memory and the flag
/// bit selects between them.
fn branch(dp: &mut Datapath, condition: Condition) -> SimResult<()> {
    fetch_operand(dp)?;
    dp.status.store_in(STATUS_TARGET, &dp.buses.external)?;

    // acc1 holds the operand address; one more increment is the fall-through.
    dp.alu.execute(AluOp::Inc);
    dp.alu.read(AluSlot::Acc1, &mut dp.buses);
    dp.pc.internal_store(&dp.buses);
    dp.pc.read(&mut dp.buses);
    dp.status.store_in(STATUS_FALL_THROUGH, &dp.buses.external)?;

    let bit = match condition {
        Condition::Zero => dp.flags.bit(FLAG_ZERO),
        Condition::NotZero => 1 - dp.flags.bit(FLAG_ZERO),
        Condition::Negative => dp.flags.bit(FLAG_NEGATIVE),
    };
    dp.buses.external.put(bit);
    dp.status.select(&mut dp.buses.external)?;
    dp.pc.store(&dp.buses);
    Ok(())
}

/// READ: `Reg0 <- mem[addr]`.
fn read(dp: &mut Datapath) -> SimResult<()> {
    fetch_operand(dp)?;
    dp.memory.read(&mut dp.buses.external)?;
    dp.registers.accumulator_mut().store(&dp.buses);
    advance_pc(dp);
    Ok(())
}

/// STORE: `mem[addr] <- Reg0`.
fn store(dp: &mut Datapath) -> SimResult<()> {
    fetch_operand(dp)?;
    dp.memory.store(&dp.buses.external)?;
    dp.registers.accumulator().read(&mut dp.buses);
    dp.memory.store(&dp.buses.external)?;
    advance_pc(dp);
    Ok(())
}

/// LDI: `Reg0 <- imm`.
fn load_immediate(dp: &mut Datapath) -> SimResult<()> {
    fetch_operand(dp)?;
    dp.registers.accumulator_mut().store(&dp.buses);
    advance_pc(dp);
    Ok(())
}

/// INC: `Reg0 <- Reg0 + 1`.
fn increment(dp: &mut Datapath) {
    dp.registers.accumulator().internal_read(&mut dp.buses);
    dp.alu.internal_store(AluSlot::Acc1, &dp.buses);
    dp.alu.execute(AluOp::Inc);
    dp.alu.internal_read(AluSlot::Acc1, &mut dp.buses);
    let result = dp.buses.internal2.get();
    update_flags(dp, result);
    dp.registers.accumulator_mut().internal_store(&dp.buses);
    advance_pc(dp);
}

/// MOVEREGREG: `regB <- regA`.
fn move_register(dp: &mut Datapath) -> SimResult<()> {
    fetch_operand(dp)?;
    // The PC advance only uses internal bus 1, so regA's id survives on the
    // external bus.
    advance_pc(dp);
    dp.registers.select(dp.buses.external.get())?;
    dp.registers.internal_read(&mut dp.buses);

    dp.pc.read(&mut dp.buses);
    dp.memory.read(&mut dp.buses.external)?;
    dp.registers.select(dp.buses.external.get())?;
    dp.registers.internal_store(&dp.buses);
    advance_pc(dp);
    Ok(())
}

/// CALL: push `PC + 2`, then `PC <- addr`.
fn call(dp: &mut Datapath) -> SimResult<()> {
    advance_pc(dp);
    // IR is free until the next fetch and parks the return address.
    dp.alu.execute(AluOp::Inc);
    dp.alu.read(AluSlot::Acc1, &mut dp.buses);
    dp.ir.internal_store(&dp.buses);
    dp.ir.read(&mut dp.buses);
    let return_address = dp.buses.external.get();
    dp.stack
        .push(return_address, &mut dp.memory, &mut dp.alu, &mut dp.buses)?;

    dp.pc.read(&mut dp.buses);
    dp.memory.read(&mut dp.buses.external)?;
    dp.pc.store(&dp.buses);
    Ok(())
}

/// RET: `PC <- pop()`.
fn ret(dp: &mut Datapath) -> SimResult<()> {
    let return_address = dp.stack.pop(&dp.memory, &mut dp.alu, &mut dp.buses)?;
    dp.buses.external.put(return_address);
    dp.pc.store(&dp.buses);
    Ok(())
}

/// Selects the register named by the next operand and loads it into `slot`.
fn register_operand(dp: &mut Datapath, slot: AluSlot) -> SimResult<()> {
    fetch_operand(dp)?;
    dp.registers.select(dp.buses.external.get())?;
    dp.registers.internal_read(&mut dp.buses);
    dp.alu.internal_store(slot, &dp.buses);
    Ok(())
}

/// ADDREGREG, SUBREGREG, CMP: `regB <- regA op regB`.
///
/// CMP sets the flags and skips the write-back.
fn register_pair(dp: &mut Datapath, op: AluOp, write_back: bool) -> SimResult<()> {
    register_operand(dp, AluSlot::Acc0)?;
    register_operand(dp, AluSlot::Acc1)?;
    dp.alu.execute(op);
    dp.alu.internal_read(AluSlot::Acc1, &mut dp.buses);
    let result = dp.buses.internal2.get();
    update_flags(dp, result);
    if write_back {
        dp.registers.internal_store(&dp.buses);
    }
    advance_pc(dp);
    Ok(())
}

/// ADDREGMEM, SUBREGMEM: `regA <- regA op mem[addr]`.
fn register_memory(dp: &mut Datapath, op: AluOp) -> SimResult<()> {
    register_operand(dp, AluSlot::Acc0)?;

    fetch_operand(dp)?;
    dp.memory.read(&mut dp.buses.external)?;
    // regA is still selected and latches the memory operand; its old value
    // is already in acc0.
    dp.registers.store(&dp.buses);
    dp.registers.internal_read(&mut dp.buses);
    dp.alu.internal_store(AluSlot::Acc1, &dp.buses);

    dp.alu.execute(op);
    dp.alu.internal_read(AluSlot::Acc1, &mut dp.buses);
    let result = dp.buses.internal2.get();
    update_flags(dp, result);
    dp.registers.internal_store(&dp.buses);
    advance_pc(dp);
    Ok(())
}

/// INCMEM: `mem[addr] <- mem[addr] + 1`.
///
/// The address phase of the store is opened first; the read that follows
/// reuses the address still on the bus.
fn increment_memory(dp: &mut Datapath) -> SimResult<()> {
    fetch_operand(dp)?;
    dp.memory.store(&dp.buses.external)?;
    dp.memory.read(&mut dp.buses.external)?;

    dp.ir.store(&dp.buses);
    dp.ir.internal_read(&mut dp.buses);
    dp.alu.store(AluSlot::Acc1, &dp.buses);
    dp.alu.execute(AluOp::Inc);
    dp.alu.read(AluSlot::Acc1, &mut dp.buses);
    let result = dp.buses.internal1.get();
    update_flags(dp, result);
    dp.ir.internal_store(&dp.buses);
    dp.ir.read(&mut dp.buses);
    dp.memory.store(&dp.buses.external)?;
    advance_pc(dp);
    Ok(())
}
