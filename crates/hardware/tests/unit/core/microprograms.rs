//! # Microprogram Tests
//!
//! One or more small programs per opcode, checking the architectural effect
//! of each micro-operation sequence: destination registers, memory, flags
//! and where PC ends up.

use archc_core::common::{SimError, Word};
use archc_core::isa::Opcode;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::builder::program::ProgramBuilder;
use crate::common::harness::TestContext;

const DATA: Word = 90;

fn run(program: ProgramBuilder) -> TestContext {
    let mut ctx = TestContext::new().load(&program.build());
    let _ = ctx.run();
    ctx
}

#[rstest]
#[case::add(Opcode::Add, 10, 5, 15, (0, 0))]
#[case::add_to_zero(Opcode::Add, -5, 5, 0, (1, 0))]
#[case::sub(Opcode::Sub, 10, 4, 6, (0, 0))]
#[case::sub_to_zero(Opcode::Sub, 5, 5, 0, (1, 0))]
#[case::sub_negative(Opcode::Sub, 2, 5, -3, (0, 1))]
fn test_accumulator_arithmetic(
    #[case] op: Opcode,
    #[case] acc: Word,
    #[case] operand: Word,
    #[case] expected: Word,
    #[case] flags: (Word, Word),
) {
    let ctx = run(ProgramBuilder::new()
        .ldi(acc)
        .op(op, &[DATA])
        .data(DATA, operand));
    assert_eq!(ctx.reg(0), expected);
    assert_eq!(ctx.flags(), flags);
    assert_eq!(ctx.mem(DATA), operand);
}

#[test]
fn test_read_then_store() {
    let ctx = run(ProgramBuilder::new()
        .read(DATA)
        .store(DATA + 1)
        .data(DATA, 33));
    assert_eq!(ctx.reg(0), 33);
    assert_eq!(ctx.mem(DATA + 1), 33);
}

#[test]
fn test_ldi_accepts_end_word_value() {
    let ctx = run(ProgramBuilder::new().ldi(-1));
    assert_eq!(ctx.reg(0), -1);
}

#[test]
fn test_inc_sets_zero_flag() {
    let ctx = run(ProgramBuilder::new().ldi(-1).inc());
    assert_eq!(ctx.reg(0), 0);
    assert_eq!(ctx.flags(), (1, 0));
}

#[test]
fn test_jmp_skips() {
    // 0: jmp 4 | 2: ldi 1 | 4: ldi 2 | 6: end
    let ctx = run(ProgramBuilder::new().jmp(4).ldi(1).ldi(2));
    assert_eq!(ctx.reg(0), 2);
    assert_eq!(ctx.pc(), 6);
}

/// 0: ldi v | 2: sub DATA (=0) | 4: op 9 | 6: ldi 1 | 8: end | 9: ldi 2 | 11: end
#[rstest]
#[case::jz_taken(Opcode::Jz, 0, true)]
#[case::jz_not_taken(Opcode::Jz, 3, false)]
#[case::jn_taken(Opcode::Jn, -2, true)]
#[case::jn_not_taken(Opcode::Jn, 2, false)]
#[case::jn_zero(Opcode::Jn, 0, false)]
#[case::jnz_taken(Opcode::Jnz, 3, true)]
#[case::jnz_not_taken(Opcode::Jnz, 0, false)]
#[case::je_taken(Opcode::Je, 0, true)]
#[case::je_not_taken(Opcode::Je, -4, false)]
#[case::jne_taken(Opcode::Jne, -5, true)]
#[case::jne_not_taken(Opcode::Jne, 0, false)]
fn test_conditional_branches(#[case] op: Opcode, #[case] value: Word, #[case] taken: bool) {
    let ctx = run(ProgramBuilder::new()
        .ldi(value)
        .sub(DATA)
        .op(op, &[9])
        .ldi(1)
        .word(-1)
        .ldi(2)
        .data(DATA, 0));
    assert_eq!(ctx.reg(0), if taken { 2 } else { 1 });
    assert_eq!(ctx.pc(), if taken { 11 } else { 8 });
}

#[test]
fn test_branch_fills_status_memory() {
    let ctx = run(ProgramBuilder::new().ldi(1).sub(DATA).op(Opcode::Jz, &[9]).data(DATA, 0));
    assert_eq!(ctx.cu().datapath().status().cells(), (6, 9));
}

#[test]
fn test_move_register() {
    let ctx = run(ProgramBuilder::new().ldi(7).mov(0, 3));
    assert_eq!(ctx.reg(3), 7);
    assert_eq!(ctx.reg(0), 7);
    assert_eq!(ctx.pc(), 5);
}

#[rstest]
#[case::add(Opcode::AddRegReg, 10, (0, 0))]
#[case::sub(Opcode::SubRegReg, 2, (0, 0))]
fn test_register_pair_arithmetic(
    #[case] op: Opcode,
    #[case] expected: Word,
    #[case] flags: (Word, Word),
) {
    // reg1 = 4, reg0 = 6, then regB <- regA op regB with A = 0, B = 1.
    let ctx = run(ProgramBuilder::new()
        .ldi(4)
        .mov(0, 1)
        .ldi(6)
        .op(op, &[0, 1]));
    assert_eq!(ctx.reg(1), expected);
    assert_eq!(ctx.reg(0), 6);
    assert_eq!(ctx.flags(), flags);
}

#[rstest]
#[case::equal(4, 4, (1, 0))]
#[case::less(3, 4, (0, 1))]
#[case::greater(9, 4, (0, 0))]
fn test_cmp_sets_flags_without_store(
    #[case] a: Word,
    #[case] b: Word,
    #[case] flags: (Word, Word),
) {
    let ctx = run(ProgramBuilder::new()
        .ldi(b)
        .mov(0, 1)
        .ldi(a)
        .op(Opcode::Cmp, &[0, 1]));
    assert_eq!(ctx.flags(), flags);
    assert_eq!((ctx.reg(0), ctx.reg(1)), (a, b));
}

#[rstest]
#[case(41, 42, (0, 0))]
#[case(-1, 0, (1, 0))]
#[case(-7, -6, (0, 1))]
fn test_incmem(#[case] before: Word, #[case] after: Word, #[case] flags: (Word, Word)) {
    let ctx = run(ProgramBuilder::new()
        .ldi(5)
        .op(Opcode::IncMem, &[DATA])
        .data(DATA, before));
    assert_eq!(ctx.mem(DATA), after);
    assert_eq!(ctx.reg(0), 5);
    assert_eq!(ctx.flags(), flags);
}

#[rstest]
#[case::add(Opcode::AddRegMem, 13, (0, 0))]
#[case::sub(Opcode::SubRegMem, -7, (0, 1))]
fn test_register_memory_arithmetic(
    #[case] op: Opcode,
    #[case] expected: Word,
    #[case] flags: (Word, Word),
) {
    let ctx = run(ProgramBuilder::new()
        .ldi(3)
        .mov(0, 2)
        .op(op, &[2, DATA])
        .data(DATA, 10));
    assert_eq!(ctx.reg(2), expected);
    assert_eq!(ctx.reg(0), 3);
    assert_eq!(ctx.mem(DATA), 10);
    assert_eq!(ctx.flags(), flags);
}

#[test]
fn test_call_and_return() {
    // 0: call 5 | 2: inc | 3: end | 4: end | 5: ldi 9 | 7: ret
    let ctx = run(ProgramBuilder::new()
        .call(5)
        .inc()
        .word(-1)
        .word(-1)
        .ldi(9)
        .ret());
    assert_eq!(ctx.reg(0), 10);
    assert_eq!(ctx.pc(), 3);
    assert_eq!(ctx.stack_top(), 127);
    assert_eq!(ctx.mem(126), 2);
}

#[test]
fn test_ret_loads_popped_address() {
    // 0: call 4 | 2: end | 3: end | 4: ret
    let program = ProgramBuilder::new().call(4).word(-1).word(-1).ret();
    let mut ctx = TestContext::new().load(&program.build());
    let _ = ctx.sim.step().unwrap();
    let _ = ctx.sim.step().unwrap();
    assert_eq!(ctx.pc(), 2);
    assert_eq!(ctx.cu().datapath().buses().external.get(), 2);
    assert!(ctx.cu().datapath().stack().is_empty());
}

#[test]
fn test_nested_calls() {
    // 0: call 4 | 2: end | 3: end | 4: call 9 | 6: inc | 7: ret | 8: end | 9: ldi 20 | 11: ret
    let ctx = run(ProgramBuilder::new()
        .call(4)
        .word(-1)
        .word(-1)
        .call(9)
        .inc()
        .ret()
        .word(-1)
        .ldi(20)
        .ret());
    assert_eq!(ctx.reg(0), 21);
    assert_eq!(ctx.pc(), 2);
    assert_eq!((ctx.mem(126), ctx.mem(125)), (2, 6));
    assert_eq!(ctx.sim.stats().peak_stack_depth, 2);
}

#[test]
fn test_ret_on_empty_stack_is_fatal() {
    let mut ctx = TestContext::new().load(&ProgramBuilder::new().ret().build());
    assert_eq!(ctx.sim.run(), Err(SimError::StackUnderflow { top: 127 }));
    assert!(ctx.sim.is_halted());
}

#[test]
fn test_invalid_register_is_fatal() {
    let mut ctx = TestContext::new().load(&ProgramBuilder::new().mov(0, 9).build());
    assert_eq!(
        ctx.sim.run(),
        Err(SimError::InvalidRegisterId { id: 9, count: 4 })
    );
}

#[test]
fn test_store_out_of_bounds_is_fatal() {
    let mut ctx = TestContext::new().load(&ProgramBuilder::new().ldi(1).store(200).build());
    assert!(matches!(
        ctx.sim.run(),
        Err(SimError::OutOfBoundsAddress { address: 200, .. })
    ));
}

#[rstest]
#[case(Opcode::Add, &[DATA])]
#[case(Opcode::Sub, &[DATA])]
#[case(Opcode::Read, &[DATA])]
#[case(Opcode::Store, &[DATA])]
#[case(Opcode::Ldi, &[3])]
#[case(Opcode::Inc, &[])]
#[case(Opcode::MoveRegReg, &[0, 1])]
#[case(Opcode::AddRegReg, &[0, 1])]
#[case(Opcode::SubRegReg, &[0, 1])]
#[case(Opcode::Cmp, &[0, 1])]
#[case(Opcode::IncMem, &[DATA])]
#[case(Opcode::AddRegMem, &[1, DATA])]
#[case(Opcode::SubRegMem, &[1, DATA])]
fn test_pc_advances_past_operands(#[case] op: Opcode, #[case] operands: &[Word]) {
    let mut ctx = TestContext::new().load(&ProgramBuilder::new().op(op, operands).build());
    let _ = ctx.sim.step().unwrap();
    assert_eq!(ctx.pc(), op.size() as Word);
}

proptest! {
    #[test]
    fn prop_flags_follow_result(value in any::<Word>()) {
        let ctx = run(ProgramBuilder::new().ldi(value).sub(DATA).data(DATA, 0));
        let expected = (Word::from(value == 0), Word::from(value < 0));
        prop_assert_eq!(ctx.flags(), expected);
    }
}
