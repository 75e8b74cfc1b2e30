//! # Program Scenarios
//!
//! Complete programs run from load to halt.

use archc_core::common::Word;
use archc_core::core::control::State;
use archc_core::isa::Opcode;

use crate::common::builder::program::ProgramBuilder;
use crate::common::harness::TestContext;

#[test]
fn test_ldi_inc_add_then_halt() {
    // ldi 10 | inc | add 7 | end | mem[7] = 3
    let mut ctx = TestContext::new().load_words(&[7, 10, 8, 0, 7, -1, 0, 3]);
    assert_eq!(ctx.run(), 3);
    assert_eq!(ctx.reg(0), 14);
    assert_eq!(ctx.cu().state(), State::Halted);
}

#[test]
fn test_call_returns_to_following_instruction() {
    // 0: call 6 | 2: ldi 5 | 4: end | 5: end | 6: inc | 7: ret
    let mut ctx = TestContext::new().load_words(&[10, 6, 7, 5, -1, -1, 8, 11, -1]);
    let _ = ctx.sim.step().unwrap();
    assert_eq!(ctx.pc(), 6);
    assert_eq!(ctx.sim.stats().calls, 1);

    let _ = ctx.sim.step().unwrap();
    let _ = ctx.sim.step().unwrap();
    assert_eq!(ctx.pc(), 2);
    assert!(ctx.cu().datapath().stack().is_empty());

    let _ = ctx.run();
    assert_eq!(ctx.reg(0), 5);
}

#[test]
fn test_memory_countdown_loop() {
    const COUNTER: Word = 90;
    const TOTAL: Word = 91;
    const ONE: Word = 92;
    let program = ProgramBuilder::new()
        .ldi(5)
        .store(COUNTER);
    let top = program.here();
    let program = program
        .read(TOTAL)
        .add(COUNTER)
        .store(TOTAL)
        .read(COUNTER)
        .sub(ONE)
        .store(COUNTER)
        .op(Opcode::Jnz, &[top])
        .data(TOTAL, 0)
        .data(ONE, 1);

    let mut ctx = TestContext::new().load(&program.build());
    let _ = ctx.run();
    assert_eq!(ctx.mem(TOTAL), 15);
    assert_eq!(ctx.mem(COUNTER), 0);
    assert_eq!(ctx.sim.stats().branches_taken, 4);
    assert_eq!(ctx.sim.stats().branches_not_taken, 1);
}

#[test]
fn test_register_loop_with_cmp() {
    let program = ProgramBuilder::new()
        .ldi(3)
        .mov(0, 2)
        .ldi(0)
        .mov(0, 1)
        .ldi(1)
        .mov(0, 3);
    let top = program.here();
    let program = program
        .op(Opcode::AddRegReg, &[3, 1])
        .op(Opcode::Cmp, &[1, 2])
        .op(Opcode::Jne, &[top]);

    let mut ctx = TestContext::new().load(&program.build());
    let _ = ctx.run();
    assert_eq!(ctx.reg(1), 3);
    assert_eq!(ctx.reg(2), 3);
    assert_eq!(ctx.flags(), (1, 0));
}

#[test]
fn test_subroutine_updates_memory() {
    // main: call inc_twice | call inc_twice | end
    // inc_twice: incmem 95 | incmem 95 | ret
    let main = ProgramBuilder::new().call(5).call(5).word(-1);
    let program = main
        .op(Opcode::IncMem, &[95])
        .op(Opcode::IncMem, &[95])
        .ret()
        .data(95, 10);
    let mut ctx = TestContext::new().load(&program.build());
    let _ = ctx.run();
    assert_eq!(ctx.mem(95), 14);
    assert_eq!(ctx.sim.stats().returns, 2);
    assert_eq!(ctx.stack_top(), 127);
}
