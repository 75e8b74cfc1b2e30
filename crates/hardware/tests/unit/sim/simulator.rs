//! # Simulator Facade Tests
//!
//! Instruction budgets, reset, statistics lifetime and snapshots.

use archc_core::config::Config;
use archc_core::core::control::State;
use archc_core::sim::snapshot::{BusSnapshot, FlagsSnapshot, StackSnapshot};
use archc_core::sim::{RunOutcome, Snapshot};
use pretty_assertions::assert_eq;

use crate::common::builder::program::ProgramBuilder;
use crate::common::harness::TestContext;

#[test]
fn test_run_for_stops_infinite_loop() {
    let mut ctx = TestContext::new().load(&ProgramBuilder::new().jmp(0).build());
    assert_eq!(
        ctx.sim.run_for(10),
        Ok(RunOutcome::BudgetExhausted { retired: 10 })
    );
    assert!(!ctx.sim.is_halted());
    assert_eq!(ctx.sim.stats().inst_jump, 10);
}

#[test]
fn test_configured_budget() {
    let mut config = Config::default();
    config.general.max_instructions = Some(3);
    let mut ctx = TestContext::with_config(&config).load(&ProgramBuilder::new().jmp(0).build());
    assert_eq!(ctx.sim.run().map(RunOutcome::retired), Ok(3));
}

#[test]
fn test_halt_within_budget() {
    let mut ctx = TestContext::new().load(&ProgramBuilder::new().ldi(1).inc().build());
    assert_eq!(ctx.sim.run_for(3), Ok(RunOutcome::Halted { retired: 2 }));
}

#[test]
fn test_step_returns_state() {
    let mut ctx = TestContext::new().load(&ProgramBuilder::new().inc().build());
    assert_eq!(ctx.sim.step(), Ok(State::Fetch));
    assert_eq!(ctx.sim.step(), Ok(State::Halted));
    assert_eq!(ctx.sim.step(), Ok(State::Halted));
    assert_eq!(ctx.sim.stats().instructions_retired, 1);
}

#[test]
fn test_reset_reruns_program() {
    let mut ctx = TestContext::new().load(&ProgramBuilder::new().ldi(4).store(90).build());
    let _ = ctx.run();
    ctx.sim.reset();
    assert_eq!(ctx.sim.stats().instructions_retired, 0);
    assert_eq!(ctx.reg(0), 0);
    assert_eq!(ctx.mem(90), 4);
    assert_eq!(ctx.run(), 2);
}

#[test]
fn test_snapshot_after_halt() {
    let json = r#"{ "memory": { "size": 16 }, "stack": { "top": 15, "bottom": 12 } }"#;
    let config = Config::from_json(json).unwrap();
    let mut ctx = TestContext::with_config(&config).load_words(&[7, -4, -1]);
    let _ = ctx.run();

    let mut memory = vec![0; 16];
    memory[..3].copy_from_slice(&[7, -4, -1]);
    let expected = Snapshot {
        state: State::Halted,
        halted: true,
        pc: 2,
        ir: -1,
        registers: vec![-4, 0, 0, 0],
        flags: FlagsSnapshot {
            raw: 0,
            zero: false,
            negative: false,
        },
        stack: StackSnapshot {
            top: 15,
            bottom: 12,
            depth: 0,
        },
        buses: BusSnapshot {
            external: -1,
            internal1: -1,
            internal2: 0,
        },
        alu: [0, 2],
        status: [0, 0],
        memory,
    };
    assert_eq!(ctx.sim.snapshot(), expected);
}

#[test]
fn test_snapshot_json_fields() {
    let mut ctx = TestContext::new().load_words(&[7, 0, 1, 1, -1]);
    let _ = ctx.run();
    let text = ctx.sim.snapshot().to_json().unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["state"], "Halted");
    assert_eq!(json["flags"]["zero"], true);
    assert_eq!(json["registers"][0], 0);
    assert_eq!(json["memory"].as_array().map(Vec::len), Some(128));
}
