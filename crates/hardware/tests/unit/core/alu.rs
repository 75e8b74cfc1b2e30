//! # ALU Tests
//!
//! Operand routing over both internal buses and wrap-around arithmetic.

use archc_core::common::Word;
use archc_core::core::units::{Alu, AluOp, AluSlot};
use archc_core::soc::Buses;
use proptest::prelude::*;
use rstest::rstest;

fn loaded(a: Word, b: Word) -> Alu {
    let mut alu = Alu::new();
    let mut buses = Buses::new();
    buses.internal1.put(a);
    alu.store(AluSlot::Acc0, &buses);
    buses.internal2.put(b);
    alu.internal_store(AluSlot::Acc1, &buses);
    alu
}

#[rstest]
#[case(AluOp::Add, 3, 4, 7)]
#[case(AluOp::Sub, 3, 4, -1)]
#[case(AluOp::Inc, 3, 4, 5)]
#[case(AluOp::Add, Word::MAX, 1, Word::MIN)]
#[case(AluOp::Sub, Word::MIN, 1, Word::MAX)]
fn test_operations(#[case] op: AluOp, #[case] a: Word, #[case] b: Word, #[case] expected: Word) {
    let mut alu = loaded(a, b);
    alu.execute(op);
    assert_eq!(alu.operand(AluSlot::Acc1), expected);
    assert_eq!(alu.operand(AluSlot::Acc0), a);
}

#[test]
fn test_compare_leaves_first_operand() {
    let mut alu = Alu::new();
    alu.compare(40, 15);
    assert_eq!(alu.operand(AluSlot::Acc0), 40);
    assert_eq!(alu.operand(AluSlot::Acc1), 25);
}

#[test]
fn test_reset_clears_slots() {
    let mut alu = loaded(1, 2);
    alu.reset();
    assert_eq!(alu, Alu::new());
}

proptest! {
    #[test]
    fn prop_sub_matches_wrapping(a in any::<Word>(), b in any::<Word>()) {
        let mut alu = loaded(a, b);
        alu.execute(AluOp::Sub);
        prop_assert_eq!(alu.operand(AluSlot::Acc1), a.wrapping_sub(b));
    }

    #[test]
    fn prop_internal_read_publishes_slot(a in any::<Word>(), b in any::<Word>()) {
        let alu = loaded(a, b);
        let mut buses = Buses::new();
        alu.internal_read(AluSlot::Acc0, &mut buses);
        alu.read(AluSlot::Acc1, &mut buses);
        prop_assert_eq!(buses.internal2.get(), a);
        prop_assert_eq!(buses.internal1.get(), b);
        prop_assert_eq!(buses.external.get(), 0);
    }
}
