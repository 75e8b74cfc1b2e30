//! # Error Tests
//!
//! Display formatting of machine errors and the halt/fatal split.

use archc_core::common::{LoadError, Region, SimError};

#[test]
fn test_out_of_bounds_display_names_region() {
    let err = SimError::OutOfBoundsAddress {
        region: Region::Status,
        address: 2,
        size: 2,
    };
    assert_eq!(
        err.to_string(),
        "status memory address 2 is out of bounds [0, 2)"
    );
}

#[test]
fn test_stack_errors_display() {
    let over = SimError::StackOverflow {
        top: 100,
        bottom: 100,
    };
    assert!(over.to_string().contains("below bottom 100"));
    let under = SimError::StackUnderflow { top: 127 };
    assert!(under.to_string().contains("127"));
}

#[test]
fn test_only_unrecognized_opcode_is_halt() {
    assert!(SimError::UnrecognizedOpcode { opcode: -1, pc: 9 }.is_halt());
    assert!(!SimError::PendingStore { address: 3 }.is_halt());
    assert!(!SimError::InvalidRegisterId { id: 7, count: 4 }.is_halt());
    assert!(!SimError::InvalidConfig("x".into()).is_halt());
}

#[test]
fn test_load_error_wraps_machine_error() {
    let err = LoadError::from(SimError::StackUnderflow { top: 1 });
    assert_eq!(err.to_string(), SimError::StackUnderflow { top: 1 }.to_string());
}
