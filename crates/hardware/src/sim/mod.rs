//! Simulation driver layer.
//!
//! Provides image loading, the [`Simulator`] facade that runs a loaded
//! program while collecting statistics, and serializable state snapshots.

/// Machine image parsing and installation.
pub mod loader;

/// Simulator facade combining the control unit and statistics.
pub mod simulator;

/// Serializable view of the machine state.
pub mod snapshot;

pub use self::loader::Image;
pub use self::simulator::{RunOutcome, Simulator};
pub use self::snapshot::Snapshot;
