//! Simulator: owns the control unit and the statistics side-by-side.
//!
//! Drivers talk to this type instead of the control unit so that every
//! retired instruction is accounted for and instruction budgets are
//! enforced in one place.

use tracing::{debug, warn};

use crate::common::SimResult;
use crate::config::Config;
use crate::core::ControlUnit;
use crate::core::control::{State, StepEvent};
use crate::sim::loader::Image;
use crate::sim::snapshot::Snapshot;
use crate::stats::SimStats;

/// How a call to [`Simulator::run`] or [`Simulator::run_for`] ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The control unit reached `Halted`.
    Halted {
        /// Instructions retired during this call.
        retired: u64,
    },
    /// The instruction budget ran out first.
    BudgetExhausted {
        /// Instructions retired during this call.
        retired: u64,
    },
}

impl RunOutcome {
    /// Instructions retired during the call.
    pub const fn retired(self) -> u64 {
        match self {
            Self::Halted { retired } | Self::BudgetExhausted { retired } => retired,
        }
    }
}

/// Top-level simulator.
#[derive(Clone, Debug)]
pub struct Simulator {
    cu: ControlUnit,
    stats: SimStats,
    budget: Option<u64>,
}

impl Simulator {
    /// Builds a simulator for `config`.
    pub fn new(config: &Config) -> SimResult<Self> {
        Ok(Self {
            cu: ControlUnit::new(config)?,
            stats: SimStats::default(),
            budget: config.general.max_instructions,
        })
    }

    /// Installs `image`, resets the machine and clears the statistics.
    pub fn load_image(&mut self, image: &Image) -> SimResult<()> {
        image.load_into(&mut self.cu)?;
        self.stats.reset();
        debug!(entries = image.len(), "image loaded");
        Ok(())
    }

    /// Executes one instruction and returns the resulting state.
    pub fn step(&mut self) -> SimResult<State> {
        if let StepEvent::Retired(retired) = self.cu.step()? {
            self.stats.record(&retired);
        }
        Ok(self.cu.state())
    }

    /// Runs until halt, or until the configured instruction budget is
    /// spent.
    pub fn run(&mut self) -> SimResult<RunOutcome> {
        self.run_bounded(self.budget)
    }

    /// Runs at most `limit` instructions.
    pub fn run_for(&mut self, limit: u64) -> SimResult<RunOutcome> {
        self.run_bounded(Some(limit))
    }

    fn run_bounded(&mut self, limit: Option<u64>) -> SimResult<RunOutcome> {
        let mut retired = 0;
        loop {
            if limit.is_some_and(|limit| retired >= limit) && !self.cu.is_halted() {
                warn!(retired, "instruction budget exhausted");
                return Ok(RunOutcome::BudgetExhausted { retired });
            }
            match self.cu.step()? {
                StepEvent::Retired(event) => {
                    self.stats.record(&event);
                    retired += 1;
                }
                StepEvent::Halted { .. } => return Ok(RunOutcome::Halted { retired }),
            }
        }
    }

    /// Resets the machine (memory contents kept) and clears the statistics.
    pub fn reset(&mut self) {
        self.cu.reset();
        self.stats.reset();
    }

    /// Copies the observable machine state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.cu)
    }

    /// The control unit.
    pub const fn control_unit(&self) -> &ControlUnit {
        &self.cu
    }

    /// Statistics gathered since the last load or reset.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Returns true once the control unit has halted.
    pub fn is_halted(&self) -> bool {
        self.cu.is_halted()
    }
}
