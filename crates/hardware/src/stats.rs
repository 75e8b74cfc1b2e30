//! Simulation statistics collection and reporting.
//!
//! This module tracks what a program did while it ran. It provides:
//! 1. **Throughput:** Retired instructions and host execution time.
//! 2. **Instruction mix:** Counts by [`InstClass`].
//! 3. **Control flow:** Conditional branches taken and not taken, calls and
//!    returns.
//! 4. **Stack:** Peak depth reached.

use std::time::Instant;

use serde::Serialize;

use crate::common::Word;
use crate::core::control::Retired;
use crate::isa::opcodes::{InstClass, Opcode};

/// Simulation statistics.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Number of instructions executed to completion.
    pub instructions_retired: u64,

    /// Arithmetic and compare instructions retired.
    pub inst_arithmetic: u64,
    /// READ, STORE and LDI instructions retired.
    pub inst_memory: u64,
    /// JMP instructions retired.
    pub inst_jump: u64,
    /// Conditional branches retired.
    pub inst_branch: u64,
    /// MOVEREGREG instructions retired.
    pub inst_register: u64,
    /// CALL and RET instructions retired.
    pub inst_subroutine: u64,

    /// Conditional branches that loaded the target address.
    pub branches_taken: u64,
    /// Conditional branches that fell through.
    pub branches_not_taken: u64,
    /// CALL instructions retired.
    pub calls: u64,
    /// RET instructions retired.
    pub returns: u64,
    /// Largest stack depth observed after an instruction.
    pub peak_stack_depth: usize,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            instructions_retired: 0,
            inst_arithmetic: 0,
            inst_memory: 0,
            inst_jump: 0,
            inst_branch: 0,
            inst_register: 0,
            inst_subroutine: 0,
            branches_taken: 0,
            branches_not_taken: 0,
            calls: 0,
            returns: 0,
            peak_stack_depth: 0,
        }
    }
}

impl SimStats {
    /// Accounts for one retired instruction.
    pub fn record(&mut self, retired: &Retired) {
        self.instructions_retired += 1;
        match retired.opcode.class() {
            InstClass::Arithmetic => self.inst_arithmetic += 1,
            InstClass::Memory => self.inst_memory += 1,
            InstClass::Jump => self.inst_jump += 1,
            InstClass::Branch => {
                self.inst_branch += 1;
                // The fall-through address is the word after the operand.
                if retired.next_pc == retired.pc + retired.opcode.size() as Word {
                    self.branches_not_taken += 1;
                } else {
                    self.branches_taken += 1;
                }
            }
            InstClass::Register => self.inst_register += 1,
            InstClass::Subroutine => {
                self.inst_subroutine += 1;
                if retired.opcode == Opcode::Call {
                    self.calls += 1;
                } else {
                    self.returns += 1;
                }
            }
        }
        self.peak_stack_depth = self.peak_stack_depth.max(retired.stack_depth);
    }

    /// Restarts the host timer and zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Prints selected sections to stdout.
    ///
    /// # Arguments
    ///
    /// * `sections` - Any of `summary`, `mix`, `control`. Empty prints all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let pct = |n: u64| {
            if self.instructions_retired == 0 {
                0.0
            } else {
                n as f64 * 100.0 / self.instructions_retired as f64
            }
        };

        if want("summary") {
            println!("\n==========================================================");
            println!("ARCHC SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_insts                {}", self.instructions_retired);
            println!("peak_stack_depth         {}", self.peak_stack_depth);
            println!("----------------------------------------------------------");
        }
        if want("mix") {
            println!("INSTRUCTION MIX");
            for (name, count) in [
                ("arithmetic", self.inst_arithmetic),
                ("memory", self.inst_memory),
                ("jump", self.inst_jump),
                ("branch", self.inst_branch),
                ("register", self.inst_register),
                ("subroutine", self.inst_subroutine),
            ] {
                println!("  {name:<22} {count:>8} ({:>5.1}%)", pct(count));
            }
            println!("----------------------------------------------------------");
        }
        if want("control") {
            println!("CONTROL FLOW");
            println!("  branches_taken         {:>8}", self.branches_taken);
            println!("  branches_not_taken     {:>8}", self.branches_not_taken);
            println!("  calls                  {:>8}", self.calls);
            println!("  returns                {:>8}", self.returns);
            println!("==========================================================");
        }
    }

    /// Prints every section.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
