//! Control Unit Definition.
//!
//! The control unit owns the datapath and the dispatch loop. It coordinates:
//! 1. **Fetch:** `PC.read -> Memory.read -> IR.store`.
//! 2. **Decode/dispatch:** `IR.internal_read` puts the opcode on internal
//!    bus 1 and the matching microprogram runs to completion.
//! 3. **Halt:** A word with no microprogram moves the unit to `Halted`.
//! 4. **Faults:** Any other error stops the unit and is returned to the
//!    caller; there is no faulted-but-continuing state.

/// One micro-operation sequence per opcode.
mod microprograms;

use serde::Serialize;
use tracing::{Level, debug, info};

use crate::common::addr::to_index;
use crate::common::{Region, SimError, SimResult, Word};
use crate::config::Config;
use crate::core::datapath::Datapath;
use crate::isa::decode::decode;
use crate::isa::disasm::disassemble;
use crate::isa::opcodes::Opcode;
use crate::soc::memory::StorePhase;

/// Control unit state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum State {
    /// Next step fetches the word at PC into IR.
    Fetch,
    /// IR holds a word waiting to be decoded and executed.
    DecodeDispatch,
    /// Terminal: the program ended or a fatal error occurred.
    Halted,
}

/// An instruction that ran to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Retired {
    /// Address of the opcode word.
    pub pc: Word,
    /// The executed instruction.
    pub opcode: Opcode,
    /// PC after the microprogram.
    pub next_pc: Word,
    /// Stack depth after the microprogram.
    pub stack_depth: usize,
}

/// Result of a single [`ControlUnit::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepEvent {
    /// One instruction executed.
    Retired(Retired),
    /// The word at `pc` is not an opcode; the unit is halted.
    Halted {
        /// The word that failed to decode.
        opcode: Word,
        /// Its address.
        pc: Word,
    },
}

/// Microprogrammed control unit.
#[derive(Clone, Debug)]
pub struct ControlUnit {
    dp: Datapath,
    state: State,
    entry: Word,
    trace: bool,
}

impl ControlUnit {
    /// Validates `config` and builds a control unit with a fresh datapath.
    ///
    /// # Arguments
    ///
    /// * `config` - Machine layout and tracing options.
    ///
    /// # Returns
    ///
    /// A unit in `Fetch` with PC at the entry address, or `InvalidConfig`.
    pub fn new(config: &Config) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            dp: Datapath::new(config),
            state: State::Fetch,
            entry: config.general.entry_address,
            trace: config.general.trace_instructions,
        })
    }

    /// Current state.
    #[inline]
    pub const fn state(&self) -> State {
        self.state
    }

    /// Returns true once the unit reached `Halted`.
    #[inline]
    pub fn is_halted(&self) -> bool {
        self.state == State::Halted
    }

    /// Read-only view of every component.
    #[inline]
    pub const fn datapath(&self) -> &Datapath {
        &self.dp
    }

    /// Writes `(address, value)` pairs into memory, then resets.
    ///
    /// Each pair goes through the two-phase store over the external bus.
    /// Every address is range-checked first, so a rejected image leaves
    /// memory and the unit untouched.
    pub fn load<I>(&mut self, entries: I) -> SimResult<()>
    where
        I: IntoIterator<Item = (Word, Word)>,
    {
        let entries: Vec<(Word, Word)> = entries.into_iter().collect();
        let size = self.dp.memory.size();
        for &(address, _) in &entries {
            let _ = to_index(Region::Main, address, size)?;
        }

        let dp = &mut self.dp;
        dp.memory.reset_phase();
        for (address, value) in entries {
            dp.buses.external.put(address);
            dp.memory.store(&dp.buses.external)?;
            dp.buses.external.put(value);
            dp.memory.store(&dp.buses.external)?;
        }
        self.reset();
        Ok(())
    }

    /// Returns every register, the ALU, the buses, the status memory and
    /// the stack to their initial values and PC to the entry address.
    /// Memory contents are kept.
    pub fn reset(&mut self) {
        self.dp.reset(self.entry);
        self.state = State::Fetch;
    }

    /// Executes one instruction.
    ///
    /// On a halted unit this does nothing and reports the halt again. A
    /// fatal error halts the unit and is returned.
    pub fn step(&mut self) -> SimResult<StepEvent> {
        if self.state == State::Halted {
            return Ok(StepEvent::Halted {
                opcode: self.dp.ir.value(),
                pc: self.dp.pc.value(),
            });
        }
        let result = self.fetch().and_then(|()| self.decode_dispatch());
        if let Err(err) = &result {
            debug!(%err, pc = self.dp.pc.value(), "fault");
            self.state = State::Halted;
        }
        result
    }

    /// Steps until the unit halts.
    ///
    /// # Returns
    ///
    /// Number of instructions retired. Programs that never reach an
    /// unrecognized opcode do not return.
    pub fn run(&mut self) -> SimResult<u64> {
        let mut retired = 0;
        while let StepEvent::Retired(_) = self.step()? {
            retired += 1;
        }
        Ok(retired)
    }

    fn fetch(&mut self) -> SimResult<()> {
        let dp = &mut self.dp;
        dp.pc.read(&mut dp.buses);
        dp.memory.read(&mut dp.buses.external)?;
        dp.ir.store(&dp.buses);
        self.state = State::DecodeDispatch;
        Ok(())
    }

    fn decode_dispatch(&mut self) -> SimResult<StepEvent> {
        let pc = self.dp.pc.value();
        self.dp.ir.internal_read(&mut self.dp.buses);
        let word = self.dp.buses.internal1.get();
        let opcode = match decode(word, pc) {
            Ok(opcode) => opcode,
            Err(err) if err.is_halt() => {
                debug!(opcode = word, pc, "halt");
                self.state = State::Halted;
                return Ok(StepEvent::Halted { opcode: word, pc });
            }
            Err(err) => return Err(err),
        };
        self.trace_dispatch(pc, opcode);

        microprograms::execute(&mut self.dp, opcode)?;
        if let StorePhase::AwaitingData { address } = self.dp.memory.phase() {
            return Err(SimError::PendingStore { address });
        }

        self.state = State::Fetch;
        Ok(StepEvent::Retired(Retired {
            pc,
            opcode,
            next_pc: self.dp.pc.value(),
            stack_depth: self.dp.stack.depth(),
        }))
    }

    fn trace_dispatch(&self, pc: Word, opcode: Opcode) {
        if self.trace {
            info!(pc, instruction = %self.render(pc, opcode), "dispatch");
        } else if tracing::enabled!(Level::DEBUG) {
            debug!(pc, instruction = %self.render(pc, opcode), "dispatch");
        }
    }

    fn render(&self, pc: Word, opcode: Opcode) -> String {
        let cells = self.dp.memory.cells();
        let start = pc as usize;
        let end = (start + opcode.size()).min(cells.len());
        disassemble(cells.get(start..end).unwrap_or_default())
    }
}
