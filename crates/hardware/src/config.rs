//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to build a machine.
//! It provides:
//! 1. **Defaults:** The canonical machine (128 words, stack 100..127, four
//!    general-purpose registers, entry at address 0).
//! 2. **Structures:** General, memory, stack and register file settings.
//! 3. **Validation:** Rejection of layouts the datapath cannot realise.
//!
//! Configuration is read from JSON by drivers or built with `Config::default()`.

use serde::Deserialize;

use crate::common::{SimError, SimResult, Word};

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::Word;

    /// Number of words in main memory.
    pub const MEMORY_SIZE: usize = 128;

    /// Address the program counter starts from.
    pub const ENTRY_ADDRESS: Word = 0;

    /// Value of the stack Top pointer while the stack is empty.
    ///
    /// The cell at this address is never written by a push.
    pub const STACK_TOP: Word = 127;

    /// Lowest address a push may write.
    pub const STACK_BOTTOM: Word = 100;

    /// Number of general-purpose registers (REG0..REG3).
    pub const GENERAL_PURPOSE_REGISTERS: usize = 4;
}

/// Root configuration of a machine.
///
/// # Examples
///
/// ```
/// use archc_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_instructions": true, "max_instructions": 5000 },
///     "memory": { "size": 256 },
///     "stack": { "top": 255, "bottom": 200 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.memory.size, 256);
/// assert_eq!(config.stack.bottom, 200);
/// assert_eq!(config.registers.general_purpose, 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Main memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Stack region configuration
    #[serde(default)]
    pub stack: StackConfig,
    /// Register file configuration
    #[serde(default)]
    pub registers: RegisterConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON document.
    ///
    /// Missing sections and fields fall back to their defaults.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configured layout fits the machine.
    ///
    /// The stack must lie inside memory with `0 <= bottom <= top < size`,
    /// memory and the register file must be non-empty, and the entry address
    /// must be a valid memory address.
    pub fn validate(&self) -> SimResult<()> {
        let size = self.memory.size;
        if size == 0 {
            return Err(SimError::InvalidConfig("memory size must be positive".into()));
        }
        if Word::try_from(size).is_err() {
            return Err(SimError::InvalidConfig(format!(
                "memory size {size} is not addressable by a word"
            )));
        }
        if self.registers.general_purpose == 0 {
            return Err(SimError::InvalidConfig(
                "register file needs at least the accumulator".into(),
            ));
        }
        let StackConfig { top, bottom } = self.stack;
        if bottom < 0 || bottom > top || top as usize >= size {
            return Err(SimError::InvalidConfig(format!(
                "stack region [{bottom}, {top}] does not fit memory of {size} words"
            )));
        }
        let entry = self.general.entry_address;
        if entry < 0 || entry as usize >= size {
            return Err(SimError::InvalidConfig(format!(
                "entry address {entry} is outside memory of {size} words"
            )));
        }
        Ok(())
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Log every dispatched instruction at info level instead of debug.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Initial PC value after loading or reset.
    #[serde(default = "GeneralConfig::default_entry_address")]
    pub entry_address: Word,

    /// Stop `run` after this many instructions. `None` runs until halt.
    #[serde(default)]
    pub max_instructions: Option<u64>,
}

impl GeneralConfig {
    /// Returns the default entry address.
    const fn default_entry_address() -> Word {
        defaults::ENTRY_ADDRESS
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            entry_address: defaults::ENTRY_ADDRESS,
            max_instructions: None,
        }
    }
}

/// Main memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Number of addressable words.
    #[serde(default = "MemoryConfig::default_size")]
    pub size: usize,
}

impl MemoryConfig {
    /// Returns the default memory size in words.
    const fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: defaults::MEMORY_SIZE,
        }
    }
}

/// Stack region configuration.
///
/// The stack grows downward from `top` (exclusive) to `bottom` (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StackConfig {
    /// Empty-stack value of the Top pointer.
    #[serde(default = "StackConfig::default_top")]
    pub top: Word,

    /// Value of the Bottom pointer.
    #[serde(default = "StackConfig::default_bottom")]
    pub bottom: Word,
}

impl StackConfig {
    /// Returns the default empty-stack Top value.
    const fn default_top() -> Word {
        defaults::STACK_TOP
    }

    /// Returns the default Bottom value.
    const fn default_bottom() -> Word {
        defaults::STACK_BOTTOM
    }

    /// Number of words the stack can hold.
    pub const fn capacity(&self) -> usize {
        (self.top - self.bottom) as usize
    }
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            top: defaults::STACK_TOP,
            bottom: defaults::STACK_BOTTOM,
        }
    }
}

/// Register file configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterConfig {
    /// Number of demux-addressable general-purpose registers.
    #[serde(default = "RegisterConfig::default_general_purpose")]
    pub general_purpose: usize,
}

impl RegisterConfig {
    /// Returns the default number of general-purpose registers.
    const fn default_general_purpose() -> usize {
        defaults::GENERAL_PURPOSE_REGISTERS
    }
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            general_purpose: defaults::GENERAL_PURPOSE_REGISTERS,
        }
    }
}
