//! Microprogrammed machine simulator CLI.
//!
//! This binary drives the core library. It performs:
//! 1. **Run:** Load a machine image, execute it to halt (or to an instruction
//!    budget) and print the registers and statistics, or a JSON snapshot.
//! 2. **Disassemble:** Print a linear listing of an image.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use archc_core::config::Config;
use archc_core::isa::disasm::disassemble_program;
use archc_core::sim::{Image, RunOutcome, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "archc",
    author,
    version,
    about = "Microprogrammed accumulator machine simulator",
    long_about = "Execute assembled machine images on a register-transfer level model of a \
                  single-accumulator computer.\n\nExamples:\n  archc run program.img\n  \
                  archc run program.img --trace --max-steps 1000\n  archc disasm program.img"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a machine image until it halts.
    Run {
        /// Machine image: one word per line, or `address value` pairs.
        image: PathBuf,

        /// JSON configuration file (memory size, stack layout, registers).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Log every dispatched instruction.
        #[arg(long)]
        trace: bool,

        /// Stop after this many instructions.
        #[arg(long)]
        max_steps: Option<u64>,

        /// Print the final machine state as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Print a linear disassembly of a machine image.
    Disasm {
        /// Machine image to list.
        image: PathBuf,

        /// JSON configuration file; its memory size bounds the listing.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            image,
            config,
            trace,
            max_steps,
            json,
        } => {
            let config = read_config(config.as_deref());
            let trace = trace_enabled(trace, config.as_ref().ok());
            init_logging(trace);
            cmd_run(&image, exit_on_error(config), trace, max_steps, json);
        }
        Commands::Disasm { image, config } => {
            let config = read_config(config.as_deref());
            init_logging(false);
            cmd_disasm(&image, &exit_on_error(config));
        }
    }
}

/// Dispatch tracing is on when either `--trace` or the config asks for it.
fn trace_enabled(flag: bool, config: Option<&Config>) -> bool {
    flag || config.is_some_and(|c| c.general.trace_instructions)
}

/// Installs the fmt subscriber; `RUST_LOG` overrides the default level.
fn init_logging(trace: bool) {
    let default = if trace { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads the configuration file if one was given, otherwise the defaults.
///
/// Runs before logging is installed, so failures are returned as messages.
fn read_config(path: Option<&Path>) -> Result<Config, String> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(path)
        .map_err(|e| format!("could not read config {}: {e}", path.display()))?;
    Config::from_json(&text).map_err(|e| format!("{}: {e}", path.display()))
}

fn exit_on_error(config: Result<Config, String>) -> Config {
    config.unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    })
}

fn load_image(path: &Path) -> Image {
    Image::from_file(path).unwrap_or_else(|e| {
        error!("{}: {e}", path.display());
        process::exit(1);
    })
}

/// Loads and runs an image, then reports the final state.
///
/// Exits with code 1 on any fatal machine error, after printing the state.
fn cmd_run(image: &Path, mut config: Config, trace: bool, max_steps: Option<u64>, json: bool) {
    config.general.trace_instructions = trace;
    if max_steps.is_some() {
        config.general.max_instructions = max_steps;
    }

    let program = load_image(image);
    let mut sim = Simulator::new(&config).unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });
    if let Err(e) = sim.load_image(&program) {
        error!("{}: {e}", image.display());
        process::exit(1);
    }

    let outcome = sim.run();
    report(&sim, json);
    match outcome {
        Ok(RunOutcome::Halted { .. }) => {}
        Ok(RunOutcome::BudgetExhausted { retired }) => {
            eprintln!("[!] stopped after {retired} instructions without halting");
        }
        Err(e) => {
            eprintln!("\n[!] FATAL: {e}");
            process::exit(1);
        }
    }
}

fn report(sim: &Simulator, json: bool) {
    let snapshot = sim.snapshot();
    if json {
        match snapshot.to_json() {
            Ok(text) => println!("{text}"),
            Err(e) => {
                error!("could not encode snapshot: {e}");
                process::exit(1);
            }
        }
        return;
    }

    println!("PC {:>6}   IR {:>6}   state {:?}", snapshot.pc, snapshot.ir, snapshot.state);
    for (id, value) in snapshot.registers.iter().enumerate() {
        println!("REG{id:<3} {value:>8}");
    }
    println!(
        "FLAGS  zero={} negative={}",
        u8::from(snapshot.flags.zero),
        u8::from(snapshot.flags.negative)
    );
    println!(
        "STACK  top={} bottom={} depth={}",
        snapshot.stack.top, snapshot.stack.bottom, snapshot.stack.depth
    );
    sim.stats().print();
}

fn cmd_disasm(image: &Path, config: &Config) {
    let cells = load_image(image)
        .to_cells(config.memory.size)
        .unwrap_or_else(|e| {
            error!("{}: {e}", image.display());
            process::exit(1);
        });
    for line in disassemble_program(&cells, 0, cells.len()) {
        let words = line
            .words
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        println!("{:>5}:  {words:<16} {}", line.address, line.text);
    }
}
