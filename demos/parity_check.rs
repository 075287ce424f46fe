//! Text front-end for the parity check: pick the two input bits, see the
//! network diagram, the readout histogram and the parity.
//!
//! ```text
//! cargo run --example parity_check -- 1 0
//! PARITY_READOUT_ERROR=0.05 RUST_LOG=debug cargo run --example parity_check -- 1 1
//! ```

use anyhow::Context;
use clap::Parser;
use parity_check::{Bit, InputState, ParityCheck, SimulationConfig};
use tracing_subscriber::EnvFilter;

/// Determine the parity of a 2-bit input with a reversible accumulator network.
#[derive(Parser, Debug)]
#[command(name = "parity_check")]
struct Args {
    /// Initial value of cell 0.
    #[arg(default_value = "0")]
    cell0: Bit,

    /// Initial value of cell 1.
    #[arg(default_value = "0")]
    cell1: Bit,

    /// Number of trials (overrides PARITY_TRIALS).
    #[arg(short, long, env = "PARITY_TRIALS")]
    trials: Option<u64>,

    /// JSON configuration file; environment variables are used when absent.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::from_env().context("reading PARITY_* environment")?,
    };
    if let Some(trials) = args.trials {
        config.trials = trials;
    }

    let input = InputState::new(args.cell0, args.cell1);
    let report = ParityCheck::new(&config)?.run_state(input)?;

    println!("=== Parity Check ===");
    println!("Cell c2 is the accumulator: it reads 0 for Even, 1 for Odd.\n");
    println!("{}", report.network);
    println!("{}", report.table);
    println!("{report}");
    Ok(())
}
