// src/pipeline/mod.rs

//! Build, simulate and classify in one call.

use crate::circuits::{Network, build_parity_network};
use crate::classification::{ParityLabel, classify};
use crate::config::SimulationConfig;
use crate::core::{Bit, InputState, ParityResult};
use crate::simulation::{FrequencyTable, Simulator};
use std::fmt;
use tracing::info;

/// Everything one parity check produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ParityReport {
    /// The input that was checked.
    pub input: InputState,
    /// The network that was simulated.
    pub network: Network,
    /// Readout counts over all trials.
    pub table: FrequencyTable,
    /// The classification.
    pub label: ParityLabel,
    /// The readout value the classification is based on.
    pub dominant: Bit,
}

impl fmt::Display for ParityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input state |{}> parity: {}", self.input, self.label)?;
        write!(
            f,
            "The accumulator cell was read out as |{}>, which indicates the input has **{}** parity.",
            self.dominant, self.label
        )
    }
}

/// Runs parity checks with a fixed configuration.
#[derive(Debug)]
pub struct ParityCheck {
    simulator: Simulator,
    trials: u64,
}

impl ParityCheck {
    /// Creates a runner from `config`.
    ///
    /// # Errors
    /// Fails if `config` does not validate.
    pub fn new(config: &SimulationConfig) -> ParityResult<Self> {
        config.validate()?;
        Ok(Self {
            simulator: Simulator::from_config(config)?,
            trials: config.trials,
        })
    }

    /// Trials aggregated per check.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Checks a two-character input such as `"10"`.
    pub fn run(&self, input: &str) -> ParityResult<ParityReport> {
        self.run_state(InputState::parse(input)?)
    }

    /// Checks an already-parsed input.
    pub fn run_state(&self, input: InputState) -> ParityResult<ParityReport> {
        let network = build_parity_network(&input);
        let table = self.simulator.run(&network, self.trials)?;
        let (label, dominant) = classify(&table)?;

        info!(
            input = %input,
            label = %label,
            zeros = table.count(Bit::Zero),
            ones = table.count(Bit::One),
            "parity check complete"
        );

        Ok(ParityReport {
            input,
            network,
            table,
            label,
            dominant,
        })
    }
}
