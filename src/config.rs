//! Simulation configuration.
//!
//! Supports loading configuration from:
//! 1. JSON documents or files, e.g. `{ "trials": 1024 }`
//! 2. Environment variables (with `PARITY_` prefix)
//!
//! Fields missing from a document take their default values.

use crate::core::{DEFAULT_SEED, DEFAULT_TRIALS, ParityError, ParityResult};
use crate::simulation::MeasurementSpec;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Settings for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of independent trials to aggregate.
    #[serde(default = "default_trials", deserialize_with = "deserialize_trials")]
    pub trials: u64,

    /// Base seed for per-trial random streams.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Run trials on the rayon thread pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Readout model.
    #[serde(default)]
    pub measurement: MeasurementSpec,
}

fn default_trials() -> u64 {
    DEFAULT_TRIALS
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_parallel() -> bool {
    true
}

/// Accepts any integer so that zero and negative counts surface as
/// `InvalidTrialCount` instead of a type error.
fn deserialize_trials<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    checked_trials(raw).map_err(serde::de::Error::custom)
}

fn checked_trials(raw: i64) -> ParityResult<u64> {
    u64::try_from(raw)
        .ok()
        .filter(|n| *n > 0)
        .ok_or(ParityError::InvalidTrialCount(raw))
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            seed: default_seed(),
            parallel: default_parallel(),
            measurement: MeasurementSpec::default(),
        }
    }
}

impl SimulationConfig {
    /// Parses a JSON document and validates it.
    ///
    /// # Errors
    /// [`ParityError::InvalidTrialCount`] for `trials <= 0`,
    /// [`ParityError::InvalidConfig`] for an out-of-range readout probability,
    /// [`ParityError::Json`] for anything else serde rejects.
    pub fn from_json_str(json: &str) -> ParityResult<Self> {
        // Pre-read `trials` so its error keeps its own variant rather than
        // being folded into a serde message.
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(trials) = value.get("trials").and_then(serde_json::Value::as_i64) {
            checked_trials(trials)?;
        }
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> ParityResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Defaults overridden by `PARITY_TRIALS`, `PARITY_SEED`,
    /// `PARITY_PARALLEL` and `PARITY_READOUT_ERROR`.
    ///
    /// Unparseable values are ignored; range errors are reported.
    pub fn from_env() -> ParityResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ParityResult<Self> {
        let mut config = Self::default();

        if let Some(trials) = lookup("PARITY_TRIALS") {
            if let Ok(val) = trials.trim().parse::<i64>() {
                config.trials = checked_trials(val)?;
            }
        }
        if let Some(seed) = lookup("PARITY_SEED") {
            if let Ok(val) = seed.trim().parse() {
                config.seed = val;
            }
        }
        if let Some(parallel) = lookup("PARITY_PARALLEL") {
            if let Ok(val) = parallel.trim().parse() {
                config.parallel = val;
            }
        }
        if let Some(p) = lookup("PARITY_READOUT_ERROR") {
            if let Ok(probability) = p.trim().parse() {
                config.measurement = MeasurementSpec::ReadoutError { probability };
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> ParityResult<()> {
        if self.trials == 0 {
            return Err(ParityError::InvalidTrialCount(0));
        }
        self.measurement.into_model().map(|_| ())
    }
}
