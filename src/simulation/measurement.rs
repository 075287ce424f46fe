// src/simulation/measurement.rs

//! Readout models applied when a cell is sampled into a classical slot.

use crate::core::{Bit, ParityError, ParityResult};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Turns the exact value of a cell into an observed outcome.
///
/// Implementations must be stateless across calls: every trial gets its own
/// random stream unless the model is deterministic, and trials may run on any
/// thread in any order.
pub trait MeasurementModel: Send + Sync + fmt::Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Samples one outcome for a cell whose exact value is `exact`.
    fn read(&self, exact: Bit, rng: &mut dyn RngCore) -> Bit;

    /// `true` if [`read`](Self::read) never consults `rng`.
    fn is_deterministic(&self) -> bool {
        false
    }
}

/// Noiseless readout: the outcome is always the exact value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IdealReadout;

impl MeasurementModel for IdealReadout {
    fn name(&self) -> &str {
        "ideal"
    }

    fn read(&self, exact: Bit, _rng: &mut dyn RngCore) -> Bit {
        exact
    }

    fn is_deterministic(&self) -> bool {
        true
    }
}

/// Symmetric readout error: reports the wrong value with a fixed probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadoutError {
    probability: f64,
}

impl ReadoutError {
    /// Creates a readout-error model.
    ///
    /// # Errors
    /// Returns [`ParityError::InvalidConfig`] unless `probability` is in `[0, 1]`.
    pub fn new(probability: f64) -> ParityResult<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(ParityError::InvalidConfig(format!(
                "readout error probability must be in [0, 1], got {probability}"
            )));
        }
        Ok(Self { probability })
    }

    /// Misclassification probability.
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl MeasurementModel for ReadoutError {
    fn name(&self) -> &str {
        "readout_error"
    }

    fn read(&self, exact: Bit, rng: &mut dyn RngCore) -> Bit {
        if rng.random_bool(self.probability) {
            exact.flipped()
        } else {
            exact
        }
    }

    fn is_deterministic(&self) -> bool {
        self.probability == 0.0 || self.probability == 1.0
    }
}

/// Serializable choice of measurement model, as it appears in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeasurementSpec {
    /// [`IdealReadout`].
    #[default]
    Ideal,
    /// [`ReadoutError`] with the given flip probability.
    ReadoutError {
        /// Misclassification probability (0.0 to 1.0).
        probability: f64,
    },
}

impl MeasurementSpec {
    /// Instantiates the selected model.
    pub fn into_model(self) -> ParityResult<Box<dyn MeasurementModel>> {
        Ok(match self {
            MeasurementSpec::Ideal => Box::new(IdealReadout),
            MeasurementSpec::ReadoutError { probability } => Box::new(ReadoutError::new(probability)?),
        })
    }
}

impl fmt::Display for MeasurementSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementSpec::Ideal => write!(f, "ideal"),
            MeasurementSpec::ReadoutError { probability } => write!(f, "readout_error(p={probability:.4})"),
        }
    }
}
