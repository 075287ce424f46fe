// src/simulation/mod.rs

//! Repeated-trial simulation of parity networks.
//!
//! [`Simulator`] validates a [`Network`], evaluates it exactly once per trial
//! on a fresh register, passes the accumulator's value through a
//! [`MeasurementModel`] and tallies the outcomes into a [`FrequencyTable`].

mod results;
pub(crate) mod engine;
pub mod measurement;

pub use measurement::{IdealReadout, MeasurementModel, MeasurementSpec, ReadoutError};
pub use results::FrequencyTable;

use crate::circuits::Network;
use crate::config::SimulationConfig;
use crate::core::{Bit, DEFAULT_SEED, ParityError, ParityResult};
use crate::validation::validate_network;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::debug;

/// Runs a network for a number of independent trials.
///
/// Trials share no state. Trial `i` draws from its own random stream derived
/// from the simulator seed and `i`, so sequential and parallel runs of the same
/// network produce identical tables. Models that report
/// [`is_deterministic`](MeasurementModel::is_deterministic) skip the per-trial
/// seeding.
#[derive(Debug)]
pub struct Simulator {
    model: Box<dyn MeasurementModel>,
    seed: u64,
    parallel: bool,
}

impl Default for Simulator {
    fn default() -> Self {
        Self {
            model: Box::new(IdealReadout),
            seed: DEFAULT_SEED,
            parallel: true,
        }
    }
}

impl Simulator {
    /// Creates a simulator with ideal readout and the default seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator from the measurement, seed and parallelism settings
    /// of `config`. The trial count is passed to [`run`](Self::run) separately.
    pub fn from_config(config: &SimulationConfig) -> ParityResult<Self> {
        Ok(Self {
            model: config.measurement.into_model()?,
            seed: config.seed,
            parallel: config.parallel,
        })
    }

    /// Replaces the measurement model.
    #[must_use]
    pub fn with_model(mut self, model: Box<dyn MeasurementModel>) -> Self {
        self.model = model;
        self
    }

    /// Sets the base seed for per-trial random streams.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Chooses between rayon-parallel and sequential trial execution.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The measurement model in use.
    pub fn model(&self) -> &dyn MeasurementModel {
        self.model.as_ref()
    }

    /// Simulates `network` for `trials` independent repetitions.
    ///
    /// # Errors
    /// * [`ParityError::InvalidTrialCount`] if `trials` is 0.
    /// * [`ParityError::MalformedNetwork`] if `network` is not a parity network.
    ///
    /// Both are checked before any trial runs, so no partial table is returned.
    pub fn run(&self, network: &Network, trials: u64) -> ParityResult<FrequencyTable> {
        if trials == 0 {
            return Err(ParityError::InvalidTrialCount(0));
        }
        validate_network(network)?;

        debug!(
            trials,
            model = self.model.name(),
            seed = self.seed,
            parallel = self.parallel,
            "simulating parity network"
        );

        let tally = if self.parallel {
            (0..trials)
                .into_par_iter()
                .map_init(
                    || StdRng::seed_from_u64(self.seed),
                    |shared, trial| self.trial(network, trial, shared),
                )
                .try_fold(Tally::default, |mut acc, outcome| {
                    acc.record(outcome?);
                    Ok::<_, ParityError>(acc)
                })
                .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))?
        } else {
            let mut acc = Tally::default();
            let mut shared = StdRng::seed_from_u64(self.seed);
            for trial in 0..trials {
                acc.record(self.trial(network, trial, &mut shared)?);
            }
            acc
        };

        Ok(tally.into_table())
    }

    /// One repetition: exact evaluation, then readout through the model.
    ///
    /// Deterministic models read with the worker's `shared` stream; the others
    /// get a stream seeded from the trial index.
    fn trial(&self, network: &Network, trial: u64, shared: &mut StdRng) -> ParityResult<Bit> {
        let exact = engine::evaluate(network)?;
        if self.model.is_deterministic() {
            return Ok(self.model.read(exact, shared));
        }
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(trial));
        Ok(self.model.read(exact, &mut rng))
    }
}

/// Per-worker outcome counts, merged by addition.
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    zeros: u64,
    ones: u64,
}

impl Tally {
    fn record(&mut self, outcome: Bit) {
        match outcome {
            Bit::Zero => self.zeros += 1,
            Bit::One => self.ones += 1,
        }
    }

    fn merge(self, other: Tally) -> Tally {
        Tally {
            zeros: self.zeros + other.zeros,
            ones: self.ones + other.ones,
        }
    }

    fn into_table(self) -> FrequencyTable {
        FrequencyTable::from_counts(self.zeros, self.ones)
    }
}

/// Simulates `network` for `trials` repetitions with ideal readout.
///
/// # Examples
/// ```
/// use parity_check::{build, simulate, Bit};
///
/// let table = simulate(&build("01").unwrap(), 1024).unwrap();
/// assert_eq!(table.count(Bit::One), 1024);
/// assert_eq!(table.len(), 1);
/// ```
pub fn simulate(network: &Network, trials: u64) -> ParityResult<FrequencyTable> {
    Simulator::new().run(network, trials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::{NetworkBuilder, build};
    use crate::core::CellId;
    use crate::operations::Operation;
    use rand::RngCore;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Inverts every readout and counts how often it was asked.
    #[derive(Debug, Default)]
    struct CountingInverter {
        reads: AtomicU64,
    }

    impl MeasurementModel for CountingInverter {
        fn name(&self) -> &str {
            "counting_inverter"
        }

        fn read(&self, exact: Bit, _rng: &mut dyn RngCore) -> Bit {
            self.reads.fetch_add(1, Ordering::Relaxed);
            exact.flipped()
        }

        fn is_deterministic(&self) -> bool {
            true
        }
    }

    #[test]
    fn ideal_runs_collapse_to_one_key() -> ParityResult<()> {
        for (input, expected) in [("00", Bit::Zero), ("11", Bit::Zero), ("01", Bit::One), ("10", Bit::One)] {
            let table = simulate(&build(input)?, 1024)?;
            assert_eq!(table.len(), 1, "input {input}");
            assert_eq!(table.count(expected), 1024, "input {input}");
        }
        Ok(())
    }

    #[test]
    fn single_trial() -> ParityResult<()> {
        let table = simulate(&build("10")?, 1)?;
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(Bit::One, 1)]);
        Ok(())
    }

    #[test]
    fn zero_trials_is_rejected() -> ParityResult<()> {
        let network = build("00")?;
        assert!(matches!(simulate(&network, 0), Err(ParityError::InvalidTrialCount(0))));
        Ok(())
    }

    #[test]
    fn malformed_network_is_rejected_before_any_trial() {
        let network = NetworkBuilder::new()
            .add_op(Operation::Readout { source: CellId(2), slot: 0 })
            .build();
        assert!(matches!(simulate(&network, 16), Err(ParityError::MalformedNetwork(_))));
    }

    #[test]
    fn trial_count_is_checked_before_network() {
        let network = NetworkBuilder::new().build();
        assert!(matches!(simulate(&network, 0), Err(ParityError::InvalidTrialCount(0))));
    }

    #[test]
    fn parallel_and_sequential_agree_under_noise() -> ParityResult<()> {
        let network = build("01")?;
        let noisy = || Box::new(ReadoutError::new(0.3).unwrap()) as Box<dyn MeasurementModel>;
        let parallel = Simulator::new().with_model(noisy()).with_seed(99).run(&network, 2000)?;
        let sequential = Simulator::new()
            .with_model(noisy())
            .with_seed(99)
            .with_parallel(false)
            .run(&network, 2000)?;
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.total(), 2000);
        assert_eq!(parallel.len(), 2);
        Ok(())
    }

    #[test]
    fn from_config_uses_measurement_settings() -> ParityResult<()> {
        let config = SimulationConfig {
            measurement: MeasurementSpec::ReadoutError { probability: 1.0 },
            ..SimulationConfig::default()
        };
        let simulator = Simulator::from_config(&config)?;
        assert_eq!(simulator.model().name(), "readout_error");
        let table = simulator.run(&build("00")?, 64)?;
        assert_eq!(table.count(Bit::One), 64);
        Ok(())
    }

    #[test]
    fn deterministic_models_read_once_per_trial() -> ParityResult<()> {
        let network = build("10")?;
        for parallel in [true, false] {
            let model = std::sync::Arc::new(CountingInverter::default());
            let simulator = Simulator::new()
                .with_model(Box::new(SharedModel(model.clone())))
                .with_parallel(parallel);
            let table = simulator.run(&network, 500)?;
            assert_eq!(table, FrequencyTable::from_counts(500, 0), "parallel={parallel}");
            assert_eq!(model.reads.load(Ordering::Relaxed), 500, "parallel={parallel}");
        }
        Ok(())
    }

    #[test]
    fn deterministic_readout_error_matches_across_modes() -> ParityResult<()> {
        let network = build("11")?;
        for p in [0.0, 1.0] {
            let run = |parallel| {
                Simulator::new()
                    .with_model(Box::new(ReadoutError::new(p).unwrap()))
                    .with_seed(5)
                    .with_parallel(parallel)
                    .run(&network, 777)
            };
            let parallel = run(true)?;
            assert_eq!(parallel, run(false)?);
            assert_eq!(parallel.len(), 1);
            let expected = if p == 0.0 { Bit::Zero } else { Bit::One };
            assert_eq!(parallel.count(expected), 777);
        }
        Ok(())
    }

    /// Lets a test keep a handle on a model the simulator owns.
    #[derive(Debug)]
    struct SharedModel(std::sync::Arc<CountingInverter>);

    impl MeasurementModel for SharedModel {
        fn name(&self) -> &str {
            self.0.name()
        }

        fn read(&self, exact: Bit, rng: &mut dyn RngCore) -> Bit {
            self.0.read(exact, rng)
        }

        fn is_deterministic(&self) -> bool {
            self.0.is_deterministic()
        }
    }
}
