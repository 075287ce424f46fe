// src/lib.rs

//! `parity_check` - a reversible-logic parity network and its trial simulator
//!
//! Two input cells are loaded with the bits of a 2-bit input. Each one
//! conditionally inverts an accumulator cell that starts at 0, so the
//! accumulator ends up holding their exclusive-OR. Reading the accumulator out
//! over many trials yields a frequency table, and the dominant readout value
//! classifies the input as `Even` (`0`) or `Odd` (`1`).
//!
//! The three stages are pure functions:
//! [`build`] → [`simulate`] → [`classify`]. [`ParityCheck`] chains them using a
//! [`SimulationConfig`].

pub mod core;
pub mod operations;
pub mod circuits;
pub mod validation;
pub mod simulation;
pub mod classification;
pub mod config;
pub mod pipeline;

// Re-export the most common types for easier top-level use
pub use crate::core::{Bit, CellId, InputState, ParityError, ParityResult};
pub use operations::Operation;
pub use circuits::{Network, NetworkBuilder, build, build_parity_network};
pub use simulation::{FrequencyTable, MeasurementModel, Simulator, simulate};
pub use classification::{ParityLabel, classify};
pub use config::SimulationConfig;
pub use pipeline::{ParityCheck, ParityReport};
pub use validation::validate_network;

// Example 1: Even and odd inputs
// Runs every 2-bit input through build, simulate and classify.
/// ```
/// use parity_check::{build, classify, simulate, Bit, ParityLabel};
///
/// for (input, label) in [
///     ("00", ParityLabel::Even),
///     ("11", ParityLabel::Even),
///     ("01", ParityLabel::Odd),
///     ("10", ParityLabel::Odd),
/// ] {
///     let network = build(input).unwrap();
///     let table = simulate(&network, 1024).unwrap();
///     // Ideal readout: every trial agrees.
///     assert_eq!(table.len(), 1);
///     assert_eq!(table.total(), 1024);
///
///     let (parity, dominant) = classify(&table).unwrap();
///     assert_eq!(parity, label);
///     assert_eq!(table.count(dominant), 1024);
/// }
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: Noisy readout
// A readout-error model splits the table, but the majority still carries the parity.
/// ```
/// use parity_check::simulation::ReadoutError;
/// use parity_check::{build, classify, Bit, ParityLabel, Simulator};
///
/// let simulator = Simulator::new()
///     .with_model(Box::new(ReadoutError::new(0.1).unwrap()))
///     .with_seed(7);
/// let table = simulator.run(&build("01").unwrap(), 4096).unwrap();
///
/// assert_eq!(table.total(), 4096);
/// assert!(table.count(Bit::Zero) > 0);
/// assert_eq!(classify(&table).unwrap().0, ParityLabel::Odd);
/// ```
#[doc(hidden)]
const _: () = ();
