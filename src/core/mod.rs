// src/core/mod.rs

//! Core data structures and types

pub mod cell;
pub mod constants;
pub mod error;
pub mod state;

// Re-export public types for convenient access via `parity_check::core::TypeName`
pub use cell::CellId;
pub use constants::{ACCUMULATOR, DEFAULT_SEED, DEFAULT_TRIALS, INPUT_WIDTH, NUM_CELLS, READOUT_SLOT};
pub use error::{ParityError, ParityResult};
pub use state::{Bit, InputState};
