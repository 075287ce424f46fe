//! Fixed shape of the parity network and simulator defaults.

use super::cell::CellId;

/// Number of storage cells: two inputs plus the accumulator.
pub const NUM_CELLS: usize = 3;

/// Number of input bits the network accepts.
pub const INPUT_WIDTH: usize = 2;

/// The cell that ends up holding the parity.
pub const ACCUMULATOR: CellId = CellId(2);

/// The single classical slot the accumulator is read into.
pub const READOUT_SLOT: usize = 0;

/// Trials aggregated per simulation unless configured otherwise.
pub const DEFAULT_TRIALS: u64 = 1024;

/// Base seed for per-trial random streams.
pub const DEFAULT_SEED: u64 = 0x5EED;
