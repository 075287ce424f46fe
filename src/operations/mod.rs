// src/operations/mod.rs

//! Operations a parity network is made of.
//!
//! There are three kinds: deterministic initialization of a cell, a
//! conditional invert (the reversible XOR-accumulation primitive) and a
//! readout of a cell into a classical slot.

use crate::core::{Bit, CellId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single step of a parity network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Initializes `cell` to `value`. Cells not set explicitly start at 0.
    Set {
        /// The cell being initialized.
        cell: CellId,
        /// Its initial value.
        value: Bit,
    },

    /// Flips `target` iff `control` currently holds 1.
    ///
    /// Applying it once per input cell with the accumulator as target leaves
    /// the accumulator at the XOR of the inputs.
    ConditionalInvert {
        /// The cell whose value decides whether the flip happens.
        control: CellId,
        /// The cell that is flipped.
        target: CellId,
    },

    /// Samples `source` into classical slot `slot` through the measurement model.
    Readout {
        /// The cell being read.
        source: CellId,
        /// Index of the classical slot receiving the outcome.
        slot: usize,
    },
}

impl Operation {
    /// Returns every cell the operation mentions.
    pub fn involved_cells(&self) -> Vec<CellId> {
        match self {
            Operation::Set { cell, .. } => vec![*cell],
            Operation::ConditionalInvert { control, target } => vec![*control, *target],
            Operation::Readout { source, .. } => vec![*source],
        }
    }

    /// `true` for [`Operation::Readout`].
    pub fn is_readout(&self) -> bool {
        matches!(self, Operation::Readout { .. })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Set { cell, value } => write!(f, "set {cell} <- {value}"),
            Operation::ConditionalInvert { control, target } => write!(f, "cinv {control} -> {target}"),
            Operation::Readout { source, slot } => write!(f, "read {source} -> m{slot}"),
        }
    }
}
