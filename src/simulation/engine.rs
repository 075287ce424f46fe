// src/simulation/engine.rs
use crate::circuits::Network;
use crate::core::{Bit, CellId, NUM_CELLS, ParityError, ParityResult};
use crate::operations::Operation;

/// Exact classical state of the storage cells during one trial.
///
/// Every trial starts from a fresh register with all cells at 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Register {
    cells: [Bit; NUM_CELLS],
}

impl Register {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn index_of(cell: &CellId) -> ParityResult<usize> {
        cell.index().ok_or_else(|| {
            ParityError::MalformedNetwork(format!("{cell} is outside the {NUM_CELLS}-cell register"))
        })
    }

    pub(crate) fn get(&self, cell: &CellId) -> ParityResult<Bit> {
        Ok(self.cells[Self::index_of(cell)?])
    }

    /// Applies a `Set` or `ConditionalInvert`. Returns the exact value of
    /// the source cell for a `Readout`, which the caller passes through the
    /// measurement model.
    pub(crate) fn apply(&mut self, op: &Operation) -> ParityResult<Option<Bit>> {
        match op {
            Operation::Set { cell, value } => {
                let idx = Self::index_of(cell)?;
                self.cells[idx] = *value;
                Ok(None)
            }
            Operation::ConditionalInvert { control, target } => {
                let c = Self::index_of(control)?;
                let t = Self::index_of(target)?;
                if c == t {
                    return Err(ParityError::MalformedNetwork(format!(
                        "control and target of a conditional invert must differ, both are {control}"
                    )));
                }
                if self.cells[c].is_set() {
                    self.cells[t] = self.cells[t].flipped();
                }
                Ok(None)
            }
            Operation::Readout { source, .. } => self.get(source).map(Some),
        }
    }
}

/// Evaluates `network` on a fresh register and returns the exact value of
/// the cell at its first readout.
pub(crate) fn evaluate(network: &Network) -> ParityResult<Bit> {
    let mut register = Register::new();
    for op in network.operations() {
        if let Some(value) = register.apply(op)? {
            return Ok(value);
        }
    }
    Err(ParityError::MalformedNetwork("network has no readout".to_string()))
}
