// src/validation/mod.rs

//! Structural checks for networks the simulator did not build itself.
//!
//! A valid parity network is, in order:
//! 1. up to two `Set` operations on distinct input cells (0 or 1),
//! 2. `ConditionalInvert(0 -> 2)` followed by `ConditionalInvert(1 -> 2)`,
//! 3. exactly one `Readout(2 -> slot 0)`, as the last operation.

use crate::circuits::Network;
use crate::core::{ACCUMULATOR, CellId, INPUT_WIDTH, ParityError, ParityResult, READOUT_SLOT};
use crate::operations::Operation;

fn malformed(message: impl Into<String>) -> ParityError {
    ParityError::MalformedNetwork(message.into())
}

/// Checks `network` against the fixed parity-network shape.
///
/// # Errors
/// Returns [`ParityError::MalformedNetwork`] describing the first violation found.
pub fn validate_network(network: &Network) -> ParityResult<()> {
    let ops = network.operations();

    for (pos, op) in ops.iter().enumerate() {
        if let Some(cell) = op.involved_cells().into_iter().find(|c| c.index().is_none()) {
            return Err(malformed(format!("operation {pos} ({op}) references unknown cell {cell}")));
        }
    }

    // Leading Set operations.
    let num_sets = ops
        .iter()
        .take_while(|op| matches!(op, Operation::Set { .. }))
        .count();
    if num_sets > INPUT_WIDTH {
        return Err(malformed(format!(
            "expected at most {INPUT_WIDTH} set operations, found {num_sets}"
        )));
    }
    let mut seen = [false; INPUT_WIDTH];
    for op in &ops[..num_sets] {
        if let Operation::Set { cell, .. } = op {
            let idx = usize::from(cell.0);
            if idx >= INPUT_WIDTH {
                return Err(malformed(format!("{cell} is not an input cell and cannot be set")));
            }
            if seen[idx] {
                return Err(malformed(format!("{cell} is set more than once")));
            }
            seen[idx] = true;
        }
    }

    // Fixed tail.
    let expected_tail = [
        Operation::ConditionalInvert { control: CellId(0), target: ACCUMULATOR },
        Operation::ConditionalInvert { control: CellId(1), target: ACCUMULATOR },
        Operation::Readout { source: ACCUMULATOR, slot: READOUT_SLOT },
    ];
    let tail = &ops[num_sets..];

    let readouts = tail.iter().filter(|op| op.is_readout()).count();
    if readouts != 1 {
        return Err(malformed(format!("expected exactly one readout, found {readouts}")));
    }

    for (offset, (actual, expected)) in tail.iter().zip(expected_tail.iter()).enumerate() {
        if actual != expected {
            return Err(malformed(format!(
                "operation {} is `{actual}`, expected `{expected}`",
                num_sets + offset
            )));
        }
    }
    if tail.len() != expected_tail.len() {
        return Err(malformed(format!(
            "expected {} operations after initialization, found {}",
            expected_tail.len(),
            tail.len()
        )));
    }

    Ok(())
}
