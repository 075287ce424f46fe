// src/circuits/mod.rs

//! Network descriptions and the parity-network builder.
//!
//! A [`Network`] is an ordered list of [`Operation`]s over the three storage
//! cells and one classical readout slot. [`build`] produces the one network
//! shape this crate simulates: the inputs are loaded into cells 0 and 1, each
//! input cell conditionally inverts the accumulator, and the accumulator is
//! read out.

use crate::core::{ACCUMULATOR, Bit, CellId, InputState, NUM_CELLS, ParityResult, READOUT_SLOT};
use crate::operations::Operation;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// An ordered sequence of operations applied to the storage cells.
///
/// Networks are immutable once built. The simulator validates every network
/// it is given, so hand-assembled networks that break the parity shape are
/// rejected there, not here.
#[derive(Clone, PartialEq, Eq)]
pub struct Network {
    /// Every cell mentioned by at least one operation.
    cells: BTreeSet<CellId>,
    /// The operations, in execution order.
    operations: Vec<Operation>,
}

impl Network {
    /// Creates a new, empty network.
    pub fn new() -> Self {
        Self {
            cells: BTreeSet::new(),
            operations: Vec::new(),
        }
    }

    fn push(&mut self, op: Operation) {
        self.cells.extend(op.involved_cells());
        self.operations.push(op);
    }

    /// Cells referenced by the operations, in ascending order.
    pub fn cells(&self) -> &BTreeSet<CellId> {
        &self.cells
    }

    /// The operations in execution order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the total number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the network contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Builders
//-------------------------------------------------------------------------

/// Assembles a [`Network`] by method chaining.
///
/// The builder performs no validation.
pub struct NetworkBuilder {
    network: Network,
}

impl NetworkBuilder {
    /// Creates a new, empty builder.
    pub fn new() -> Self {
        Self { network: Network::new() }
    }

    /// Appends a single operation.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.network.push(op);
        self
    }

    /// Appends operations from an iterator, in order.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.network.push(op);
        }
        self
    }

    /// Finalizes the construction process and returns the built `Network`.
    pub fn build(self) -> Network {
        self.network
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the parity network for a two-character input such as `"01"`.
///
/// # Errors
/// Returns [`ParityError::InvalidInput`](crate::core::ParityError::InvalidInput)
/// if `input` is not exactly two characters over `{'0', '1'}`. No network is
/// produced in that case.
///
/// # Examples
/// ```
/// use parity_check::circuits::build;
///
/// let network = build("11").unwrap();
/// assert_eq!(network.len(), 5);
/// assert!(build("0").is_err());
/// ```
pub fn build(input: &str) -> ParityResult<Network> {
    let state = InputState::parse(input)?;
    Ok(build_parity_network(&state))
}

/// Builds the parity network for an already-parsed input state.
///
/// Emits `Set(0, 1)` and `Set(1, 1)` only for input bits that are 1, then
/// `ConditionalInvert(0 -> 2)`, `ConditionalInvert(1 -> 2)` and
/// `Readout(2 -> slot 0)`. Before the readout the accumulator holds
/// `input[0] XOR input[1]`.
pub fn build_parity_network(input: &InputState) -> Network {
    let mut builder = NetworkBuilder::new();
    for (cell, bit) in input.bits().into_iter().enumerate() {
        if bit.is_set() {
            builder = builder.add_op(Operation::Set {
                cell: CellId(cell as u8),
                value: Bit::One,
            });
        }
    }

    let network = builder
        .add_op(Operation::ConditionalInvert { control: CellId(0), target: ACCUMULATOR })
        .add_op(Operation::ConditionalInvert { control: CellId(1), target: ACCUMULATOR })
        .add_op(Operation::Readout { source: ACCUMULATOR, slot: READOUT_SLOT })
        .build();

    debug!(input = %input, operations = network.len(), "built parity network");
    network
}

//-------------------------------------------------------------------------
// Diagram
//-------------------------------------------------------------------------

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const GATE_WIDTH: usize = 7;
        const WIRE: &str = "───────";
        const CLASSICAL_WIRE: &str = "═══════";

        let num_ops = self.operations.len();
        writeln!(f, "Network[{} operations on {} cells]", num_ops, NUM_CELLS)?;
        if num_ops == 0 {
            return Ok(());
        }

        // Rows 0..NUM_CELLS are the cells, the last row is the classical slot.
        let slot_row = NUM_CELLS;
        let mut grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; NUM_CELLS];
        grid.push(vec![CLASSICAL_WIRE.to_string(); num_ops]);
        let mut connectors: Vec<Vec<char>> = vec![vec![' '; num_ops]; NUM_CELLS];

        fn gate(symbol: &str, fill: char) -> String {
            let len = symbol.chars().count();
            let pad = GATE_WIDTH.saturating_sub(len);
            let pre = pad / 2;
            let post = pad - pre;
            format!(
                "{}{}{}",
                fill.to_string().repeat(pre),
                symbol,
                fill.to_string().repeat(post)
            )
        }

        for (t, op) in self.operations.iter().enumerate() {
            match op {
                Operation::Set { cell, value } => {
                    if let Some(r) = cell.index() {
                        grid[r][t] = gate(if value.is_set() { "X" } else { "0" }, '─');
                    }
                }
                Operation::ConditionalInvert { control, target } => {
                    if let (Some(rc), Some(rt)) = (control.index(), target.index()) {
                        grid[rc][t] = gate("@", '─');
                        grid[rt][t] = gate("X", '─');
                        for row in connectors.iter_mut().take(rc.max(rt)).skip(rc.min(rt)) {
                            row[t] = '│';
                        }
                    }
                }
                Operation::Readout { source, slot } => {
                    if let Some(r) = source.index() {
                        grid[r][t] = gate("M", '─');
                        grid[slot_row][t] = gate(&format!("╩{slot}"), '═');
                        for row in connectors.iter_mut().skip(r) {
                            row[t] = '║';
                        }
                    }
                }
            }
        }

        let labels: Vec<String> = (0..NUM_CELLS)
            .map(|i| CellId(i as u8).to_string())
            .chain(std::iter::once("m".to_string()))
            .collect();
        let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0) + 2;

        for (r, row) in grid.iter().enumerate() {
            writeln!(f, "{:<width$}{}", format!("{}: ", labels[r]), row.join(""), width = label_width)?;
            if r < NUM_CELLS {
                write!(f, "{}", " ".repeat(label_width))?;
                for c in &connectors[r] {
                    let pre = (GATE_WIDTH - 1) / 2;
                    let post = GATE_WIDTH - 1 - pre;
                    write!(f, "{}{}{}", " ".repeat(pre), c, " ".repeat(post))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.operations.iter().map(|op| op.to_string())).finish()
    }
}
