// src/core/cell.rs

use super::constants::NUM_CELLS;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a storage cell in the parity network.
///
/// The network always has [`NUM_CELLS`] cells: two input cells (0 and 1) and
/// the accumulator (2). Ids outside that range can be constructed, but the
/// validator rejects any network that references them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub u8);

impl CellId {
    /// Position of this cell in the register, if it is in range.
    pub fn index(&self) -> Option<usize> {
        let idx = usize::from(self.0);
        (idx < NUM_CELLS).then_some(idx)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_bounded_by_register_width() {
        assert_eq!(CellId(0).index(), Some(0));
        assert_eq!(CellId(2).index(), Some(2));
        assert_eq!(CellId(3).index(), None);
    }
}
