// src/simulation/results.rs
use crate::core::{Bit, ParityError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Width of the longest histogram bar, in characters.
const BAR_WIDTH: u128 = 40;

/// Number of trials that produced each readout value.
///
/// Tables contain only keys with a non-zero count, and their counts sum to
/// the number of trials. Serializes as `{"0": n, "1": m}`; deserializing
/// drops zero counts and rejects tables whose total does not fit in a `u64`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Bit, u64>", into = "BTreeMap<Bit, u64>")]
pub struct FrequencyTable {
    counts: BTreeMap<Bit, u64>,
}

impl FrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from per-value counts, leaving out values with a zero count.
    pub fn from_counts(zeros: u64, ones: u64) -> Self {
        let mut table = Self::new();
        table.record_many(Bit::Zero, zeros);
        table.record_many(Bit::One, ones);
        table
    }

    /// Records `n` occurrences of `outcome`.
    pub(crate) fn record_many(&mut self, outcome: Bit, n: u64) {
        if n > 0 {
            *self.counts.entry(outcome).or_insert(0) += n;
        }
    }

    /// Occurrences of `outcome`; zero if it was never observed.
    pub fn count(&self, outcome: Bit) -> u64 {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0, |sum, n| sum.saturating_add(*n))
    }

    /// Observed fraction of `outcome`, or 0.0 for an empty table.
    pub fn probability(&self, outcome: Bit) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.count(outcome) as f64 / total as f64,
        }
    }

    /// Number of distinct outcomes present.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no outcome has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Present outcomes and their counts, `'0'` first.
    pub fn iter(&self) -> impl Iterator<Item = (Bit, u64)> + '_ {
        self.counts.iter().map(|(bit, n)| (*bit, *n))
    }
}

impl FromIterator<Bit> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        let mut table = Self::new();
        for outcome in iter {
            table.record_many(outcome, 1);
        }
        table
    }
}

impl TryFrom<BTreeMap<Bit, u64>> for FrequencyTable {
    type Error = ParityError;

    fn try_from(counts: BTreeMap<Bit, u64>) -> Result<Self, Self::Error> {
        counts
            .values()
            .try_fold(0u64, |sum, n| sum.checked_add(*n))
            .ok_or_else(|| ParityError::InvalidTable("counts overflow the trial total".to_string()))?;
        let counts = counts.into_iter().filter(|(_, n)| *n > 0).collect();
        Ok(Self { counts })
    }
}

impl From<FrequencyTable> for BTreeMap<Bit, u64> {
    fn from(table: FrequencyTable) -> Self {
        table.counts
    }
}

impl fmt::Display for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total();
        writeln!(f, "Readout frequencies ({total} trials):")?;
        let max = self.counts.values().copied().max().unwrap_or(0);
        for bit in Bit::ALL {
            let n = self.count(bit);
            let bar = if max == 0 { 0 } else { u128::from(n) * BAR_WIDTH / u128::from(max) };
            writeln!(
                f,
                "  {bit} | {:<width$} {n} ({:.1}%)",
                "█".repeat(bar as usize),
                self.probability(bit) * 100.0,
                width = BAR_WIDTH as usize
            )?;
        }
        Ok(())
    }
}
