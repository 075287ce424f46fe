// src/classification/mod.rs

//! Maps a readout frequency table to a parity label.

use crate::core::{Bit, InputState, ParityError, ParityResult};
use crate::simulation::FrequencyTable;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Parity of a two-bit input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParityLabel {
    /// The input bits are equal; the accumulator reads 0.
    Even,
    /// The input bits differ; the accumulator reads 1.
    Odd,
}

impl ParityLabel {
    /// Label for an accumulator readout value.
    pub fn from_readout(bit: Bit) -> Self {
        match bit {
            Bit::Zero => ParityLabel::Even,
            Bit::One => ParityLabel::Odd,
        }
    }

    /// Label computed straight from the input bits, without simulating.
    pub fn of_input(input: &InputState) -> Self {
        Self::from_readout(input.parity())
    }
}

impl fmt::Display for ParityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParityLabel::Even => write!(f, "Even"),
            ParityLabel::Odd => write!(f, "Odd"),
        }
    }
}

/// Classifies a frequency table by its most frequent readout value.
///
/// Ties go to `'0'`. An ideal simulation never produces one, but a noisy
/// readout model can.
///
/// # Errors
/// Returns [`ParityError::EmptyResult`] if the table records no trials.
///
/// # Examples
/// ```
/// use parity_check::{classify, Bit, FrequencyTable, ParityLabel};
///
/// let (label, dominant) = classify(&FrequencyTable::from_counts(0, 1024)).unwrap();
/// assert_eq!(label, ParityLabel::Odd);
/// assert_eq!(dominant, Bit::One);
/// ```
pub fn classify(table: &FrequencyTable) -> ParityResult<(ParityLabel, Bit)> {
    if table.is_empty() || table.total() == 0 {
        return Err(ParityError::EmptyResult);
    }

    let zeros = table.count(Bit::Zero);
    let ones = table.count(Bit::One);
    let dominant = if ones > zeros { Bit::One } else { Bit::Zero };

    if zeros > 0 && ones > 0 {
        warn!(zeros, ones, dominant = %dominant, "readout split across both values");
    }

    Ok((ParityLabel::from_readout(dominant), dominant))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_key_tables() {
        assert_eq!(
            classify(&FrequencyTable::from_counts(1024, 0)).unwrap(),
            (ParityLabel::Even, Bit::Zero)
        );
        assert_eq!(
            classify(&FrequencyTable::from_counts(0, 1)).unwrap(),
            (ParityLabel::Odd, Bit::One)
        );
    }

    #[test]
    fn majority_wins() {
        assert_eq!(classify(&FrequencyTable::from_counts(10, 990)).unwrap().0, ParityLabel::Odd);
        assert_eq!(classify(&FrequencyTable::from_counts(600, 400)).unwrap().0, ParityLabel::Even);
    }

    #[test]
    fn tie_prefers_zero() {
        assert_eq!(
            classify(&FrequencyTable::from_counts(512, 512)).unwrap(),
            (ParityLabel::Even, Bit::Zero)
        );
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(matches!(classify(&FrequencyTable::new()), Err(ParityError::EmptyResult)));
    }

    #[test]
    fn table_with_only_zero_counts_is_rejected() {
        let table: FrequencyTable = serde_json::from_str(r#"{"0":0,"1":0}"#).unwrap();
        assert!(matches!(classify(&table), Err(ParityError::EmptyResult)));
    }

    #[test]
    fn label_of_input() {
        for (s, expected) in [
            ("00", ParityLabel::Even),
            ("11", ParityLabel::Even),
            ("01", ParityLabel::Odd),
            ("10", ParityLabel::Odd),
        ] {
            assert_eq!(ParityLabel::of_input(&s.parse().unwrap()), expected);
        }
        assert_eq!(ParityLabel::Odd.to_string(), "Odd");
    }
}
