// src/core/state.rs

use super::constants::INPUT_WIDTH;
use super::error::{ParityError, ParityResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitXor;
use std::str::FromStr;

/// A single binary value: an input bit, a `Set` value, or a readout outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bit {
    /// Logical 0.
    #[default]
    #[serde(rename = "0")]
    Zero,
    /// Logical 1.
    #[serde(rename = "1")]
    One,
}

impl Bit {
    /// Both values, in key order.
    pub const ALL: [Bit; 2] = [Bit::Zero, Bit::One];

    /// `true` for [`Bit::One`].
    pub fn is_set(self) -> bool {
        self == Bit::One
    }

    /// The opposite value.
    pub fn flipped(self) -> Self {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }

    /// Character form, `'0'` or `'1'`.
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value { Bit::One } else { Bit::Zero }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit.is_set()
    }
}

impl TryFrom<char> for Bit {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            other => Err(other),
        }
    }
}

/// Parses a single `'0'` or `'1'`.
impl FromStr for Bit {
    type Err = ParityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| ParityError::InvalidInput { input: s.to_string(), reason };
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Bit::try_from(c).map_err(|c| invalid(format!("expected '0' or '1', got {c:?}")))
            }
            _ => Err(invalid(format!("expected 1 character, got {}", s.chars().count()))),
        }
    }
}

impl BitXor for Bit {
    type Output = Bit;

    fn bitxor(self, rhs: Bit) -> Bit {
        Bit::from(self.is_set() ^ rhs.is_set())
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The initial values of the two input cells.
///
/// Parsed from a two-character string such as `"01"`, where the first
/// character is cell 0 and the second is cell 1. Front-ends with one selector
/// per bit can skip the string and use [`InputState::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputState {
    bits: [Bit; INPUT_WIDTH],
}

impl InputState {
    /// Creates an input state from the values of cell 0 and cell 1.
    pub fn new(first: Bit, second: Bit) -> Self {
        Self { bits: [first, second] }
    }

    /// Parses `"00"`, `"01"`, `"10"` or `"11"`.
    ///
    /// # Errors
    /// Returns [`ParityError::InvalidInput`] if `input` is not exactly two
    /// characters or contains anything other than `'0'` and `'1'`.
    pub fn parse(input: &str) -> ParityResult<Self> {
        let invalid = |reason: String| ParityError::InvalidInput {
            input: input.to_string(),
            reason,
        };

        let chars: Vec<char> = input.chars().collect();
        if chars.len() != INPUT_WIDTH {
            return Err(invalid(format!(
                "expected {} characters, got {}",
                INPUT_WIDTH,
                chars.len()
            )));
        }

        let mut bits = [Bit::Zero; INPUT_WIDTH];
        for (pos, c) in chars.into_iter().enumerate() {
            bits[pos] = Bit::try_from(c)
                .map_err(|bad| invalid(format!("character {bad:?} at position {pos} is not '0' or '1'")))?;
        }
        Ok(Self { bits })
    }

    /// The input bits, cell 0 first.
    pub fn bits(&self) -> [Bit; INPUT_WIDTH] {
        self.bits
    }

    /// Exclusive-OR of the two bits, i.e. the value the accumulator must end with.
    pub fn parity(&self) -> Bit {
        self.bits[0] ^ self.bits[1]
    }
}

impl FromStr for InputState {
    type Err = ParityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.bits[0], self.bits[1])
    }
}
