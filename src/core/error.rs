//! Error handling logic

use thiserror::Error;

/// Failures surfaced by the network builder, the trial simulator and the
/// classifier. Every stage fails fast; no partial results are returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParityError {
    /// The input state is not exactly two characters over `{'0', '1'}`.
    #[error("invalid input state {input:?}: {reason}")]
    InvalidInput {
        /// The rejected input, verbatim.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A network violates the fixed parity-network shape.
    #[error("malformed network: {0}")]
    MalformedNetwork(String),

    /// The number of trials must be at least 1.
    #[error("trial count must be at least 1, got {0}")]
    InvalidTrialCount(i64),

    /// The classifier was handed a frequency table without any entries.
    #[error("frequency table is empty, nothing to classify")]
    EmptyResult,

    /// A deserialized frequency table breaks the table invariants.
    #[error("invalid frequency table: {0}")]
    InvalidTable(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration document could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type used throughout the crate.
pub type ParityResult<T> = Result<T, ParityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = ParityError::InvalidInput {
            input: "0".to_string(),
            reason: "expected 2 characters, got 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid input state \"0\": expected 2 characters, got 1"
        );
        assert_eq!(
            ParityError::InvalidTrialCount(-3).to_string(),
            "trial count must be at least 1, got -3"
        );
    }

    #[test]
    fn json_errors_convert() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: ParityError = parse.unwrap_err().into();
        assert!(matches!(err, ParityError::Json(_)));
    }
}
