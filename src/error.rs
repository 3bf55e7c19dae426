//! Error types
//!
//! The simulation itself never fails: invalid commands are no-ops and bad
//! pointer input is dropped. The only fallible surface is loading tuning data.

use std::fmt;

/// Failure to load or validate a [`crate::Tuning`].
#[derive(Debug)]
pub enum TuningError {
    /// The JSON document could not be parsed into a tuning table.
    Parse(serde_json::Error),

    /// A value parsed but is outside the range the simulation can run with.
    Invalid {
        /// Field name, as it appears in the JSON document.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(err) => write!(f, "failed to parse tuning JSON: {}", err),
            TuningError::Invalid {
                name,
                value,
                expected,
            } => write!(
                f,
                "tuning value '{}' = {} is invalid (expected {})",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(err) => Some(err),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_display_names_field() {
        let err = TuningError::Invalid {
            name: "spawn_interval_ms",
            value: -1.0,
            expected: "> 0",
        };
        let msg = err.to_string();
        assert!(msg.contains("spawn_interval_ms"));
        assert!(msg.contains("> 0"));
    }

    #[test]
    fn test_parse_error_has_source() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = TuningError::from(json_err);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("failed to parse tuning JSON"));
    }
}
