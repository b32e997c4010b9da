//! Domain error types

use thiserror::Error;

/// Configuration errors detected before any round runs.
///
/// All of these are fatal: the conclave refuses to start rather than
/// producing rounds under a configuration it cannot honor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Roster is empty")]
    EmptyRoster,

    #[error("Duplicate cardinal id: {0}")]
    DuplicateId(u32),

    #[error("Duplicate cardinal name (after normalization): {0}")]
    DuplicateName(String),

    #[error("Invalid majority threshold {numerator}/{denominator}")]
    InvalidThreshold { numerator: u32, denominator: u32 },

    #[error("Round cap must be at least 1")]
    ZeroRoundCap,

    #[error(
        "Elimination floor of {min_votes} votes can never be met with a field of {field_size}"
    )]
    ImpossibleElimination { min_votes: usize, field_size: usize },

    #[error("Frontrunner cutoff {0} must be in [0.0, 1.0)")]
    InvalidFrontrunnerCutoff(f64),

    #[error("A field of {field_size} has nobody to vote for when self-votes are disallowed")]
    FieldTooSmall { field_size: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_error_display() {
        let error = ConfigError::InvalidThreshold {
            numerator: 3,
            denominator: 0,
        };
        assert_eq!(error.to_string(), "Invalid majority threshold 3/0");
    }

    #[test]
    fn test_empty_roster_display() {
        assert_eq!(ConfigError::EmptyRoster.to_string(), "Roster is empty");
    }
}
