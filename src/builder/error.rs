//! Errors raised while building a timer.

use thiserror::Error;

/// A single rule a configuration broke.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("update_freq_ms must be greater than zero")]
    ZeroUpdateFrequency,

    #[error("update_freq_ms ({found}) exceeds the maximum of {max}")]
    UpdateFrequencyTooLarge { max: u64, found: u64 },

    #[error("duration_ms ({found}) is outside the supported range of +/-{max}")]
    DurationOutOfRange { max: i64, found: i64 },
}

/// Errors that can occur when building a timer machine.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Every violated rule, not just the first
    #[error("Invalid timer configuration: {}", describe(.0))]
    InvalidConfig(Vec<ConfigViolation>),

    #[error("Malformed timer options: {0}")]
    MalformedOptions(#[from] serde_json::Error),
}

pub(crate) fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_lists_every_violation() {
        let error = BuildError::InvalidConfig(vec![
            ConfigViolation::ZeroUpdateFrequency,
            ConfigViolation::DurationOutOfRange { max: 10, found: 11 },
        ]);

        let message = error.to_string();
        assert!(message.contains("update_freq_ms must be greater than zero"));
        assert!(message.contains("duration_ms (11)"));
    }
}
