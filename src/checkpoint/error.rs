//! Checkpoint error types.

use crate::builder::error::{describe, ConfigViolation};
use crate::core::TimerState;
use thiserror::Error;

/// Errors raised while saving or restoring a timer checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Failed to encode checkpoint: {0}")]
    Encode(String),

    #[error("Failed to decode checkpoint: {0}")]
    Decode(String),

    /// Written by a newer or older release
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The saved config breaks the rules the builder enforces
    #[error("Checkpoint carries an invalid timer configuration: {}", describe(.0))]
    InvalidConfig(Vec<ConfigViolation>),

    /// Stop times outnumber start times, or lag by more than one
    #[error("{starts} start times cannot pair with {stops} stop times")]
    UnpairedSegments { starts: usize, stops: usize },

    /// Only `running` may carry an open segment, and it always does
    #[error("State '{state}' disagrees with the open segment")]
    StateMismatch { state: TimerState },
}
