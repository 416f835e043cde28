//! State trait and the five states of a timer.
//!
//! States are plain values; all methods are pure so they can be inspected
//! without side effects from the machine, the runtime, or a renderer.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: States are copied into history records
/// - `PartialEq`: States are compared by the transition table
/// - `Debug`: States show up in logs
/// - `Serialize` + `Deserialize`: States are persisted in checkpoints
///
/// # Example
///
/// ```rust
/// use ticktock::core::{State, TimerState};
///
/// assert_eq!(TimerState::Running.name(), "running");
/// assert!(TimerState::Done.is_final());
/// assert!(!TimerState::Stopped.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// Where a timer machine currently is.
///
/// `Pending` is initial, `Done` is terminal. `Reset` brings `Running`,
/// `Paused` and `Stopped` back to `Pending`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Pending,
    Running,
    Paused,
    Stopped,
    Done,
}

impl State for TimerState {
    fn name(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
            Self::Done => "done",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
