//! The closed vocabulary of events a timer understands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Events accepted by a timer machine.
///
/// `Start`..`Reset` come from callers. `Update` is the periodic tick sent by
/// the interval source; the deadline timer delivers a plain `Stop`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimerEvent {
    Start,
    Pause,
    Resume,
    Stop,
    Lap,
    Reset,
    Update,
}

impl TimerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Pause => "PAUSE",
            Self::Resume => "RESUME",
            Self::Stop => "STOP",
            Self::Lap => "LAP",
            Self::Reset => "RESET",
            Self::Update => "UPDATE",
        }
    }
}

impl fmt::Display for TimerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
