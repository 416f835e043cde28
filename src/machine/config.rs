//! Timer configuration: the caller's partial options and the resolved config.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tick cadence used when the caller does not pick one.
pub const DEFAULT_UPDATE_FREQ_MS: u64 = 1000;
pub const DEFAULT_AUTO_START: bool = true;
pub const DEFAULT_AUTO_FINALIZE: bool = true;

/// Partial configuration supplied by the caller.
///
/// Every field is optional; unset fields fall back to the defaults when
/// resolved into a [`TimerConfig`].
///
/// ```rust
/// use ticktock::machine::TimerOptions;
///
/// let json = r#"{ "duration_ms": 5000, "auto_start": false }"#;
/// let options = TimerOptions::from_json(json).unwrap();
/// let config = options.resolve();
///
/// assert_eq!(config.duration_ms, Some(5000));
/// assert_eq!(config.update_freq_ms, 1000);
/// assert!(!config.auto_start);
/// assert!(config.auto_finalize);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimerOptions {
    /// Display label, opaque to the machine
    pub title: Option<String>,
    /// Present: countdown mode. Absent: stopwatch mode.
    pub duration_ms: Option<i64>,
    /// Cadence of tick events while running
    pub update_freq_ms: Option<u64>,
    /// Leave `pending` without waiting for START
    pub auto_start: Option<bool>,
    /// Move from `stopped` to the terminal `done` state automatically
    pub auto_finalize: Option<bool>,
}

impl TimerOptions {
    /// Parse options from a JSON object. Unknown keys are rejected.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: TimerOptions) -> Self {
        Self {
            title: other.title.or(self.title),
            duration_ms: other.duration_ms.or(self.duration_ms),
            update_freq_ms: other.update_freq_ms.or(self.update_freq_ms),
            auto_start: other.auto_start.or(self.auto_start),
            auto_finalize: other.auto_finalize.or(self.auto_finalize),
        }
    }

    /// Merge the built-in defaults under these options.
    pub fn resolve(&self) -> TimerConfig {
        TimerConfig {
            title: self.title.clone(),
            duration_ms: self.duration_ms,
            update_freq_ms: self.update_freq_ms.unwrap_or(DEFAULT_UPDATE_FREQ_MS),
            auto_start: self.auto_start.unwrap_or(DEFAULT_AUTO_START),
            auto_finalize: self.auto_finalize.unwrap_or(DEFAULT_AUTO_FINALIZE),
        }
    }
}

/// Resolved configuration, immutable for the lifetime of a machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub title: Option<String>,
    pub duration_ms: Option<i64>,
    pub update_freq_ms: u64,
    pub auto_start: bool,
    pub auto_finalize: bool,
}

impl TimerConfig {
    /// True when a duration is configured, even a non-positive one.
    pub fn is_countdown(&self) -> bool {
        self.duration_ms.is_some()
    }

    pub fn update_period(&self) -> Duration {
        Duration::from_millis(self.update_freq_ms)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerOptions::default().resolve()
    }
}

impl From<TimerOptions> for TimerConfig {
    fn from(options: TimerOptions) -> Self {
        options.resolve()
    }
}
