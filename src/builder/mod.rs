//! Builder API for timer construction.
//!
//! Collects the caller's options, resolves them over the defaults, checks
//! them against the configuration rules and creates a settled machine.

pub mod error;
pub mod rules;

pub use error::{BuildError, ConfigViolation};
pub use rules::{validate, MAX_DURATION_MS, MAX_UPDATE_FREQ_MS};

use crate::core::{Clock, SystemClock};
use crate::machine::{TimerConfig, TimerMachine, TimerOptions};
use stillwater::validation::Validation;

/// Fluent builder for [`TimerMachine`].
///
/// # Example
///
/// ```
/// use ticktock::builder::TimerBuilder;
/// use ticktock::core::{ManualClock, TimerState};
///
/// let timer = TimerBuilder::new()
///     .title("Pomodoro")
///     .duration_ms(25 * 60 * 1000)
///     .auto_start(false)
///     .clock(ManualClock::new(0))
///     .build()
///     .unwrap();
///
/// assert_eq!(timer.state(), TimerState::Pending);
/// assert_eq!(timer.config().update_freq_ms, 1000);
/// ```
#[derive(Debug, Clone)]
pub struct TimerBuilder<C: Clock = SystemClock> {
    options: TimerOptions,
    clock: C,
}

impl TimerBuilder<SystemClock> {
    /// Create a builder using the system clock.
    pub fn new() -> Self {
        Self {
            options: TimerOptions::default(),
            clock: SystemClock,
        }
    }
}

impl Default for TimerBuilder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TimerBuilder<C> {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.options.title = Some(title.into());
        self
    }

    /// Switch to countdown mode.
    pub fn duration_ms(mut self, duration_ms: i64) -> Self {
        self.options.duration_ms = Some(duration_ms);
        self
    }

    pub fn update_freq_ms(mut self, update_freq_ms: u64) -> Self {
        self.options.update_freq_ms = Some(update_freq_ms);
        self
    }

    pub fn auto_start(mut self, auto_start: bool) -> Self {
        self.options.auto_start = Some(auto_start);
        self
    }

    pub fn auto_finalize(mut self, auto_finalize: bool) -> Self {
        self.options.auto_finalize = Some(auto_finalize);
        self
    }

    /// Overlay a whole set of options; fields set in `options` win.
    pub fn options(mut self, options: TimerOptions) -> Self {
        self.options = self.options.merge(options);
        self
    }

    /// Overlay options parsed from JSON.
    pub fn options_json(self, json: &str) -> Result<Self, BuildError> {
        let options = TimerOptions::from_json(json)?;
        Ok(self.options(options))
    }

    /// Use a different clock.
    pub fn clock<C2: Clock>(self, clock: C2) -> TimerBuilder<C2> {
        TimerBuilder {
            options: self.options,
            clock,
        }
    }

    /// Resolve and validate the configuration without building.
    pub fn config(&self) -> Result<TimerConfig, BuildError> {
        let config = self.options.resolve();
        match validate(&config) {
            Validation::Success(_) => Ok(config),
            Validation::Failure(violations) => Err(BuildError::InvalidConfig(
                violations.iter().cloned().collect(),
            )),
        }
    }

    /// Build the machine. It is settled on return, so an auto-start timer
    /// is already running.
    pub fn build(self) -> Result<TimerMachine<C>, BuildError> {
        let config = self.config()?;
        Ok(TimerMachine::new(config, self.clock))
    }
}
