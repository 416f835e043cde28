//! Checkpoint and resume for timer machines.
//!
//! A checkpoint captures state, context and history so that a timer can
//! outlive the process that started it. A timer checkpointed while running
//! keeps counting: on resume its open segment still dates from the original
//! start, and the deadline is shortened accordingly.

use crate::builder;
use crate::core::{Clock, StateHistory, TimerState};
use crate::machine::{SourcePlan, TimerContext, TimerMachine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use tracing::warn;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of a timer machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimerCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub state: TimerState,

    pub context: TimerContext,

    /// Complete transition history
    pub history: StateHistory<TimerState>,
}

impl TimerCheckpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::Decode(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes).map_err(|e| CheckpointError::Decode(e.to_string()))
    }

    /// Check that the checkpoint describes a machine this version can run.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if let Validation::Failure(violations) = builder::validate(self.context.config()) {
            return Err(CheckpointError::InvalidConfig(violations.iter().cloned().collect()));
        }

        if !self.context.segments_consistent() {
            return Err(CheckpointError::UnpairedSegments {
                starts: self.context.start_times().len(),
                stops: self.context.stop_times().len(),
            });
        }

        let running = self.state == TimerState::Running;
        if running != self.context.has_open_segment() {
            return Err(CheckpointError::StateMismatch { state: self.state });
        }

        Ok(())
    }
}

impl<C: Clock> TimerMachine<C> {
    /// Capture the machine as it is now.
    pub fn checkpoint(&self) -> TimerCheckpoint {
        TimerCheckpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            state: self.state(),
            context: self.context().clone(),
            history: self.history().clone(),
        }
    }

    /// Rebuild a machine from a validated checkpoint.
    ///
    /// No entry actions run. A machine resumed into `running` queues an
    /// [`Activity::StartSource`](crate::machine::Activity::StartSource) whose
    /// deadline accounts for the time consumed before and since the checkpoint.
    pub fn resume(checkpoint: TimerCheckpoint, clock: C) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;

        if checkpoint.state == TimerState::Running {
            let plan = SourcePlan::for_context(&checkpoint.context, clock.now_ms());
            if plan.deadline.is_some_and(|deadline| deadline.is_zero()) {
                warn!(id = %checkpoint.id, "resumed countdown is already past its deadline");
            }
        }

        Ok(Self::from_parts(
            checkpoint.state,
            checkpoint.context,
            checkpoint.history,
            clock,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{ConfigViolation, MAX_DURATION_MS};
    use crate::core::{ManualClock, TimerEvent};
    use crate::machine::{Activity, TimerOptions};
    use std::time::Duration;

    fn countdown(clock: &ManualClock) -> TimerMachine<ManualClock> {
        let config = TimerOptions {
            title: Some("Bread".to_string()),
            duration_ms: Some(10_000),
            auto_start: Some(false),
            auto_finalize: Some(false),
            ..Default::default()
        }
        .resolve();
        TimerMachine::new(config, clock.clone())
    }

    #[test]
    fn paused_checkpoint_round_trips_through_json() {
        let clock = ManualClock::new(0);
        let mut timer = countdown(&clock);
        timer.send(TimerEvent::Start);
        clock.set(4_000);
        timer.send(TimerEvent::Pause);

        let json = timer.checkpoint().to_json().unwrap();
        let restored = TimerCheckpoint::from_json(&json).unwrap();

        clock.set(60_000);
        let mut resumed = TimerMachine::resume(restored, clock.clone()).unwrap();
        assert_eq!(resumed.state(), TimerState::Paused);
        assert_eq!(resumed.context(), timer.context());
        assert_eq!(resumed.history(), timer.history());
        assert!(resumed.drain_activities().is_empty());
    }

    #[test]
    fn running_checkpoint_resumes_with_shortened_deadline() {
        let clock = ManualClock::new(0);
        let mut timer = countdown(&clock);
        timer.send(TimerEvent::Start);
        clock.set(3_000);
        timer.send(TimerEvent::Lap);

        let bytes = timer.checkpoint().to_binary().unwrap();
        let restored = TimerCheckpoint::from_binary(&bytes).unwrap();

        clock.set(5_000);
        let mut resumed = TimerMachine::resume(restored, clock.clone()).unwrap();
        assert_eq!(resumed.state(), TimerState::Running);
        assert_eq!(
            resumed.drain_activities(),
            vec![Activity::StartSource(SourcePlan {
                tick_every: Duration::from_millis(1000),
                deadline: Some(Duration::from_millis(5_000)),
            })]
        );

        clock.set(6_000);
        resumed.send(TimerEvent::Stop);
        assert_eq!(resumed.context().elapsed_ms(), Some(6_000));
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let clock = ManualClock::new(0);
        let mut checkpoint = countdown(&clock).checkpoint();
        checkpoint.version = 99;

        let result = TimerMachine::resume(checkpoint, clock);
        assert!(matches!(
            result,
            Err(CheckpointError::UnsupportedVersion { found: 99, supported: 1 })
        ));
    }

    #[test]
    fn state_must_match_segments() {
        let clock = ManualClock::new(0);
        let mut timer = countdown(&clock);
        timer.send(TimerEvent::Start);
        let mut checkpoint = timer.checkpoint();
        checkpoint.state = TimerState::Paused;

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::StateMismatch {
                state: TimerState::Paused
            })
        ));
    }

    #[test]
    fn unpaired_segments_are_rejected() {
        let clock = ManualClock::new(0);
        let mut timer = countdown(&clock);
        timer.send(TimerEvent::Start);
        clock.set(1_000);
        timer.send(TimerEvent::Pause);

        let mut checkpoint = timer.checkpoint();
        checkpoint.context.stop_times.push(2_000);

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::UnpairedSegments { starts: 1, stops: 2 })
        ));
    }

    #[test]
    fn out_of_range_config_is_rejected() {
        let clock = ManualClock::new(0);
        let json = countdown(&clock).checkpoint().to_json().unwrap();
        let tampered = json.replace(
            "\"duration_ms\": 10000",
            &format!("\"duration_ms\": {}", i64::MIN),
        );
        let checkpoint = TimerCheckpoint::from_json(&tampered).unwrap();
        assert_eq!(checkpoint.context.config().duration_ms, Some(i64::MIN));

        let result = TimerMachine::resume(checkpoint, clock);
        match result {
            Err(CheckpointError::InvalidConfig(violations)) => assert_eq!(
                violations,
                vec![ConfigViolation::DurationOutOfRange {
                    max: MAX_DURATION_MS,
                    found: i64::MIN,
                }]
            ),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn garbage_is_a_deserialization_error() {
        assert!(matches!(
            TimerCheckpoint::from_json("{}"),
            Err(CheckpointError::Decode(_))
        ));
        assert!(matches!(
            TimerCheckpoint::from_binary(&[1, 2, 3]),
            Err(CheckpointError::Decode(_))
        ));
    }

    #[test]
    fn checkpoints_get_unique_ids() {
        let clock = ManualClock::new(0);
        let timer = countdown(&clock);
        assert_ne!(timer.checkpoint().id, timer.checkpoint().id);
    }
}
