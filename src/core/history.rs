//! State transition history tracking.
//!
//! Every state change a timer makes is recorded here, whether it was caused
//! by an event or taken automatically after settling into a state.

use super::event::TimerEvent;
use super::state::State;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What caused a state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// An event delivered by a caller or by the interval/deadline source
    Event(TimerEvent),
    /// An eventless transition whose guard passed on entry
    Automatic,
}

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use ticktock::core::{StateTransition, TimerEvent, TimerState, Trigger};
///
/// let transition = StateTransition {
///     from: TimerState::Pending,
///     to: TimerState::Running,
///     timestamp_ms: 1_700_000_000_000,
///     trigger: Trigger::Event(TimerEvent::Start),
/// };
/// assert_eq!(transition.to, TimerState::Running);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Clock reading (epoch milliseconds) when the transition happened
    pub timestamp_ms: i64,
    /// What caused it
    pub trigger: Trigger,
}

/// Ordered history of state transitions.
///
/// `record` returns a new history with the transition appended and leaves
/// the receiver untouched.
///
/// # Example
///
/// ```rust
/// use ticktock::core::{StateHistory, StateTransition, TimerEvent, TimerState, Trigger};
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: TimerState::Pending,
///         to: TimerState::Running,
///         timestamp_ms: 0,
///         trigger: Trigger::Automatic,
///     })
///     .record(StateTransition {
///         from: TimerState::Running,
///         to: TimerState::Stopped,
///         timestamp_ms: 2_500,
///         trigger: Trigger::Event(TimerEvent::Stop),
///     });
///
/// assert_eq!(history.get_path().len(), 3);
/// assert_eq!(history.duration(), Some(std::time::Duration::from_millis(2_500)));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Append a transition in place.
    ///
    /// Used by the machine, which owns its history exclusively.
    pub(crate) fn push(&mut self, transition: StateTransition<S>) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the initial state, then the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and the last transition.
    ///
    /// Returns `None` when empty or when the clock went backwards.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        let millis = u64::try_from(last.timestamp_ms - first.timestamp_ms).ok()?;
        Some(Duration::from_millis(millis))
    }

    /// Get all transitions in order.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    /// Number of transitions recorded.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// True if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimerState;

    fn transition(from: TimerState, to: TimerState, at: i64) -> StateTransition<TimerState> {
        StateTransition {
            from,
            to,
            timestamp_ms: at,
            trigger: Trigger::Automatic,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TimerState> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(transition(TimerState::Pending, TimerState::Running, 0));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn push_appends_in_place() {
        let mut history = StateHistory::new();
        history.push(transition(TimerState::Pending, TimerState::Running, 0));
        history.push(transition(TimerState::Running, TimerState::Paused, 10));

        assert_eq!(history.len(), 2);
        assert_eq!(history.transitions()[1].to, TimerState::Paused);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(transition(TimerState::Pending, TimerState::Running, 0))
            .record(transition(TimerState::Running, TimerState::Stopped, 5))
            .record(transition(TimerState::Stopped, TimerState::Done, 5));

        let path = history.get_path();
        assert_eq!(
            path,
            vec![
                &TimerState::Pending,
                &TimerState::Running,
                &TimerState::Stopped,
                &TimerState::Done
            ]
        );
    }

    #[test]
    fn duration_spans_first_to_last() {
        let history = StateHistory::new()
            .record(transition(TimerState::Pending, TimerState::Running, 1_000))
            .record(transition(TimerState::Running, TimerState::Paused, 4_250));

        assert_eq!(history.duration(), Some(Duration::from_millis(3_250)));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let history =
            StateHistory::new().record(transition(TimerState::Pending, TimerState::Running, 42));
        assert_eq!(history.duration(), Some(Duration::ZERO));
    }

    #[test]
    fn backwards_clock_yields_no_duration() {
        let history = StateHistory::new()
            .record(transition(TimerState::Pending, TimerState::Running, 100))
            .record(transition(TimerState::Running, TimerState::Paused, 50));
        assert!(history.duration().is_none());
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(StateTransition {
            from: TimerState::Running,
            to: TimerState::Paused,
            timestamp_ms: 7,
            trigger: Trigger::Event(TimerEvent::Pause),
        });

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TimerState> = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
