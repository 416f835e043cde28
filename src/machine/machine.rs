//! The timer state machine.

use super::actions::{self, Action};
use super::config::TimerConfig;
use super::context::TimerContext;
use super::table;
use crate::core::{
    Clock, StateHistory, StateTransition, SystemClock, TimerEvent, TimerState, Trigger,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

/// What the interval/deadline source should do while `running` is occupied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourcePlan {
    /// Period of UPDATE ticks
    pub tick_every: Duration,
    /// Delay before the one-shot STOP; `None` in stopwatch mode
    pub deadline: Option<Duration>,
}

impl SourcePlan {
    /// Plan for a context that currently has an open segment.
    ///
    /// The deadline is the countdown left after all closed segments and the
    /// part of the open one already consumed, never less than zero.
    pub(crate) fn for_context(ctx: &TimerContext, now_ms: i64) -> Self {
        let deadline = ctx.config.duration_ms.map(|duration| {
            let open = ctx
                .start_times
                .last()
                .map_or(0, |start| now_ms.saturating_sub(*start).max(0));
            let left = duration
                .saturating_sub(ctx.elapsed_last_ms().unwrap_or(0))
                .saturating_sub(open);
            Duration::from_millis(u64::try_from(left).unwrap_or(0))
        });

        Self {
            tick_every: ctx.config.update_period(),
            deadline,
        }
    }
}

/// Side effects the machine asks its host to perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activity {
    /// `running` was entered
    StartSource(SourcePlan),
    /// `running` was exited
    StopSource,
}

/// Everything a presentation layer needs to render a timer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub title: Option<String>,
    pub duration_ms: Option<i64>,
    pub elapsed_ms: Option<i64>,
    pub remaining_ms: Option<i64>,
    pub start_times: Vec<i64>,
    pub stop_times: Vec<i64>,
}

/// A single timer: current state, context, and the clock it samples.
///
/// The machine is synchronous. Every call to [`send`](Self::send) runs the
/// whole transition, including any automatic transition of the state it
/// lands in, before returning. Timers are not spawned here; entering and
/// leaving `running` queues [`Activity`] values for the host to drain.
///
/// ```rust
/// use ticktock::core::{ManualClock, TimerEvent, TimerState};
/// use ticktock::machine::{TimerMachine, TimerOptions};
///
/// let clock = ManualClock::new(0);
/// let config = TimerOptions { auto_finalize: Some(false), ..Default::default() }.resolve();
/// let mut timer = TimerMachine::new(config, clock.clone());
/// assert_eq!(timer.state(), TimerState::Running);
///
/// clock.set(3_000);
/// timer.send(TimerEvent::Pause);
/// clock.set(5_000);
/// timer.send(TimerEvent::Resume);
/// clock.set(8_000);
/// timer.send(TimerEvent::Stop);
///
/// assert_eq!(timer.state(), TimerState::Stopped);
/// assert_eq!(timer.context().elapsed_ms(), Some(6_000));
/// ```
pub struct TimerMachine<C: Clock = SystemClock> {
    state: TimerState,
    context: TimerContext,
    history: StateHistory<TimerState>,
    activities: Vec<Activity>,
    clock: C,
}

impl<C: Clock> TimerMachine<C> {
    /// Create a machine, enter `pending` and settle.
    ///
    /// With `auto_start` the returned machine is already `running`.
    pub fn new(config: TimerConfig, clock: C) -> Self {
        let mut machine = Self {
            state: TimerState::Pending,
            context: TimerContext::new(config),
            history: StateHistory::new(),
            activities: Vec::new(),
            clock,
        };
        let now = machine.clock.now_ms();
        machine.enter(TimerState::Pending, now);
        machine.settle();
        machine
    }

    /// Rebuild a machine from saved parts without running entry actions.
    ///
    /// A machine restored into `running` queues a source start so the host
    /// can rearm its timers.
    pub(crate) fn from_parts(
        state: TimerState,
        context: TimerContext,
        history: StateHistory<TimerState>,
        clock: C,
    ) -> Self {
        let mut activities = Vec::new();
        if state == TimerState::Running {
            let plan = SourcePlan::for_context(&context, clock.now_ms());
            activities.push(Activity::StartSource(plan));
        }

        Self {
            state,
            context,
            history,
            activities,
            clock,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn context(&self) -> &TimerContext {
        &self.context
    }

    pub fn config(&self) -> &TimerConfig {
        &self.context.config
    }

    pub fn history(&self) -> &StateHistory<TimerState> {
        &self.history
    }

    pub fn is_done(&self) -> bool {
        self.state == TimerState::Done
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state,
            title: self.context.config.title.clone(),
            duration_ms: self.context.config.duration_ms,
            elapsed_ms: self.context.elapsed_ms,
            remaining_ms: self.context.remaining_ms,
            start_times: self.context.start_times.clone(),
            stop_times: self.context.stop_times.clone(),
        }
    }

    /// Take the activities queued since the last drain, oldest first.
    pub fn drain_activities(&mut self) -> Vec<Activity> {
        std::mem::take(&mut self.activities)
    }

    /// Process one event to completion.
    ///
    /// Returns `false`, leaving the machine untouched, when the current
    /// state has no transition for `event`.
    pub fn send(&mut self, event: TimerEvent) -> bool {
        let Some(route) = table::route(self.state, event) else {
            trace!(state = %self.state, %event, "event ignored");
            return false;
        };

        match route.target {
            Some(target) => {
                self.change_state(target, route.actions, Trigger::Event(event));
                self.settle();
            }
            None => {
                let now = self.clock.now_ms();
                self.run(route.actions, now);
            }
        }
        true
    }

    /// Take automatic transitions until none applies.
    fn settle(&mut self) {
        while let Some(automatic) = table::automatic(self.state) {
            if !automatic.guard.check(&self.context) {
                break;
            }
            self.change_state(automatic.target, automatic.actions, Trigger::Automatic);
        }
    }

    fn change_state(&mut self, target: TimerState, actions: &[Action], trigger: Trigger) {
        let from = self.state;
        let now = self.clock.now_ms();

        self.run(table::exit_actions(from), now);
        if from == TimerState::Running {
            self.activities.push(Activity::StopSource);
        }

        self.run(actions, now);
        self.state = target;
        self.history.push(StateTransition {
            from,
            to: target,
            timestamp_ms: now,
            trigger,
        });
        debug!(%from, to = %target, ?trigger, "timer transition");

        self.enter(target, now);
    }

    fn enter(&mut self, state: TimerState, now: i64) {
        self.run(table::entry_actions(state), now);
        if state == TimerState::Running {
            let plan = SourcePlan::for_context(&self.context, now);
            self.activities.push(Activity::StartSource(plan));
        }
    }

    fn run(&mut self, list: &[Action], now: i64) {
        let context = std::mem::take(&mut self.context);
        self.context = actions::run(context, list, now);
    }
}

impl<C: Clock> std::fmt::Debug for TimerMachine<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerMachine")
            .field("state", &self.state)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
