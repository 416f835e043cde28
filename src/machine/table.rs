//! Transition table of the timer machine.
//!
//! ```text
//!             START / auto_start
//!  pending ───────────────────────► running ◄──── LAP, UPDATE (internal)
//!     ▲                              │  ▲
//!     │                        PAUSE │  │ RESUME
//!     │ RESET                        ▼  │
//!     ├──────────────────────────── paused
//!     │                              │
//!     │                 STOP         │ STOP
//!     │        running ─────► stopped ◄─┘
//!     └──────────────────────────── │
//!                                   │ auto_finalize
//!                                   ▼
//!                                  done
//! ```

use super::actions::Action;
use super::context::TimerContext;
use crate::core::{Guard, TimerEvent, TimerState};

const NONE: &[Action] = &[];
const APPLY_DEFAULTS: &[Action] = &[Action::ApplyDefaults];
const CLAMP_FINAL: &[Action] = &[Action::ClampFinal];
const RESET: &[Action] = &[Action::ResetContext];

const OPEN_SEGMENT: &[Action] = &[Action::SnapshotNow, Action::OpenSegment];

const CLOSE_SEGMENT: &[Action] = &[
    Action::SnapshotNow,
    Action::CloseSegment,
    Action::FoldClosedSegment,
    Action::RecomputeFromClosed,
];

const LAP: &[Action] = &[
    Action::SnapshotNow,
    Action::CloseSegment,
    Action::FoldClosedSegment,
    Action::RecomputeFromClosed,
    Action::SnapshotNow,
    Action::OpenSegment,
];

const TICK: &[Action] = &[
    Action::SnapshotNow,
    Action::RecomputeElapsedWhileOpen,
    Action::RecomputeRemainingWhileOpen,
];

/// Where an event leads from a given state.
#[derive(Debug)]
pub(crate) struct Route {
    /// `None` for internal transitions that keep the state and skip entry/exit
    pub(crate) target: Option<TimerState>,
    pub(crate) actions: &'static [Action],
}

/// An eventless transition taken as soon as its guard holds.
pub(crate) struct Automatic {
    pub(crate) guard: Guard<TimerContext>,
    pub(crate) target: TimerState,
    pub(crate) actions: &'static [Action],
}

pub(crate) fn route(state: TimerState, event: TimerEvent) -> Option<Route> {
    use TimerEvent as E;
    use TimerState as S;

    let (target, actions) = match (state, event) {
        (S::Pending, E::Start) => (Some(S::Running), NONE),

        (S::Running, E::Pause) => (Some(S::Paused), NONE),
        (S::Running, E::Stop) => (Some(S::Stopped), NONE),
        (S::Running, E::Lap) => (None, LAP),
        (S::Running, E::Update) => (None, TICK),

        (S::Paused, E::Resume) => (Some(S::Running), NONE),
        (S::Paused, E::Stop) => (Some(S::Stopped), NONE),

        (S::Running | S::Paused | S::Stopped, E::Reset) => (Some(S::Pending), RESET),

        _ => return None,
    };

    Some(Route { target, actions })
}

pub(crate) fn entry_actions(state: TimerState) -> &'static [Action] {
    match state {
        TimerState::Pending => APPLY_DEFAULTS,
        TimerState::Running => OPEN_SEGMENT,
        TimerState::Stopped => CLAMP_FINAL,
        TimerState::Paused | TimerState::Done => NONE,
    }
}

pub(crate) fn exit_actions(state: TimerState) -> &'static [Action] {
    match state {
        TimerState::Running => CLOSE_SEGMENT,
        _ => NONE,
    }
}

pub(crate) fn automatic(state: TimerState) -> Option<Automatic> {
    match state {
        TimerState::Pending => Some(Automatic {
            guard: Guard::new(auto_start),
            target: TimerState::Running,
            actions: APPLY_DEFAULTS,
        }),
        TimerState::Stopped => Some(Automatic {
            guard: Guard::new(auto_finalize),
            target: TimerState::Done,
            actions: CLAMP_FINAL,
        }),
        _ => None,
    }
}

fn auto_start(ctx: &TimerContext) -> bool {
    ctx.config.auto_start
}

fn auto_finalize(ctx: &TimerContext) -> bool {
    ctx.config.auto_finalize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::TimerOptions;

    const EVENTS: [TimerEvent; 7] = [
        TimerEvent::Start,
        TimerEvent::Pause,
        TimerEvent::Resume,
        TimerEvent::Stop,
        TimerEvent::Lap,
        TimerEvent::Reset,
        TimerEvent::Update,
    ];

    #[test]
    fn done_accepts_nothing() {
        for event in EVENTS {
            assert!(route(TimerState::Done, event).is_none());
        }
        assert!(automatic(TimerState::Done).is_none());
    }

    #[test]
    fn pending_only_accepts_start() {
        let accepted: Vec<_> = EVENTS
            .into_iter()
            .filter(|event| route(TimerState::Pending, *event).is_some())
            .collect();
        assert_eq!(accepted, vec![TimerEvent::Start]);
    }

    #[test]
    fn lap_and_update_are_internal() {
        let lap = route(TimerState::Running, TimerEvent::Lap).unwrap();
        assert_eq!(lap.target, None);
        assert_eq!(lap.actions.len(), 6);

        let tick = route(TimerState::Running, TimerEvent::Update).unwrap();
        assert_eq!(tick.target, None);
    }

    #[test]
    fn reset_targets_pending_from_every_active_state() {
        for state in [TimerState::Running, TimerState::Paused, TimerState::Stopped] {
            let reset = route(state, TimerEvent::Reset).unwrap();
            assert_eq!(reset.target, Some(TimerState::Pending));
            assert_eq!(reset.actions, &[Action::ResetContext]);
        }
    }

    #[test]
    fn only_running_has_exit_actions() {
        assert_eq!(exit_actions(TimerState::Running).len(), 4);
        for state in [
            TimerState::Pending,
            TimerState::Paused,
            TimerState::Stopped,
            TimerState::Done,
        ] {
            assert!(exit_actions(state).is_empty());
        }
    }

    #[test]
    fn guards_read_the_resolved_config() {
        let manual = TimerContext::new(
            TimerOptions {
                auto_start: Some(false),
                auto_finalize: Some(false),
                ..Default::default()
            }
            .resolve(),
        );
        let defaults = TimerContext::new(TimerOptions::default().resolve());

        let start = automatic(TimerState::Pending).unwrap();
        let finalize = automatic(TimerState::Stopped).unwrap();

        assert!(start.guard.check(&defaults));
        assert!(finalize.guard.check(&defaults));
        assert!(!start.guard.check(&manual));
        assert!(!finalize.guard.check(&manual));
    }
}
