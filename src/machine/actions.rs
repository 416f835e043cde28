//! Context-mutating actions run by transitions.
//!
//! Each action takes the context by value and hands back the next one; a
//! transition folds its action list over the context and the machine stores
//! the result. The machine samples its clock once per transition and
//! `SnapshotNow` records that sample, so every later action sees the same
//! instant.

use super::context::{Internal, TimerContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Restore the public timing fields to their defaults, keeping config and internals
    ApplyDefaults,
    SnapshotNow,
    OpenSegment,
    CloseSegment,
    /// Add the just-closed segment into `elapsed_last_ms`
    FoldClosedSegment,
    RecomputeFromClosed,
    RecomputeElapsedWhileOpen,
    RecomputeRemainingWhileOpen,
    /// Keep `elapsed_ms` within the duration and `remaining_ms` non-negative
    ClampFinal,
    ResetContext,
}

impl Action {
    pub(crate) fn apply(self, mut ctx: TimerContext, now_ms: i64) -> TimerContext {
        match self {
            Action::ApplyDefaults => {
                ctx.start_times.clear();
                ctx.stop_times.clear();
                ctx.elapsed_ms = None;
                ctx.remaining_ms = None;
            }
            Action::SnapshotNow => {
                ctx.internal.now = Some(now_ms);
            }
            Action::OpenSegment => {
                let now = ctx.internal.now.unwrap_or(0);
                ctx.start_times.push(now);
            }
            Action::CloseSegment => {
                let now = ctx.internal.now.unwrap_or(0);
                ctx.stop_times.push(now);
            }
            Action::FoldClosedSegment => {
                let start = ctx.start_times.last().copied().unwrap_or(0);
                let stop = ctx.stop_times.last().copied().unwrap_or(0);
                let folded = ctx
                    .internal
                    .elapsed_last_ms
                    .unwrap_or(0)
                    .saturating_add(stop.saturating_sub(start));
                ctx.internal.elapsed_last_ms = Some(folded);
            }
            Action::RecomputeFromClosed => {
                let closed = ctx.internal.elapsed_last_ms.unwrap_or(0);
                ctx.elapsed_ms = Some(closed);
                ctx.remaining_ms = ctx
                    .config
                    .duration_ms
                    .map(|duration| duration.saturating_sub(closed));
            }
            Action::RecomputeElapsedWhileOpen => {
                let now = ctx.internal.now.unwrap_or(0);
                let start = ctx.start_times.last().copied().unwrap_or(now);
                let closed = ctx.internal.elapsed_last_ms.unwrap_or(0);
                ctx.elapsed_ms = Some(closed.saturating_add(now.saturating_sub(start)));
            }
            Action::RecomputeRemainingWhileOpen => {
                let elapsed = ctx.elapsed_ms.unwrap_or(0);
                ctx.remaining_ms = ctx
                    .config
                    .duration_ms
                    .map(|duration| duration.saturating_sub(elapsed));
            }
            Action::ClampFinal => match ctx.config.duration_ms {
                Some(duration) => {
                    ctx.elapsed_ms = ctx.elapsed_ms.map(|elapsed| elapsed.min(duration.max(0)));
                    ctx.remaining_ms = ctx.remaining_ms.map(|remaining| remaining.max(0));
                }
                None => ctx.remaining_ms = None,
            },
            Action::ResetContext => {
                ctx.start_times.clear();
                ctx.stop_times.clear();
                ctx.elapsed_ms = None;
                ctx.remaining_ms = None;
                ctx.internal = Internal::default();
            }
        }
        ctx
    }
}

/// Apply `actions` in order.
pub(crate) fn run(ctx: TimerContext, actions: &[Action], now_ms: i64) -> TimerContext {
    actions
        .iter()
        .fold(ctx, |ctx, action| action.apply(ctx, now_ms))
}
