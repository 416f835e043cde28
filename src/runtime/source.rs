//! Interval/deadline source: the background timers of the `running` state.

use super::actor::Message;
use crate::core::TimerEvent;
use crate::machine::SourcePlan;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// Ticker plus optional one-shot deadline, running on its own task.
///
/// Every delivery carries the source's generation so the receiver can tell
/// events of a torn-down source from current ones. Dropping the source stops
/// it.
#[derive(Debug)]
pub(crate) struct IntervalSource {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl IntervalSource {
    /// Spawn the timers described by `plan`. Must be called inside a tokio
    /// runtime.
    pub(crate) fn start(plan: SourcePlan, generation: u64, sink: UnboundedSender<Message>) -> Self {
        debug!(
            generation,
            tick_every = ?plan.tick_every,
            deadline = ?plan.deadline,
            "setting up timers"
        );

        let task = tokio::spawn(async move {
            let period = plan.tick_every.max(Duration::from_millis(1));
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut armed = plan.deadline.is_some();
            let deadline = time::sleep(plan.deadline.unwrap_or_default());
            tokio::pin!(deadline);

            loop {
                let event = tokio::select! {
                    biased;
                    () = &mut deadline, if armed => {
                        armed = false;
                        TimerEvent::Stop
                    }
                    _ = ticker.tick() => TimerEvent::Update,
                };

                if sink.send(Message::Source { generation, event }).is_err() {
                    break;
                }
            }
        });

        Self {
            generation,
            task: Some(task),
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancel both timers. Calling it again does nothing.
    pub(crate) fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(generation = self.generation, "cleaning up timers");
        }
    }

    pub(crate) fn is_stopped(&self) -> bool {
        self.task.is_none()
    }
}

impl Drop for IntervalSource {
    fn drop(&mut self) {
        self.stop();
    }
}
