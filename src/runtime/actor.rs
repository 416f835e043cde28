//! The task that owns a timer machine and serializes its events.

use super::error::RuntimeError;
use super::source::IntervalSource;
use crate::core::{Clock, TimerEvent, TimerState};
use crate::machine::{Activity, TimerMachine, TimerSnapshot};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Everything that enters the timer's queue.
#[derive(Debug)]
pub(crate) enum Message {
    /// Caller-originated event
    Event(TimerEvent),
    /// Delivery from the interval source of the given generation
    Source { generation: u64, event: TimerEvent },
    Shutdown,
}

struct TimerActor<C: Clock> {
    machine: TimerMachine<C>,
    source: Option<IntervalSource>,
    generation: u64,
    sink: mpsc::UnboundedSender<Message>,
    snapshots: watch::Sender<TimerSnapshot>,
}

impl<C: Clock> TimerActor<C> {
    fn handle(&mut self, event: TimerEvent) {
        self.machine.send(event);
        self.apply_activities();
        self.publish();
    }

    fn handle_source(&mut self, generation: u64, event: TimerEvent) {
        match &self.source {
            Some(source) if source.generation() == generation => self.handle(event),
            _ => trace!(generation, %event, "dropping delivery from stale source"),
        }
    }

    fn apply_activities(&mut self) {
        for activity in self.machine.drain_activities() {
            match activity {
                Activity::StartSource(plan) => {
                    self.stop_source();
                    self.generation += 1;
                    self.source = Some(IntervalSource::start(
                        plan,
                        self.generation,
                        self.sink.clone(),
                    ));
                }
                Activity::StopSource => self.stop_source(),
            }
        }
    }

    fn stop_source(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.stop();
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.machine.snapshot());
    }
}

async fn run<C: Clock>(
    mut actor: TimerActor<C>,
    mut inbox: mpsc::UnboundedReceiver<Message>,
) -> TimerSnapshot {
    actor.apply_activities();
    actor.publish();

    while !actor.machine.is_done() {
        let message = tokio::select! {
            message = inbox.recv() => message,
            () = actor.snapshots.closed() => None,
        };

        match message {
            Some(Message::Event(event)) => actor.handle(event),
            Some(Message::Source { generation, event }) => actor.handle_source(generation, event),
            Some(Message::Shutdown) | None => break,
        }
    }

    actor.stop_source();
    debug!(state = %actor.machine.state(), "timer task finished");
    actor.machine.snapshot()
}

/// Move `machine` onto its own task and return a handle to it.
///
/// Any activity the machine queued during construction (an auto-started
/// machine is already running) is carried out immediately. Must be called
/// inside a tokio runtime.
pub fn spawn<C: Clock + 'static>(machine: TimerMachine<C>) -> TimerHandle {
    let (sink, inbox) = mpsc::unbounded_channel();
    let (snapshots, snapshot_rx) = watch::channel(machine.snapshot());

    let actor = TimerActor {
        machine,
        source: None,
        generation: 0,
        sink: sink.clone(),
        snapshots,
    };
    let task = tokio::spawn(run(actor, inbox));

    TimerHandle {
        sink,
        snapshots: snapshot_rx,
        task,
    }
}

/// Control and observation handle of a spawned timer.
///
/// The task ends when the machine reaches `done`, on [`shutdown`](Self::shutdown),
/// or once the handle and every subscriber are dropped.
#[derive(Debug)]
pub struct TimerHandle {
    sink: mpsc::UnboundedSender<Message>,
    snapshots: watch::Receiver<TimerSnapshot>,
    task: JoinHandle<TimerSnapshot>,
}

impl TimerHandle {
    /// Queue an event. Events are processed in the order they are queued.
    pub fn send(&self, event: TimerEvent) -> Result<(), RuntimeError> {
        self.sink
            .send(Message::Event(event))
            .map_err(|_| RuntimeError::Closed)
    }

    pub fn start(&self) -> Result<(), RuntimeError> {
        self.send(TimerEvent::Start)
    }

    pub fn pause(&self) -> Result<(), RuntimeError> {
        self.send(TimerEvent::Pause)
    }

    pub fn resume(&self) -> Result<(), RuntimeError> {
        self.send(TimerEvent::Resume)
    }

    pub fn stop(&self) -> Result<(), RuntimeError> {
        self.send(TimerEvent::Stop)
    }

    pub fn lap(&self) -> Result<(), RuntimeError> {
        self.send(TimerEvent::Lap)
    }

    pub fn reset(&self) -> Result<(), RuntimeError> {
        self.send(TimerEvent::Reset)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver notified after every processed event.
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until the timer is observed in `state`.
    pub async fn wait_for_state(&self, state: TimerState) -> Result<TimerSnapshot, RuntimeError> {
        let mut snapshots = self.snapshots.clone();
        snapshots
            .wait_for(|snapshot| snapshot.state == state)
            .await
            .map(|snapshot| snapshot.clone())
            .map_err(|_| RuntimeError::Closed)
    }

    pub async fn wait_until_done(&self) -> Result<TimerSnapshot, RuntimeError> {
        self.wait_for_state(TimerState::Done).await
    }

    /// Stop the task, tearing down any active source, and return the final
    /// snapshot.
    pub async fn shutdown(self) -> Result<TimerSnapshot, RuntimeError> {
        // The task may already be gone after reaching `done`.
        let _ = self.sink.send(Message::Shutdown);
        Ok(self.task.await?)
    }
}
