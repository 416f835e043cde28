//! Tokio shell around the pure timer machine.
//!
//! The machine decides; this module keeps time. A spawned task owns the
//! machine, feeds it caller events and the ticks/deadline of an
//! [`IntervalSource`](source) that lives exactly as long as the `running`
//! state, and publishes a snapshot after every event.

mod actor;
mod clock;
mod error;
mod source;

pub use actor::{spawn, TimerHandle};
pub use clock::TokioClock;
pub use error::RuntimeError;
