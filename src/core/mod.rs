//! Core building blocks of a timer machine.
//!
//! - States and events via `TimerState` and `TimerEvent`
//! - Guard predicates for eventless transitions
//! - Immutable history tracking
//! - Clock abstraction used for every time sample
//!
//! Nothing in this module performs I/O or spawns tasks.

mod clock;
mod event;
mod guard;
mod history;
mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use event::TimerEvent;
pub use guard::Guard;
pub use history::{StateHistory, StateTransition, Trigger};
pub use state::{State, TimerState};
