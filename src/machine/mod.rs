//! The timer state machine.
//!
//! - `TimerOptions` / `TimerConfig`: caller options and their resolution
//! - `TimerContext`: start/stop timestamps and elapsed/remaining bookkeeping
//! - `TimerMachine`: transition table, action sequencing, automatic transitions

mod actions;
mod config;
mod context;
mod machine;
mod table;

pub use config::{
    TimerConfig, TimerOptions, DEFAULT_AUTO_FINALIZE, DEFAULT_AUTO_START, DEFAULT_UPDATE_FREQ_MS,
};
pub use context::{Segment, TimerContext};
pub use machine::{Activity, SourcePlan, TimerMachine, TimerSnapshot};
