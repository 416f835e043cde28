//! Ticktock: a timer and stopwatch engine built as a finite-state machine.
//!
//! The machine tracks elapsed and remaining time across start, pause,
//! resume, stop, lap and reset. It is a pure core: every transition is a
//! synchronous, ordered list of context updates that samples the clock once.
//! The tokio shell in [`runtime`] owns the background ticker and deadline,
//! which exist only while the timer is running.
//!
//! # Core Concepts
//!
//! - **States**: `pending → running ⇄ paused → stopped → done`, with RESET
//!   back to `pending`
//! - **Segments**: each running stretch is a start/stop timestamp pair; the
//!   elapsed time is the sum of closed segments plus the open one
//! - **Countdown vs stopwatch**: a configured duration adds a remaining time
//!   and a deadline that stops the timer
//! - **Automatic transitions**: `auto_start` and `auto_finalize` are taken
//!   while settling, before the caller can observe the intermediate state
//!
//! # Example
//!
//! ```rust
//! use ticktock::builder::TimerBuilder;
//! use ticktock::core::{ManualClock, TimerEvent, TimerState};
//!
//! let clock = ManualClock::new(0);
//! let mut timer = TimerBuilder::new()
//!     .duration_ms(10_000)
//!     .auto_start(false)
//!     .clock(clock.clone())
//!     .build()
//!     .unwrap();
//!
//! timer.send(TimerEvent::Start);
//! clock.set(2_500);
//! timer.send(TimerEvent::Update);
//!
//! assert_eq!(timer.state(), TimerState::Running);
//! assert_eq!(timer.context().elapsed_ms(), Some(2_500));
//! assert_eq!(timer.context().remaining_ms(), Some(7_500));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod machine;
pub mod runtime;

// Re-export commonly used types
pub use builder::{BuildError, TimerBuilder};
pub use core::{Clock, TimerEvent, TimerState};
pub use machine::{TimerConfig, TimerContext, TimerMachine, TimerOptions, TimerSnapshot};
pub use runtime::{spawn, TimerHandle};
