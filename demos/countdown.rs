//! Countdown
//!
//! This example runs a short countdown on the tokio runtime and prints every
//! snapshot the timer publishes.
//!
//! Key concepts:
//! - Building a timer from JSON options plus builder overrides
//! - Spawning the machine onto its own task
//! - Pausing, lapping and letting the deadline finalize the timer
//!
//! Run with: cargo run --example countdown

use std::time::Duration;
use ticktock::core::TimerState;
use ticktock::runtime::{spawn, TokioClock};
use ticktock::{TimerBuilder, TimerSnapshot};

fn render(snapshot: &TimerSnapshot) -> String {
    let fmt = |ms: Option<i64>| {
        ms.map_or("-".to_string(), |ms| format!("{:.1}s", ms as f64 / 1000.0))
    };
    format!(
        "[{:>7}] elapsed {:>6}  remaining {:>6}  laps {}",
        snapshot.state,
        fmt(snapshot.elapsed_ms),
        fmt(snapshot.remaining_ms),
        snapshot.start_times.len(),
    )
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Countdown Example ===\n");

    let machine = TimerBuilder::new()
        .options_json(r#"{ "title": "tea", "duration_ms": 3000 }"#)?
        .update_freq_ms(250)
        .auto_start(false)
        .clock(TokioClock::new())
        .build()?;

    let timer = spawn(machine);
    let mut updates = timer.subscribe();

    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            println!("{}", render(&snapshot));
            if snapshot.state == TimerState::Done {
                break;
            }
        }
    });

    timer.start()?;
    tokio::time::sleep(Duration::from_millis(1_000)).await;

    println!("-- pause for half a second");
    timer.pause()?;
    tokio::time::sleep(Duration::from_millis(500)).await;
    timer.resume()?;

    tokio::time::sleep(Duration::from_millis(600)).await;
    println!("-- lap");
    timer.lap()?;

    let done = timer.wait_until_done().await?;
    printer.await?;

    println!("\nFinished: {}", render(&done));
    println!("Segments: {:?}", done.start_times.iter().zip(&done.stop_times).collect::<Vec<_>>());

    println!("\n=== Example Complete ===");
    Ok(())
}
