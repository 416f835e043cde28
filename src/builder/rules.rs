//! Configuration rules, checked with `Validation` so that every broken rule
//! is reported in one pass.

use crate::builder::error::ConfigViolation;
use crate::machine::TimerConfig;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Longest accepted tick period: one day.
pub const MAX_UPDATE_FREQ_MS: u64 = 24 * 60 * 60 * 1000;

/// Largest accepted countdown magnitude: roughly a century. Keeps all
/// timestamp arithmetic far from `i64` overflow.
pub const MAX_DURATION_MS: i64 = 100 * 365 * 24 * 60 * 60 * 1000;

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Run every rule against `config`, accumulating ALL violations.
pub fn validate(config: &TimerConfig) -> Check {
    let checks = vec![check_update_frequency(config), check_duration(config)];
    Validation::all_vec(checks).map(|_| ())
}

fn check_update_frequency(config: &TimerConfig) -> Check {
    match config.update_freq_ms {
        0 => Validation::fail(ConfigViolation::ZeroUpdateFrequency),
        found if found > MAX_UPDATE_FREQ_MS => {
            Validation::fail(ConfigViolation::UpdateFrequencyTooLarge {
                max: MAX_UPDATE_FREQ_MS,
                found,
            })
        }
        _ => Validation::success(()),
    }
}

// Non-positive durations are valid: the deadline fires right away.
fn check_duration(config: &TimerConfig) -> Check {
    match config.duration_ms {
        Some(found) if found.unsigned_abs() > MAX_DURATION_MS.unsigned_abs() => {
            Validation::fail(ConfigViolation::DurationOutOfRange {
                max: MAX_DURATION_MS,
                found,
            })
        }
        _ => Validation::success(()),
    }
}
