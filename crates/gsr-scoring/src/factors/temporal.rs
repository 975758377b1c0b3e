use chrono::{DateTime, Utc};
use gsr_core::constants::SECONDS_PER_DAY;

/// Elapsed days between `created_at` and `now`.
///
/// Clock skew (a report from the future) clamps to zero, never negative.
pub fn elapsed_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let micros = (now - created_at).num_microseconds().unwrap_or(i64::MAX);
    (micros.max(0) as f64 / 1_000_000.0) / SECONDS_PER_DAY
}

/// Half-life decay factor: `0.5^(elapsedDays / halfLife)`.
///
/// Range: (0.0, 1.0]. Purely continuous; old evidence approaches zero
/// but is never cut off.
pub fn decay_factor(elapsed_days: f64, half_life_days: f64) -> f64 {
    0.5f64.powf(elapsed_days.max(0.0) / half_life_days)
}

/// Decay factor for a timestamp, measured against `now`.
pub fn calculate(created_at: DateTime<Utc>, now: DateTime<Utc>, half_life_days: f64) -> f64 {
    decay_factor(elapsed_days(created_at, now), half_life_days)
}
