use chrono::{DateTime, Utc};
use gsr_core::models::Report;

use super::temporal;

/// Decayed contribution of one report: `baseWeight × 0.5^(elapsedDays / halfLife)`.
///
/// Automated-block events carry a zero base weight, so they add nothing.
pub fn contribution(report: &Report, now: DateTime<Utc>, half_life_days: f64) -> f64 {
    report.category.base_weight() * temporal::calculate(report.created_at, now, half_life_days)
}
