use chrono::{DateTime, Duration, Utc};
use gsr_core::models::Report;

/// Automated-block activity inside the velocity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VelocitySignal {
    /// Automated blocks younger than the window. Always recorded.
    pub hits: u32,
    /// True when `hits` strictly exceeds the threshold.
    pub triggered: bool,
}

/// Count automated blocks with `now - created_at < window`.
///
/// Future-dated events (clock skew) count as inside the window.
pub fn count_hits(history: &[Report], now: DateTime<Utc>, window_days: u32) -> u32 {
    let window = Duration::days(i64::from(window_days));
    let hits = history
        .iter()
        .filter(|r| r.is_automated() && now - r.created_at < window)
        .count();
    u32::try_from(hits).unwrap_or(u32::MAX)
}

/// Evaluate the swarm heuristic for a history.
pub fn calculate(
    history: &[Report],
    now: DateTime<Utc>,
    window_days: u32,
    threshold: u32,
) -> VelocitySignal {
    let hits = count_hits(history, now, window_days);
    VelocitySignal {
        hits,
        triggered: hits > threshold,
    }
}
