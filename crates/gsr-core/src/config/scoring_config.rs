use serde::{Deserialize, Serialize};

use super::defaults;

/// Scoring engine configuration.
///
/// Category weights, the consensus schedule, and tier thresholds are a
/// closed table and deliberately absent here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Days for a report's contribution to halve.
    pub half_life_days: f64,
    /// Look-back window for automated-block events (days).
    pub velocity_window_days: u32,
    /// Automated blocks inside the window must exceed this to trigger the swarm override.
    pub velocity_threshold: u32,
    /// Minimum score applied while the swarm override is active.
    pub swarm_score_floor: f64,
    /// Scores strictly below this are purged instead of stored.
    pub purge_threshold: f64,
    /// TTL refreshed on every score and threat-index write (seconds).
    pub score_ttl_secs: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            half_life_days: defaults::DEFAULT_HALF_LIFE_DAYS,
            velocity_window_days: defaults::DEFAULT_VELOCITY_WINDOW_DAYS,
            velocity_threshold: defaults::DEFAULT_VELOCITY_THRESHOLD,
            swarm_score_floor: defaults::DEFAULT_SWARM_SCORE_FLOOR,
            purge_threshold: defaults::DEFAULT_PURGE_THRESHOLD,
            score_ttl_secs: defaults::DEFAULT_SCORE_TTL_SECS,
        }
    }
}
