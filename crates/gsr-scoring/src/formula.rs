use chrono::{DateTime, Utc};
use gsr_core::config::ScoringConfig;
use gsr_core::constants::MAX_SCORE;
use gsr_core::models::{Report, RiskTier};

use crate::factors::{self, ScoringContext};

/// Numeric parameters of the scoring formula.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringParams {
    pub half_life_days: f64,
    pub velocity_window_days: u32,
    pub velocity_threshold: u32,
    pub swarm_score_floor: f64,
    pub purge_threshold: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self::from(&ScoringConfig::default())
    }
}

impl From<&ScoringConfig> for ScoringParams {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            half_life_days: config.half_life_days,
            velocity_window_days: config.velocity_window_days,
            velocity_threshold: config.velocity_threshold,
            swarm_score_floor: config.swarm_score_floor,
            purge_threshold: config.purge_threshold,
        }
    }
}

/// Every intermediate value of one scoring pass, for audit logging and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Σ baseWeight × decay over human reports.
    pub decayed_sum: f64,
    pub human_reports: usize,
    pub distinct_reporters: usize,
    pub consensus_factor: f64,
    /// `decayed_sum × consensus_factor`, before floor and cap.
    pub raw_score: f64,
    pub velocity_hits: u32,
    pub swarm_override: bool,
    /// Floored, capped at 100, rounded to two decimals.
    pub final_score: f64,
    pub tier: RiskTier,
    /// Newest human report, if any.
    pub last_human_activity: Option<DateTime<Utc>>,
    /// `now` under the swarm override, otherwise the newest human report.
    pub effective_last_activity: Option<DateTime<Utc>>,
    /// Country of the newest report in the history.
    pub country_code: Option<String>,
    pub total_reports: usize,
}

/// Round to two decimals, the stored precision of a score.
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// Score a full report history.
///
/// ```text
/// rawScore   = Σ(weight × 0.5^(days / halfLife)) × consensusFactor(distinctReporters)
/// floored    = max(rawScore, swarmFloor)   if autoBlocksInWindow > threshold
/// finalScore = round2(min(floored, 100))
/// tier       = tier(finalScore)
/// ```
///
/// The tier is derived from the rounded score so that the stored pair is
/// always consistent.
pub fn compute_breakdown(
    history: &[Report],
    ctx: &ScoringContext,
    params: &ScoringParams,
) -> ScoreBreakdown {
    let now = ctx.now;

    let mut decayed_sum = 0.0;
    let mut human_reports = 0usize;
    let mut last_human_activity: Option<DateTime<Utc>> = None;

    // Fixed summation order, so the float result never depends on store order.
    let mut human: Vec<&Report> = history.iter().filter(|r| !r.is_automated()).collect();
    human.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

    for report in human {
        human_reports += 1;
        decayed_sum += factors::category::contribution(report, now, params.half_life_days);
        if last_human_activity.map_or(true, |t| report.created_at > t) {
            last_human_activity = Some(report.created_at);
        }
    }

    let distinct_reporters = factors::consensus::distinct_reporters(history);
    let consensus_factor = factors::consensus::factor(distinct_reporters);
    let raw_score = decayed_sum * consensus_factor;

    let velocity = factors::velocity::calculate(
        history,
        now,
        params.velocity_window_days,
        params.velocity_threshold,
    );

    let mut score = raw_score;
    let mut effective_last_activity = last_human_activity;
    if velocity.triggered {
        effective_last_activity = Some(now);
        score = score.max(params.swarm_score_floor);
    }

    let final_score = round_score(score.clamp(0.0, MAX_SCORE));

    ScoreBreakdown {
        decayed_sum,
        human_reports,
        distinct_reporters,
        consensus_factor,
        raw_score,
        velocity_hits: velocity.hits,
        swarm_override: velocity.triggered,
        final_score,
        tier: RiskTier::from_score(final_score),
        last_human_activity,
        effective_last_activity,
        country_code: newest_country(history),
        total_reports: history.len(),
    }
}

/// Country of the most recent report; ties broken by id so the choice
/// never depends on store ordering.
fn newest_country(history: &[Report]) -> Option<String> {
    history
        .iter()
        .max_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)))
        .map(|r| r.country_code.clone())
}
