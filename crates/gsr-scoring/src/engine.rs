use gsr_core::config::ScoringConfig;
use gsr_core::constants::UNKNOWN_COUNTRY;
use gsr_core::models::{PhoneScore, Report};

use crate::factors::ScoringContext;
use crate::formula::{self, ScoreBreakdown, ScoringParams};
use crate::purge::{self, PersistenceDecision, PurgeReason};
use crate::threat;

/// Result of assessing one phone number: the math plus what to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub breakdown: Option<ScoreBreakdown>,
    pub decision: PersistenceDecision,
}

/// Scoring engine: pure function from a report history to a persistence decision.
///
/// Holds no state besides its parameters, so one instance may be shared by
/// any number of concurrent recomputations.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    params: ScoringParams,
}

impl ScoringEngine {
    /// Create an engine with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine from the scoring section of the config.
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            params: ScoringParams::from(config),
        }
    }

    /// Create with explicit parameters.
    pub fn with_params(params: ScoringParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// Score a history with a full breakdown of each factor.
    pub fn calculate_breakdown(&self, history: &[Report], ctx: &ScoringContext) -> ScoreBreakdown {
        formula::compute_breakdown(history, ctx, &self.params)
    }

    /// Score a history and decide whether its aggregate is stored or purged.
    ///
    /// An empty history purges unconditionally.
    pub fn assess(&self, phone_number: &str, history: &[Report], ctx: &ScoringContext) -> Assessment {
        if history.is_empty() {
            return Assessment {
                breakdown: None,
                decision: PersistenceDecision::Purge {
                    phone_number: phone_number.to_string(),
                    country_code: None,
                    reason: PurgeReason::NoEvidence,
                },
            };
        }

        let breakdown = self.calculate_breakdown(history, ctx);

        if purge::should_purge(breakdown.final_score, self.params.purge_threshold) {
            return Assessment {
                decision: PersistenceDecision::Purge {
                    phone_number: phone_number.to_string(),
                    country_code: breakdown.country_code.clone(),
                    reason: PurgeReason::BelowThreshold {
                        score: breakdown.final_score,
                        threshold: self.params.purge_threshold,
                    },
                },
                breakdown: Some(breakdown),
            };
        }

        let score = PhoneScore {
            phone_number: phone_number.to_string(),
            country_code: breakdown
                .country_code
                .clone()
                .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
            score: breakdown.final_score,
            tier: breakdown.tier,
            last_activity: breakdown.effective_last_activity,
            velocity_hit_count: breakdown.velocity_hits,
            total_reports: u32::try_from(breakdown.total_reports).unwrap_or(u32::MAX),
        };
        let threat = threat::project(&score, ctx.now);

        Assessment {
            breakdown: Some(breakdown),
            decision: PersistenceDecision::Persist { score, threat },
        }
    }

    /// Score many histories with a shared context.
    pub fn assess_batch<'a>(
        &self,
        histories: impl IntoIterator<Item = (&'a str, &'a [Report])>,
        ctx: &ScoringContext,
    ) -> Vec<Assessment> {
        histories
            .into_iter()
            .map(|(phone, history)| self.assess(phone, history, ctx))
            .collect()
    }
}
