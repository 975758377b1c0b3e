use gsr_core::models::PhoneScore;
use gsr_scoring::{PurgeReason, ScoreBreakdown};
use serde::Serialize;

/// What one recomputation did to the stores.
#[derive(Debug, Clone, PartialEq)]
pub enum RecomputeOutcome {
    /// The aggregate was written. The threat index now holds an entry if the
    /// tier is not safe and holds none otherwise.
    Persisted {
        score: PhoneScore,
        breakdown: ScoreBreakdown,
    },
    /// The aggregate and any threat entry were deleted.
    Purged {
        phone_number: String,
        country_code: String,
        reason: PurgeReason,
        breakdown: Option<ScoreBreakdown>,
    },
}

impl RecomputeOutcome {
    pub fn is_purged(&self) -> bool {
        matches!(self, Self::Purged { .. })
    }

    pub fn score(&self) -> Option<&PhoneScore> {
        match self {
            Self::Persisted { score, .. } => Some(score),
            Self::Purged { .. } => None,
        }
    }
}

/// Result of a batch recomputation. Failures never abort the batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub phones: usize,
    pub persisted: usize,
    pub purged: usize,
    pub cancelled: usize,
    /// `(phone, error message)` for every recomputation that failed.
    pub failures: Vec<(String, String)>,
}

impl BatchSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.cancelled == 0
    }
}
