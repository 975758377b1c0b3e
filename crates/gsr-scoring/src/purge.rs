use gsr_core::models::PhoneScore;

use crate::threat::ThreatProjection;

/// Why an aggregate is being purged instead of stored.
#[derive(Debug, Clone, PartialEq)]
pub enum PurgeReason {
    /// No report history at all.
    NoEvidence,
    /// The evidence has decayed below the purge threshold.
    BelowThreshold { score: f64, threshold: f64 },
}

impl PurgeReason {
    pub fn describe(&self) -> String {
        match self {
            Self::NoEvidence => "no report history".to_string(),
            Self::BelowThreshold { score, threshold } => {
                format!("score {score:.2} below purge threshold {threshold:.2}")
            }
        }
    }
}

/// What the recomputation must do with the stored aggregate.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceDecision {
    /// Delete the aggregate (and retract any threat entry), regardless of prior state.
    Purge {
        phone_number: String,
        /// Country known from the history; `None` when the history is empty.
        country_code: Option<String>,
        reason: PurgeReason,
    },
    /// Overwrite the aggregate and apply the threat projection.
    Persist {
        score: PhoneScore,
        threat: ThreatProjection,
    },
}

impl PersistenceDecision {
    pub fn is_purge(&self) -> bool {
        matches!(self, Self::Purge { .. })
    }
}

/// True when a final score is too weak to keep.
pub fn should_purge(final_score: f64, threshold: f64) -> bool {
    final_score < threshold
}
