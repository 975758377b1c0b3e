use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RiskCategory;

/// Immutable evidence record. Created once at ingestion, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    /// E.164 format.
    pub phone_number: String,
    /// ISO 3166-1 alpha-2.
    pub country_code: String,
    /// Keyed hash of the reporter identity. The raw identity is never stored.
    pub reporter_hash: String,
    pub category: RiskCategory,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// Build a fresh report stamped with the current time.
    ///
    /// Expects `reporter_hash` to be already computed by the caller.
    pub fn new(
        phone_number: impl Into<String>,
        country_code: impl Into<String>,
        reporter_hash: impl Into<String>,
        category: RiskCategory,
        comment: impl Into<String>,
    ) -> Self {
        Self::at(
            phone_number,
            country_code,
            reporter_hash,
            category,
            comment,
            Utc::now(),
        )
    }

    /// Build a report with an explicit creation time (replay, imports, tests).
    ///
    /// Timestamps are truncated to microseconds, the storage resolution, so a
    /// report compares equal to itself after a round trip through the store.
    pub fn at(
        phone_number: impl Into<String>,
        country_code: impl Into<String>,
        reporter_hash: impl Into<String>,
        category: RiskCategory,
        comment: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone_number: phone_number.into(),
            country_code: country_code.into(),
            reporter_hash: reporter_hash.into(),
            category,
            comment: comment.into(),
            created_at: created_at.trunc_subsecs(6),
        }
    }

    /// True when this record is an automated-block event rather than a human report.
    pub fn is_automated(&self) -> bool {
        self.category.is_automated()
    }
}
