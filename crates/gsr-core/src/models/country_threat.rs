use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RiskTier;

/// One row of the per-country active-threat projection.
/// Exists only for numbers whose current tier is not `Safe`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryThreatEntry {
    pub country_code: String,
    pub tier: RiskTier,
    pub phone_number: String,
    pub score: f64,
    pub last_updated: DateTime<Utc>,
}
