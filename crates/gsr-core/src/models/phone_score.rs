use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RiskTier;

/// Current risk state of a phone number. Produced only by the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneScore {
    pub phone_number: String,
    pub country_code: String,
    /// 0.00 to 100.00, rounded to two decimals.
    pub score: f64,
    pub tier: RiskTier,
    /// Most recent human report, or the recompute time when the swarm override fired.
    /// `None` only on the synthesized profile of an unscored number.
    pub last_activity: Option<DateTime<Utc>>,
    /// Automated blocks inside the velocity window.
    pub velocity_hit_count: u32,
    pub total_reports: u32,
}

impl PhoneScore {
    /// The profile reported for a number with no stored aggregate.
    pub fn unscored(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            country_code: String::new(),
            score: 0.0,
            tier: RiskTier::Safe,
            last_activity: None,
            velocity_hit_count: 0,
            total_reports: 0,
        }
    }
}
