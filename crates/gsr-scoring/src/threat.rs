use chrono::{DateTime, Utc};
use gsr_core::models::{CountryThreatEntry, PhoneScore};

/// Effect of a persisted aggregate on the country threat index.
#[derive(Debug, Clone, PartialEq)]
pub enum ThreatProjection {
    /// Non-safe tier: (re)write the entry with a fresh TTL.
    Upsert(CountryThreatEntry),
    /// Safe tier: any existing entry for this number is stale.
    Retract { country_code: String },
}

/// Project a persisted aggregate into the threat index.
///
/// The entry mirrors the aggregate's score, tier, and activity timestamp.
pub fn project(score: &PhoneScore, now: DateTime<Utc>) -> ThreatProjection {
    if score.tier.is_safe() {
        return ThreatProjection::Retract {
            country_code: score.country_code.clone(),
        };
    }
    ThreatProjection::Upsert(CountryThreatEntry {
        country_code: score.country_code.clone(),
        tier: score.tier,
        phone_number: score.phone_number.clone(),
        score: score.score,
        last_updated: score.last_activity.unwrap_or(now),
    })
}
