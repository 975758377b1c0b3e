use std::sync::Arc;

use crate::errors::GsrResult;
use crate::models::{CountryThreatEntry, RiskTier};

/// Per-country projection of numbers at a non-safe tier.
/// Eventually consistent with the score store; never read during scoring.
pub trait IThreatIndex: Send + Sync {
    /// Insert or overwrite the entry for `(country, phone)`, refreshing the TTL.
    fn upsert(&self, entry: &CountryThreatEntry, ttl_secs: u64) -> GsrResult<()>;

    /// Retract the entry for `(country, phone)`. Absent entries are not an error.
    fn delete(&self, country_code: &str, phone_number: &str) -> GsrResult<()>;

    /// Unexpired entries for a country, highest score first.
    fn list_by_country(
        &self,
        country_code: &str,
        tier: Option<RiskTier>,
    ) -> GsrResult<Vec<CountryThreatEntry>>;
}

impl<T: IThreatIndex> IThreatIndex for Arc<T> {
    fn upsert(&self, entry: &CountryThreatEntry, ttl_secs: u64) -> GsrResult<()> { (**self).upsert(entry, ttl_secs) }
    fn delete(&self, country_code: &str, phone_number: &str) -> GsrResult<()> { (**self).delete(country_code, phone_number) }
    fn list_by_country(&self, country_code: &str, tier: Option<RiskTier>) -> GsrResult<Vec<CountryThreatEntry>> { (**self).list_by_country(country_code, tier) }
}
