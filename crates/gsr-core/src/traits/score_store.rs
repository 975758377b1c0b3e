use std::sync::Arc;

use crate::errors::GsrResult;
use crate::models::PhoneScore;

/// Key-addressed store of derived aggregates.
pub trait IScoreStore: Send + Sync {
    fn get(&self, phone_number: &str) -> GsrResult<Option<PhoneScore>>;

    /// Insert or overwrite, refreshing the TTL.
    fn upsert(&self, score: &PhoneScore, ttl_secs: u64) -> GsrResult<()>;

    /// Remove the aggregate. Deleting an absent key is not an error.
    fn delete(&self, phone_number: &str, country_code: &str) -> GsrResult<()>;
}

impl<T: IScoreStore> IScoreStore for Arc<T> {
    fn get(&self, phone_number: &str) -> GsrResult<Option<PhoneScore>> { (**self).get(phone_number) }
    fn upsert(&self, score: &PhoneScore, ttl_secs: u64) -> GsrResult<()> { (**self).upsert(score, ttl_secs) }
    fn delete(&self, phone_number: &str, country_code: &str) -> GsrResult<()> { (**self).delete(phone_number, country_code) }
}
