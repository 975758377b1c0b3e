use std::sync::Arc;

use crate::errors::GsrResult;
use crate::models::Report;

/// Append-only evidence store.
pub trait IReportStore: Send + Sync {
    /// Persist a report. It expires `ttl_secs` after the write.
    fn save(&self, report: &Report, ttl_secs: u64) -> GsrResult<()>;

    /// All unexpired reports for a phone number. Callers must not assume any order.
    fn list_by_phone(&self, phone_number: &str) -> GsrResult<Vec<Report>>;

    /// Distinct phone numbers with at least one unexpired report.
    fn list_phones(&self) -> GsrResult<Vec<String>>;
}

impl<T: IReportStore> IReportStore for Arc<T> {
    fn save(&self, report: &Report, ttl_secs: u64) -> GsrResult<()> { (**self).save(report, ttl_secs) }
    fn list_by_phone(&self, phone_number: &str) -> GsrResult<Vec<Report>> { (**self).list_by_phone(phone_number) }
    fn list_phones(&self) -> GsrResult<Vec<String>> { (**self).list_phones() }
}
