#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use gsr_core::config::GsrConfig;
use gsr_core::errors::{GsrError, GsrResult, StorageError, ValidationError};
use gsr_core::models::{CountryThreatEntry, NormalizedPhone, PhoneScore, Report, RiskCategory, RiskTier};
use gsr_core::traits::{IPhoneNormalizer, IReportStore, IScoreStore, IThreatIndex};
use gsr_privacy::Blake3IdentityHasher;
use gsr_registry::{ReportService, Stores};
use gsr_storage::StorageEngine;

pub const CL_PHONE: &str = "+56961234567";
pub const CL_OTHER: &str = "+56961234568";
pub const AR_PHONE: &str = "+5491123456789";

/// Deterministic normalizer: strips spaces, requires a leading `+`, maps
/// the calling code to a region for the handful of prefixes tests use.
pub struct PrefixNormalizer;

impl IPhoneNormalizer for PrefixNormalizer {
    fn normalize(&self, raw: &str) -> GsrResult<NormalizedPhone> {
        let e164: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if !e164.starts_with('+') || e164.len() < 8 || !e164[1..].chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidPhoneFormat { input: raw.to_string() }.into());
        }
        let country = if e164.starts_with("+56") {
            "CL"
        } else if e164.starts_with("+54") {
            "AR"
        } else {
            return Err(ValidationError::UndetectableRegion { number: e164 }.into());
        };
        Ok(NormalizedPhone {
            e164,
            country_code: country.to_string(),
        })
    }
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn days_ago(days: f64) -> DateTime<Utc> {
    now() - Duration::milliseconds((days * 86_400_000.0) as i64)
}

pub struct Harness {
    pub store: Arc<StorageEngine>,
    pub service: ReportService,
}

pub fn harness() -> Harness {
    harness_with(GsrConfig::default())
}

pub fn harness_with(config: GsrConfig) -> Harness {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let service = ReportService::new(
        Stores::shared(Arc::clone(&store)),
        Arc::new(PrefixNormalizer),
        Arc::new(Blake3IdentityHasher::new(b"test-secret")),
        config,
    );
    Harness { store, service }
}

impl Harness {
    /// Store a report with an explicit age relative to `now()`.
    pub fn seed(&self, phone: &str, reporter: &str, category: RiskCategory, age_days: f64) {
        let country = if phone.starts_with("+54") { "AR" } else { "CL" };
        let report = Report::at(phone, country, reporter, category, "", days_ago(age_days));
        self.store.save(&report, 47_304_000).unwrap();
    }
}

/// Store that delegates to a real engine but fails chosen calls on demand.
#[derive(Default)]
pub struct Faults {
    pub list_reports: AtomicBool,
    pub upsert_score: AtomicBool,
    pub upsert_threat: AtomicBool,
}

pub struct FaultyStore {
    pub inner: Arc<StorageEngine>,
    pub faults: Faults,
}

fn injected(op: &str, flag: &AtomicBool) -> GsrResult<()> {
    if flag.load(Ordering::SeqCst) {
        return Err(GsrError::StorageError(StorageError::SqliteError {
            message: format!("{op}: disk I/O error"),
        }));
    }
    Ok(())
}

impl IReportStore for FaultyStore {
    fn save(&self, report: &Report, ttl_secs: u64) -> GsrResult<()> {
        IReportStore::save(&*self.inner, report, ttl_secs)
    }
    fn list_by_phone(&self, phone_number: &str) -> GsrResult<Vec<Report>> {
        injected("list reports", &self.faults.list_reports)?;
        IReportStore::list_by_phone(&*self.inner, phone_number)
    }
    fn list_phones(&self) -> GsrResult<Vec<String>> {
        IReportStore::list_phones(&*self.inner)
    }
}

impl IScoreStore for FaultyStore {
    fn get(&self, phone_number: &str) -> GsrResult<Option<PhoneScore>> {
        IScoreStore::get(&*self.inner, phone_number)
    }
    fn upsert(&self, score: &PhoneScore, ttl_secs: u64) -> GsrResult<()> {
        injected("upsert score", &self.faults.upsert_score)?;
        IScoreStore::upsert(&*self.inner, score, ttl_secs)
    }
    fn delete(&self, phone_number: &str, country_code: &str) -> GsrResult<()> {
        IScoreStore::delete(&*self.inner, phone_number, country_code)
    }
}

impl IThreatIndex for FaultyStore {
    fn upsert(&self, entry: &CountryThreatEntry, ttl_secs: u64) -> GsrResult<()> {
        injected("upsert threat", &self.faults.upsert_threat)?;
        IThreatIndex::upsert(&*self.inner, entry, ttl_secs)
    }
    fn delete(&self, country_code: &str, phone_number: &str) -> GsrResult<()> {
        IThreatIndex::delete(&*self.inner, country_code, phone_number)
    }
    fn list_by_country(
        &self,
        country_code: &str,
        tier: Option<RiskTier>,
    ) -> GsrResult<Vec<CountryThreatEntry>> {
        IThreatIndex::list_by_country(&*self.inner, country_code, tier)
    }
}

pub struct FaultyHarness {
    pub store: Arc<FaultyStore>,
    pub service: ReportService,
}

pub fn faulty_harness() -> FaultyHarness {
    let store = Arc::new(FaultyStore {
        inner: Arc::new(StorageEngine::open_in_memory().unwrap()),
        faults: Faults::default(),
    });
    let service = ReportService::new(
        Stores::shared(Arc::clone(&store)),
        Arc::new(PrefixNormalizer),
        Arc::new(Blake3IdentityHasher::new(b"test-secret")),
        GsrConfig::default(),
    );
    FaultyHarness { store, service }
}

impl FaultyHarness {
    pub fn seed(&self, phone: &str, reporter: &str, category: RiskCategory, age_days: f64) {
        let report = Report::at(phone, "CL", reporter, category, "", days_ago(age_days));
        IReportStore::save(&*self.store.inner, &report, 47_304_000).unwrap();
    }

    pub fn fail(&self, flag: impl Fn(&Faults) -> &AtomicBool, on: bool) {
        flag(&self.store.faults).store(on, Ordering::SeqCst);
    }
}
