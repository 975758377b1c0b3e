//! StorageEngine: owns the ConnectionPool and implements the report store,
//! score store, and threat index traits on top of it.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use gsr_core::config::StorageConfig;
use gsr_core::errors::GsrResult;
use gsr_core::models::{CountryThreatEntry, PhoneScore, Report, RiskTier};
use gsr_core::traits::{IReportStore, IScoreStore, IThreatIndex};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{maintenance, report_ops, score_ops, threat_ops};

/// Rows removed by one TTL sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub reports: usize,
    pub scores: usize,
    pub threats: usize,
}

impl SweepReport {
    pub fn total(&self) -> usize {
        self.reports + self.scores + self.threats
    }
}

/// The main storage engine.
///
/// Reads filter out rows whose `expires_at` has passed, so expiry is exact
/// even before a sweep physically removes them. The `*_at` variants take an
/// explicit clock for callers (and tests) that need one.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When false, all reads go through the writer (in-memory mode, where
    /// read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a file-backed engine using the given storage settings.
    pub fn open(config: &StorageConfig) -> GsrResult<Self> {
        Self::open_path(
            Path::new(&config.db_path),
            config.read_pool_size,
            config.busy_timeout_ms,
        )
    }

    /// Open a file-backed engine at an explicit path.
    pub fn open_path(path: &Path, read_pool_size: usize, busy_timeout_ms: u32) -> GsrResult<Self> {
        let pool = ConnectionPool::open(path, read_pool_size, busy_timeout_ms)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        tracing::info!(path = %path.display(), "storage engine opened");
        Ok(engine)
    }

    /// Open an in-memory engine (for testing).
    pub fn open_in_memory() -> GsrResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> GsrResult<()> {
        self.pool.writer.with_conn(|conn| {
            let applied = migrations::run_migrations(conn)?;
            if applied > 0 {
                tracing::info!(applied, latest = migrations::LATEST_VERSION, "schema migrated");
            }
            Ok(())
        })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    fn with_reader<F, T>(&self, f: F) -> GsrResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> GsrResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn(f)
        }
    }

    // ── clock-explicit variants ─────────────────────────────────────────────

    pub fn save_report_at(&self, report: &Report, ttl_secs: u64, now: DateTime<Utc>) -> GsrResult<()> {
        self.pool
            .writer
            .with_conn(|conn| report_ops::insert_report(conn, report, ttl_secs, now))
    }

    pub fn list_reports_at(&self, phone_number: &str, now: DateTime<Utc>) -> GsrResult<Vec<Report>> {
        self.with_reader(|conn| report_ops::list_by_phone(conn, phone_number, now))
    }

    pub fn list_phones_at(&self, now: DateTime<Utc>) -> GsrResult<Vec<String>> {
        self.with_reader(|conn| report_ops::list_phones(conn, now))
    }

    pub fn get_score_at(&self, phone_number: &str, now: DateTime<Utc>) -> GsrResult<Option<PhoneScore>> {
        self.with_reader(|conn| score_ops::get_score(conn, phone_number, now))
    }

    pub fn upsert_score_at(&self, score: &PhoneScore, ttl_secs: u64, now: DateTime<Utc>) -> GsrResult<()> {
        self.pool
            .writer
            .with_conn(|conn| score_ops::upsert_score(conn, score, ttl_secs, now))
    }

    pub fn upsert_threat_at(
        &self,
        entry: &CountryThreatEntry,
        ttl_secs: u64,
        now: DateTime<Utc>,
    ) -> GsrResult<()> {
        self.pool
            .writer
            .with_conn(|conn| threat_ops::upsert_threat(conn, entry, ttl_secs, now))
    }

    pub fn list_threats_at(
        &self,
        country_code: &str,
        tier: Option<RiskTier>,
        now: DateTime<Utc>,
    ) -> GsrResult<Vec<CountryThreatEntry>> {
        self.with_reader(|conn| threat_ops::list_by_country(conn, country_code, tier, now))
    }

    // ── maintenance ─────────────────────────────────────────────────────────

    /// Physically delete every row whose TTL elapsed at or before `now`.
    pub fn sweep_expired(&self, now: DateTime<Utc>) -> GsrResult<SweepReport> {
        let report = self.pool.writer.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| crate::to_storage_err(e.to_string()))?;
            let report = SweepReport {
                reports: maintenance::sweep_reports(&tx, now)?,
                scores: maintenance::sweep_scores(&tx, now)?,
                threats: maintenance::sweep_threats(&tx, now)?,
            };
            tx.commit()
                .map_err(|e| crate::to_storage_err(e.to_string()))?;
            if report.total() > 0 {
                maintenance::incremental_vacuum(conn, 100)?;
            }
            Ok(report)
        })?;
        tracing::debug!(
            reports = report.reports,
            scores = report.scores,
            threats = report.threats,
            "expired rows swept"
        );
        Ok(report)
    }

    pub fn integrity_check(&self) -> GsrResult<bool> {
        self.pool.writer.with_conn(maintenance::integrity_check)
    }

    pub fn checkpoint(&self) -> GsrResult<()> {
        self.pool.writer.with_conn(maintenance::wal_checkpoint)
    }
}

impl IReportStore for StorageEngine {
    fn save(&self, report: &Report, ttl_secs: u64) -> GsrResult<()> {
        self.save_report_at(report, ttl_secs, Utc::now())
    }

    fn list_by_phone(&self, phone_number: &str) -> GsrResult<Vec<Report>> {
        self.list_reports_at(phone_number, Utc::now())
    }

    fn list_phones(&self) -> GsrResult<Vec<String>> {
        self.list_phones_at(Utc::now())
    }
}

impl IScoreStore for StorageEngine {
    fn get(&self, phone_number: &str) -> GsrResult<Option<PhoneScore>> {
        self.get_score_at(phone_number, Utc::now())
    }

    fn upsert(&self, score: &PhoneScore, ttl_secs: u64) -> GsrResult<()> {
        self.upsert_score_at(score, ttl_secs, Utc::now())
    }

    // Scores are keyed by phone alone; the country is part of the trait for
    // stores partitioned by region.
    fn delete(&self, phone_number: &str, _country_code: &str) -> GsrResult<()> {
        self.pool
            .writer
            .with_conn(|conn| score_ops::delete_score(conn, phone_number).map(|_| ()))
    }
}

impl IThreatIndex for StorageEngine {
    fn upsert(&self, entry: &CountryThreatEntry, ttl_secs: u64) -> GsrResult<()> {
        self.upsert_threat_at(entry, ttl_secs, Utc::now())
    }

    fn delete(&self, country_code: &str, phone_number: &str) -> GsrResult<()> {
        self.pool.writer.with_conn(|conn| {
            threat_ops::delete_threat(conn, country_code, phone_number).map(|_| ())
        })
    }

    fn list_by_country(
        &self,
        country_code: &str,
        tier: Option<RiskTier>,
    ) -> GsrResult<Vec<CountryThreatEntry>> {
        self.list_threats_at(country_code, tier, Utc::now())
    }
}
