//! ReportService: ingestion, lookup, and recomputation over the three stores.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use gsr_core::cancellation::Cancellable;
use gsr_core::config::GsrConfig;
use gsr_core::constants::UNKNOWN_COUNTRY;
use gsr_core::errors::{GsrError, GsrResult};
use gsr_core::models::{CountryThreatEntry, PhoneScore, Report, RiskCategory, RiskTier};
use gsr_core::traits::{IIdentityHasher, IPhoneNormalizer, IReportStore, IScoreStore, IThreatIndex};
use gsr_core::CancellationToken;
use gsr_observability::{events, RecomputeMetrics};
use gsr_scoring::{PersistenceDecision, ScoringContext, ScoringEngine, ThreatProjection};

use crate::deadline::Deadline;
use crate::keyed_locks::KeyedLocks;
use crate::outcome::{BatchSummary, RecomputeOutcome};
use crate::validation;

/// The three stores the service reads and writes.
#[derive(Clone)]
pub struct Stores {
    pub reports: Arc<dyn IReportStore>,
    pub scores: Arc<dyn IScoreStore>,
    pub threats: Arc<dyn IThreatIndex>,
}

impl Stores {
    /// One backend serving all three roles.
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: IReportStore + IScoreStore + IThreatIndex + 'static,
    {
        Self {
            reports: store.clone(),
            scores: store.clone(),
            threats: store,
        }
    }
}

/// Registry service.
///
/// Recomputations of the same phone number are serialized in-process, so a
/// slow writer can never overwrite a newer result for that number.
pub struct ReportService {
    stores: Stores,
    normalizer: Arc<dyn IPhoneNormalizer>,
    hasher: Arc<dyn IIdentityHasher>,
    engine: ScoringEngine,
    config: GsrConfig,
    locks: KeyedLocks,
    metrics: Arc<RecomputeMetrics>,
}

impl ReportService {
    pub fn new(
        stores: Stores,
        normalizer: Arc<dyn IPhoneNormalizer>,
        hasher: Arc<dyn IIdentityHasher>,
        config: GsrConfig,
    ) -> Self {
        Self {
            stores,
            normalizer,
            hasher,
            engine: ScoringEngine::from_config(&config.scoring),
            config,
            locks: KeyedLocks::new(),
            metrics: Arc::new(RecomputeMetrics::new()),
        }
    }

    pub fn config(&self) -> &GsrConfig {
        &self.config
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn metrics(&self) -> Arc<RecomputeMetrics> {
        Arc::clone(&self.metrics)
    }

    // ── ingestion ───────────────────────────────────────────────────────────

    /// Validate and record a human report. Nothing is stored on failure.
    pub fn ingest_report(
        &self,
        raw_phone: &str,
        raw_reporter: &str,
        category: &str,
        comment: &str,
    ) -> GsrResult<Report> {
        let phone = self.normalizer.normalize(raw_phone)?;
        let reporter = validation::reporter(raw_reporter)?;
        let category = validation::human_category(category)?;
        let comment = validation::comment(comment, self.config.privacy.max_comment_len)?;

        let report = Report::new(
            phone.e164,
            phone.country_code,
            self.hasher.hash_identity(reporter),
            category,
            comment,
        );
        self.save(&report)?;
        Ok(report)
    }

    /// Record an automated-block event from a client app.
    pub fn ingest_auto_block(&self, raw_phone: &str, app_identity: &str) -> GsrResult<Report> {
        let phone = self.normalizer.normalize(raw_phone)?;
        let app = validation::app_identity(app_identity)?;

        let report = Report::new(
            phone.e164,
            phone.country_code,
            self.hasher.hash_identity(app),
            RiskCategory::AutoBlock,
            "",
        );
        self.save(&report)?;
        Ok(report)
    }

    fn save(&self, report: &Report) -> GsrResult<()> {
        let span = gsr_observability::ingest_span!(report.phone_number, report.category);
        let _entered = span.enter();

        self.stores
            .reports
            .save(report, self.config.storage.report_ttl_secs)?;
        self.metrics.record_ingested();
        events::report_ingested(
            &report.phone_number,
            &report.country_code,
            report.category.as_str(),
        );
        Ok(())
    }

    // ── lookups ─────────────────────────────────────────────────────────────

    /// Current risk profile. Unknown numbers get the unscored safe profile.
    ///
    /// Input that parses as a phone number is looked up by its E.164 form;
    /// anything else is looked up verbatim.
    pub fn check_risk(&self, raw_phone: &str) -> GsrResult<PhoneScore> {
        let phone = self.lookup_key(raw_phone);
        Ok(self
            .stores
            .scores
            .get(&phone)?
            .unwrap_or_else(|| PhoneScore::unscored(phone)))
    }

    /// Threat entries for a country, highest score first.
    pub fn threats_for_country(
        &self,
        country_code: &str,
        tier: Option<RiskTier>,
    ) -> GsrResult<Vec<CountryThreatEntry>> {
        let country = country_code.trim().to_ascii_uppercase();
        self.stores.threats.list_by_country(&country, tier)
    }

    fn lookup_key(&self, raw_phone: &str) -> String {
        match self.normalizer.normalize(raw_phone) {
            Ok(phone) => phone.e164,
            Err(_) => raw_phone.trim().to_string(),
        }
    }

    // ── recomputation ───────────────────────────────────────────────────────

    /// Recompute one phone number as of now.
    pub fn recompute(&self, raw_phone: &str, token: &CancellationToken) -> GsrResult<RecomputeOutcome> {
        self.recompute_at(raw_phone, Utc::now(), token)
    }

    /// Recompute one phone number against an explicit clock.
    ///
    /// Runs under the number's lock. Cancellation and the deadline are
    /// checked before every store call; a failure leaves earlier writes in
    /// place and the next recomputation converges them.
    pub fn recompute_at(
        &self,
        raw_phone: &str,
        now: DateTime<Utc>,
        token: &CancellationToken,
    ) -> GsrResult<RecomputeOutcome> {
        let phone = self.lookup_key(raw_phone);
        let span = gsr_observability::recompute_span!(phone);
        let _entered = span.enter();

        let deadline = Deadline::start(self.config.recompute.deadline_ms);
        let result = self
            .locks
            .with_lock(&phone, || self.recompute_locked(&phone, now, token, &deadline));

        if let Err(e) = &result {
            self.metrics.record_failure();
            tracing::warn!(phone = %phone, error = %e, "recompute failed");
        }
        result
    }

    fn recompute_locked(
        &self,
        phone: &str,
        now: DateTime<Utc>,
        token: &CancellationToken,
        deadline: &Deadline,
    ) -> GsrResult<RecomputeOutcome> {
        let checkpoint = |operation: &str| -> GsrResult<()> {
            token.check(operation)?;
            deadline.check(operation)
        };

        checkpoint("load history")?;
        let history = self.stores.reports.list_by_phone(phone)?;

        let ctx = ScoringContext::at(now);
        let assessment = self.engine.assess(phone, &history, &ctx);
        let ttl = self.config.scoring.score_ttl_secs;

        match assessment.decision {
            PersistenceDecision::Purge {
                phone_number,
                country_code,
                reason,
            } => {
                let country = match country_code {
                    Some(country) => country,
                    None => {
                        checkpoint("load prior score")?;
                        self.stores
                            .scores
                            .get(phone)?
                            .map(|prior| prior.country_code)
                            .filter(|c| !c.is_empty())
                            .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string())
                    }
                };

                checkpoint("delete score")?;
                self.stores.scores.delete(phone, &country)?;
                checkpoint("retract threat")?;
                self.stores.threats.delete(&country, phone)?;
                events::threat_reconciled(phone, &country, "retract");

                self.metrics.record_purged();
                events::score_purged(phone, &reason.describe());

                Ok(RecomputeOutcome::Purged {
                    phone_number,
                    country_code: country,
                    reason,
                    breakdown: assessment.breakdown,
                })
            }
            PersistenceDecision::Persist { score, threat } => {
                let breakdown = assessment
                    .breakdown
                    .unwrap_or_else(|| self.engine.calculate_breakdown(&history, &ctx));

                checkpoint("upsert score")?;
                self.stores.scores.upsert(&score, ttl)?;

                checkpoint("reconcile threat")?;
                match &threat {
                    ThreatProjection::Upsert(entry) => {
                        self.stores.threats.upsert(entry, ttl)?;
                        events::threat_reconciled(phone, &entry.country_code, "upsert");
                    }
                    ThreatProjection::Retract { country_code } => {
                        self.stores.threats.delete(country_code, phone)?;
                        events::threat_reconciled(phone, country_code, "retract");
                    }
                }

                if breakdown.swarm_override {
                    events::swarm_override_applied(phone, breakdown.velocity_hits, breakdown.raw_score);
                }
                self.metrics.record_persisted(breakdown.swarm_override);
                events::score_recomputed(phone, score.score, score.tier.as_str(), score.total_reports);

                Ok(RecomputeOutcome::Persisted { score, breakdown })
            }
        }
    }

    /// Recompute every phone with unexpired reports.
    pub fn recompute_all(&self, token: &CancellationToken) -> GsrResult<BatchSummary> {
        self.recompute_all_at(Utc::now(), token)
    }

    /// Batch recomputation in parallel. Each phone takes its own lock; one
    /// failure is recorded and the batch continues.
    pub fn recompute_all_at(
        &self,
        now: DateTime<Utc>,
        token: &CancellationToken,
    ) -> GsrResult<BatchSummary> {
        token.check("list phones")?;
        let phones = self.stores.reports.list_phones()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.recompute.batch_parallelism)
            .build()
            .map_err(|e| GsrError::ConfigError(format!("recompute thread pool: {e}")))?;

        let results: Vec<(String, GsrResult<RecomputeOutcome>)> = pool.install(|| {
            phones
                .par_iter()
                .map(|phone| (phone.clone(), self.recompute_at(phone, now, token)))
                .collect()
        });
        self.locks.prune();

        let mut summary = BatchSummary {
            phones: phones.len(),
            ..BatchSummary::default()
        };
        for (phone, result) in results {
            match result {
                Ok(outcome) if outcome.is_purged() => summary.purged += 1,
                Ok(_) => summary.persisted += 1,
                Err(GsrError::Cancelled { .. }) => summary.cancelled += 1,
                Err(e) => summary.failures.push((phone, e.to_string())),
            }
        }

        tracing::info!(
            phones = summary.phones,
            persisted = summary.persisted,
            purged = summary.purged,
            cancelled = summary.cancelled,
            failed = summary.failures.len(),
            "batch recompute finished"
        );
        Ok(summary)
    }
}
