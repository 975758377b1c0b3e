//! Store failures surface as errors, count as failures, and converge on retry.

mod common;

use common::*;
use gsr_core::errors::{GsrError, StorageError};
use gsr_core::models::{RiskCategory, RiskTier};
use gsr_core::traits::{IScoreStore, IThreatIndex};
use gsr_core::CancellationToken;

fn seed_fraud(h: &FaultyHarness, phone: &str) {
    for i in 0..6 {
        h.seed(phone, &format!("victim-{i}"), RiskCategory::Fraud, 1.0);
    }
}

fn is_sqlite_error(err: &GsrError) -> bool {
    matches!(err, GsrError::StorageError(StorageError::SqliteError { .. }))
}

#[test]
fn history_read_failure_is_returned_and_counted() {
    let h = faulty_harness();
    seed_fraud(&h, CL_PHONE);
    h.fail(|f| &f.list_reports, true);

    let err = h
        .service
        .recompute_at(CL_PHONE, now(), &CancellationToken::new())
        .unwrap_err();
    assert!(is_sqlite_error(&err));
    assert!(err.is_retryable());
    assert!(!err.is_client_error());
    assert_eq!(h.service.metrics().snapshot().failures, 1);
    assert!(IScoreStore::get(&*h.store.inner, CL_PHONE).unwrap().is_none());
}

#[test]
fn score_write_failure_leaves_nothing_behind() {
    let h = faulty_harness();
    seed_fraud(&h, CL_PHONE);
    h.fail(|f| &f.upsert_score, true);

    let err = h
        .service
        .recompute_at(CL_PHONE, now(), &CancellationToken::new())
        .unwrap_err();
    assert!(is_sqlite_error(&err));
    assert!(IScoreStore::get(&*h.store.inner, CL_PHONE).unwrap().is_none());
    assert!(IThreatIndex::list_by_country(&*h.store.inner, "CL", None).unwrap().is_empty());
    assert_eq!(h.service.metrics().snapshot().persisted, 0);
}

#[test]
fn threat_write_failure_converges_on_next_recompute() {
    let h = faulty_harness();
    seed_fraud(&h, CL_PHONE);
    h.fail(|f| &f.upsert_threat, true);

    let err = h
        .service
        .recompute_at(CL_PHONE, now(), &CancellationToken::new())
        .unwrap_err();
    assert!(is_sqlite_error(&err));
    // The score landed; the index is behind.
    let stored = IScoreStore::get(&*h.store.inner, CL_PHONE).unwrap().unwrap();
    assert_eq!(stored.tier, RiskTier::Critical);
    assert!(IThreatIndex::list_by_country(&*h.store.inner, "CL", None).unwrap().is_empty());
    assert_eq!(h.service.metrics().snapshot().failures, 1);

    h.fail(|f| &f.upsert_threat, false);
    let outcome = h
        .service
        .recompute_at(CL_PHONE, now(), &CancellationToken::new())
        .unwrap();
    assert_eq!(outcome.score(), Some(&stored));

    let indexed = IThreatIndex::list_by_country(&*h.store.inner, "CL", None).unwrap();
    assert_eq!(indexed.len(), 1);
    assert_eq!(indexed[0].phone_number, CL_PHONE);
    assert_eq!(indexed[0].tier, RiskTier::Critical);
}

#[test]
fn batch_records_per_phone_failures_and_continues() {
    let h = faulty_harness();
    seed_fraud(&h, CL_PHONE);
    seed_fraud(&h, CL_OTHER);
    h.fail(|f| &f.upsert_score, true);

    let summary = h
        .service
        .recompute_all_at(now(), &CancellationToken::new())
        .unwrap();
    assert_eq!(summary.phones, 2);
    assert_eq!(summary.failures.len(), 2);
    assert!(summary.failures.iter().all(|(_, msg)| msg.contains("upsert score")));
    assert!(!summary.is_clean());
}
