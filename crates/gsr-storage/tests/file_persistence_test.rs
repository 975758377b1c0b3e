//! File-backed persistence: restart survival, WAL mode, read pool visibility.

use gsr_core::config::StorageConfig;
use gsr_core::models::{PhoneScore, Report, RiskCategory, RiskTier};
use gsr_core::traits::{IReportStore, IScoreStore};
use gsr_storage::pool::pragmas::verify_wal_mode;
use gsr_storage::StorageEngine;

const YEAR: u64 = 31_536_000;

fn config_for(dir: &tempfile::TempDir) -> StorageConfig {
    StorageConfig {
        db_path: dir.path().join("gsr.db").to_string_lossy().into_owned(),
        read_pool_size: 2,
        ..StorageConfig::default()
    }
}

#[test]
fn reports_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir);
    let r = Report::new("+56911111111", "CL", "h1", RiskCategory::Fraud, "");

    {
        let engine = StorageEngine::open(&config).unwrap();
        engine.save(&r, YEAR).unwrap();
        engine.checkpoint().unwrap();
    }

    let engine = StorageEngine::open(&config).unwrap();
    assert_eq!(engine.list_by_phone("+56911111111").unwrap(), vec![r]);
}

#[test]
fn read_pool_sees_writer_commits() {
    let dir = tempfile::tempdir().unwrap();
    let engine = StorageEngine::open(&config_for(&dir)).unwrap();
    let s = PhoneScore {
        phone_number: "+56911111111".into(),
        country_code: "CL".into(),
        score: 88.0,
        tier: RiskTier::Critical,
        last_activity: None,
        velocity_hit_count: 0,
        total_reports: 6,
    };
    engine.upsert(&s, YEAR).unwrap();
    for _ in 0..4 {
        assert_eq!(IScoreStore::get(&engine, "+56911111111").unwrap(), Some(s.clone()));
    }
}

#[test]
fn file_db_uses_wal() {
    let dir = tempfile::tempdir().unwrap();
    let engine = StorageEngine::open(&config_for(&dir)).unwrap();
    let wal = engine.pool().writer.with_conn(verify_wal_mode).unwrap();
    assert!(wal);
    assert!(engine.integrity_check().unwrap());
}
