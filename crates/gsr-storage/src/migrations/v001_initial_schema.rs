//! v001: core tables (reports, scores, active_threats).

use rusqlite::Connection;

use gsr_core::errors::GsrResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> GsrResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS reports (
            id             TEXT PRIMARY KEY,
            phone_number   TEXT NOT NULL,
            country_code   TEXT NOT NULL,
            reporter_hash  TEXT NOT NULL,
            category       TEXT NOT NULL,
            comment        TEXT NOT NULL DEFAULT '',
            created_at     TEXT NOT NULL,
            expires_at     INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_reports_phone ON reports(phone_number);
        CREATE INDEX IF NOT EXISTS idx_reports_expires ON reports(expires_at);

        CREATE TABLE IF NOT EXISTS scores (
            phone_number        TEXT PRIMARY KEY,
            country_code        TEXT NOT NULL,
            score               REAL NOT NULL,
            risk_level          TEXT NOT NULL,
            last_activity       TEXT,
            velocity_hit_count  INTEGER NOT NULL DEFAULT 0,
            total_reports       INTEGER NOT NULL DEFAULT 0,
            expires_at          INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_scores_expires ON scores(expires_at);

        CREATE TABLE IF NOT EXISTS active_threats (
            country_code   TEXT NOT NULL,
            phone_number   TEXT NOT NULL,
            risk_level     TEXT NOT NULL,
            score          REAL NOT NULL,
            last_updated   TEXT NOT NULL,
            expires_at     INTEGER NOT NULL,
            PRIMARY KEY (country_code, phone_number)
        );

        CREATE INDEX IF NOT EXISTS idx_threats_expires ON active_threats(expires_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
