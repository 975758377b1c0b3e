//! TTL sweeps, incremental vacuum, WAL checkpoint, integrity check.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use gsr_core::errors::GsrResult;

use crate::to_storage_err;

/// Delete rows whose TTL has elapsed from one table. Returns the count deleted.
fn sweep_table(conn: &Connection, table: &str, now: DateTime<Utc>) -> GsrResult<usize> {
    conn.execute(
        &format!("DELETE FROM {table} WHERE expires_at <= ?1"),
        params![now.timestamp()],
    )
    .map_err(|e| to_storage_err(format!("sweep {table}: {e}")))
}

pub fn sweep_reports(conn: &Connection, now: DateTime<Utc>) -> GsrResult<usize> {
    sweep_table(conn, "reports", now)
}

pub fn sweep_scores(conn: &Connection, now: DateTime<Utc>) -> GsrResult<usize> {
    sweep_table(conn, "scores", now)
}

pub fn sweep_threats(conn: &Connection, now: DateTime<Utc>) -> GsrResult<usize> {
    sweep_table(conn, "active_threats", now)
}

/// Run incremental vacuum.
pub fn incremental_vacuum(conn: &Connection, pages: u32) -> GsrResult<()> {
    conn.execute_batch(&format!("PRAGMA incremental_vacuum({pages})"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// WAL checkpoint.
pub fn wal_checkpoint(conn: &Connection) -> GsrResult<()> {
    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE)")
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Run integrity check. Returns true if database is OK.
pub fn integrity_check(conn: &Connection) -> GsrResult<bool> {
    let result: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(result == "ok")
}
