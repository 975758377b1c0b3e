//! Insert and list raw reports.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use gsr_core::errors::{GsrError, GsrResult, StorageError};
use gsr_core::models::{Report, RiskCategory};

use crate::{expires_at, format_ts, parse_ts, to_storage_err};

/// Insert a report that expires `ttl_secs` after `now`.
pub fn insert_report(
    conn: &Connection,
    report: &Report,
    ttl_secs: u64,
    now: DateTime<Utc>,
) -> GsrResult<()> {
    conn.execute(
        "INSERT INTO reports (
            id, phone_number, country_code, reporter_hash, category, comment, created_at, expires_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            report.id.to_string(),
            report.phone_number,
            report.country_code,
            report.reporter_hash,
            report.category.as_str(),
            report.comment,
            format_ts(report.created_at),
            expires_at(now, ttl_secs),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// All unexpired reports for a phone number, in no particular order.
pub fn list_by_phone(
    conn: &Connection,
    phone_number: &str,
    now: DateTime<Utc>,
) -> GsrResult<Vec<Report>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, phone_number, country_code, reporter_hash, category, comment, created_at
             FROM reports
             WHERE phone_number = ?1 AND expires_at > ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![phone_number, now.timestamp()], raw_report)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut reports = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        reports.push(raw.into_report()?);
    }
    Ok(reports)
}

/// Distinct phone numbers with at least one unexpired report.
pub fn list_phones(conn: &Connection, now: DateTime<Utc>) -> GsrResult<Vec<String>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT DISTINCT phone_number FROM reports WHERE expires_at > ?1 ORDER BY phone_number",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![now.timestamp()], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Columns as stored, before domain validation.
struct RawReport {
    id: String,
    phone_number: String,
    country_code: String,
    reporter_hash: String,
    category: String,
    comment: String,
    created_at: String,
}

fn raw_report(row: &Row<'_>) -> rusqlite::Result<RawReport> {
    Ok(RawReport {
        id: row.get(0)?,
        phone_number: row.get(1)?,
        country_code: row.get(2)?,
        reporter_hash: row.get(3)?,
        category: row.get(4)?,
        comment: row.get(5)?,
        created_at: row.get(6)?,
    })
}

impl RawReport {
    fn into_report(self) -> GsrResult<Report> {
        let corrupt = |details: String| {
            GsrError::StorageError(StorageError::CorruptRow {
                table: "reports".into(),
                details,
            })
        };
        let id = Uuid::parse_str(&self.id).map_err(|e| corrupt(format!("bad id '{}': {e}", self.id)))?;
        let category: RiskCategory = self
            .category
            .parse()
            .map_err(|e| corrupt(format!("report {id}: {e}")))?;
        Ok(Report {
            id,
            phone_number: self.phone_number,
            country_code: self.country_code,
            reporter_hash: self.reporter_hash,
            category,
            comment: self.comment,
            created_at: parse_ts("reports", &self.created_at)?,
        })
    }
}
