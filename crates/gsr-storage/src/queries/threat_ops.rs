//! Upsert, retract, and list country threat entries.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use gsr_core::errors::{GsrError, GsrResult, StorageError};
use gsr_core::models::{CountryThreatEntry, RiskTier};

use crate::{expires_at, format_ts, parse_ts, to_storage_err};

/// Insert or overwrite the entry for `(country, phone)`.
pub fn upsert_threat(
    conn: &Connection,
    entry: &CountryThreatEntry,
    ttl_secs: u64,
    now: DateTime<Utc>,
) -> GsrResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO active_threats (
            country_code, phone_number, risk_level, score, last_updated, expires_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            entry.country_code,
            entry.phone_number,
            entry.tier.as_str(),
            entry.score,
            format_ts(entry.last_updated),
            expires_at(now, ttl_secs),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Retract the entry for `(country, phone)`. Returns true if a row was removed.
pub fn delete_threat(conn: &Connection, country_code: &str, phone_number: &str) -> GsrResult<bool> {
    let deleted = conn
        .execute(
            "DELETE FROM active_threats WHERE country_code = ?1 AND phone_number = ?2",
            params![country_code, phone_number],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(deleted > 0)
}

/// Unexpired entries for a country, optionally one tier only, highest score first.
pub fn list_by_country(
    conn: &Connection,
    country_code: &str,
    tier: Option<RiskTier>,
    now: DateTime<Utc>,
) -> GsrResult<Vec<CountryThreatEntry>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT country_code, phone_number, risk_level, score, last_updated
             FROM active_threats
             WHERE country_code = ?1
               AND expires_at > ?2
               AND (?3 IS NULL OR risk_level = ?3)
             ORDER BY score DESC, phone_number ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(
            params![country_code, now.timestamp(), tier.map(|t| t.as_str())],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, String>(4)?,
                ))
            },
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut entries = Vec::new();
    for row in rows {
        let (country_code, phone_number, tier, score, last_updated) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let tier: RiskTier = tier.parse().map_err(|details| {
            GsrError::StorageError(StorageError::CorruptRow {
                table: "active_threats".into(),
                details,
            })
        })?;
        entries.push(CountryThreatEntry {
            country_code,
            tier,
            phone_number,
            score,
            last_updated: parse_ts("active_threats", &last_updated)?,
        });
    }
    Ok(entries)
}
