//! Get, upsert, delete phone score aggregates.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use gsr_core::errors::{GsrError, GsrResult, StorageError};
use gsr_core::models::{PhoneScore, RiskTier};

use crate::{expires_at, format_ts, parse_ts, to_storage_err};

/// Fetch an unexpired aggregate.
pub fn get_score(
    conn: &Connection,
    phone_number: &str,
    now: DateTime<Utc>,
) -> GsrResult<Option<PhoneScore>> {
    let row = conn
        .query_row(
            "SELECT phone_number, country_code, score, risk_level, last_activity,
                    velocity_hit_count, total_reports
             FROM scores
             WHERE phone_number = ?1 AND expires_at > ?2",
            params![phone_number, now.timestamp()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, u32>(5)?,
                    row.get::<_, u32>(6)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let Some((phone_number, country_code, score, tier, last_activity, velocity, total)) = row
    else {
        return Ok(None);
    };

    let tier: RiskTier = tier.parse().map_err(|details| {
        GsrError::StorageError(StorageError::CorruptRow {
            table: "scores".into(),
            details,
        })
    })?;
    let last_activity = last_activity
        .map(|raw| parse_ts("scores", &raw))
        .transpose()?;

    Ok(Some(PhoneScore {
        phone_number,
        country_code,
        score,
        tier,
        last_activity,
        velocity_hit_count: velocity,
        total_reports: total,
    }))
}

/// Insert or overwrite an aggregate, refreshing its TTL.
pub fn upsert_score(
    conn: &Connection,
    score: &PhoneScore,
    ttl_secs: u64,
    now: DateTime<Utc>,
) -> GsrResult<()> {
    conn.execute(
        "INSERT INTO scores (
            phone_number, country_code, score, risk_level, last_activity,
            velocity_hit_count, total_reports, expires_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        ON CONFLICT(phone_number) DO UPDATE SET
            country_code = excluded.country_code,
            score = excluded.score,
            risk_level = excluded.risk_level,
            last_activity = excluded.last_activity,
            velocity_hit_count = excluded.velocity_hit_count,
            total_reports = excluded.total_reports,
            expires_at = excluded.expires_at",
        params![
            score.phone_number,
            score.country_code,
            score.score,
            score.tier.as_str(),
            score.last_activity.map(format_ts),
            score.velocity_hit_count,
            score.total_reports,
            expires_at(now, ttl_secs),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Delete an aggregate. Returns true if a row was removed.
pub fn delete_score(conn: &Connection, phone_number: &str) -> GsrResult<bool> {
    let deleted = conn
        .execute("DELETE FROM scores WHERE phone_number = ?1", params![phone_number])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(deleted > 0)
}
