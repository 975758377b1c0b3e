//! # gsr-storage
//!
//! SQLite-backed stores for the registry: raw reports, phone score
//! aggregates, and the per-country threat index. Every row carries an
//! `expires_at` deadline; expired rows are invisible to reads and removed
//! by [`StorageEngine::sweep_expired`].

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::{StorageEngine, SweepReport};

use chrono::{DateTime, SecondsFormat, Utc};
use gsr_core::errors::{GsrError, StorageError};

/// Map any displayable failure into a storage error.
pub(crate) fn to_storage_err(message: impl Into<String>) -> GsrError {
    GsrError::StorageError(StorageError::SqliteError {
        message: message.into(),
    })
}

/// Fixed-width RFC 3339 with microseconds, so stored timestamps sort lexically.
pub(crate) fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_ts(table: &str, raw: &str) -> Result<DateTime<Utc>, GsrError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            GsrError::StorageError(StorageError::CorruptRow {
                table: table.to_string(),
                details: format!("bad timestamp '{raw}': {e}"),
            })
        })
}

/// Absolute expiry (unix seconds) for a TTL starting at `now`.
pub(crate) fn expires_at(now: DateTime<Utc>, ttl_secs: u64) -> i64 {
    now.timestamp()
        .saturating_add(i64::try_from(ttl_secs).unwrap_or(i64::MAX))
}
