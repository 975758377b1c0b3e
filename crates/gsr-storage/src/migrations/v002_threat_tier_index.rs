//! v002: Country/tier lookup index for bulk threat queries.

use rusqlite::Connection;

use gsr_core::errors::GsrResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> GsrResult<()> {
    conn.execute_batch(
        "
        CREATE INDEX IF NOT EXISTS idx_threats_country_tier
            ON active_threats(country_code, risk_level, score DESC);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
