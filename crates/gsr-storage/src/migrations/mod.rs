//! Versioned schema migrations, applied in order inside one transaction each.

mod v001_initial_schema;
mod v002_threat_tier_index;

use rusqlite::{params, Connection};

use gsr_core::errors::{GsrError, GsrResult, StorageError};

use crate::to_storage_err;

type MigrationFn = fn(&Connection) -> GsrResult<()>;

/// All migrations, in version order.
const MIGRATIONS: &[(u32, MigrationFn)] = &[
    (1, v001_initial_schema::migrate),
    (2, v002_threat_tier_index::migrate),
];

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 2;

/// Current schema version of a database (0 when uninitialized).
pub fn current_version(conn: &Connection) -> GsrResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply every pending migration. Returns the number applied.
pub fn run_migrations(conn: &Connection) -> GsrResult<usize> {
    let current = current_version(conn)?;
    let mut applied = 0;

    for (version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| to_storage_err(format!("migration {version} begin: {e}")))?;

        let result = migrate(&tx).and_then(|()| {
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![version],
            )
            .map_err(|e| to_storage_err(e.to_string()))
            .map(|_| ())
        });

        match result {
            Ok(()) => {
                tx.commit()
                    .map_err(|e| to_storage_err(format!("migration {version} commit: {e}")))?;
                tracing::debug!(version = version, "applied schema migration");
                applied += 1;
            }
            Err(e) => {
                let _ = tx.rollback();
                return Err(GsrError::StorageError(StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                }));
            }
        }
    }

    Ok(applied)
}
