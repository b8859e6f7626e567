//! Versioned schema migrations.
//!
//! Applied versions are recorded in `_migrations`. Each pending script runs
//! inside its own transaction together with its bookkeeping row.

use rusqlite::{params, Connection, OptionalExtension};

use super::error::DatabaseError;

/// Ordered `(version, name, sql)` scripts.
const MIGRATIONS: &[(u32, &str, &str)] = &[
    (
        1,
        "create_job_requests",
        include_str!("sql/001_create_job_requests.sql"),
    ),
    (
        2,
        "create_job_request_files",
        include_str!("sql/002_create_job_request_files.sql"),
    ),
];

/// Newest version the code knows about.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |(version, _, _)| *version)
}

/// Highest version recorded as applied, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> Result<u32, DatabaseError> {
    ensure_ledger(conn)?;
    let version: Option<u32> = conn
        .query_row("SELECT MAX(version) FROM _migrations", [], |r| r.get(0))
        .optional()?
        .flatten();
    Ok(version.unwrap_or(0))
}

/// Applies every pending migration and returns how many ran.
pub fn migrate(conn: &Connection) -> Result<usize, DatabaseError> {
    let from = current_version(conn)?;
    let mut applied = 0;

    for &(version, name, sql) in MIGRATIONS.iter().filter(|(v, _, _)| *v > from) {
        log::info!("Applying migration {:03} {}", version, name);

        let failed = |e: rusqlite::Error| DatabaseError::Migration {
            version,
            reason: e.to_string(),
        };
        let tx = conn.unchecked_transaction().map_err(failed)?;
        tx.execute_batch(sql).map_err(failed)?;
        tx.execute(
            "INSERT INTO _migrations (version, name) VALUES (?1, ?2)",
            params![version, name],
        )
        .map_err(failed)?;
        tx.commit().map_err(failed)?;

        applied += 1;
    }

    Ok(applied)
}

fn ensure_ledger(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;
    Ok(())
}
