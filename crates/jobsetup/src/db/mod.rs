//! SQLite persistence for job requests and their attachment rows.
//!
//! A single connection sits behind `Arc<Mutex<_>>`; the async
//! [`SqliteRecordStore`] hops onto the blocking pool before locking it.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::Connection;

pub mod attachment_repo;
pub mod error;
pub mod migrations;
pub mod request_repo;
pub mod store;

pub use error::DatabaseError;
pub use store::SqliteRecordStore;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared handle to the job request database. Clones share the connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens the database file, creating parent directories as needed, and
    /// brings the schema up to date.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        let db = Self::prepare(conn)?;
        log::info!("Opened job request database at {}", path.display());
        Ok(db)
    }

    /// Fresh schema in memory, for tests and throwaway runs.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(conn: Connection) -> Result<Self, DatabaseError> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        // Attachment rows reference their request; cascades depend on this.
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let applied = migrations::migrate(&conn)?;
        if applied > 0 {
            log::debug!(
                "Applied {} migration(s), schema now at version {}",
                applied,
                migrations::latest_version()
            );
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` while holding the connection lock.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Connection) -> Result<T, DatabaseError>,
    {
        let guard = self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)?;
        f(&guard)
    }
}
