use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("cannot prepare database directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("migration {version} failed: {reason}")]
    Migration { version: u32, reason: String },

    /// A thread panicked while holding the connection.
    #[error("database connection lock poisoned")]
    LockPoisoned,

    #[error("no column named '{0}'")]
    UnknownColumn(String),

    #[error("database task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl DatabaseError {
    /// The failure without filesystem paths, fit for a response body.
    pub fn redacted(&self) -> String {
        match self {
            DatabaseError::Io { source, .. } => {
                format!("cannot prepare database directory: {}", source)
            }
            DatabaseError::Join(_) => "database task aborted".to_string(),
            other => other.to_string(),
        }
    }
}
