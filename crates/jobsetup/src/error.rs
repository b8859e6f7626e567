use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobSetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("attachment storage: {0}")]
    Storage(#[from] StorageError),

    #[error("record store: {0}")]
    Database(#[from] crate::db::DatabaseError),

    #[error("notification: {0}")]
    Notify(#[from] crate::notify::NotifyError),

    #[error("submission: {0}")]
    Submission(#[from] crate::pipeline::SubmissionError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config is not valid JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("invalid config: {message}")]
    Validation { message: String },

    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidEnv {
        name: String,
        value: String,
        reason: String,
    },

    #[error("{name}: {source}")]
    Secret {
        name: String,
        #[source]
        source: crate::secrets::SecretError,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("cannot create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write blob {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot delete blob {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("blob already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("storage key '{0}' is not a plain relative path")]
    InvalidKey(String),

    #[error("storage task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl StorageError {
    /// The failure without any path or key, fit for a response body.
    pub fn redacted(&self) -> String {
        match self {
            StorageError::CreateDir { source, .. } => {
                format!("cannot create directory: {}", source)
            }
            StorageError::Write { source, .. } => format!("cannot write blob: {}", source),
            StorageError::Delete { source, .. } => format!("cannot delete blob: {}", source),
            StorageError::AlreadyExists(_) => "blob already exists".to_string(),
            StorageError::InvalidKey(_) => "storage key is not a plain relative path".to_string(),
            StorageError::Join(_) => "storage task aborted".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, JobSetupError>;
