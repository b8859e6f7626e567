pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod form;
pub mod notify;
pub mod pipeline;
pub mod sanitize;
pub mod schema;
pub mod secrets;
pub mod storage;

pub use api::{configure, ApiError, AppState};
pub use config::{load_config, AppConfig};
pub use db::{Database, DatabaseError, SqliteRecordStore};
pub use error::{ConfigError, JobSetupError, Result, StorageError};
pub use form::{AttachmentRole, RawFields, SubmissionForm, UploadedFile};
pub use notify::{Notification, NotifyError, ResendNotifier};
pub use pipeline::{SubmissionError, SubmissionPipeline, SubmissionReceipt};
pub use schema::{validate, FieldIssue, FormOptions, JobRequestValues};
pub use secrets::SecretError;
pub use storage::FileBlobStore;
