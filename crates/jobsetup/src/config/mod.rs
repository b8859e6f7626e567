pub mod loader;
pub mod schema;

pub use loader::{apply_env_overrides, load_config, resolve_api_key, validate_config};
pub use schema::{
    AppConfig, DatabaseConfig, EmailConfig, LogFormat, LoggingConfig, ServerConfig, StorageConfig,
    DEFAULT_BUCKET, DEFAULT_MAX_UPLOAD_BYTES,
};
