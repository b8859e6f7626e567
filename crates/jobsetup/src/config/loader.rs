use std::path::{Path, PathBuf};

use secrecy::SecretString;

use crate::config::schema::{AppConfig, LogFormat};
use crate::error::ConfigError;
use crate::notify::parse_recipients;
use crate::secrets::resolve_secret;

/// Loads configuration: the JSON file at `path` when given (otherwise
/// defaults), then environment overrides, then validation.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
                path: path.to_path_buf(),
                source: e,
            })?;
            serde_json::from_str(&content)?
        }
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    validate_config(&config)?;

    Ok(config)
}

/// Applies environment overrides read through `lookup`. Compatibility names
/// are applied first so the `JOBSETUP_*` names win.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = var("JOBSETUP_HOST") {
        config.server.host = v;
    }
    if let Some(v) = var("JOBSETUP_PORT") {
        config.server.port = parse_env("JOBSETUP_PORT", &v)?;
    }
    if let Some(v) = var("JOBSETUP_MAX_UPLOAD_BYTES") {
        config.server.max_upload_bytes = parse_env("JOBSETUP_MAX_UPLOAD_BYTES", &v)?;
    }

    if let Some(v) = var("JOBSETUP_DATABASE_PATH") {
        config.database.path = PathBuf::from(v);
    }

    if let Some(v) = var("JOBSETUP_STORAGE_ROOT") {
        config.storage.root = PathBuf::from(v);
    }
    if let Some(v) = var("SUPABASE_STORAGE_BUCKET") {
        config.storage.bucket = v.trim().to_string();
    }
    if let Some(v) = var("JOBSETUP_STORAGE_BUCKET") {
        config.storage.bucket = v.trim().to_string();
    }

    if let Some(v) = var("JOBSETUP_EMAIL_API_BASE") {
        config.email.api_base = v;
    }
    if let Some(v) = var("JOBSETUP_EMAIL_API_KEY_FILE") {
        config.email.api_key_file = Some(v);
    }
    if let Some(v) = var("RESEND_FROM") {
        config.email.from = Some(v.trim().to_string());
    }
    if let Some(v) = var("JOBSETUP_EMAIL_FROM") {
        config.email.from = Some(v.trim().to_string());
    }
    if let Some(v) = var("RESEND_TO") {
        config.email.to = parse_recipients(&v);
    }
    if let Some(v) = var("JOBSETUP_EMAIL_TO") {
        config.email.to = parse_recipients(&v);
    }

    if let Some(v) = var("JOBSETUP_LOG_LEVEL") {
        config.logging.level = v;
    }
    if let Some(v) = var("JOBSETUP_LOG_FORMAT") {
        config.logging.format = v.parse::<LogFormat>().map_err(|reason| {
            ConfigError::InvalidEnv {
                name: "JOBSETUP_LOG_FORMAT".to_string(),
                value: v.clone(),
                reason,
            }
        })?;
    }

    Ok(())
}

fn parse_env<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnv {
        name: name.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Checks everything the server needs before it starts accepting requests.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return invalid("server.port must be non-zero");
    }
    if config.server.max_upload_bytes == 0 {
        return invalid("server.max_upload_bytes must be positive");
    }

    let bucket = config.storage.bucket.as_str();
    if bucket.is_empty() || bucket.contains('/') || bucket == "." || bucket == ".." {
        return invalid(format!("storage.bucket '{}' is not a valid bucket name", bucket));
    }

    if config.email.api_base.trim().is_empty() {
        return invalid("email.api_base must not be empty");
    }
    if config
        .email
        .from
        .as_deref()
        .map_or(true, |from| from.trim().is_empty())
    {
        return invalid("email.from (or RESEND_FROM) is required");
    }
    if config.email.to.iter().all(|to| to.trim().is_empty()) {
        return invalid("email.to (or RESEND_TO) needs at least one recipient");
    }

    resolve_api_key(config)?;

    Ok(())
}

/// Resolves the notification API key from its configured source.
pub fn resolve_api_key(config: &AppConfig) -> Result<SecretString, ConfigError> {
    let email = &config.email;
    resolve_secret(
        email.api_key.as_deref(),
        email.api_key_file.as_deref(),
        email.api_key_env.as_deref(),
    )
    .map_err(|source| ConfigError::Secret {
        name: "email.api_key".to_string(),
        source,
    })
}

fn invalid<T>(message: impl Into<String>) -> Result<T, ConfigError> {
    Err(ConfigError::Validation {
        message: message.into(),
    })
}
