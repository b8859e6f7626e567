//! Where the notification API key comes from.
//!
//! Checked in order, first non-blank wins:
//!
//! 1. `api_key`: the value itself, for local runs
//! 2. `api_key_file`: a mounted secret file such as `/run/secrets/resend`
//! 3. `api_key_env`: the name of an environment variable

use std::path::PathBuf;

use secrecy::SecretString;

#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("no API key configured (set a value, a file or an env var name)")]
    Unconfigured,

    #[error("cannot read secret file '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("env var '{name}' is not set")]
    EnvUnset { name: String },

    #[error("env var '{name}' is not valid UTF-8")]
    EnvNotUnicode { name: String },

    #[error("secret from {origin} is empty")]
    Empty { origin: String },
}

/// The three places a secret may come from. Blank entries count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretSource {
    pub value: Option<String>,
    pub file: Option<String>,
    pub env: Option<String>,
}

impl SecretSource {
    /// Resolves the first non-blank source. The secret is trimmed and must
    /// not be empty afterwards.
    pub fn resolve(&self) -> Result<SecretString, SecretError> {
        if let Some(value) = non_blank(self.value.as_deref()) {
            return Ok(SecretString::from(value.trim().to_string()));
        }

        if let Some(path) = non_blank(self.file.as_deref()) {
            let path = expand_home(path);
            let content = std::fs::read_to_string(&path).map_err(|source| SecretError::File {
                path: path.clone(),
                source,
            })?;
            return non_empty(&content, || format!("file '{}'", path.display()));
        }

        if let Some(name) = non_blank(self.env.as_deref()) {
            return match std::env::var(name) {
                Ok(value) => non_empty(&value, || format!("env var '{}'", name)),
                Err(std::env::VarError::NotPresent) => Err(SecretError::EnvUnset {
                    name: name.to_string(),
                }),
                Err(std::env::VarError::NotUnicode(_)) => Err(SecretError::EnvNotUnicode {
                    name: name.to_string(),
                }),
            };
        }

        Err(SecretError::Unconfigured)
    }
}

/// Shorthand for resolving an ad hoc [`SecretSource`].
pub fn resolve_secret(
    value: Option<&str>,
    file: Option<&str>,
    env: Option<&str>,
) -> Result<SecretString, SecretError> {
    SecretSource {
        value: value.map(str::to_string),
        file: file.map(str::to_string),
        env: env.map(str::to_string),
    }
    .resolve()
}

fn non_blank(entry: Option<&str>) -> Option<&str> {
    entry.filter(|s| !s.trim().is_empty())
}

// Mounted files and env vars set from them usually end in a newline.
fn non_empty(raw: &str, origin: impl FnOnce() -> String) -> Result<SecretString, SecretError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SecretError::Empty { origin: origin() });
    }
    Ok(SecretString::from(trimmed.to_string()))
}

/// `~` and `~/…` resolve against `$HOME`; anything else is taken as is.
fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => &rest[1..],
        _ => return PathBuf::from(path),
    };
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(rest),
        None => PathBuf::from(path),
    }
}
