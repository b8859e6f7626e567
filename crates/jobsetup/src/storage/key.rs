use uuid::Uuid;

use crate::form::AttachmentRole;

/// Prefix under which every attachment blob is stored.
pub const KEY_PREFIX: &str = "job-requests";

/// Content type used when the client declared none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Extension used in storage keys: the lowercased extension of `filename`
/// when it is non-empty ASCII alphanumeric, otherwise `bin`.
pub fn file_extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            ext.to_ascii_lowercase()
        }
        _ => "bin".to_string(),
    }
}

/// Builds a fresh storage key for an attachment:
/// `job-requests/{request_id}/{role_key}-{uuid}.{ext}`.
pub fn attachment_key(request_id: &str, role: AttachmentRole, filename: &str) -> String {
    format!(
        "{}/{}/{}-{}.{}",
        KEY_PREFIX,
        request_id,
        role.key(),
        Uuid::new_v4(),
        file_extension(filename)
    )
}

/// The declared content type, or [`DEFAULT_CONTENT_TYPE`] when blank.
pub fn content_type_or_default(declared: &str) -> &str {
    let declared = declared.trim();
    if declared.is_empty() {
        DEFAULT_CONTENT_TYPE
    } else {
        declared
    }
}
