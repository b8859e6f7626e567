use thiserror::Error;

use crate::db::DatabaseError;
use crate::error::StorageError;
use crate::form::AttachmentRole;
use crate::schema::FieldIssue;

/// Why a submission was rejected. Display strings are the client-facing
/// top-level messages.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Missing required attachment: {role}.")]
    MissingAttachment { role: AttachmentRole },

    #[error("Validation failed.")]
    ValidationFailed(Vec<FieldIssue>),

    #[error("DB insert failed.")]
    Persistence(#[source] DatabaseError),

    #[error("Upload failed for {role}.")]
    Upload {
        role: AttachmentRole,
        #[source]
        source: StorageError,
    },

    #[error("File DB insert failed for {role}.")]
    AttachmentRecord {
        role: AttachmentRole,
        #[source]
        source: DatabaseError,
    },

    #[error("Unexpected server error.")]
    Unexpected(String),
}

impl SubmissionError {
    /// True for failures the submitter can fix by editing the form.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SubmissionError::MissingAttachment { .. } | SubmissionError::ValidationFailed(_)
        )
    }

    /// HTTP status the failure maps to.
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }

    /// Top-level message shown to the submitter.
    pub fn client_message(&self) -> String {
        self.to_string()
    }

    /// Field issues, for validation failures only.
    pub fn issues(&self) -> Option<&[FieldIssue]> {
        match self {
            SubmissionError::ValidationFailed(issues) => Some(issues),
            _ => None,
        }
    }

    /// Store diagnostic passed back alongside server-side failures, with
    /// paths and storage keys left out.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            SubmissionError::Persistence(source) => Some(source.redacted()),
            SubmissionError::Upload { source, .. } => Some(source.redacted()),
            SubmissionError::AttachmentRecord { source, .. } => Some(source.redacted()),
            _ => None,
        }
    }
}
