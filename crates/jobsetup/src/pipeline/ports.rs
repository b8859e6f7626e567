//! The primitives the submission pipeline needs from its collaborators.
//!
//! Production implementations live in [`crate::db`], [`crate::storage`] and
//! [`crate::notify`]; tests substitute their own.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDate;

use crate::db::DatabaseError;
use crate::error::StorageError;
use crate::form::AttachmentRole;
use crate::notify::{Notification, NotifyError};
use crate::schema::JobRequestValues;

/// Status of a freshly created request.
pub const STATUS_NEW: &str = "new";

/// A request ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJobRequest {
    pub values: JobRequestValues,
    /// `todays_date` parsed into a calendar date, if it was parseable.
    pub todays_date: Option<NaiveDate>,
    pub status: &'static str,
}

impl NewJobRequest {
    pub fn new(values: JobRequestValues, todays_date: Option<NaiveDate>) -> Self {
        Self {
            values,
            todays_date,
            status: STATUS_NEW,
        }
    }
}

/// Metadata row linking a stored blob to its request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttachment {
    pub request_id: String,
    pub role: AttachmentRole,
    pub storage_path: String,
    pub original_filename: String,
    pub content_type: Option<String>,
}

/// Relational store for requests and attachment rows.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts a request and returns the identifier the store assigned.
    async fn insert_request(&self, request: &NewJobRequest) -> Result<String, DatabaseError>;

    async fn delete_request(&self, id: &str) -> Result<(), DatabaseError>;

    /// Inserts an attachment row and returns its identifier.
    async fn insert_attachment(&self, attachment: &NewAttachment)
        -> Result<String, DatabaseError>;

    async fn delete_attachment(&self, id: &str) -> Result<(), DatabaseError>;
}

/// Blob storage for attachment bytes.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` under `key`. Fails if the key is already taken.
    async fn upload(&self, key: &str, bytes: Bytes, content_type: &str)
        -> Result<(), StorageError>;

    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Outbound notification channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}
