//! Test harness for isolated submission runs.
//!
//! Every harness owns an in-memory database and a temporary storage root,
//! so tests never share state.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use tempfile::TempDir;

use jobsetup::db::{attachment_repo, request_repo};
use jobsetup::error::StorageError;
use jobsetup::form::AttachmentRole;
use jobsetup::pipeline::{BlobStore, NewAttachment, NewJobRequest, Notifier, RecordStore};
use jobsetup::{
    AppState, Database, DatabaseError, FileBlobStore, Notification, NotifyError,
    SqliteRecordStore, SubmissionPipeline,
};

pub const TEST_BUCKET: &str = "test-uploads";

/// Notifier that records what it was asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Notification>>,
    pub fail: bool,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Rejected {
                status: 503,
                body: "mail provider unavailable".to_string(),
            });
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// SQLite record store that can be told to reject one attachment role.
pub struct FaultyRecords {
    pub inner: SqliteRecordStore,
    pub fail_attachment_for: Option<AttachmentRole>,
    pub fail_request_insert: bool,
}

#[async_trait]
impl RecordStore for FaultyRecords {
    async fn insert_request(&self, request: &NewJobRequest) -> Result<String, DatabaseError> {
        if self.fail_request_insert {
            return Err(DatabaseError::UnknownColumn("job_requests".to_string()));
        }
        self.inner.insert_request(request).await
    }

    async fn delete_request(&self, id: &str) -> Result<(), DatabaseError> {
        self.inner.delete_request(id).await
    }

    async fn insert_attachment(&self, attachment: &NewAttachment) -> Result<String, DatabaseError> {
        if self.fail_attachment_for == Some(attachment.role) {
            return Err(DatabaseError::UnknownColumn("job_request_files".to_string()));
        }
        self.inner.insert_attachment(attachment).await
    }

    async fn delete_attachment(&self, id: &str) -> Result<(), DatabaseError> {
        self.inner.delete_attachment(id).await
    }
}

/// Filesystem blob store that rejects uploads for one role.
pub struct FaultyBlobs {
    pub inner: FileBlobStore,
    pub fail_upload_for: AttachmentRole,
}

#[async_trait]
impl BlobStore for FaultyBlobs {
    async fn upload(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), StorageError> {
        if key.contains(&format!("/{}-", self.fail_upload_for.key())) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        self.inner.upload(key, bytes, content_type).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.inner.delete(key).await
    }
}

/// Isolated environment: temp storage root, in-memory database, and a
/// recording notifier.
pub struct TestHarness {
    temp_dir: TempDir,
    pub db: Database,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_notifier(RecordingNotifier::default())
    }

    pub fn with_notifier(notifier: RecordingNotifier) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db = Database::open_in_memory().expect("Failed to open database");
        Self {
            temp_dir,
            db,
            notifier: Arc::new(notifier),
        }
    }

    pub fn storage_root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn records(&self) -> SqliteRecordStore {
        SqliteRecordStore::new(self.db.clone())
    }

    pub fn blobs(&self) -> FileBlobStore {
        FileBlobStore::new(self.storage_root(), TEST_BUCKET)
    }

    /// Pipeline over the real stores.
    pub fn pipeline(&self) -> SubmissionPipeline {
        SubmissionPipeline::new(
            Arc::new(self.records()),
            Arc::new(self.blobs()),
            self.notifier.clone(),
        )
    }

    /// Pipeline whose stores are replaced by the given ones.
    pub fn pipeline_with(
        &self,
        records: Arc<dyn RecordStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> SubmissionPipeline {
        SubmissionPipeline::new(records, blobs, self.notifier.clone())
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(Arc::new(self.pipeline()))
    }

    pub fn request_count(&self) -> u64 {
        request_repo::count(&self.db).unwrap()
    }

    pub fn attachment_count(&self) -> u64 {
        attachment_repo::count(&self.db).unwrap()
    }

    /// Every stored blob file, relative to the bucket directory.
    pub fn stored_blobs(&self) -> Vec<PathBuf> {
        let bucket = self.blobs().bucket_directory().to_path_buf();
        let mut found = Vec::new();
        collect_files(&bucket, &bucket, &mut found);
        found.sort();
        found
    }

    pub fn sent_notifications(&self) -> Vec<Notification> {
        self.notifier.sent.lock().unwrap().clone()
    }
}

fn collect_files(base: &Path, dir: &Path, found: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(base, &path, found);
        } else if let Ok(relative) = path.strip_prefix(base) {
            found.push(relative.to_path_buf());
        }
    }
}
