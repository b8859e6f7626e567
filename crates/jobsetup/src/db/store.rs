//! [`RecordStore`] backed by the SQLite [`Database`].

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::pipeline::{NewAttachment, NewJobRequest, RecordStore};

use super::attachment_repo::{self, AttachmentRow};
use super::{request_repo, Database, DatabaseError};

#[derive(Clone)]
pub struct SqliteRecordStore {
    db: Database,
}

impl SqliteRecordStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Runs a blocking repository call off the async runtime.
    async fn blocking<F, T>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Database) -> Result<T, DatabaseError> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || f(&db)).await?
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn insert_request(&self, request: &NewJobRequest) -> Result<String, DatabaseError> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().to_rfc3339();
        let request = request.clone();
        let row_id = id.clone();

        self.blocking(move |db| request_repo::insert(db, &row_id, &created_at, &request))
            .await?;
        Ok(id)
    }

    async fn delete_request(&self, id: &str) -> Result<(), DatabaseError> {
        let id = id.to_string();
        let removed = self
            .blocking(move |db| request_repo::delete(db, &id))
            .await?;
        if !removed {
            log::debug!("Request row already absent during delete");
        }
        Ok(())
    }

    async fn insert_attachment(
        &self,
        attachment: &NewAttachment,
    ) -> Result<String, DatabaseError> {
        let row = AttachmentRow {
            id: Uuid::new_v4().to_string(),
            request_id: attachment.request_id.clone(),
            file_label: attachment.role.label().to_string(),
            storage_path: attachment.storage_path.clone(),
            original_filename: attachment.original_filename.clone(),
            content_type: attachment.content_type.clone(),
            created_at: Utc::now().to_rfc3339(),
        };
        let id = row.id.clone();

        self.blocking(move |db| attachment_repo::insert(db, &row))
            .await?;
        Ok(id)
    }

    async fn delete_attachment(&self, id: &str) -> Result<(), DatabaseError> {
        let id = id.to_string();
        self.blocking(move |db| attachment_repo::delete(db, &id))
            .await?;
        Ok(())
    }
}
