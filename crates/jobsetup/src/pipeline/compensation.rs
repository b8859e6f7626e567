use tracing::{debug, error};

use super::ports::{BlobStore, RecordStore};

/// Reverses one artifact created during a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Undo {
    DeleteRequest(String),
    DeleteBlob(String),
    DeleteAttachment(String),
}

impl Undo {
    fn describe(&self) -> &'static str {
        match self {
            Undo::DeleteRequest(_) => "request row",
            Undo::DeleteBlob(_) => "attachment blob",
            Undo::DeleteAttachment(_) => "attachment row",
        }
    }
}

/// Undo actions in creation order.
#[derive(Debug, Default)]
pub struct UndoLog {
    actions: Vec<Undo>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, action: Undo) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Runs every action, newest first. A failing action is logged and the
    /// rest still run. Returns the number of actions that failed.
    pub async fn unwind(self, records: &dyn RecordStore, blobs: &dyn BlobStore) -> usize {
        let mut failures = 0;

        for action in self.actions.into_iter().rev() {
            let result = match &action {
                Undo::DeleteRequest(id) => {
                    records.delete_request(id).await.map_err(|e| e.to_string())
                }
                Undo::DeleteAttachment(id) => {
                    records.delete_attachment(id).await.map_err(|e| e.to_string())
                }
                Undo::DeleteBlob(key) => blobs.delete(key).await.map_err(|e| e.to_string()),
            };

            match result {
                Ok(()) => debug!("Compensated {}", action.describe()),
                Err(e) => {
                    failures += 1;
                    error!("Failed to compensate {}: {}", action.describe(), e);
                }
            }
        }

        failures
    }
}
