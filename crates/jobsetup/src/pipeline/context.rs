use chrono::NaiveDate;

use crate::form::{AttachmentRole, SubmissionForm};
use crate::schema::JobRequestValues;

use super::compensation::UndoLog;

/// An attachment that was fully stored (blob and row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAttachment {
    pub role: AttachmentRole,
    pub storage_path: String,
    pub id: String,
}

/// State carried through one submission attempt.
pub struct SubmissionContext {
    // Input
    pub form: SubmissionForm,

    // Step 2 result
    pub values: Option<JobRequestValues>,

    // Step 3 result
    pub todays_date: Option<NaiveDate>,

    // Step 4 result; cleared again if the request is compensated away
    pub request_id: Option<String>,

    // Step 5 results
    pub attachments: Vec<StoredAttachment>,

    // Everything created so far, for compensation
    pub undo: UndoLog,

    // Step 6 result
    pub notified: bool,
}

impl SubmissionContext {
    pub fn new(form: SubmissionForm) -> Self {
        Self {
            form,
            values: None,
            todays_date: None,
            request_id: None,
            attachments: Vec::new(),
            undo: UndoLog::new(),
            notified: false,
        }
    }
}
