use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, field, info, info_span, warn, Instrument, Span};

use crate::form::{AttachmentRole, SubmissionForm};
use crate::notify::Notification;
use crate::schema::{parse_todays_date, validate};
use crate::storage::{attachment_key, content_type_or_default};

use super::compensation::Undo;
use super::context::{StoredAttachment, SubmissionContext};
use super::error::SubmissionError;
use super::ports::{BlobStore, NewAttachment, NewJobRequest, Notifier, RecordStore};

/// Returned to the submitter on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub id: String,
}

/// Turns a decoded form into a stored request with both attachments, or
/// into nothing at all.
pub struct SubmissionPipeline {
    records: Arc<dyn RecordStore>,
    blobs: Arc<dyn BlobStore>,
    notifier: Arc<dyn Notifier>,
}

impl SubmissionPipeline {
    pub fn new(
        records: Arc<dyn RecordStore>,
        blobs: Arc<dyn BlobStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            records,
            blobs,
            notifier,
        }
    }

    /// Runs one submission end to end.
    pub async fn submit(&self, form: SubmissionForm) -> Result<SubmissionReceipt, SubmissionError> {
        let span = info_span!(
            "submission",
            job_no = field::Empty,
            division_no = field::Empty,
            request_id = field::Empty,
        );
        self.run(SubmissionContext::new(form)).instrument(span).await
    }

    async fn run(&self, mut ctx: SubmissionContext) -> Result<SubmissionReceipt, SubmissionError> {
        // Step 1: Both attachments present
        {
            let _step = info_span!("check_attachments").entered();
            self.step_check_attachments(&ctx)?;
        }

        // Step 2: Validate fields
        {
            let _step = info_span!("validate").entered();
            self.step_validate(&mut ctx)?;
        }
        if let Some(values) = &ctx.values {
            let span = Span::current();
            span.record("job_no", values.job_no.as_str());
            span.record("division_no", values.division_no.as_str());
        }

        // Step 3: Normalize the date
        self.step_normalize_date(&mut ctx);

        // Step 4: Create the request row
        self.step_create_record(&mut ctx)
            .instrument(info_span!("create_record"))
            .await?;
        if let Some(id) = &ctx.request_id {
            Span::current().record("request_id", id.as_str());
        }

        // Step 5: Store attachments in role order
        for role in AttachmentRole::REQUIRED {
            let result = self
                .step_store_attachment(&mut ctx, role)
                .instrument(info_span!("store_attachment", role = role.key()))
                .await;
            if let Err(e) = result {
                warn!("Submission failed after record creation: {}", e);
                self.compensate(&mut ctx)
                    .instrument(info_span!("compensate"))
                    .await;
                return Err(e);
            }
        }

        // Step 6: Notify
        self.step_notify(&mut ctx)
            .instrument(info_span!("notify"))
            .await;

        // Step 7: Receipt
        let id = ctx
            .request_id
            .take()
            .ok_or_else(|| SubmissionError::Unexpected("request id missing".to_string()))?;
        for attachment in &ctx.attachments {
            debug!(
                role = attachment.role.key(),
                attachment_id = %attachment.id,
                storage_path = %attachment.storage_path,
                "Attachment stored"
            );
        }
        info!(
            attachments = ctx.attachments.len(),
            notified = ctx.notified,
            "Job request created"
        );
        Ok(SubmissionReceipt { id })
    }

    fn step_check_attachments(&self, ctx: &SubmissionContext) -> Result<(), SubmissionError> {
        for role in AttachmentRole::REQUIRED {
            match ctx.form.file(role) {
                Some(file) if !file.is_empty() => {
                    debug!(role = role.key(), size = file.size(), "Attachment present");
                }
                _ => return Err(SubmissionError::MissingAttachment { role }),
            }
        }
        Ok(())
    }

    fn step_validate(&self, ctx: &mut SubmissionContext) -> Result<(), SubmissionError> {
        let values = validate(&ctx.form.fields).map_err(|issues| {
            debug!(issues = issues.len(), "Validation failed");
            SubmissionError::ValidationFailed(issues)
        })?;
        ctx.values = Some(values);
        Ok(())
    }

    fn step_normalize_date(&self, ctx: &mut SubmissionContext) {
        let raw = ctx.values.as_ref().and_then(|v| v.todays_date.as_deref());
        ctx.todays_date = parse_todays_date(raw);
        if raw.is_some() && ctx.todays_date.is_none() {
            debug!("todays_date not parseable, storing NULL");
        }
    }

    async fn step_create_record(&self, ctx: &mut SubmissionContext) -> Result<(), SubmissionError> {
        let values = ctx
            .values
            .clone()
            .ok_or_else(|| SubmissionError::Unexpected("values missing".to_string()))?;
        let request = NewJobRequest::new(values, ctx.todays_date);

        let id = self
            .records
            .insert_request(&request)
            .await
            .map_err(|e| {
                error!("Request insert failed: {}", e);
                SubmissionError::Persistence(e)
            })?;

        ctx.undo.record(Undo::DeleteRequest(id.clone()));
        ctx.request_id = Some(id);
        Ok(())
    }

    async fn step_store_attachment(
        &self,
        ctx: &mut SubmissionContext,
        role: AttachmentRole,
    ) -> Result<(), SubmissionError> {
        let request_id = ctx
            .request_id
            .clone()
            .ok_or_else(|| SubmissionError::Unexpected("request id missing".to_string()))?;
        let file = ctx
            .form
            .file(role)
            .cloned()
            .ok_or(SubmissionError::MissingAttachment { role })?;

        let key = attachment_key(&request_id, role, &file.filename);
        let declared = file.declared_content_type().map(str::to_string);

        self.blobs
            .upload(&key, file.bytes, content_type_or_default(&file.content_type))
            .await
            .map_err(|source| {
                error!("Upload failed for {}: {}", role, source);
                SubmissionError::Upload { role, source }
            })?;
        ctx.undo.record(Undo::DeleteBlob(key.clone()));

        let attachment = NewAttachment {
            request_id,
            role,
            storage_path: key.clone(),
            original_filename: file.filename,
            content_type: declared,
        };
        let id = self
            .records
            .insert_attachment(&attachment)
            .await
            .map_err(|source| {
                error!("Attachment insert failed for {}: {}", role, source);
                SubmissionError::AttachmentRecord { role, source }
            })?;
        ctx.undo.record(Undo::DeleteAttachment(id.clone()));

        ctx.attachments.push(StoredAttachment {
            role,
            storage_path: key,
            id,
        });
        Ok(())
    }

    async fn step_notify(&self, ctx: &mut SubmissionContext) {
        let (Some(id), Some(values)) = (&ctx.request_id, &ctx.values) else {
            return;
        };
        let notification = Notification::job_request_created(id, values);

        match self.notifier.send(&notification).await {
            Ok(()) => ctx.notified = true,
            Err(e) => error!("Notification failed: {}", e),
        }
    }

    async fn compensate(&self, ctx: &mut SubmissionContext) {
        let undo = std::mem::take(&mut ctx.undo);
        let planned = undo.len();
        let failures = undo.unwind(self.records.as_ref(), self.blobs.as_ref()).await;
        if failures > 0 {
            warn!(failures, planned, "Compensation incomplete");
        }
        ctx.request_id = None;
        ctx.attachments.clear();
    }
}
