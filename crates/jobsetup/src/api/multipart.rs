//! Decodes a `multipart/form-data` body into a [`SubmissionForm`].

use actix_multipart::{Field, Multipart};
use bytes::{Bytes, BytesMut};
use futures_util::TryStreamExt;

use crate::form::{is_known_field, AttachmentRole, RawFields, SubmissionForm, UploadedFile};

use super::error::ApiError;

/// Upper bound for a single text part.
pub const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

/// Reads every part of the body. Text parts outside the form's field list
/// and file parts other than the attachment roles are drained and dropped.
/// A repeated part keeps its first value.
pub async fn read_submission(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<SubmissionForm, ApiError> {
    let mut fields = RawFields::new();
    let mut form_files = std::collections::HashMap::new();

    while let Some(mut field) = multipart
        .try_next()
        .await
        .map_err(|e| ApiError::MalformedPayload(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        match filename {
            Some(filename) if AttachmentRole::from_key(&name).is_some() => {
                let declared = field
                    .content_type()
                    .map(|mime| mime.essence_str().to_string())
                    .unwrap_or_default();
                let bytes = read_limited(&mut field, &name, max_upload_bytes).await?;
                form_files
                    .entry(name)
                    .or_insert_with(|| UploadedFile::new(filename, declared, bytes));
            }
            None if is_known_field(&name) => {
                let bytes = read_limited(&mut field, &name, MAX_TEXT_FIELD_BYTES).await?;
                let value = String::from_utf8(bytes.to_vec()).map_err(|_| {
                    ApiError::MalformedPayload(format!("Field '{}' is not valid UTF-8", name))
                })?;
                fields.set_if_absent(name, value);
            }
            _ => {
                drain(&mut field).await?;
            }
        }
    }

    let mut form = SubmissionForm::new(fields);
    form.files = form_files;
    Ok(form)
}

async fn read_limited(field: &mut Field, name: &str, limit: usize) -> Result<Bytes, ApiError> {
    let mut buffer = BytesMut::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| ApiError::MalformedPayload(e.to_string()))?
    {
        if buffer.len() + chunk.len() > limit {
            return Err(ApiError::PayloadTooLarge {
                field: name.to_string(),
                limit,
            });
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer.freeze())
}

async fn drain(field: &mut Field) -> Result<(), ApiError> {
    while field
        .try_next()
        .await
        .map_err(|e| ApiError::MalformedPayload(e.to_string()))?
        .is_some()
    {}
    Ok(())
}
