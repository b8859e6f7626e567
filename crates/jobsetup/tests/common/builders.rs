//! Builders for submissions, both as decoded forms and as raw
//! `multipart/form-data` bodies.

#![allow(dead_code)]

use jobsetup::form::{AttachmentRole, RawFields, SubmissionForm, UploadedFile};

pub const BOUNDARY: &str = "----jobsetup-test-boundary";

/// Text fields that pass validation.
pub fn valid_fields() -> Vec<(String, String)> {
    [
        ("todays_date", "03/07/2024"),
        ("completed_by", "Dana Reyes"),
        ("job_no", "J-100"),
        ("division_no", "42"),
        ("job_description", "Scaffold for tank repair"),
        ("new_customer", "No"),
        ("service_offering", "05 - Commercial Scaffolding"),
        ("freight", "4 - Customer Pick-Up"),
        ("engineering_services", "No"),
        ("customer_name", "Gulf Chemical"),
        ("contract_po_amount", "1500.50"),
        ("contract_po_no", "PO-77"),
        ("plant_id", "8350328"),
        ("scaffold_type", "4 - Layher"),
        ("market", "1 - Chemical"),
        ("submarket", "Chemical Plant"),
        ("retention", "No"),
        ("call_out", "None"),
        ("asbestos_related", "No"),
        ("ap_contact", "Pat Lee"),
        ("ap_phone", "555-0100"),
        ("ap_email", "ap@example.com"),
        ("invoice_submission_method", "Email"),
        ("payment_method", "Check"),
        ("proposal_not_signed_justification", "N/A"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Builder for a complete submission. Starts valid, with both documents.
pub struct FormBuilder {
    fields: Vec<(String, String)>,
    files: Vec<(String, UploadedFile)>,
    extra_parts: Vec<(String, String)>,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self {
            fields: valid_fields(),
            files: vec![
                (
                    AttachmentRole::Po.key().to_string(),
                    UploadedFile::new("approved-po.pdf", "application/pdf", b"%PDF-1.7 po".to_vec()),
                ),
                (
                    AttachmentRole::Estimate.key().to_string(),
                    UploadedFile::new("proposal.docx", "", b"proposal body".to_vec()),
                ),
            ],
            extra_parts: vec![],
        }
    }

    /// Sets (or replaces) a text field.
    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.fields.retain(|(k, _)| k != name);
        self.fields.push((name.to_string(), value.to_string()));
        self
    }

    /// Drops a text field entirely.
    pub fn without(mut self, name: &str) -> Self {
        self.fields.retain(|(k, _)| k != name);
        self
    }

    /// Sets (or replaces) the document for `role`.
    pub fn file(mut self, role: AttachmentRole, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.files.retain(|(k, _)| k != role.key());
        self.files.push((
            role.key().to_string(),
            UploadedFile::new(filename, content_type, bytes.to_vec()),
        ));
        self
    }

    pub fn without_file(mut self, role: AttachmentRole) -> Self {
        self.files.retain(|(k, _)| k != role.key());
        self
    }

    /// Adds a text part that is written into the multipart body as-is,
    /// after the regular fields.
    pub fn raw_part(mut self, name: &str, value: &str) -> Self {
        self.extra_parts.push((name.to_string(), value.to_string()));
        self
    }

    pub fn build(self) -> SubmissionForm {
        let fields: RawFields = self.fields.into_iter().collect();
        let mut form = SubmissionForm::new(fields);
        for (key, file) in self.files {
            form.files.insert(key, file);
        }
        form
    }

    /// Encodes the submission as a multipart body. Returns the
    /// `Content-Type` header value and the body bytes.
    pub fn multipart(self) -> (String, Vec<u8>) {
        let mut body = Vec::new();
        for (name, value) in self.fields.iter().chain(self.extra_parts.iter()) {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            );
            body.extend_from_slice(value.as_bytes());
            body.extend_from_slice(b"\r\n");
        }
        for (name, file) in &self.files {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    name, file.filename
                )
                .as_bytes(),
            );
            if !file.content_type.is_empty() {
                body.extend_from_slice(format!("Content-Type: {}\r\n", file.content_type).as_bytes());
            }
            body.extend_from_slice(b"\r\n");
            body.extend_from_slice(&file.bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        (format!("multipart/form-data; boundary={}", BOUNDARY), body)
    }
}
