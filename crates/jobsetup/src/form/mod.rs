//! The decoded transport payload of a job setup submission.
//!
//! Every schema field arrives as text (numbers and dates included) and the
//! two required documents arrive as binary parts keyed by their role.

use std::collections::HashMap;

use bytes::Bytes;

/// Every text field of the form, in declaration order.
pub const FIELD_NAMES: &[&str] = &[
    "todays_date",
    "completed_by",
    "job_no",
    "proposal_bid_no",
    "division_no",
    "job_description",
    "new_customer",
    "service_offering",
    "freight",
    "engineering_services",
    "customer_number",
    "customer_name",
    "general_contractor",
    "phone_number",
    "address",
    "city",
    "state",
    "zip",
    "sub_contractor",
    "attention",
    "billing_address",
    "billing_city",
    "billing_state",
    "billing_zip",
    "customer_contact",
    "customer_phone",
    "foreman_proj_mgr",
    "billed_by",
    "sales_person",
    "contract_po_amount",
    "contract_po_no",
    "plant_id",
    "scaffold_type",
    "market",
    "submarket",
    "jobsite_address",
    "jobsite_city",
    "jobsite_state",
    "jobsite_zip",
    "county_parish",
    "retention",
    "retention_amount_pct",
    "call_out",
    "asbestos_related",
    "ap_contact",
    "ap_phone",
    "ap_email",
    "invoice_submission_method",
    "portal_name",
    "payment_method",
    "proposal_not_signed_justification",
];

/// Returns true when `name` is one of the form's text fields.
pub fn is_known_field(name: &str) -> bool {
    FIELD_NAMES.contains(&name)
}

/// Raw text values as received. Values are kept untrimmed; the schema owns
/// trimming and blank handling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFields {
    values: HashMap<String, String>,
}

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Sets a field only if it has no value yet. Used by the multipart
    /// decoder so that a repeated field keeps its first value.
    pub fn set_if_absent(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = RawFields::new();
        for (k, v) in iter {
            fields.set(k, v);
        }
        fields
    }
}

/// A file part buffered in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    /// Filename as supplied by the client.
    pub filename: String,
    /// Declared content type; may be empty.
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// The declared content type, `None` when the client left it blank.
    pub fn declared_content_type(&self) -> Option<&str> {
        Some(self.content_type.trim()).filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The two documents every request must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentRole {
    /// The approved purchase order.
    Po,
    /// The proposal. Its transport key stays `estimate` for older clients.
    Estimate,
}

impl AttachmentRole {
    /// Required roles in processing order.
    pub const REQUIRED: [AttachmentRole; 2] = [AttachmentRole::Po, AttachmentRole::Estimate];

    /// Multipart part name.
    pub fn key(self) -> &'static str {
        match self {
            AttachmentRole::Po => "po",
            AttachmentRole::Estimate => "estimate",
        }
    }

    /// Human-facing label, also stored on the attachment row.
    pub fn label(self) -> &'static str {
        match self {
            AttachmentRole::Po => "Approved PO",
            AttachmentRole::Estimate => "Proposal",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::REQUIRED.into_iter().find(|role| role.key() == key)
    }
}

impl std::fmt::Display for AttachmentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A complete submission: text fields plus file parts keyed by part name.
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub fields: RawFields,
    pub files: HashMap<String, UploadedFile>,
}

impl SubmissionForm {
    pub fn new(fields: RawFields) -> Self {
        Self {
            fields,
            files: HashMap::new(),
        }
    }

    pub fn with_file(mut self, role: AttachmentRole, file: UploadedFile) -> Self {
        self.files.insert(role.key().to_string(), file);
        self
    }

    pub fn file(&self, role: AttachmentRole) -> Option<&UploadedFile> {
        self.files.get(role.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for name in FIELD_NAMES {
            assert!(seen.insert(name), "duplicate field {}", name);
        }
        assert_eq!(FIELD_NAMES.len(), 51);
    }

    #[test]
    fn test_set_if_absent_keeps_first_value() {
        let mut fields = RawFields::new();
        fields.set_if_absent("job_no", "A-1");
        fields.set_if_absent("job_no", "B-2");
        assert_eq!(fields.get("job_no"), Some("A-1"));
    }

    #[test]
    fn test_role_keys_and_labels() {
        assert_eq!(AttachmentRole::Po.key(), "po");
        assert_eq!(AttachmentRole::Estimate.key(), "estimate");
        assert_eq!(AttachmentRole::Estimate.label(), "Proposal");
        assert_eq!(AttachmentRole::from_key("estimate"), Some(AttachmentRole::Estimate));
        assert_eq!(AttachmentRole::from_key("proposal"), None);
    }

    #[test]
    fn test_form_file_lookup_by_role() {
        let form = SubmissionForm::new(RawFields::new()).with_file(
            AttachmentRole::Po,
            UploadedFile::new("po.pdf", "application/pdf", b"%PDF".to_vec()),
        );
        assert_eq!(form.file(AttachmentRole::Po).map(|f| f.size()), Some(4));
        assert!(form.file(AttachmentRole::Estimate).is_none());
    }

    #[test]
    fn test_declared_content_type() {
        let pdf = UploadedFile::new("po.pdf", "application/pdf", b"%PDF".to_vec());
        assert_eq!(pdf.declared_content_type(), Some("application/pdf"));

        let blank = UploadedFile::new("notes.docx", "  ", b"x".to_vec());
        assert_eq!(blank.declared_content_type(), None);
    }
}
