//! Attachment repository: operations on the `job_request_files` table.

use rusqlite::{params, Row};

use super::{Database, DatabaseError};

/// A stored attachment row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRow {
    pub id: String,
    pub request_id: String,
    pub file_label: String,
    pub storage_path: String,
    pub original_filename: String,
    /// Content type the client declared, `None` when it sent none.
    pub content_type: Option<String>,
    pub created_at: String,
}

impl AttachmentRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            request_id: row.get("request_id")?,
            file_label: row.get("file_label")?,
            storage_path: row.get("storage_path")?,
            original_filename: row.get("original_filename")?,
            content_type: row.get("content_type")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// Inserts a new attachment row. The parent request must exist.
pub fn insert(db: &Database, row: &AttachmentRow) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO job_request_files (id, request_id, file_label, storage_path,
             original_filename, content_type, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                row.id,
                row.request_id,
                row.file_label,
                row.storage_path,
                row.original_filename,
                row.content_type,
                row.created_at,
            ],
        )?;
        Ok(())
    })
}

/// Deletes an attachment row. Returns whether a row was removed.
pub fn delete(db: &Database, id: &str) -> Result<bool, DatabaseError> {
    db.with_conn(|conn| {
        let removed = conn.execute("DELETE FROM job_request_files WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    })
}

/// Lists the attachments of a request, oldest first.
pub fn find_by_request(db: &Database, request_id: &str) -> Result<Vec<AttachmentRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT * FROM job_request_files WHERE request_id = ?1 ORDER BY created_at, rowid",
        )?;
        let rows = stmt
            .query_map(params![request_id], AttachmentRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Counts all attachment rows.
pub fn count(db: &Database) -> Result<u64, DatabaseError> {
    db.with_conn(|conn| {
        let count: u64 =
            conn.query_row("SELECT COUNT(*) FROM job_request_files", [], |r| r.get(0))?;
        Ok(count)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db_with_parent(id: &str) -> Database {
        let db = Database::open_in_memory().expect("Failed to create test database");
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO job_requests (id, created_at, completed_by, job_no, division_no,
                 job_description, service_offering, new_customer, freight, engineering_services,
                 plant_id, scaffold_type, market, submarket, contract_po_amount, contract_po_no,
                 retention, call_out, asbestos_related, ap_contact, ap_phone, ap_email,
                 invoice_submission_method, payment_method, proposal_not_signed_justification)
                 VALUES (?1, '2026-01-01', 'a', 'b', 'c', 'ddddd', 's', 'No', 'f', 'No',
                 'p', 't', 'm', 'sm', 1.0, 'po', 'No', 'None', 'No', 'x', 'y', 'z@e.co',
                 'Email', 'Check', 'j')",
                params![id],
            )?;
            Ok(())
        })
        .unwrap();
        db
    }

    fn sample_row(id: &str, request_id: &str, label: &str) -> AttachmentRow {
        AttachmentRow {
            id: id.to_string(),
            request_id: request_id.to_string(),
            file_label: label.to_string(),
            storage_path: format!("job-requests/{}/{}.pdf", request_id, id),
            original_filename: "scan.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_insert_and_list() {
        let db = test_db_with_parent("r1");
        insert(&db, &sample_row("a1", "r1", "Approved PO")).unwrap();
        insert(&db, &sample_row("a2", "r1", "Proposal")).unwrap();

        let rows = find_by_request(&db, "r1").unwrap();
        let labels: Vec<&str> = rows.iter().map(|r| r.file_label.as_str()).collect();
        assert_eq!(labels, vec!["Approved PO", "Proposal"]);
    }

    #[test]
    fn test_requires_parent() {
        let db = test_db_with_parent("r1");
        let result = insert(&db, &sample_row("a1", "missing", "Approved PO"));
        assert!(result.is_err());
        assert_eq!(count(&db).unwrap(), 0);
    }

    #[test]
    fn test_parent_delete_cascades() {
        let db = test_db_with_parent("r1");
        insert(&db, &sample_row("a1", "r1", "Approved PO")).unwrap();
        assert!(super::super::request_repo::delete(&db, "r1").unwrap());
        assert_eq!(count(&db).unwrap(), 0);
    }

    #[test]
    fn test_delete() {
        let db = test_db_with_parent("r1");
        insert(&db, &sample_row("a1", "r1", "Approved PO")).unwrap();
        assert!(delete(&db, "a1").unwrap());
        assert!(!delete(&db, "a1").unwrap());
    }
}
