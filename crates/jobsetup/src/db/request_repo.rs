//! Request repository: operations on the `job_requests` table.

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};

use crate::pipeline::NewJobRequest;
use crate::schema::OptionSet;

use super::{Database, DatabaseError};

/// Summary of a stored request, as read back from the database.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRequestRow {
    pub id: String,
    pub status: String,
    pub created_at: String,
    pub todays_date: Option<String>,
    pub completed_by: String,
    pub job_no: String,
    pub division_no: String,
    pub customer_name: Option<String>,
    pub market: String,
    pub submarket: String,
    pub scaffold_type: String,
    pub contract_po_amount: f64,
    pub contract_po_no: String,
    pub retention_amount_pct: Option<f64>,
    pub portal_name: String,
}

impl JobRequestRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            status: row.get("status")?,
            created_at: row.get("created_at")?,
            todays_date: row.get("todays_date")?,
            completed_by: row.get("completed_by")?,
            job_no: row.get("job_no")?,
            division_no: row.get("division_no")?,
            customer_name: row.get("customer_name")?,
            market: row.get("market")?,
            submarket: row.get("submarket")?,
            scaffold_type: row.get("scaffold_type")?,
            contract_po_amount: row.get("contract_po_amount")?,
            contract_po_no: row.get("contract_po_no")?,
            retention_amount_pct: row.get("retention_amount_pct")?,
            portal_name: row.get("portal_name")?,
        })
    }
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn nullable(value: &Option<String>) -> Value {
    value.as_deref().map(text).unwrap_or(Value::Null)
}

/// Every column written on insert. Absent optional values become an
/// explicit NULL rather than being left out of the statement.
fn column_values(id: &str, created_at: &str, request: &NewJobRequest) -> Vec<(&'static str, Value)> {
    let v = &request.values;
    vec![
        ("id", text(id)),
        ("status", text(request.status)),
        ("created_at", text(created_at)),
        (
            "todays_date",
            request
                .todays_date
                .map(|d| Value::Text(d.format("%Y-%m-%d").to_string()))
                .unwrap_or(Value::Null),
        ),
        ("completed_by", text(&v.completed_by)),
        ("job_no", text(&v.job_no)),
        ("proposal_bid_no", nullable(&v.proposal_bid_no)),
        ("division_no", text(&v.division_no)),
        ("job_description", text(&v.job_description)),
        ("service_offering", text(v.service_offering.label())),
        ("foreman_proj_mgr", nullable(&v.foreman_proj_mgr)),
        ("billed_by", nullable(&v.billed_by)),
        ("sales_person", nullable(&v.sales_person)),
        ("general_contractor", nullable(&v.general_contractor)),
        ("address", nullable(&v.address)),
        ("city", nullable(&v.city)),
        ("state", nullable(&v.state)),
        ("zip", nullable(&v.zip)),
        ("phone_number", nullable(&v.phone_number)),
        ("sub_contractor", nullable(&v.sub_contractor)),
        ("new_customer", text(v.new_customer.label())),
        ("customer_number", nullable(&v.customer_number)),
        ("customer_name", nullable(&v.customer_name)),
        ("attention", nullable(&v.attention)),
        ("billing_address", nullable(&v.billing_address)),
        ("billing_city", nullable(&v.billing_city)),
        ("billing_state", nullable(&v.billing_state)),
        ("billing_zip", nullable(&v.billing_zip)),
        ("customer_contact", nullable(&v.customer_contact)),
        ("customer_phone", nullable(&v.customer_phone)),
        ("freight", text(v.freight.label())),
        ("engineering_services", text(v.engineering_services.label())),
        ("plant_id", text(v.plant_id.label())),
        ("scaffold_type", text(v.scaffold_type.label())),
        ("market", text(v.market.label())),
        ("submarket", text(v.submarket)),
        ("jobsite_address", nullable(&v.jobsite_address)),
        ("jobsite_city", nullable(&v.jobsite_city)),
        ("jobsite_state", nullable(&v.jobsite_state)),
        ("jobsite_zip", nullable(&v.jobsite_zip)),
        ("county_parish", nullable(&v.county_parish)),
        ("contract_po_amount", Value::Real(v.contract_po_amount)),
        ("contract_po_no", text(&v.contract_po_no)),
        ("retention", text(v.retention.label())),
        (
            "retention_amount_pct",
            v.retention_amount_pct.map(Value::Real).unwrap_or(Value::Null),
        ),
        ("call_out", text(v.call_out.label())),
        ("asbestos_related", text(v.asbestos_related.label())),
        ("ap_contact", text(&v.ap_contact)),
        ("ap_phone", text(&v.ap_phone)),
        ("ap_email", text(&v.ap_email)),
        ("invoice_submission_method", text(v.invoice_submission_method.label())),
        ("portal_name", text(v.portal_name.as_deref().unwrap_or(""))),
        ("payment_method", text(v.payment_method.label())),
        (
            "proposal_not_signed_justification",
            text(&v.proposal_not_signed_justification),
        ),
    ]
}

/// Inserts a new request row under the given identifier.
pub fn insert(
    db: &Database,
    id: &str,
    created_at: &str,
    request: &NewJobRequest,
) -> Result<(), DatabaseError> {
    let columns = column_values(id, created_at, request);
    let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    let sql = format!(
        "INSERT INTO job_requests ({}) VALUES ({})",
        names.join(", "),
        placeholders.join(", ")
    );

    db.with_conn(|conn| {
        conn.execute(&sql, params_from_iter(columns.iter().map(|(_, value)| value)))?;
        Ok(())
    })
}

/// Deletes a request (and, by cascade, its attachment rows).
/// Returns whether a row was removed.
pub fn delete(db: &Database, id: &str) -> Result<bool, DatabaseError> {
    db.with_conn(|conn| {
        let removed = conn.execute("DELETE FROM job_requests WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    })
}

/// Finds a request by its ID.
pub fn find_by_id(db: &Database, id: &str) -> Result<Option<JobRequestRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT * FROM job_requests WHERE id = ?1")?;
        let mut rows = stmt.query_map(params![id], JobRequestRow::from_row)?;
        match rows.next() {
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
            None => Ok(None),
        }
    })
}

/// Returns whether the given column of a request is SQL NULL.
pub fn is_null(db: &Database, id: &str, column: &str) -> Result<bool, DatabaseError> {
    if !crate::form::is_known_field(column) {
        return Err(DatabaseError::UnknownColumn(column.to_string()));
    }
    db.with_conn(|conn| {
        let null: bool = conn.query_row(
            &format!("SELECT {} IS NULL FROM job_requests WHERE id = ?1", column),
            params![id],
            |r| r.get(0),
        )?;
        Ok(null)
    })
}

/// Counts all stored requests.
pub fn count(db: &Database) -> Result<u64, DatabaseError> {
    db.with_conn(|conn| {
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM job_requests", [], |r| r.get(0))?;
        Ok(count)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate;
    use chrono::NaiveDate;

    fn test_db() -> Database {
        Database::open_in_memory().expect("Failed to create test database")
    }

    fn sample_request() -> NewJobRequest {
        let fields = [
            ("completed_by", "Dana Reyes"),
            ("job_no", "J-100"),
            ("division_no", "42"),
            ("job_description", "Scaffold for tank repair"),
            ("new_customer", "Yes"),
            ("service_offering", "05 - Commercial Scaffolding"),
            ("freight", "4 - Customer Pick-Up"),
            ("engineering_services", "No"),
            ("contract_po_amount", "2500"),
            ("contract_po_no", "PO-1"),
            ("plant_id", "8350328"),
            ("scaffold_type", "4 - Layher"),
            ("market", "2 - Civil"),
            ("submarket", "Dams"),
            ("retention", "Yes"),
            ("retention_amount_pct", "5"),
            ("call_out", "Other"),
            ("asbestos_related", "No"),
            ("ap_contact", "Pat Lee"),
            ("ap_phone", "555-0100"),
            ("ap_email", "ap@example.com"),
            ("invoice_submission_method", "Email"),
            ("payment_method", "ACH"),
            ("proposal_not_signed_justification", "Signed copy pending"),
        ]
        .into_iter()
        .collect();
        NewJobRequest::new(
            validate(&fields).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 7),
        )
    }

    #[test]
    fn test_insert_and_find() {
        let db = test_db();
        insert(&db, "req-1", "2026-01-01T00:00:00Z", &sample_request()).unwrap();

        let found = find_by_id(&db, "req-1").unwrap().unwrap();
        assert_eq!(found.status, "new");
        assert_eq!(found.todays_date.as_deref(), Some("2024-03-07"));
        assert_eq!(found.market, "2 - Civil");
        assert_eq!(found.submarket, "Dams");
        assert_eq!(found.contract_po_amount, 2500.0);
        assert_eq!(found.retention_amount_pct, Some(5.0));
        assert_eq!(found.portal_name, "");
    }

    #[test]
    fn test_absent_optionals_are_null() {
        let db = test_db();
        let mut request = sample_request();
        request.todays_date = None;
        insert(&db, "req-2", "2026-01-01T00:00:00Z", &request).unwrap();

        assert!(is_null(&db, "req-2", "customer_name").unwrap());
        assert!(is_null(&db, "req-2", "todays_date").unwrap());
        assert!(!is_null(&db, "req-2", "portal_name").unwrap());
        assert!(is_null(&db, "req-2", "1=1; DROP TABLE job_requests").is_err());
    }

    #[test]
    fn test_delete() {
        let db = test_db();
        insert(&db, "req-3", "2026-01-01T00:00:00Z", &sample_request()).unwrap();
        assert_eq!(count(&db).unwrap(), 1);

        assert!(delete(&db, "req-3").unwrap());
        assert!(!delete(&db, "req-3").unwrap());
        assert_eq!(count(&db).unwrap(), 0);
        assert!(find_by_id(&db, "req-3").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let db = test_db();
        insert(&db, "dup", "2026-01-01T00:00:00Z", &sample_request()).unwrap();
        let result = insert(&db, "dup", "2026-01-01T00:00:00Z", &sample_request());
        assert!(matches!(result, Err(DatabaseError::Sqlite(_))));
    }
}
