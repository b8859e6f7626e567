//! Field rules and cross-field refinements.

use std::sync::LazyLock;

use regex::Regex;

use crate::form::RawFields;

use super::options::{
    CallOut, FreightTerm, InvoiceSubmissionMethod, Market, OptionSet, PaymentMethod, PlantId,
    ScaffoldType, ServiceOffering, YesNo,
};
use super::values::{FieldIssue, JobRequestValues};

static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

const JOB_DESCRIPTION_MIN_CHARS: usize = 5;

/// Trims a raw value and maps blank input to `None`.
///
/// Applying it to its own output returns the same value.
pub fn normalize_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Collects issues while individual fields are read.
struct FieldReader<'a> {
    raw: &'a RawFields,
    issues: Vec<FieldIssue>,
}

impl<'a> FieldReader<'a> {
    fn new(raw: &'a RawFields) -> Self {
        Self {
            raw,
            issues: Vec::new(),
        }
    }

    fn issue(&mut self, field: &str, message: impl Into<String>) {
        self.issues.push(FieldIssue::new(field, message));
    }

    fn optional_text(&self, field: &str) -> Option<String> {
        normalize_text(self.raw.get(field))
    }

    fn required_text(&mut self, field: &str, label: &str) -> Option<String> {
        self.required_text_with_message(field, &format!("{} is required", label))
    }

    fn required_text_with_message(&mut self, field: &str, message: &str) -> Option<String> {
        let value = self.optional_text(field);
        if value.is_none() {
            self.issue(field, message);
        }
        value
    }

    fn required_option<T: OptionSet>(
        &mut self,
        field: &str,
        label: &str,
        required_message: &str,
    ) -> Option<T> {
        let value = match self.optional_text(field) {
            Some(value) => value,
            None => {
                self.issue(field, required_message);
                return None;
            }
        };
        let parsed = T::from_label(&value);
        if parsed.is_none() {
            self.issue(field, format!("Invalid {}", label));
        }
        parsed
    }

    fn number(&mut self, field: &str, invalid_message: &str) -> Option<Option<f64>> {
        let Some(value) = self.optional_text(field) else {
            return Some(None);
        };
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(Some(n)),
            _ => {
                self.issue(field, invalid_message);
                None
            }
        }
    }
}

/// Validates and normalizes a raw submission.
///
/// Every field is checked and all issues are returned in field order.
/// Cross-field rules only run once every individual field is valid.
pub fn validate(raw: &RawFields) -> Result<JobRequestValues, Vec<FieldIssue>> {
    let mut r = FieldReader::new(raw);

    let todays_date = r.optional_text("todays_date");
    let completed_by = r.required_text("completed_by", "Completed By");
    let job_no = r.required_text("job_no", "Job No");
    let proposal_bid_no = r.optional_text("proposal_bid_no");

    let division_no = r.required_text("division_no", "Division No");
    let job_description = r
        .required_text("job_description", "Job Description")
        .and_then(|description| {
            if description.chars().count() < JOB_DESCRIPTION_MIN_CHARS {
                r.issue("job_description", "Job Description is required");
                None
            } else {
                Some(description)
            }
        });

    let new_customer =
        r.required_option::<YesNo>("new_customer", "New Customer", "Select New Customer");
    let service_offering = r.required_option::<ServiceOffering>(
        "service_offering",
        "Service Offering",
        "Select Service Offering",
    );
    let freight = r.required_option::<FreightTerm>("freight", "Freight", "Select Freight");
    let engineering_services = r.required_option::<YesNo>(
        "engineering_services",
        "Engineering Services",
        "Select Engineering Services",
    );

    let customer_number = r.optional_text("customer_number");
    let customer_name = r.optional_text("customer_name");
    let general_contractor = r.optional_text("general_contractor");
    let phone_number = r.optional_text("phone_number");
    let address = r.optional_text("address");
    let city = r.optional_text("city");
    let state = r.optional_text("state");
    let zip = r.optional_text("zip");
    let sub_contractor = r.optional_text("sub_contractor");
    let attention = r.optional_text("attention");

    let billing_address = r.optional_text("billing_address");
    let billing_city = r.optional_text("billing_city");
    let billing_state = r.optional_text("billing_state");
    let billing_zip = r.optional_text("billing_zip");
    let customer_contact = r.optional_text("customer_contact");
    let customer_phone = r.optional_text("customer_phone");
    let foreman_proj_mgr = r.optional_text("foreman_proj_mgr");
    let billed_by = r.optional_text("billed_by");
    let sales_person = r.optional_text("sales_person");

    let contract_po_amount = match r.number(
        "contract_po_amount",
        "Contract/PO Amount must be a number",
    ) {
        Some(Some(amount)) if amount > 0.0 => Some(amount),
        Some(Some(_)) => {
            r.issue("contract_po_amount", "Contract/PO Amount must be > 0");
            None
        }
        Some(None) => {
            r.issue("contract_po_amount", "Contract/PO Amount is required");
            None
        }
        None => None,
    };
    let contract_po_no = r.required_text("contract_po_no", "Contract / P.O. No.");

    let plant_id = r.required_option::<PlantId>("plant_id", "Plant ID", "Plant ID is required");
    let scaffold_type = r.required_option::<ScaffoldType>(
        "scaffold_type",
        "Scaffold Type",
        "Scaffold Type is required",
    );
    let market = r.required_option::<Market>("market", "Market", "Market is required");
    let submarket = r.required_text("submarket", "Submarket");

    let jobsite_address = r.optional_text("jobsite_address");
    let jobsite_city = r.optional_text("jobsite_city");
    let jobsite_state = r.optional_text("jobsite_state");
    let jobsite_zip = r.optional_text("jobsite_zip");
    let county_parish = r.optional_text("county_parish");

    let retention =
        r.required_option::<YesNo>("retention", "Retention", "Retention is required");
    let retention_amount_pct =
        match r.number("retention_amount_pct", "Retention % must be a number") {
            Some(Some(pct)) if !(0.0..=100.0).contains(&pct) => {
                r.issue("retention_amount_pct", "Retention % must be 0-100");
                None
            }
            other => other,
        };
    let call_out = r.required_option::<CallOut>("call_out", "Call Out", "Call Out is required");
    let asbestos_related = r.required_option::<YesNo>(
        "asbestos_related",
        "Asbestos Related",
        "Asbestos Related is required",
    );

    let ap_contact = r.required_text("ap_contact", "Accounts Payable Contact");
    let ap_phone = r.required_text("ap_phone", "Accounts Payable Phone");
    let ap_email = r
        .required_text("ap_email", "Accounts Payable Email")
        .and_then(|email| {
            if RE_EMAIL.is_match(&email) {
                Some(email)
            } else {
                r.issue(
                    "ap_email",
                    "Accounts Payable Email must be a valid email address",
                );
                None
            }
        });

    let invoice_submission_method = r.required_option::<InvoiceSubmissionMethod>(
        "invoice_submission_method",
        "Invoice Submission Method",
        "Invoice Submission Method is required",
    );
    let portal_name = r.optional_text("portal_name");
    let payment_method = r.required_option::<PaymentMethod>(
        "payment_method",
        "Payment Method",
        "Payment Method is required",
    );

    let proposal_not_signed_justification = r.required_text_with_message(
        "proposal_not_signed_justification",
        "Please give job details/justification for proposal not being signed.",
    );

    let assembled = (|| {
        Some(JobRequestValues {
            todays_date,
            completed_by: completed_by?,
            job_no: job_no?,
            proposal_bid_no,
            division_no: division_no?,
            job_description: job_description?,
            new_customer: new_customer?,
            service_offering: service_offering?,
            freight: freight?,
            engineering_services: engineering_services?,
            customer_number,
            customer_name,
            general_contractor,
            phone_number,
            address,
            city,
            state,
            zip,
            sub_contractor,
            attention,
            billing_address,
            billing_city,
            billing_state,
            billing_zip,
            customer_contact,
            customer_phone,
            foreman_proj_mgr,
            billed_by,
            sales_person,
            contract_po_amount: contract_po_amount?,
            contract_po_no: contract_po_no?,
            plant_id: plant_id?,
            scaffold_type: scaffold_type?,
            // Narrowed by the refinement below.
            market: market?,
            submarket: "",
            jobsite_address,
            jobsite_city,
            jobsite_state,
            jobsite_zip,
            county_parish,
            retention: retention?,
            retention_amount_pct: retention_amount_pct?,
            call_out: call_out?,
            asbestos_related: asbestos_related?,
            ap_contact: ap_contact?,
            ap_phone: ap_phone?,
            ap_email: ap_email?,
            invoice_submission_method: invoice_submission_method?,
            portal_name,
            payment_method: payment_method?,
            proposal_not_signed_justification: proposal_not_signed_justification?,
        })
    })();

    let refined = match (assembled, submarket) {
        (Some(values), Some(submarket)) if r.issues.is_empty() => {
            refine(values, &submarket, &mut r.issues)
        }
        _ => None,
    };

    match refined {
        Some(values) if r.issues.is_empty() => Ok(values),
        _ => Err(r.issues),
    }
}

/// Cross-field rules. Returns the values with the submarket narrowed, or
/// `None` after pushing at least one issue.
fn refine(
    mut values: JobRequestValues,
    submarket: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<JobRequestValues> {
    match values.market.find_submarket(submarket) {
        Some(canonical) => values.submarket = canonical,
        None => issues.push(FieldIssue::new(
            "submarket",
            "Submarket does not match selected Market.",
        )),
    }

    if values.retention.is_yes() && values.retention_amount_pct.is_none() {
        issues.push(FieldIssue::new(
            "retention_amount_pct",
            "Retention amount % is required when Retention is Yes.",
        ));
    }

    if values.invoice_submission_method == InvoiceSubmissionMethod::Portal
        && values.portal_name.is_none()
    {
        issues.push(FieldIssue::new(
            "portal_name",
            "Portal Name is required when Portal is selected.",
        ));
    }

    if issues.is_empty() {
        Some(values)
    } else {
        None
    }
}
