use serde::Serialize;

use super::options::{
    CallOut, FreightTerm, InvoiceSubmissionMethod, Market, PaymentMethod, PlantId, ScaffoldType,
    ServiceOffering, YesNo,
};

/// One validation problem, attached to the field that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    #[serde(rename = "path")]
    pub field_path: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_path: field_path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field_path, self.message)
    }
}

/// A fully validated job setup request.
///
/// Strings are trimmed, optional strings that were blank are `None`, and
/// every dropdown is narrowed to its option set.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRequestValues {
    // Header
    pub todays_date: Option<String>,
    pub completed_by: String,
    pub job_no: String,
    pub proposal_bid_no: Option<String>,

    // Core job info
    pub division_no: String,
    pub job_description: String,
    pub new_customer: YesNo,
    pub service_offering: ServiceOffering,
    pub freight: FreightTerm,
    pub engineering_services: YesNo,

    // Customer
    pub customer_number: Option<String>,
    pub customer_name: Option<String>,
    pub general_contractor: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub sub_contractor: Option<String>,
    pub attention: Option<String>,

    // Billing
    pub billing_address: Option<String>,
    pub billing_city: Option<String>,
    pub billing_state: Option<String>,
    pub billing_zip: Option<String>,
    pub customer_contact: Option<String>,
    pub customer_phone: Option<String>,
    pub foreman_proj_mgr: Option<String>,
    pub billed_by: Option<String>,
    pub sales_person: Option<String>,

    // Contract
    pub contract_po_amount: f64,
    pub contract_po_no: String,
    pub plant_id: PlantId,
    pub scaffold_type: ScaffoldType,
    pub market: Market,
    pub submarket: &'static str,

    // Jobsite
    pub jobsite_address: Option<String>,
    pub jobsite_city: Option<String>,
    pub jobsite_state: Option<String>,
    pub jobsite_zip: Option<String>,
    pub county_parish: Option<String>,

    // Special billing requirements
    pub retention: YesNo,
    pub retention_amount_pct: Option<f64>,
    pub call_out: CallOut,
    pub asbestos_related: YesNo,

    // Accounts payable
    pub ap_contact: String,
    pub ap_phone: String,
    pub ap_email: String,

    // Invoicing and payment
    pub invoice_submission_method: InvoiceSubmissionMethod,
    pub portal_name: Option<String>,
    pub payment_method: PaymentMethod,

    pub proposal_not_signed_justification: String,
}
