//! Outbound notification of newly created requests.

pub mod resend;

pub use resend::{parse_recipients, ResendNotifier};

use thiserror::Error;

use crate::sanitize::escape_html;
use crate::schema::{JobRequestValues, OptionSet};

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Notification rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("No notification recipients configured")]
    NoRecipients,
}

/// A composed email, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub html: String,
}

impl Notification {
    /// Announcement sent to the operations mailbox after a request and both
    /// attachments have been stored.
    pub fn job_request_created(request_id: &str, values: &JobRequestValues) -> Self {
        let subject = format!(
            "New Job Setup Request - {} - {}",
            values.job_no, values.division_no
        );

        let rows = [
            ("Request ID", request_id.to_string()),
            ("Completed By", values.completed_by.clone()),
            ("Division No", values.division_no.clone()),
            (
                "Market/Submarket",
                format!("{} / {}", values.market.label(), values.submarket),
            ),
            ("Scaffold Type", values.scaffold_type.label().to_string()),
            ("PO #", values.contract_po_no.clone()),
        ];

        let mut html = String::from("<p><b>New Job Setup Request Submitted</b></p>\n");
        for (label, value) in rows {
            html.push_str(&format!("<p><b>{}:</b> {}</p>\n", label, escape_html(&value)));
        }

        Self { subject, html }
    }
}
