//! Shared schema for the job setup request form.
//!
//! Defines every field's type, option set and cross-field rule. The same
//! tables feed the form's dropdowns (see [`FormOptions`]) and the server-side
//! validation, so the two cannot drift apart.

pub mod date;
pub mod defaults;
pub mod options;
pub mod rules;
pub mod values;

pub use date::parse_todays_date;
pub use defaults::{FormOptions, MarketOption, FORM_DEFAULTS};
pub use options::{
    CallOut, FreightTerm, InvoiceSubmissionMethod, Market, OptionSet, PaymentMethod, PlantId,
    ScaffoldType, ServiceOffering, YesNo,
};
pub use rules::{normalize_text, validate};
pub use values::{FieldIssue, JobRequestValues};
