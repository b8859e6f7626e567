//! Option lists and initial values served to the form, so the browser and the
//! server read the same tables.

use std::collections::BTreeMap;

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::form::FIELD_NAMES;

use super::options::{
    CallOut, FreightTerm, InvoiceSubmissionMethod, Market, OptionSet, PaymentMethod, PlantId,
    ScaffoldType, ServiceOffering, YesNo,
};

/// Initial values for fields that are not blank on a fresh form.
pub const FORM_DEFAULTS: &[(&str, &str)] = &[
    ("job_no", "TBD"),
    ("new_customer", "No"),
    ("service_offering", "05 - Commercial Scaffolding"),
    ("freight", "1 - Carrier Bills Customer Direct"),
    ("engineering_services", "No"),
    ("retention", "No"),
    ("call_out", "None"),
    ("asbestos_related", "No"),
    ("invoice_submission_method", "Email"),
    ("payment_method", "Check"),
];

#[derive(Debug, Clone, Serialize)]
pub struct MarketOption {
    pub market: &'static str,
    pub submarkets: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct FormOptions {
    pub service_offerings: Vec<&'static str>,
    pub freight_options: Vec<&'static str>,
    pub plant_ids: Vec<&'static str>,
    pub scaffold_types: Vec<&'static str>,
    pub markets: Vec<MarketOption>,
    pub yes_no: Vec<&'static str>,
    pub call_out_options: Vec<&'static str>,
    pub invoice_submission_methods: Vec<&'static str>,
    pub payment_methods: Vec<&'static str>,
    /// Every form field with its initial value (empty when none).
    pub defaults: BTreeMap<&'static str, &'static str>,
}

impl FormOptions {
    pub fn current() -> Self {
        let mut defaults: BTreeMap<&'static str, &'static str> =
            FIELD_NAMES.iter().map(|name| (*name, "")).collect();
        defaults.extend(FORM_DEFAULTS.iter().copied());

        Self {
            service_offerings: ServiceOffering::labels(),
            freight_options: FreightTerm::labels(),
            plant_ids: PlantId::labels(),
            scaffold_types: ScaffoldType::labels(),
            markets: Market::iter()
                .map(|market| MarketOption {
                    market: market.label(),
                    submarkets: market.submarkets(),
                })
                .collect(),
            yes_no: YesNo::labels(),
            call_out_options: CallOut::labels(),
            invoice_submission_methods: InvoiceSubmissionMethod::labels(),
            payment_methods: PaymentMethod::labels(),
            defaults,
        }
    }
}
