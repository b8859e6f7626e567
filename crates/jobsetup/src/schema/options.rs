//! Fixed option sets for every dropdown on the job setup form.
//!
//! The labels here are the exact strings submitted by the form and stored in
//! the database, so a variant's `serialize` attribute must never change once
//! rows exist that carry it.

use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Common behaviour of the enumerated form fields.
pub trait OptionSet: Copy + std::str::FromStr + IntoEnumIterator + Into<&'static str> {
    /// The stored/submitted label of this option.
    fn label(self) -> &'static str {
        self.into()
    }

    /// Every label in declaration order.
    fn labels() -> Vec<&'static str> {
        Self::iter().map(|option| option.label()).collect()
    }

    /// Parses an exact label.
    fn from_label(label: &str) -> Option<Self> {
        label.parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum YesNo {
    Yes,
    No,
}

impl OptionSet for YesNo {}

impl YesNo {
    pub fn is_yes(self) -> bool {
        self == YesNo::Yes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum ServiceOffering {
    #[strum(serialize = "01 - Asbestos Abatement")]
    AsbestosAbatement,
    #[strum(serialize = "02 - Abrasive Blasting")]
    AbrasiveBlasting,
    #[strum(serialize = "03 - Carpentry Services")]
    CarpentryServices,
    #[strum(serialize = "04 - Civil Construction")]
    CivilConstruction,
    #[strum(serialize = "05 - Commercial Scaffolding")]
    CommercialScaffolding,
    #[strum(serialize = "06 - Composite Wrap")]
    CompositeWrap,
    #[strum(serialize = "07 - Concrete Construction")]
    ConcreteConstruction,
    #[strum(serialize = "08 - Corrosion Services - Other")]
    CorrosionServicesOther,
    #[strum(serialize = "09 - Corrosion Under Fireproofing")]
    CorrosionUnderFireproofing,
    #[strum(serialize = "10 - Corrosion Under Insulation")]
    CorrosionUnderInsulation,
    #[strum(serialize = "11 - CP Construction")]
    CpConstruction,
    #[strum(serialize = "12 - CP Products")]
    CpProducts,
}

impl OptionSet for ServiceOffering {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum FreightTerm {
    #[strum(serialize = "1 - Carrier Bills Customer Direct")]
    CarrierBillsCustomerDirect,
    #[strum(serialize = "2 - Brandsafway Pays - Do Not Rebill Customer")]
    PaysDoNotRebill,
    #[strum(serialize = "3 - Brandsafway Pays - Bill Customer")]
    PaysBillCustomer,
    #[strum(serialize = "4 - Customer Pick-Up")]
    CustomerPickUp,
    #[strum(serialize = "5 - Brandsafway Pays to Jobsite - Customer Pays Return Freight")]
    PaysToJobsiteCustomerPaysReturn,
}

impl OptionSet for FreightTerm {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum PlantId {
    #[strum(serialize = "8350316")]
    Plant8350316,
    #[strum(serialize = "8350328")]
    Plant8350328,
}

impl OptionSet for PlantId {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum ScaffoldType {
    #[strum(serialize = "1 - Cuptype Imperial")]
    CuptypeImperial,
    #[strum(serialize = "2 - Cuptype Metric")]
    CuptypeMetric,
    #[strum(serialize = "3 - Frame & Brace")]
    FrameAndBrace,
    #[strum(serialize = "4 - Layher")]
    Layher,
    #[strum(serialize = "5 - Miscellaneous")]
    Miscellaneous,
    #[strum(serialize = "6 - Nonrental")]
    Nonrental,
    #[strum(serialize = "7 - Safway")]
    Safway,
    #[strum(serialize = "8 - Skylimber")]
    Skylimber,
    #[strum(serialize = "9 - Tube & Clamp")]
    TubeAndClamp,
}

impl OptionSet for ScaffoldType {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum CallOut {
    None,
    #[strum(serialize = "4 Hour Minimum")]
    FourHourMinimum,
    #[strum(serialize = "8 Hour Minimum")]
    EightHourMinimum,
    Other,
}

impl OptionSet for CallOut {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum InvoiceSubmissionMethod {
    Email,
    Portal,
}

impl OptionSet for InvoiceSubmissionMethod {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum PaymentMethod {
    Check,
    #[strum(serialize = "ACH")]
    Ach,
}

impl OptionSet for PaymentMethod {}

/// Top level of the market/submarket hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum Market {
    #[strum(serialize = "1 - Chemical")]
    Chemical,
    #[strum(serialize = "2 - Civil")]
    Civil,
    #[strum(serialize = "3 - Commercial")]
    Commercial,
    #[strum(serialize = "4 - Institutional")]
    Institutional,
    #[strum(serialize = "5 - Industrial Other")]
    IndustrialOther,
    #[strum(serialize = "6 - Gas")]
    Gas,
    #[strum(serialize = "7 - Offshore")]
    Offshore,
    #[strum(serialize = "8 - Oil Sands")]
    OilSands,
    #[strum(serialize = "9 - Power Plants")]
    PowerPlants,
    #[strum(serialize = "10 - Pulp & Paper")]
    PulpAndPaper,
    #[strum(serialize = "11 - Refinery")]
    Refinery,
}

impl OptionSet for Market {}

impl Market {
    /// The submarkets that may be selected under this market.
    pub fn submarkets(self) -> &'static [&'static str] {
        match self {
            Market::Chemical => &["Chemical Plant", "Petrochemical Plant"],
            Market::Civil => &["Bridges", "Dams", "Roads", "Transit Ways"],
            Market::Commercial => &[
                "Casinos",
                "Condos / Apartments",
                "Hotels",
                "Office Buildings",
                "Parking Garages",
                "Special Events",
                "Stadiums",
                "Theaters",
            ],
            Market::Institutional => &[
                "Airports",
                "Government Buildings",
                "Hospitals",
                "Schools / Universities",
            ],
            Market::IndustrialOther => &[
                "Automotive Plants",
                "Food and Beverage",
                "Cement Plants",
                "Gas Plants",
                "Manufacturing Plants",
                "Mines",
                "Sewage Treatment Plants",
                "Shipyards",
                "Steel Mills",
                "Water Treatment Plants",
            ],
            Market::Gas => &[
                "Liquid Natural Gas",
                "Compressor & Metering Stations",
                "Natural Gas",
                "Natural Gas Liquification",
                "Well Casing - Gas",
                "Well Casing - Liquid",
            ],
            Market::Offshore => &["Drill Rigs", "Production Platforms"],
            Market::OilSands => &["Mining", "SAGD", "Modular Yards", "Upgraders"],
            Market::PowerPlants => &[
                "Combined-Cycle Plant",
                "Gas Turbine Plant",
                "Hydro Electric Plant",
                "Nuclear Plant",
                "Other Power Plant",
                "Steam Turbine Plant",
                "Solar",
                "Wind",
            ],
            Market::PulpAndPaper => &["Paper Mill", "Pulp Mill"],
            Market::Refinery => &["Pipeline/Terminals", "Refinery"],
        }
    }

    /// Returns the canonical submarket label if `submarket` belongs to this market.
    pub fn find_submarket(self, submarket: &str) -> Option<&'static str> {
        self.submarkets().iter().copied().find(|s| *s == submarket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_from_label() {
        for label in ServiceOffering::labels() {
            let parsed = ServiceOffering::from_label(label).unwrap();
            assert_eq!(parsed.label(), label);
        }
    }

    #[test]
    fn test_from_label_is_exact() {
        assert_eq!(PaymentMethod::from_label("ACH"), Some(PaymentMethod::Ach));
        assert_eq!(PaymentMethod::from_label("ach"), None);
        assert_eq!(YesNo::from_label(" Yes"), None);
        assert_eq!(CallOut::from_label("None"), Some(CallOut::None));
    }

    #[test]
    fn test_market_count_and_order() {
        let labels = Market::labels();
        assert_eq!(labels.len(), 11);
        assert_eq!(labels[0], "1 - Chemical");
        assert_eq!(labels[10], "11 - Refinery");
    }

    #[test]
    fn test_submarket_membership() {
        assert_eq!(
            Market::Chemical.find_submarket("Chemical Plant"),
            Some("Chemical Plant")
        );
        assert_eq!(Market::Chemical.find_submarket("Bridges"), None);
        assert_eq!(Market::Civil.find_submarket("Bridges"), Some("Bridges"));
    }

    #[test]
    fn test_every_market_has_submarkets() {
        for market in Market::iter() {
            assert!(!market.submarkets().is_empty(), "{:?}", market);
        }
    }
}
