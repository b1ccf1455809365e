//! Flattening of nested study documents into tabular records.
//!
//! One `FlatStudyRecord` per study document, always carrying the same
//! twelve fields. Every nested lookup short-circuits to a documented
//! placeholder instead of propagating absence: flattening is total over
//! any syntactically valid document and never raises.

use serde::Serialize;

use crate::models::{DateStruct, Study};

/// Placeholder strings substituted for missing data.
pub mod defaults {
    /// Missing scalar fields (NCT ID, acronym, overall status, study type).
    pub const UNKNOWN: &str = "Unknown";

    /// Missing milestone dates.
    pub const UNKNOWN_DATE: &str = "Unknown Date";

    /// Empty or absent conditions list.
    pub const NO_CONDITIONS: &str = "No conditions listed";

    /// Empty or absent interventions list.
    pub const NO_INTERVENTIONS: &str = "No interventions listed";

    /// An intervention entry without a name.
    pub const NO_INTERVENTION_NAME: &str = "No intervention name listed";

    /// Empty or absent locations list.
    pub const NO_LOCATIONS: &str = "No locations listed";

    /// A location entry without a city.
    pub const NO_CITY: &str = "No City";

    /// A location entry without a country.
    pub const NO_COUNTRY: &str = "No Country";

    /// Empty or absent phases list.
    pub const NOT_AVAILABLE: &str = "Not Available";
}

/// Column names, in canonical order. CSV headers and record values use
/// this order.
pub const FIELD_NAMES: [&str; 12] = [
    "NCT ID",
    "Acronym",
    "Overall Status",
    "Start Date",
    "Conditions",
    "Interventions",
    "Locations",
    "Primary Completion Date",
    "Study First Post Date",
    "Last Update Post Date",
    "Study Type",
    "Phases",
];

/// A flat, twelve-field view of one study document.
///
/// Every field is always present: either an extracted value or the
/// placeholder documented in [`defaults`]. Multi-valued fields are joined
/// with `", "` in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatStudyRecord {
    /// NCT registry identifier.
    #[serde(rename = "NCT ID")]
    pub nct_id: String,

    /// Study acronym.
    #[serde(rename = "Acronym")]
    pub acronym: String,

    /// Overall recruitment status.
    #[serde(rename = "Overall Status")]
    pub overall_status: String,

    /// Study start date.
    #[serde(rename = "Start Date")]
    pub start_date: String,

    /// Conditions under study, comma-joined.
    #[serde(rename = "Conditions")]
    pub conditions: String,

    /// Intervention names, comma-joined.
    #[serde(rename = "Interventions")]
    pub interventions: String,

    /// Site locations as "city - country", comma-joined.
    #[serde(rename = "Locations")]
    pub locations: String,

    /// Primary completion date.
    #[serde(rename = "Primary Completion Date")]
    pub primary_completion_date: String,

    /// Date first posted to the registry.
    #[serde(rename = "Study First Post Date")]
    pub study_first_post_date: String,

    /// Date of the last registry update.
    #[serde(rename = "Last Update Post Date")]
    pub last_update_post_date: String,

    /// Declared study type, possibly reclassified to "PK" or "PD".
    #[serde(rename = "Study Type")]
    pub study_type: String,

    /// Trial phases, comma-joined.
    #[serde(rename = "Phases")]
    pub phases: String,
}

impl FlatStudyRecord {
    /// Flatten one study document. Total: never fails, whatever sections
    /// or fields the document is missing.
    #[must_use]
    pub fn from_study(study: &Study) -> Self {
        let section = study.protocol_section.as_ref();
        let ident = section.and_then(|s| s.identification_module.as_ref());
        let status = section.and_then(|s| s.status_module.as_ref());
        let conditions = section.and_then(|s| s.conditions_module.as_ref());
        let arms = section.and_then(|s| s.arms_interventions_module.as_ref());
        let contacts = section.and_then(|s| s.contacts_locations_module.as_ref());
        let design = section.and_then(|s| s.design_module.as_ref());

        Self {
            nct_id: string_or(ident.and_then(|m| m.nct_id.as_deref()), defaults::UNKNOWN),
            acronym: string_or(ident.and_then(|m| m.acronym.as_deref()), defaults::UNKNOWN),
            overall_status: string_or(
                status.and_then(|m| m.overall_status.as_deref()),
                defaults::UNKNOWN,
            ),
            start_date: date_or_default(status.and_then(|m| m.start_date_struct.as_ref())),
            conditions: join_or(
                conditions.map(|m| m.conditions.clone()).unwrap_or_default(),
                defaults::NO_CONDITIONS,
            ),
            interventions: join_or(
                arms.map(|m| {
                    m.interventions
                        .iter()
                        .map(|i| {
                            i.name.clone().unwrap_or_else(|| {
                                defaults::NO_INTERVENTION_NAME.to_string()
                            })
                        })
                        .collect()
                })
                .unwrap_or_default(),
                defaults::NO_INTERVENTIONS,
            ),
            locations: join_or(
                contacts
                    .map(|m| m.locations.iter().map(format_location).collect())
                    .unwrap_or_default(),
                defaults::NO_LOCATIONS,
            ),
            primary_completion_date: date_or_default(
                status.and_then(|m| m.primary_completion_date_struct.as_ref()),
            ),
            study_first_post_date: date_or_default(
                status.and_then(|m| m.study_first_post_date_struct.as_ref()),
            ),
            last_update_post_date: date_or_default(
                status.and_then(|m| m.last_update_post_date_struct.as_ref()),
            ),
            study_type: string_or(design.and_then(|m| m.study_type.as_deref()), defaults::UNKNOWN),
            phases: join_or(
                design.map(|m| m.phases.clone()).unwrap_or_default(),
                defaults::NOT_AVAILABLE,
            ),
        }
    }

    /// Re-derive the study type from the phase list, in place.
    ///
    /// Interventional studies with a phase-1 component become "PK",
    /// with a phase-2/3/4 component "PD"; observational studies with a
    /// phase-1 component become "PK". Everything else is left unchanged,
    /// so applying this twice is a no-op.
    pub fn reclassify(&mut self) {
        if let Some(class) = classify(&self.study_type, &self.phases) {
            self.study_type = class.label().to_string();
        }
    }

    /// Field values in [`FIELD_NAMES`] order.
    #[must_use]
    pub fn values(&self) -> [&str; 12] {
        [
            &self.nct_id,
            &self.acronym,
            &self.overall_status,
            &self.start_date,
            &self.conditions,
            &self.interventions,
            &self.locations,
            &self.primary_completion_date,
            &self.study_first_post_date,
            &self.last_update_post_date,
            &self.study_type,
            &self.phases,
        ]
    }
}

/// Pharmacological category derived from study type and phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PharmacologyClass {
    /// Pharmacokinetics.
    Pk,
    /// Pharmacodynamics.
    Pd,
}

impl PharmacologyClass {
    /// The label written into the "Study Type" field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pk => "PK",
            Self::Pd => "PD",
        }
    }
}

/// Classify a record by its declared study type and joined phase list.
///
/// `None` means the declared type stands. The declared type is matched
/// against the registry's enumeration value "INTERVENTIONAL"; one legacy
/// data path matched a misspelling of it and could never classify
/// anything as "PD".
#[must_use]
pub fn classify(study_type: &str, phases: &str) -> Option<PharmacologyClass> {
    match study_type {
        "INTERVENTIONAL" => {
            if phases.contains("PHASE1") {
                Some(PharmacologyClass::Pk)
            } else if ["PHASE2", "PHASE3", "PHASE4"].iter().any(|p| phases.contains(p)) {
                Some(PharmacologyClass::Pd)
            } else {
                None
            }
        }
        "OBSERVATIONAL" => phases.contains("PHASE1").then_some(PharmacologyClass::Pk),
        _ => None,
    }
}

/// Flatten and reclassify a fetched document sequence, preserving order.
#[must_use]
pub fn flatten_all(studies: &[Study]) -> Vec<FlatStudyRecord> {
    studies
        .iter()
        .map(|study| {
            let mut record = FlatStudyRecord::from_study(study);
            record.reclassify();
            record
        })
        .collect()
}

fn string_or(value: Option<&str>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), ToString::to_string)
}

fn date_or_default(value: Option<&DateStruct>) -> String {
    string_or(value.and_then(|d| d.date.as_deref()), defaults::UNKNOWN_DATE)
}

fn join_or(items: Vec<String>, default: &str) -> String {
    if items.is_empty() { default.to_string() } else { items.join(", ") }
}

fn format_location(location: &crate::models::Location) -> String {
    format!(
        "{} - {}",
        location.city.as_deref().unwrap_or(defaults::NO_CITY),
        location.country.as_deref().unwrap_or(defaults::NO_COUNTRY),
    )
}
