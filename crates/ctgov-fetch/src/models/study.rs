//! Study data model matching the ClinicalTrials.gov v2 API schema.
//!
//! Every section and field is optional: the registry omits whole modules
//! for sparsely registered studies, and deserialization must never fail
//! on account of missing data.

use serde::{Deserialize, Serialize};

/// One study document as returned by the search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Study {
    /// The protocol section groups all registration metadata.
    #[serde(default)]
    pub protocol_section: Option<ProtocolSection>,
}

impl Study {
    /// Get the NCT identifier if available.
    #[must_use]
    pub fn nct_id(&self) -> Option<&str> {
        self.protocol_section.as_ref()?.identification_module.as_ref()?.nct_id.as_deref()
    }
}

/// Registration metadata grouped into named modules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolSection {
    /// Identification: NCT ID, acronym.
    #[serde(default)]
    pub identification_module: Option<IdentificationModule>,

    /// Status: overall status and milestone dates.
    #[serde(default)]
    pub status_module: Option<StatusModule>,

    /// Conditions under study.
    #[serde(default)]
    pub conditions_module: Option<ConditionsModule>,

    /// Arms and interventions.
    #[serde(default)]
    pub arms_interventions_module: Option<ArmsInterventionsModule>,

    /// Contacts and site locations.
    #[serde(default)]
    pub contacts_locations_module: Option<ContactsLocationsModule>,

    /// Design: study type and trial phases.
    #[serde(default)]
    pub design_module: Option<DesignModule>,
}

/// Identification module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationModule {
    /// NCT registry identifier (e.g. "NCT01234567").
    #[serde(default)]
    pub nct_id: Option<String>,

    /// Study acronym.
    #[serde(default)]
    pub acronym: Option<String>,
}

/// Status module with milestone dates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusModule {
    /// Overall recruitment status (e.g. "RECRUITING", "COMPLETED").
    #[serde(default)]
    pub overall_status: Option<String>,

    /// Study start date.
    #[serde(default)]
    pub start_date_struct: Option<DateStruct>,

    /// Primary completion date.
    #[serde(default)]
    pub primary_completion_date_struct: Option<DateStruct>,

    /// Date the study was first posted to the registry.
    #[serde(default)]
    pub study_first_post_date_struct: Option<DateStruct>,

    /// Date of the most recent registry update.
    #[serde(default)]
    pub last_update_post_date_struct: Option<DateStruct>,
}

/// A dated milestone. The registry wraps every date in a struct carrying
/// the date string plus a precision/type tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateStruct {
    /// Date string, typically "YYYY-MM-DD" or "YYYY-MM".
    #[serde(default)]
    pub date: Option<String>,

    /// Date type tag ("ACTUAL", "ESTIMATED").
    #[serde(default)]
    pub r#type: Option<String>,
}

/// Conditions module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionsModule {
    /// Condition names.
    #[serde(default)]
    pub conditions: Vec<String>,
}

/// Arms and interventions module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmsInterventionsModule {
    /// Interventions applied across the study arms.
    #[serde(default)]
    pub interventions: Vec<Intervention>,
}

/// A single intervention.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intervention {
    /// Intervention name.
    #[serde(default)]
    pub name: Option<String>,

    /// Intervention type ("DRUG", "DEVICE", ...).
    #[serde(default)]
    pub r#type: Option<String>,
}

/// Contacts and locations module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsLocationsModule {
    /// Study site locations.
    #[serde(default)]
    pub locations: Vec<Location>,
}

/// A study site location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Facility city.
    #[serde(default)]
    pub city: Option<String>,

    /// Facility country.
    #[serde(default)]
    pub country: Option<String>,
}

/// Design module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignModule {
    /// Declared study type ("INTERVENTIONAL", "OBSERVATIONAL").
    #[serde(default)]
    pub study_type: Option<String>,

    /// Trial phases ("PHASE1".."PHASE4", "NA").
    #[serde(default)]
    pub phases: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_study_deserialize_empty() {
        let study: Study = serde_json::from_str("{}").unwrap();
        assert!(study.protocol_section.is_none());
        assert!(study.nct_id().is_none());
    }

    #[test]
    fn test_study_deserialize_partial_sections() {
        let json = r#"{
            "protocolSection": {
                "identificationModule": {"nctId": "NCT00000001"},
                "designModule": {"studyType": "INTERVENTIONAL", "phases": ["PHASE1"]}
            }
        }"#;

        let study: Study = serde_json::from_str(json).unwrap();
        assert_eq!(study.nct_id(), Some("NCT00000001"));

        let section = study.protocol_section.unwrap();
        assert!(section.status_module.is_none());
        assert!(section.conditions_module.is_none());

        let design = section.design_module.unwrap();
        assert_eq!(design.study_type.as_deref(), Some("INTERVENTIONAL"));
        assert_eq!(design.phases, vec!["PHASE1"]);
    }

    #[test]
    fn test_location_deserialize_missing_city() {
        let loc: Location = serde_json::from_str(r#"{"country": "USA"}"#).unwrap();
        assert!(loc.city.is_none());
        assert_eq!(loc.country.as_deref(), Some("USA"));
    }
}
