//! Data models for ClinicalTrials.gov v2 API entities.
//!
//! All models use `#[serde(default)]` for optional fields and
//! `#[serde(rename_all = "camelCase")]` to match API naming.

mod page;
mod study;

pub use page::StudiesPage;
pub use study::{
    ArmsInterventionsModule, ConditionsModule, ContactsLocationsModule, DateStruct, DesignModule,
    IdentificationModule, Intervention, Location, ProtocolSection, StatusModule, Study,
};
