//! Application state for one fetch.
//!
//! A `FetchSession` is created from a completed fetch, replaced wholesale
//! by the next one, and read by filter and export views. There is no
//! other state shared with the fetch loop.

use serde::{Deserialize, Serialize};

use crate::client::FetchOutcome;
use crate::flatten::{FlatStudyRecord, flatten_all};

/// Segmented filter over the fetched records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StudyFilter {
    /// All studies.
    #[default]
    All,
    /// Pharmacodynamics studies only.
    Pd,
    /// Pharmacokinetics studies only.
    Pk,
}

impl StudyFilter {
    /// Check whether a record passes this filter.
    #[must_use]
    pub fn matches(self, record: &FlatStudyRecord) -> bool {
        match self {
            Self::All => true,
            Self::Pd => record.study_type == "PD",
            Self::Pk => record.study_type == "PK",
        }
    }
}

/// State of one completed fetch: flattened, reclassified records plus
/// the pagination outcome they came from.
#[derive(Debug)]
pub struct FetchSession {
    /// Flattened records, in fetch order.
    pub records: Vec<FlatStudyRecord>,

    /// Number of pages fetched.
    pub pages: u32,

    /// The HTTP status that stopped the fetch early, if any.
    pub error_status: Option<u16>,

    /// Whether the whole result set was fetched.
    pub complete: bool,
}

impl FetchSession {
    /// Build session state from a fetch outcome, flattening and
    /// reclassifying every document.
    #[must_use]
    pub fn from_outcome(outcome: &FetchOutcome) -> Self {
        Self {
            records: flatten_all(&outcome.studies),
            pages: outcome.pages,
            error_status: outcome.error_status(),
            complete: outcome.is_complete(),
        }
    }

    /// True if the fetch produced no records. A "no data" state for the
    /// caller to surface, not an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records passing the given filter, in fetch order.
    #[must_use]
    pub fn filtered(&self, filter: StudyFilter) -> Vec<&FlatStudyRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }
}
