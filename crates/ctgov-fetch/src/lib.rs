//! ClinicalTrials.gov fetch pipeline
//!
//! A client for the ClinicalTrials.gov v2 search API that follows
//! continuation-token pagination, flattens the nested study documents into
//! fixed twelve-field tabular records, re-derives each study's
//! pharmacological category (PK/PD) from its type and phases, and exports
//! the result as CSV.
//!
//! # Features
//!
//! - **Best-effort pagination**: a failed page stops the fetch and keeps
//!   everything fetched so far, with the status code surfaced
//! - **Total flattening**: missing sections and fields become documented
//!   placeholders, never errors
//! - **Lazy page stream**: pagination as a bounded async stream
//!
//! # Example
//!
//! ```no_run
//! use ctgov_fetch::{Config, CtGovClient, SearchParams, session::FetchSession};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = CtGovClient::new(Config::new())?;
//!     let params = SearchParams::new("Diabetes", 100, 10);
//!
//!     let outcome = client.fetch_all(&params).await;
//!     let session = FetchSession::from_outcome(&outcome);
//!     println!("{} studies", session.records.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod flatten;
pub mod models;
pub mod session;

pub use client::{CtGovClient, FetchOutcome, StopReason};
pub use config::{Config, SearchParams};
pub use error::ClientError;
pub use flatten::FlatStudyRecord;
