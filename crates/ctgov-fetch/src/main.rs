//! ClinicalTrials.gov fetcher - entry point
//!
//! Fetches studies matching a title query, flattens them into tabular
//! records, applies the PK/PD filter, and writes the result as CSV.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ctgov_fetch::session::{FetchSession, StudyFilter};
use ctgov_fetch::{Config, CtGovClient, SearchParams, config::api, export};

#[derive(Parser, Debug)]
#[command(name = "ctgov-fetch")]
#[command(about = "Fetch and tabulate ClinicalTrials.gov studies")]
#[command(version)]
struct Cli {
    /// Free-text filter matched against study titles
    #[arg(long, default_value = "Diabetes")]
    query: String,

    /// Results per page (clamped to 10..=1000)
    #[arg(long, default_value_t = api::DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Stop after this many pages even if more results remain
    #[arg(long, default_value_t = api::DEFAULT_MAX_PAGES)]
    max_pages: u32,

    /// Keep only studies of this category
    #[arg(long, value_enum, default_value = "all")]
    filter: StudyFilter,

    /// Path of the CSV file to write
    #[arg(long, default_value = "clinical_trials_data.csv")]
    output: PathBuf,

    /// Base URL of the registry API
    #[arg(long, env = "CTGOV_BASE_URL")]
    base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        query = %cli.query,
        page_size = cli.page_size,
        "Starting ClinicalTrials.gov fetch"
    );

    let mut config = Config::from_env()?;
    if let Some(url) = cli.base_url {
        config.base_url = url.trim_end_matches('/').to_string();
    }

    let client = CtGovClient::new(config)?;
    let params = SearchParams::new(cli.query, cli.page_size, cli.max_pages);

    let outcome = client.fetch_all(&params).await;
    let session = FetchSession::from_outcome(&outcome);

    if let Some(status) = session.error_status {
        tracing::warn!(status, "fetch stopped early; results are partial");
    }

    if session.is_empty() {
        tracing::warn!("no data found for this query");
        return Ok(());
    }

    let filtered: Vec<_> = session.filtered(cli.filter).into_iter().cloned().collect();

    tracing::info!(
        fetched = session.records.len(),
        kept = filtered.len(),
        pages = session.pages,
        filter = ?cli.filter,
        "fetch complete"
    );

    export::write_csv(&cli.output, &filtered)?;
    tracing::info!(path = %cli.output.display(), "data saved");

    Ok(())
}
