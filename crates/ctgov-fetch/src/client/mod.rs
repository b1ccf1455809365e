//! ClinicalTrials.gov API client.
//!
//! Provides an async HTTP client with:
//! - Connection pooling via reqwest
//! - Per-request and connect timeouts
//! - Lazy, bounded continuation-token pagination
//! - Best-effort accumulation: a failed page stops the fetch and keeps
//!   everything fetched so far
//!
//! Requests are strictly sequential: one in flight at a time, each page
//! fully consumed before the next is requested.

use async_stream::try_stream;
use futures::{Stream, StreamExt, pin_mut};
use tracing::{debug, warn};

use crate::config::{Config, SearchParams};
use crate::error::{ClientError, ClientResult};
use crate::models::{StudiesPage, Study};

/// ClinicalTrials.gov API client.
#[derive(Debug, Clone)]
pub struct CtGovClient {
    /// HTTP client.
    client: reqwest::Client,

    /// Studies search endpoint URL.
    studies_url: String,
}

impl CtGovClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            "application/json".parse().expect("valid accept header"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        Ok(Self { client, studies_url: config.studies_url() })
    }

    /// Fetch a single page of search results.
    ///
    /// Passes the title filter and page size on every request, plus the
    /// continuation token when one is being followed.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status, or a body
    /// that does not parse as a studies page.
    pub async fn fetch_page(
        &self,
        params: &SearchParams,
        page_token: Option<&str>,
    ) -> ClientResult<StudiesPage> {
        let mut query = vec![
            ("query.titles".to_string(), params.title_query.clone()),
            ("pageSize".to_string(), params.page_size.to_string()),
        ];

        if let Some(token) = page_token {
            query.push(("pageToken".to_string(), token.to_string()));
        }

        let response = self.client.get(&self.studies_url).query(&query).send().await?;
        let response = Self::handle_response(response).await?;

        let value: serde_json::Value = response.json().await?;
        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Lazily paginate through search results.
    ///
    /// Yields one `StudiesPage` per request, following the continuation
    /// token until the server stops issuing one or `params.max_pages` is
    /// reached. The first error is terminal: the stream yields it and ends.
    ///
    /// The registry issues tokens for as long as results remain, so the
    /// `max_pages` bound is what keeps a misbehaving server from looping
    /// the caller forever.
    pub fn page_stream(
        &self,
        params: SearchParams,
    ) -> impl Stream<Item = ClientResult<StudiesPage>> + '_ {
        try_stream! {
            let mut token: Option<String> = None;
            let mut fetched: u32 = 0;

            loop {
                if fetched >= params.max_pages {
                    break;
                }

                let page = self.fetch_page(&params, token.as_deref()).await?;
                fetched += 1;

                debug!(
                    page = fetched,
                    studies = page.studies.len(),
                    has_more = page.has_more(),
                    "fetched studies page"
                );

                let next = page.next_page_token.clone();
                yield page;

                match next {
                    Some(t) => token = Some(t),
                    None => break,
                }
            }
        }
    }

    /// Fetch every page and accumulate the study documents, best-effort.
    ///
    /// Page order and within-page order are preserved. A non-success
    /// response (or transport/timeout/parse failure) stops pagination
    /// immediately; the outcome then carries the studies accumulated so
    /// far together with the error. Errors are never retried.
    pub async fn fetch_all(&self, params: &SearchParams) -> FetchOutcome {
        let stream = self.page_stream(params.clone());
        pin_mut!(stream);

        let mut studies: Vec<Study> = Vec::new();
        let mut pages: u32 = 0;
        let mut last_had_more = false;

        while let Some(item) = stream.next().await {
            match item {
                Ok(page) => {
                    pages += 1;
                    last_had_more = page.has_more();
                    studies.extend(page.studies);
                }
                Err(err) => {
                    warn!(
                        status = ?err.status(),
                        pages,
                        studies = studies.len(),
                        "fetch stopped on error, keeping partial results: {err}"
                    );
                    return FetchOutcome { studies, pages, stop: StopReason::Failed(err) };
                }
            }
        }

        let stop = if last_had_more {
            warn!(pages, "page limit reached before the result set was exhausted");
            StopReason::PageLimit
        } else {
            StopReason::Exhausted
        };

        FetchOutcome { studies, pages, stop }
    }

    /// Handle API response status codes.
    ///
    /// Any non-success status is surfaced with its code; the registry
    /// offers no finer-grained error contract worth modeling.
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(ClientError::unexpected_status(status.as_u16(), text))
    }
}

/// Result of a best-effort paginated fetch.
#[derive(Debug)]
pub struct FetchOutcome {
    /// All study documents accumulated, in page order then within-page order.
    pub studies: Vec<Study>,

    /// Number of pages successfully fetched.
    pub pages: u32,

    /// Why pagination stopped.
    pub stop: StopReason,
}

impl FetchOutcome {
    /// True if no studies were fetched. A "no data" state, not an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.studies.is_empty()
    }

    /// True if the whole result set was fetched without error.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self.stop, StopReason::Exhausted)
    }

    /// The HTTP status code that stopped the fetch, if any.
    #[must_use]
    pub fn error_status(&self) -> Option<u16> {
        match &self.stop {
            StopReason::Failed(err) => err.status(),
            _ => None,
        }
    }
}

/// Why a paginated fetch stopped.
#[derive(Debug)]
pub enum StopReason {
    /// The server stopped issuing continuation tokens.
    Exhausted,

    /// The caller-supplied page bound was reached with results remaining.
    PageLimit,

    /// A request failed; the outcome holds the pages fetched before it.
    Failed(ClientError),
}
