//! Configuration for the ClinicalTrials.gov fetch client.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the ClinicalTrials.gov v2 API.
    pub const BASE_URL: &str = "https://clinicaltrials.gov/api/v2";

    /// Studies search endpoint path, relative to the base URL.
    pub const STUDIES_PATH: &str = "/studies";

    /// Per-request timeout. Expiry stops pagination like an error response.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Smallest page size the registry accepts for a search request.
    pub const MIN_PAGE_SIZE: u32 = 10;

    /// Largest page size the registry accepts for a search request.
    pub const MAX_PAGE_SIZE: u32 = 1000;

    /// Default page size.
    pub const DEFAULT_PAGE_SIZE: u32 = 100;

    /// Default bound on pages fetched in one search. The registry keeps
    /// issuing continuation tokens as long as results remain, so the loop
    /// needs a caller-side bound.
    pub const DEFAULT_MAX_PAGES: u32 = 100;
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for the v2 API (overridable for mock servers).
    pub base_url: String,

    /// Per-request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Config {
    /// Create a configuration pointing at the public registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: api::BASE_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration with a custom URL for mock servers.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: format!("{base_url}/api/v2"),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// `CTGOV_BASE_URL` overrides the registry base URL.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::new();
        if let Ok(url) = std::env::var("CTGOV_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        Ok(config)
    }

    /// Full URL of the studies search endpoint.
    #[must_use]
    pub fn studies_url(&self) -> String {
        format!("{}{}", self.base_url, api::STUDIES_PATH)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for one paginated search.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Free-text filter matched against study titles (`query.titles`).
    pub title_query: String,

    /// Requested studies per page, clamped to the registry's bounds.
    pub page_size: u32,

    /// Bound on the number of pages fetched before stopping.
    pub max_pages: u32,
}

impl SearchParams {
    /// Create search parameters for a title query, with the page size
    /// clamped to the registry's accepted range.
    #[must_use]
    pub fn new(title_query: impl Into<String>, page_size: u32, max_pages: u32) -> Self {
        Self {
            title_query: title_query.into(),
            page_size: page_size.clamp(api::MIN_PAGE_SIZE, api::MAX_PAGE_SIZE),
            max_pages,
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::new(String::new(), api::DEFAULT_PAGE_SIZE, api::DEFAULT_MAX_PAGES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.base_url, api::BASE_URL);
        assert_eq!(config.studies_url(), "https://clinicaltrials.gov/api/v2/studies");
    }

    #[test]
    fn test_config_for_testing() {
        let config = Config::for_testing("http://127.0.0.1:9999");
        assert_eq!(config.studies_url(), "http://127.0.0.1:9999/api/v2/studies");
    }

    #[test]
    fn test_page_size_clamped() {
        assert_eq!(SearchParams::new("x", 5, 10).page_size, api::MIN_PAGE_SIZE);
        assert_eq!(SearchParams::new("x", 5000, 10).page_size, api::MAX_PAGE_SIZE);
        assert_eq!(SearchParams::new("x", 250, 10).page_size, 250);
    }
}
