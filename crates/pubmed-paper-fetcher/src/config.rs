//! Configuration for the PubMed fetcher.

use std::time::Duration;

/// E-utilities constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the NCBI E-utilities.
    pub const BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

    /// Entrez database queried by both endpoints.
    pub const DATABASE: &str = "pubmed";

    /// Tool name reported to NCBI alongside the contact email.
    pub const TOOL_NAME: &str = "pubmed-paper-fetcher";

    /// Courtesy pause after every `efetch` call.
    pub const FETCH_DELAY: Duration = Duration::from_secs(2);

    /// Number of records fetched concurrently.
    pub const DEFAULT_WORKERS: usize = 2;

    /// Default `retmax` for `esearch`.
    pub const DEFAULT_MAX_RESULTS: u32 = 10;

    /// Default output file.
    pub const DEFAULT_OUTPUT_FILE: &str = "results.csv";
}

/// Fetcher configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// E-utilities base URL (overridden for mock servers).
    pub base_url: String,

    /// Entrez database name.
    pub database: String,

    /// Contact email sent with every request (optional).
    pub email: Option<String>,

    /// Tool name sent with every request.
    pub tool: String,

    /// Pause after each record fetch.
    pub fetch_delay: Duration,

    /// Width of the fetch pool.
    pub workers: usize,
}

impl Config {
    /// Create a configuration pointing at the public E-utilities.
    #[must_use]
    pub fn new(email: Option<String>) -> Self {
        Self {
            base_url: api::BASE_URL.to_string(),
            database: api::DATABASE.to_string(),
            email,
            tool: api::TOOL_NAME.to_string(),
            fetch_delay: api::FETCH_DELAY,
            workers: api::DEFAULT_WORKERS,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            fetch_delay: Duration::from_millis(0), // No delay in tests
            ..Self::new(None)
        }
        .with_base_url(base_url)
    }

    /// Override the E-utilities base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Override the fetch pool width.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// `esearch` endpoint URL.
    #[must_use]
    pub fn search_url(&self) -> String {
        format!("{}/esearch.fcgi", self.base_url)
    }

    /// `efetch` endpoint URL.
    #[must_use]
    pub fn fetch_url(&self) -> String {
        format!("{}/efetch.fcgi", self.base_url)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
