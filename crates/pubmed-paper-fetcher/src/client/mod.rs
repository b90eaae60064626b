//! NCBI E-utilities client.
//!
//! Provides async HTTP access to:
//! - `esearch` (JSON): query → ordered PMID list
//! - `efetch` (XML): PMID → MEDLINE record, followed by a fixed courtesy pause

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::{ESearchResponse, ParsedRecord};
use crate::parser::parse_record;

/// Anything that can search for PMIDs and turn a PMID into a record.
///
/// [`PubMedClient`] is the production implementation; the pipeline and the
/// fetch coordinator only depend on this trait.
#[async_trait::async_trait]
pub trait PaperSource: Send + Sync {
    /// PMIDs matching `query`, at most `max_results`, in relevance order.
    async fn search_ids(&self, query: &str, max_results: u32) -> ClientResult<Vec<String>>;

    /// Fetch and parse the record for one PMID.
    async fn fetch_record(&self, pmid: &str) -> ClientResult<ParsedRecord>;
}

/// PubMed E-utilities client.
#[derive(Clone)]
pub struct PubMedClient {
    /// HTTP client (connection pool is shared between clones).
    client: Client,

    /// `esearch.fcgi` URL.
    search_url: String,

    /// `efetch.fcgi` URL.
    fetch_url: String,

    /// Entrez database.
    database: String,

    /// Tool name reported to NCBI.
    tool: String,

    /// Contact email reported to NCBI (optional).
    email: Option<String>,

    /// Pause after each successful `efetch`.
    fetch_delay: Duration,
}

impl PubMedClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            search_url: config.search_url(),
            fetch_url: config.fetch_url(),
            database: config.database,
            tool: config.tool,
            email: config.email,
            fetch_delay: config.fetch_delay,
        })
    }

    /// Check if a contact email is configured.
    #[must_use]
    pub fn has_email(&self) -> bool {
        self.email.is_some()
    }

    /// Search PubMed and return matching PMIDs.
    ///
    /// The list never exceeds `max_results` and keeps the service's order.
    #[instrument(skip(self), level = "debug")]
    pub async fn search_ids(&self, query: &str, max_results: u32) -> ClientResult<Vec<String>> {
        let mut params = self.base_params();
        params.push(("term", query.to_string()));
        params.push(("retmax", max_results.to_string()));
        params.push(("retmode", "json".to_string()));

        let body = self.get_text(&self.search_url, &params).await?;
        let response: ESearchResponse = serde_json::from_str(&body)?;

        let total = response.total();
        let mut ids = response.into_ids();
        ids.truncate(usize::try_from(max_results).unwrap_or(usize::MAX));

        debug!(returned = ids.len(), ?total, "esearch returned PMIDs");
        Ok(ids)
    }

    /// Fetch the raw `efetch` XML for one PMID.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_record_xml(&self, pmid: &str) -> ClientResult<String> {
        let mut params = self.base_params();
        params.push(("id", pmid.to_string()));
        params.push(("retmode", "xml".to_string()));

        let xml = self.get_text(&self.fetch_url, &params).await?;
        debug!(bytes = xml.len(), "efetch returned record");
        Ok(xml)
    }

    /// Fetch one PMID, pause for the configured delay, then parse it.
    #[instrument(skip(self))]
    pub async fn fetch_record(&self, pmid: &str) -> ClientResult<ParsedRecord> {
        let xml = self.fetch_record_xml(pmid).await?;

        // Courtesy pause, applied only after a successful call
        tokio::time::sleep(self.fetch_delay).await;

        parse_record(&xml).map_err(|e| ClientError::xml(pmid, e))
    }

    /// Parameters common to every E-utilities request.
    fn base_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("db", self.database.clone()), ("tool", self.tool.clone())];
        if let Some(email) = &self.email {
            params.push(("email", email.clone()));
        }
        params
    }

    /// Make a GET request and return the body of a successful response.
    async fn get_text(&self, url: &str, params: &[(&'static str, String)]) -> ClientResult<String> {
        let response = self.client.get(url).query(params).send().await?;
        let response = Self::handle_response(response).await?;
        Ok(response.text().await?)
    }

    /// Handle API response status codes.
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::rate_limited(text))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

#[async_trait::async_trait]
impl PaperSource for PubMedClient {
    async fn search_ids(&self, query: &str, max_results: u32) -> ClientResult<Vec<String>> {
        Self::search_ids(self, query, max_results).await
    }

    async fn fetch_record(&self, pmid: &str) -> ClientResult<ParsedRecord> {
        Self::fetch_record(self, pmid).await
    }
}

impl std::fmt::Debug for PubMedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PubMedClient")
            .field("search_url", &self.search_url)
            .field("fetch_url", &self.fetch_url)
            .field("has_email", &self.has_email())
            .finish()
    }
}
