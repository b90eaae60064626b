//! `esearch` JSON response.

use serde::{Deserialize, Serialize};

/// Top-level `esearch` response (`retmode=json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ESearchResponse {
    /// Search result block; absent on some error responses.
    #[serde(default)]
    pub esearchresult: Option<ESearchResult>,
}

/// The `esearchresult` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ESearchResult {
    /// Total hits as reported by NCBI (a decimal string).
    #[serde(default)]
    pub count: Option<String>,

    /// PMIDs in relevance order.
    #[serde(default)]
    pub idlist: Vec<String>,
}

impl ESearchResponse {
    /// PMIDs, or an empty list when the response carries none.
    #[must_use]
    pub fn into_ids(self) -> Vec<String> {
        self.esearchresult.map(|r| r.idlist).unwrap_or_default()
    }

    /// Total hit count if NCBI reported a parseable one.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.esearchresult.as_ref()?.count.as_deref()?.parse().ok()
    }
}
