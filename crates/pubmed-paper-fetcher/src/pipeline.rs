//! Search → fetch → write.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::client::PaperSource;
use crate::coordinator::fetch_ordered;
use crate::error::PipelineResult;
use crate::export::append_records;

/// Outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// PMIDs returned by the search.
    pub found: usize,
    /// Rows appended to the output file.
    pub written: usize,
    /// Output file.
    pub output: PathBuf,
}

/// Run one query end to end and append the results to `output`.
///
/// Nothing is written unless every record was fetched and parsed.
pub async fn run<S>(
    source: Arc<S>,
    workers: usize,
    query: &str,
    max_results: u32,
    output: &Path,
) -> PipelineResult<RunSummary>
where
    S: PaperSource + ?Sized + 'static,
{
    info!(query, max_results, "fetching paper IDs");
    let pmids = source.search_ids(query, max_results).await?;

    info!(count = pmids.len(), workers, "fetching paper details");
    let records = fetch_ordered(source, &pmids, workers).await?;

    info!(path = %output.display(), "writing results");
    let written = append_records(output, &records)?;

    Ok(RunSummary { found: pmids.len(), written, output: output.to_path_buf() })
}
