//! Bounded parallel fetch of many records.
//!
//! Every PMID gets its own tokio task; a semaphore keeps at most `width` of
//! them inside [`PaperSource::fetch_record`] at once. Results are collected in
//! input order, so `records[i]` always belongs to `pmids[i]`.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::PaperSource;
use crate::error::{ClientResult, PipelineError, PipelineResult};
use crate::models::ParsedRecord;

/// Fetch and parse every PMID with at most `width` requests in flight.
///
/// The first failure in input order aborts the batch: tasks still running
/// are cancelled and the error is returned.
///
/// # Errors
///
/// [`PipelineError::InvalidWorkers`] if `width` is zero, otherwise the first
/// client error or task failure.
pub async fn fetch_ordered<S>(
    source: Arc<S>,
    pmids: &[String],
    width: usize,
) -> PipelineResult<Vec<ParsedRecord>>
where
    S: PaperSource + ?Sized + 'static,
{
    if width == 0 {
        return Err(PipelineError::InvalidWorkers(width));
    }

    debug!(count = pmids.len(), width, "fetching records");

    let semaphore = Arc::new(Semaphore::new(width));
    let mut handles: Vec<JoinHandle<ClientResult<ParsedRecord>>> = Vec::with_capacity(pmids.len());

    for pmid in pmids {
        let source = Arc::clone(&source);
        let semaphore = Arc::clone(&semaphore);
        let pmid = pmid.clone();

        handles.push(tokio::spawn(async move {
            // The semaphore is never closed, so acquire only fails if it is dropped
            let _permit = semaphore.acquire_owned().await.ok();
            source.fetch_record(&pmid).await
        }));
    }

    let mut records = Vec::with_capacity(handles.len());
    let mut pending = handles.into_iter();

    while let Some(handle) = pending.next() {
        let outcome = match handle.await {
            Ok(Ok(record)) => {
                records.push(record);
                continue;
            }
            Ok(Err(e)) => PipelineError::from(e),
            Err(e) => PipelineError::from(e),
        };

        let remaining: Vec<_> = pending.collect();
        warn!(
            error = %outcome,
            completed = records.len(),
            cancelled = remaining.len(),
            "record fetch failed, aborting batch"
        );
        for handle in remaining {
            handle.abort();
        }
        return Err(outcome);
    }

    Ok(records)
}
