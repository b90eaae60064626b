//! Parallel fetch coordinator tests with stub sources.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use pubmed_paper_fetcher::client::PaperSource;
use pubmed_paper_fetcher::coordinator::fetch_ordered;
use pubmed_paper_fetcher::error::{ClientError, ClientResult, PipelineError};
use pubmed_paper_fetcher::models::ParsedRecord;

/// Returns record N titled "TN"; earlier PMIDs take longer to finish.
struct Staggered {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl Staggered {
    fn new() -> Self {
        Self { in_flight: AtomicUsize::new(0), peak: AtomicUsize::new(0), calls: AtomicUsize::new(0) }
    }
}

#[async_trait::async_trait]
impl PaperSource for Staggered {
    async fn search_ids(&self, _query: &str, _max_results: u32) -> ClientResult<Vec<String>> {
        Ok(Vec::new())
    }

    async fn fetch_record(&self, pmid: &str) -> ClientResult<ParsedRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let n: u64 = pmid.parse().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(60u64.saturating_sub(n * 10))).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if pmid == "4" {
            return Err(ClientError::server(500, "boom"));
        }
        Ok(ParsedRecord::new(pmid, format!("T{pmid}"), "N/A", &[]))
    }
}

fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| (*s).to_string()).collect()
}

#[tokio::test]
async fn test_results_follow_input_order() {
    let source = Arc::new(Staggered::new());

    let records = fetch_ordered(Arc::clone(&source), &ids(&["1", "2", "3"]), 2).await.unwrap();

    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["T1", "T2", "T3"]);
}

#[tokio::test]
async fn test_results_follow_input_order_when_reversed() {
    let source = Arc::new(Staggered::new());

    let records = fetch_ordered(source, &ids(&["3", "2", "1", "0"]), 4).await.unwrap();

    let pmids: Vec<&str> = records.iter().map(|r| r.pmid.as_str()).collect();
    assert_eq!(pmids, vec!["3", "2", "1", "0"]);
}

#[tokio::test]
async fn test_in_flight_never_exceeds_width() {
    let source = Arc::new(Staggered::new());

    let records =
        fetch_ordered(Arc::clone(&source), &ids(&["0", "1", "2", "3", "5", "6"]), 2).await.unwrap();

    assert_eq!(records.len(), 6);
    assert_eq!(source.calls.load(Ordering::SeqCst), 6);
    assert!(source.peak.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn test_single_failure_fails_batch() {
    let source = Arc::new(Staggered::new());

    let result = fetch_ordered(source, &ids(&["1", "4", "2"]), 2).await;

    match result {
        Err(PipelineError::Client(err)) => assert_eq!(err.status(), Some(500)),
        other => panic!("expected client error, got {other:?}"),
    }
}

/// Source whose fetch panics, to exercise the join-error path.
struct Panicky;

#[async_trait::async_trait]
impl PaperSource for Panicky {
    async fn search_ids(&self, _query: &str, _max_results: u32) -> ClientResult<Vec<String>> {
        Ok(Vec::new())
    }

    async fn fetch_record(&self, _pmid: &str) -> ClientResult<ParsedRecord> {
        panic!("worker crashed");
    }
}

#[tokio::test]
async fn test_worker_panic_is_reported() {
    let result = fetch_ordered(Arc::new(Panicky), &ids(&["1"]), 2).await;
    assert!(matches!(result, Err(PipelineError::Worker(_))));
}
