//! PubMed Paper Fetcher
//!
//! Searches PubMed through the NCBI E-utilities, fetches the MEDLINE record of
//! every hit, flags authors whose affiliation looks non-academic or
//! pharmaceutical/biotech, and appends one CSV row per paper.
//!
//! # Pipeline
//!
//! - **Search**: `esearch` turns a free-text query into an ordered PMID list
//! - **Fetch**: `efetch` retrieves the XML record for each PMID, two at a time
//! - **Parse**: title, completion date, author affiliations and contact email
//! - **Write**: rows are appended to a CSV file, header written once
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use pubmed_paper_fetcher::{Config, PubMedClient, pipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let workers = config.workers;
//!     let client = Arc::new(PubMedClient::new(config)?);
//!     let summary =
//!         pipeline::run(client, workers, "crispr cancer", 10, "results.csv".as_ref()).await?;
//!     println!("wrote {} rows", summary.written);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod export;
pub mod models;
pub mod parser;
pub mod pipeline;

pub use client::{PaperSource, PubMedClient};
pub use config::Config;
pub use error::{ClientError, ExportError, ParseError, PipelineError};
pub use models::ParsedRecord;
