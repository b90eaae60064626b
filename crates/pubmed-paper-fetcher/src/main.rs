//! PubMed Paper Fetcher - Entry Point
//!
//! Searches PubMed and appends one CSV row per matching paper.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pubmed_paper_fetcher::PubMedClient;
use pubmed_paper_fetcher::config::{Config, api};
use pubmed_paper_fetcher::pipeline::{self, RunSummary};

#[derive(Parser, Debug)]
#[command(name = "pubmed-paper-fetcher")]
#[command(about = "Fetch PubMed research papers and flag industry-affiliated authors")]
#[command(version)]
struct Cli {
    /// Search query for PubMed
    query: String,

    /// Output CSV filename (rows are appended)
    #[arg(short = 'f', long = "file", default_value = api::DEFAULT_OUTPUT_FILE)]
    file: PathBuf,

    /// Maximum number of results to fetch
    #[arg(
        short = 'm',
        long = "max",
        default_value_t = api::DEFAULT_MAX_RESULTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    max: u32,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Contact email sent to NCBI with each request
    #[arg(long)]
    email: Option<String>,

    /// Number of records fetched in parallel
    #[arg(
        long,
        default_value_t = api::DEFAULT_WORKERS,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=16)
    )]
    workers: usize,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// E-utilities base URL
    #[arg(long, hide = true, default_value = api::BASE_URL)]
    base_url: String,
}

fn init_tracing(debug: bool, json: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::new(format!("warn,pubmed_paper_fetcher={level}"));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<RunSummary> {
    let config = Config::new(cli.email).with_base_url(&cli.base_url).with_workers(cli.workers);
    let workers = config.workers;
    let client = Arc::new(PubMedClient::new(config).context("failed to build HTTP client")?);

    let summary = pipeline::run(client, workers, &cli.query, cli.max, &cli.file).await?;
    Ok(summary)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.debug, cli.json_logs);

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), ?cli, "starting");

    match run(cli).await {
        Ok(summary) => {
            tracing::info!(
                found = summary.found,
                written = summary.written,
                path = %summary.output.display(),
                "results saved"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "run failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
