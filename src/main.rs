//! # Paper Harvest
//!
//! A crawler that walks an academic journal's public archive on a DergiPark
//! style site, discovers every paper page across its issues, and appends each
//! paper's bibliographic metadata (title, abstract, keywords, authors) to a
//! local JSON store.
//!
//! ## Usage
//!
//! ```sh
//! # Defaults: Politeknik journal, store in ./parallel_papers.json
//! paper_harvest
//!
//! # Another journal, with a crawl report
//! paper_harvest --journal gazimmfd --output gazi.json --report gazi_report.json
//! ```
//!
//! ## Architecture
//!
//! The application is a linear pipeline:
//! 1. **Archive**: discover issue URLs from the archive page(s)
//! 2. **Issues**: discover paper URLs on each issue page (5 at a time)
//! 3. **Papers**: extract metadata from each paper page (8 at a time)
//! 4. **Store**: append records to the JSON store in batches of 10
//!
//! Re-running re-fetches everything and appends again; the store is not
//! consulted before crawling.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod http;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::CrawlConfig;
use http::HttpFetcher;
use outputs::report;
use utils::ensure_writable_parent;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("paper_harvest starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = CrawlConfig::from_cli(&args)?;
    info!(
        archive = %config.archive_url(),
        output = %config.output.display(),
        issue_workers = config.issue_workers,
        paper_workers = config.paper_workers,
        batch_size = config.batch_size,
        archive_pages = config.archive_pages,
        "Loaded configuration"
    );

    // Early check: ensure the store's directory is writable
    if let Err(e) = ensure_writable_parent(&config.output).await {
        error!(
            path = %config.output.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    let fetcher = HttpFetcher::new(config.request_timeout())?;
    let crawl = pipeline::run(&fetcher, &config).await?;

    if let Some(path) = &config.report {
        if let Err(e) = report::write_report(&crawl, path).await {
            error!(path = %path.display(), error = %e, "Failed to write crawl report");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        saved = crawl.saved,
        failed = crawl.failures.len(),
        "Execution complete"
    );

    Ok(())
}
