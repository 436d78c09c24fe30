//! Command-line interface definitions for Paper Harvest.
//!
//! Every option is optional: running the binary with no arguments crawls the
//! default journal and writes `parallel_papers.json` in the working directory.
//! Options can also be supplied through environment variables or a YAML file
//! passed with `--config`; flags win over both.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Paper Harvest application.
///
/// # Examples
///
/// ```sh
/// # Plain run with built-in defaults
/// paper_harvest
///
/// # Another journal, three archive pages, with a crawl report
/// paper_harvest --journal gazimmfd --archive-pages 3 --report report.json
///
/// # Settings from a file, one flag overriding it
/// paper_harvest -c crawl.yaml --paper-workers 16
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, env = "PAPER_HARVEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Journal site root, e.g. https://dergipark.org.tr
    #[arg(long, env = "PAPER_HARVEST_BASE_URL")]
    pub base_url: Option<String>,

    /// Site language segment
    #[arg(long, env = "PAPER_HARVEST_LANGUAGE")]
    pub language: Option<String>,

    /// Journal slug
    #[arg(short, long, env = "PAPER_HARVEST_JOURNAL")]
    pub journal: Option<String>,

    /// JSON store to append harvested papers to
    #[arg(short, long, env = "PAPER_HARVEST_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Concurrent issue page fetches
    #[arg(long)]
    pub issue_workers: Option<usize>,

    /// Concurrent paper page fetches
    #[arg(long)]
    pub paper_workers: Option<usize>,

    /// Papers buffered before each store rewrite
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Number of archive pages to read
    #[arg(long)]
    pub archive_pages: Option<usize>,

    /// Per-request HTTP timeout in seconds
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    /// Deadline for a single paper (fetch and parse) in seconds
    #[arg(long)]
    pub task_timeout_secs: Option<u64>,

    /// Write a JSON crawl report to this path
    #[arg(short, long)]
    pub report: Option<PathBuf>,
}
