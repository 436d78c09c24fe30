//! Crawl configuration.
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! command-line flags (which clap also fills from environment variables).
//! The defaults reproduce a plain run against the Politeknik journal on
//! DergiPark with no arguments at all.

use crate::cli::Cli;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

/// Everything a harvest run needs to know.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrawlConfig {
    /// Scheme and host of the journal site, without a trailing slash.
    pub base_url: String,
    /// Site language segment, e.g. `tr` or `en`.
    pub language: String,
    /// Journal slug under `/pub/`.
    pub journal: String,
    /// Path of the JSON store.
    pub output: PathBuf,
    /// Concurrent issue-page fetches.
    pub issue_workers: usize,
    /// Concurrent paper-page fetches.
    pub paper_workers: usize,
    /// Records buffered before each store rewrite.
    pub batch_size: usize,
    /// How many archive pages to read.
    pub archive_pages: usize,
    pub request_timeout_secs: u64,
    /// Deadline for one paper task, fetch and parse together.
    pub task_timeout_secs: u64,
    /// Where to write the crawl report, if anywhere.
    pub report: Option<PathBuf>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dergipark.org.tr".to_string(),
            language: "tr".to_string(),
            journal: "politeknik".to_string(),
            output: PathBuf::from("parallel_papers.json"),
            issue_workers: 5,
            paper_workers: 8,
            batch_size: 10,
            archive_pages: 1,
            request_timeout_secs: 30,
            task_timeout_secs: 60,
            report: None,
        }
    }
}

impl CrawlConfig {
    /// Build the effective configuration from parsed CLI arguments.
    #[instrument(level = "info", skip_all)]
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load_yaml(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        debug!(?config, "Resolved crawl configuration");
        Ok(config)
    }

    /// Read a YAML file; keys it leaves out keep their defaults.
    pub fn load_yaml(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(v) = &cli.base_url {
            self.base_url = v.clone();
        }
        if let Some(v) = &cli.language {
            self.language = v.clone();
        }
        if let Some(v) = &cli.journal {
            self.journal = v.clone();
        }
        if let Some(v) = &cli.output {
            self.output = v.clone();
        }
        if let Some(v) = cli.issue_workers {
            self.issue_workers = v;
        }
        if let Some(v) = cli.paper_workers {
            self.paper_workers = v;
        }
        if let Some(v) = cli.batch_size {
            self.batch_size = v;
        }
        if let Some(v) = cli.archive_pages {
            self.archive_pages = v;
        }
        if let Some(v) = cli.request_timeout_secs {
            self.request_timeout_secs = v;
        }
        if let Some(v) = cli.task_timeout_secs {
            self.task_timeout_secs = v;
        }
        if let Some(v) = &cli.report {
            self.report = Some(v.clone());
        }
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("issue_workers", self.issue_workers),
            ("paper_workers", self.paper_workers),
            ("batch_size", self.batch_size),
            ("archive_pages", self.archive_pages),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(Error::Config(format!("{name} must be at least 1")));
            }
        }
        let timeouts = [
            ("request_timeout_secs", self.request_timeout_secs),
            ("task_timeout_secs", self.task_timeout_secs),
        ];
        for (name, secs) in timeouts {
            if secs == 0 {
                return Err(Error::Config(format!("{name} must be at least 1")));
            }
        }
        url::Url::parse(&self.base_url)?;
        Ok(())
    }

    fn journal_root(&self) -> String {
        format!(
            "{}/{}/pub/{}",
            self.base_url.trim_end_matches('/'),
            self.language,
            self.journal
        )
    }

    /// First archive page.
    pub fn archive_url(&self) -> String {
        format!("{}/archive", self.journal_root())
    }

    /// URL of archive page `page` (1-based).
    pub fn archive_page_url(&self, page: usize) -> String {
        if page <= 1 {
            self.archive_url()
        } else {
            format!("{}?page={}", self.archive_url(), page)
        }
    }

    /// Every issue page URL starts with this.
    pub fn issue_prefix(&self) -> String {
        format!("{}/issue/", self.journal_root())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.task_timeout_secs)
    }
}
