//! Crawl orchestration.
//!
//! The run is strictly downstream:
//! 1. **Archive**: list issue URLs (fatal on failure)
//! 2. **Issues**: list paper URLs per issue, `issue_workers` at a time, results
//!    kept in issue order (transport errors are fatal; an issue page with an
//!    error status lists no papers)
//! 3. **Papers**: extract records, `paper_workers` at a time, each task under
//!    its own deadline; outcomes are handled as they complete
//! 4. **Store**: successes are buffered and flushed every `batch_size` records,
//!    with a final flush for the remainder
//!
//! The pipeline is the only writer of the store for the whole run. Per-paper
//! failures are logged, collected into the returned [`CrawlReport`], and never
//! stop the crawl.

use crate::config::CrawlConfig;
use crate::error::{ExtractionFailure, Result};
use crate::http::PageSource;
use crate::models::{CrawlReport, PaperFailure, PaperLink, PaperRecord};
use crate::outputs::json;
use crate::scrapers::{archive, issue, paper};
use chrono::Utc;
use futures::stream::{self, StreamExt, TryStreamExt};
use tokio::time::timeout;
use tracing::{error, info, instrument, warn};

/// Run a full crawl against `source` and append every extracted paper to the
/// store named in `config`.
#[instrument(level = "info", skip_all, fields(journal = %config.journal))]
pub async fn run<S: PageSource>(source: &S, config: &CrawlConfig) -> Result<CrawlReport> {
    let started_at = Utc::now().to_rfc3339();

    // ---- Archive ----
    let issues = archive::index_issues(source, config).await?;
    info!("Found {} issues", issues.len());

    // ---- Issues ----
    let per_issue: Vec<Vec<PaperLink>> = stream::iter(issues.iter())
        .map(|issue_url| issue::index_papers(source, issue_url))
        .buffered(config.issue_workers)
        .try_collect()
        .await?;
    // duplicates across issues are kept
    let paper_links: Vec<PaperLink> = per_issue.into_iter().flatten().collect();
    info!("Found {} papers", paper_links.len());

    // ---- Papers ----
    let deadline = config.task_timeout();
    let mut outcomes = stream::iter(paper_links.iter())
        .map(|url| async move {
            let outcome = match timeout(deadline, paper::fetch_paper(source, url)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ExtractionFailure::Timeout(deadline.as_secs())),
            };
            (url, outcome)
        })
        .buffer_unordered(config.paper_workers);

    let mut batch: Vec<PaperRecord> = Vec::with_capacity(config.batch_size);
    let mut failures = Vec::new();
    let mut saved = 0usize;

    while let Some((url, outcome)) = outcomes.next().await {
        match outcome {
            Ok(record) => {
                batch.push(record);
                if batch.len() >= config.batch_size {
                    json::save_batch(&config.output, &batch).await?;
                    saved += batch.len();
                    batch.clear();
                }
            }
            Err(reason) => {
                match &reason {
                    ExtractionFailure::ArticleNotFound => {
                        warn!(%url, "Skipping {}: {}", url, reason)
                    }
                    _ => error!(%url, error = %reason, "Error processing {}", url),
                }
                failures.push(PaperFailure {
                    url: url.clone(),
                    reason,
                });
            }
        }
    }

    // ---- Remainder ----
    if !batch.is_empty() {
        json::save_batch(&config.output, &batch).await?;
        saved += batch.len();
    }

    let report = CrawlReport {
        started_at,
        finished_at: Utc::now().to_rfc3339(),
        issues_found: issues.len(),
        papers_found: paper_links.len(),
        saved,
        failures,
    };
    info!(
        issues = report.issues_found,
        papers = report.papers_found,
        saved = report.saved,
        failed = report.failures.len(),
        not_found = report.count_failures(&ExtractionFailure::ArticleNotFound),
        timed_out = report.count_failures(&ExtractionFailure::Timeout(0)),
        "Crawl finished"
    );
    Ok(report)
}
