//! Archive Lister.
//!
//! Reads the journal's archive index and returns the URLs of its issue pages.
//! A link counts as an issue link when, once resolved, it starts with the
//! journal's issue prefix (`{base}/{lang}/pub/{journal}/issue/`) and has
//! something after it.
//!
//! # Pagination
//!
//! `archive_pages` pages are read: page 1 is the bare archive URL, page `n` is
//! `archive?page=n`. Reading stops early when a page adds no new issues, or
//! when a page past the first answers with a non-success status.

use super::resolved_links;
use crate::config::CrawlConfig;
use crate::error::{Error, Result};
use crate::http::PageSource;
use crate::models::IssueLink;
use itertools::Itertools;
use scraper::Html;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Issue links on one archive page, first occurrence order, no duplicates.
pub fn parse_issue_links(html: &str, page_url: &str, issue_prefix: &str) -> Result<Vec<IssueLink>> {
    let base = Url::parse(page_url)?;
    let document = Html::parse_document(html);
    let links = resolved_links(&document, &base)
        .into_iter()
        .filter(|link| link.len() > issue_prefix.len() && link.starts_with(issue_prefix))
        .unique()
        .collect();
    Ok(links)
}

/// Fetch the archive page(s) and collect every issue link.
///
/// A failure on the first page is fatal and propagates.
#[instrument(level = "info", skip_all, fields(archive = %config.archive_url()))]
pub async fn index_issues<S: PageSource>(source: &S, config: &CrawlConfig) -> Result<Vec<IssueLink>> {
    let issue_prefix = config.issue_prefix();
    let mut seen = HashSet::new();
    let mut issues = Vec::new();

    for page in 1..=config.archive_pages {
        let page_url = config.archive_page_url(page);
        let html = match source.fetch(&page_url).await {
            Ok(html) => html,
            Err(Error::Status { status, .. }) if page > 1 => {
                warn!(page, status, %page_url, "Archive page unavailable; stopping pagination");
                break;
            }
            Err(e) => return Err(e),
        };

        let before = issues.len();
        for link in parse_issue_links(&html, &page_url, &issue_prefix)? {
            if seen.insert(link.clone()) {
                issues.push(link);
            }
        }
        let added = issues.len() - before;
        debug!(page, added, "Parsed archive page");

        if added == 0 && page > 1 {
            info!(page, "Archive page added no new issues; stopping pagination");
            break;
        }
    }

    info!(count = issues.len(), "Indexed issue URLs");
    Ok(issues)
}
