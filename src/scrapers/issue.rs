//! Issue Lister.
//!
//! A paper link is any link on the issue page nested under the issue's own
//! URL, i.e. starting with `{issue_url}/`. The tail of the link is not
//! checked, so sub-pages of an issue that are not papers would match too.
//!
//! An issue page that answers with a non-success status contributes no links
//! and the crawl goes on; transport errors still propagate.

use super::resolved_links;
use crate::error::{Error, Result};
use crate::http::PageSource;
use crate::models::PaperLink;
use itertools::Itertools;
use scraper::Html;
use tracing::{debug, instrument, warn};
use url::Url;

/// Paper links nested under `issue_url`, first occurrence order, no duplicates.
pub fn parse_paper_links(html: &str, issue_url: &str) -> Result<Vec<PaperLink>> {
    let base = Url::parse(issue_url)?;
    let prefix = format!("{}/", issue_url.trim_end_matches('/'));
    let document = Html::parse_document(html);
    let links = resolved_links(&document, &base)
        .into_iter()
        .filter(|link| link.len() > prefix.len() && link.starts_with(&prefix))
        .unique()
        .collect();
    Ok(links)
}

/// Fetch one issue page and return its paper links.
#[instrument(level = "info", skip(source))]
pub async fn index_papers<S: PageSource>(source: &S, issue_url: &str) -> Result<Vec<PaperLink>> {
    let html = match source.fetch(issue_url).await {
        Ok(html) => html,
        Err(Error::Status { status, .. }) => {
            warn!(status, "Issue page returned an error status; no papers listed");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };
    let links = parse_paper_links(&html, issue_url)?;
    debug!(count = links.len(), "Indexed paper URLs for issue");
    Ok(links)
}
