//! Page scrapers for the three crawl stages.
//!
//! Each stage follows the same two-step pattern: a pure `parse_*` function
//! that works on HTML text (and is what the tests exercise), and an async
//! wrapper that fetches the page through a [`PageSource`](crate::http::PageSource)
//! first.
//!
//! | Stage | Module | Input | Output |
//! |-------|--------|-------|--------|
//! | Archive Lister | [`archive`] | archive page(s) | issue URLs |
//! | Issue Lister | [`issue`] | one issue page | paper URLs under that issue |
//! | Paper Extractor | [`paper`] | one paper page | [`PaperRecord`](crate::models::PaperRecord) |
//!
//! Hrefs are resolved against the page they were found on before matching, so
//! absolute, protocol-relative (`//host/...`) and relative links all compare
//! as absolute URLs.

pub mod archive;
pub mod issue;
pub mod paper;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("Failed to parse link selector"));

/// Every `<a href>` on the page, resolved against `page_url`, in document order.
///
/// Hrefs that cannot be resolved (e.g. `javascript:` junk that fails to parse)
/// are dropped.
pub(crate) fn resolved_links(document: &Html, page_url: &Url) -> Vec<String> {
    document
        .select(&LINK_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| page_url.join(href.trim()).ok())
        .map(|u| u.to_string())
        .collect()
}

/// Concatenated text of an element with surrounding whitespace stripped.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
