//! Paper Extractor.
//!
//! Pulls bibliographic metadata out of a paper detail page. Everything except
//! the authors is scoped to the English article container (`div#article_en`);
//! a page without that container yields [`ExtractionFailure::ArticleNotFound`]
//! rather than a record.
//!
//! | Field | Source | When missing |
//! |-------|--------|--------------|
//! | title | first `h3.article-title` in the container | `"N/A"` |
//! | abstract | first `p` in the container's `div.article-abstract` | `"N/A"` |
//! | keywords | every `a` in the container's `div.article-keywords` | `[]` |
//! | authors | `content` of every page-level `meta[name="citation_author"]` | `[]` |

use super::element_text;
use crate::error::ExtractionFailure;
use crate::http::PageSource;
use crate::models::{NOT_AVAILABLE, PaperRecord};
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

struct PaperSelectors {
    article: Selector,
    title: Selector,
    abstract_block: Selector,
    paragraph: Selector,
    keywords_block: Selector,
    keyword: Selector,
    citation_author: Selector,
}

static SELECTORS: Lazy<PaperSelectors> = Lazy::new(|| PaperSelectors {
    article: Selector::parse("div#article_en").expect("Failed to parse article selector"),
    title: Selector::parse("h3.article-title").expect("Failed to parse title selector"),
    abstract_block: Selector::parse("div.article-abstract")
        .expect("Failed to parse abstract selector"),
    paragraph: Selector::parse("p").expect("Failed to parse paragraph selector"),
    keywords_block: Selector::parse("div.article-keywords")
        .expect("Failed to parse keywords selector"),
    keyword: Selector::parse("a").expect("Failed to parse keyword selector"),
    citation_author: Selector::parse(r#"meta[name="citation_author"]"#)
        .expect("Failed to parse citation_author selector"),
});

/// Build a [`PaperRecord`] from the HTML of the page at `url`.
pub fn parse_paper(html: &str, url: &str) -> Result<PaperRecord, ExtractionFailure> {
    let document = Html::parse_document(html);
    let sel = &*SELECTORS;

    let article = document
        .select(&sel.article)
        .next()
        .ok_or(ExtractionFailure::ArticleNotFound)?;

    let title = article
        .select(&sel.title)
        .next()
        .map(element_text)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let abstract_text = article
        .select(&sel.abstract_block)
        .next()
        .and_then(|block| block.select(&sel.paragraph).next())
        .map(element_text)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let keywords: Vec<String> = article
        .select(&sel.keywords_block)
        .next()
        .map(|block| block.select(&sel.keyword).map(element_text).collect())
        .unwrap_or_default();

    let authors: Vec<String> = document
        .select(&sel.citation_author)
        .filter_map(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
        .collect();

    Ok(PaperRecord {
        title,
        abstract_text,
        keywords,
        url: url.to_string(),
        authors,
    })
}

/// Fetch one paper page and extract its record.
///
/// Fetch errors are folded into [`ExtractionFailure::Fetch`]; nothing here is
/// fatal to the run.
#[instrument(level = "info", skip(source))]
pub async fn fetch_paper<S: PageSource>(
    source: &S,
    url: &str,
) -> Result<PaperRecord, ExtractionFailure> {
    let html = source.fetch(url).await?;
    let record = parse_paper(&html, url)?;
    debug!(
        title = %truncate_for_log(&record.title, 80),
        keywords = record.keywords.len(),
        authors = record.authors.len(),
        "Extracted paper"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::fixture::FixtureSource;

    const URL: &str = "https://dergipark.org.tr/tr/pub/politeknik/issue/1/10";

    const FULL_PAGE: &str = r#"
        <html>
        <head>
            <meta name="citation_author" content="Ayşe Yılmaz">
            <meta name="citation_author">
            <meta name="citation_author" content=" Mehmet Öz ">
            <meta name="citation_title" content="ignored">
        </head>
        <body>
            <div id="article_tr">
                <h3 class="article-title">Türkçe Başlık</h3>
            </div>
            <div id="article_en">
                <h3 class="article-title">
                    Heat Transfer in Porous Media
                </h3>
                <h3 class="article-title">Second title</h3>
                <div class="article-abstract data-section">
                    <h4>Abstract</h4>
                    <p>  We study heat transfer.  </p>
                    <p>Second paragraph.</p>
                </div>
                <div class="article-keywords data-section">
                    <a href="/k/1">heat</a>
                    <a href="/k/2"> porous media </a>
                    <a href="/k/3">Çözüm</a>
                </div>
            </div>
        </body>
        </html>
    "#;

    #[test]
    fn test_full_page() {
        let rec = parse_paper(FULL_PAGE, URL).unwrap();
        assert_eq!(rec.title, "Heat Transfer in Porous Media");
        assert_eq!(rec.abstract_text, "We study heat transfer.");
        assert_eq!(rec.keywords, vec!["heat", "porous media", "Çözüm"]);
        assert_eq!(rec.url, URL);
        assert_eq!(rec.authors, vec!["Ayşe Yılmaz", "Mehmet Öz"]);
    }

    #[test]
    fn test_missing_article_container_is_skip() {
        let html = r#"<div id="article_tr"><h3 class="article-title">Yalnız Türkçe</h3></div>"#;
        assert_eq!(
            parse_paper(html, URL),
            Err(ExtractionFailure::ArticleNotFound)
        );
    }

    #[test]
    fn test_empty_container_defaults() {
        let html = r#"<div id="article_en"></div>"#;
        let rec = parse_paper(html, URL).unwrap();
        assert_eq!(rec.title, "N/A");
        assert_eq!(rec.abstract_text, "N/A");
        assert!(rec.keywords.is_empty());
        assert!(rec.authors.is_empty());

        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["title"], "N/A");
        assert_eq!(value["abstract"], "N/A");
        assert_eq!(value["keywords"], serde_json::json!([]));
        assert_eq!(value["authors"], serde_json::json!([]));
    }

    #[test]
    fn test_abstract_block_without_paragraph() {
        let html = r#"<div id="article_en">
            <div class="article-abstract">no paragraph here</div>
        </div>"#;
        assert_eq!(parse_paper(html, URL).unwrap().abstract_text, "N/A");
    }

    #[test]
    fn test_fields_outside_container_are_ignored() {
        let html = r#"
            <h3 class="article-title">Outside</h3>
            <div class="article-keywords"><a>outside</a></div>
            <div id="article_en"><p>body</p></div>
        "#;
        let rec = parse_paper(html, URL).unwrap();
        assert_eq!(rec.title, "N/A");
        assert!(rec.keywords.is_empty());
    }

    #[test]
    fn test_authors_are_page_level() {
        let html = r#"
            <div id="article_en"></div>
            <div><meta name="citation_author" content="Body Author"></div>
        "#;
        let rec = parse_paper(html, URL).unwrap();
        assert_eq!(rec.authors, vec!["Body Author"]);
    }

    #[tokio::test]
    async fn test_fetch_paper_fetch_error_is_failure() {
        let source = FixtureSource::new();
        match fetch_paper(&source, URL).await {
            Err(ExtractionFailure::Fetch(msg)) => assert!(msg.contains("404")),
            other => panic!("expected fetch failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_paper_success() {
        let source = FixtureSource::new().with_page(URL, FULL_PAGE);
        let rec = fetch_paper(&source, URL).await.unwrap();
        assert_eq!(rec.title, "Heat Transfer in Porous Media");
    }
}
