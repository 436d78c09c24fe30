//! Data models for harvested papers and the crawl report.
//!
//! This module defines the core data structures used throughout the application:
//! - [`PaperRecord`]: Bibliographic metadata extracted from one paper page
//! - [`PaperFailure`]: A paper that produced no record, with the reason
//! - [`CrawlReport`]: Summary of a whole run, returned by the pipeline
//!
//! Links between stages are plain URL strings; see [`IssueLink`] and [`PaperLink`].

use crate::error::ExtractionFailure;
use serde::{Deserialize, Serialize};

/// URL of one issue page, as discovered on the archive page.
pub type IssueLink = String;

/// URL of one paper detail page, nested under its issue's URL.
pub type PaperLink = String;

/// Placeholder stored when a text field is missing from the page.
pub const NOT_AVAILABLE: &str = "N/A";

/// Metadata for a single paper.
///
/// Missing text fields hold [`NOT_AVAILABLE`]; missing list fields are empty.
/// Every key is always serialized, in the order `title`, `abstract`,
/// `keywords`, `url`, `authors`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaperRecord {
    /// Text of the `h3.article-title` heading.
    pub title: String,
    /// First paragraph of the `article-abstract` block.
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Link texts from the `article-keywords` block, in document order.
    pub keywords: Vec<String>,
    /// The paper page this record was extracted from.
    pub url: String,
    /// `citation_author` meta tag contents, in document order.
    pub authors: Vec<String>,
}

/// A paper URL that did not make it into the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperFailure {
    pub url: PaperLink,
    #[serde(serialize_with = "serialize_display")]
    pub reason: ExtractionFailure,
}

/// Outcome of one full run.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// RFC 3339 timestamp taken before the archive fetch.
    pub started_at: String,
    /// RFC 3339 timestamp taken after the final flush.
    pub finished_at: String,
    pub issues_found: usize,
    pub papers_found: usize,
    /// Records written to the store during this run.
    pub saved: usize,
    pub failures: Vec<PaperFailure>,
}

impl CrawlReport {
    /// Number of failures of the given kind.
    pub fn count_failures(&self, kind: &ExtractionFailure) -> usize {
        self.failures
            .iter()
            .filter(|f| std::mem::discriminant(&f.reason) == std::mem::discriminant(kind))
            .count()
    }
}

fn serialize_display<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: std::fmt::Display,
{
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PaperRecord {
        PaperRecord {
            title: "Isı Transferi".to_string(),
            abstract_text: NOT_AVAILABLE.to_string(),
            keywords: vec![],
            url: "https://example.com/issue/1/2".to_string(),
            authors: vec![],
        }
    }

    #[test]
    fn test_paper_record_serializes_every_key() {
        let value = serde_json::to_value(record()).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["title", "abstract", "keywords", "url", "authors"] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj["abstract"], "N/A");
        assert_eq!(obj["keywords"], serde_json::json!([]));
    }

    #[test]
    fn test_paper_record_key_order() {
        let json = serde_json::to_string(&record()).unwrap();
        let pos = |k: &str| json.find(&format!("\"{k}\"")).unwrap();
        assert!(pos("title") < pos("abstract"));
        assert!(pos("abstract") < pos("keywords"));
        assert!(pos("keywords") < pos("url"));
        assert!(pos("url") < pos("authors"));
    }

    #[test]
    fn test_paper_record_deserialization() {
        let json = r#"{
            "title": "T",
            "abstract": "A",
            "keywords": ["k1", "k2"],
            "url": "https://example.com/p",
            "authors": ["Ayşe Yılmaz"]
        }"#;
        let rec: PaperRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.abstract_text, "A");
        assert_eq!(rec.keywords, vec!["k1", "k2"]);
        assert_eq!(rec.authors, vec!["Ayşe Yılmaz"]);
    }

    #[test]
    fn test_failure_reason_serializes_as_text() {
        let failure = PaperFailure {
            url: "https://example.com/p".to_string(),
            reason: ExtractionFailure::ArticleNotFound,
        };
        let value = serde_json::to_value(failure).unwrap();
        assert_eq!(value["reason"], "'article_en' not found");
    }

    #[test]
    fn test_count_failures_by_kind() {
        let report = CrawlReport {
            started_at: String::new(),
            finished_at: String::new(),
            issues_found: 1,
            papers_found: 3,
            saved: 0,
            failures: vec![
                PaperFailure {
                    url: "a".to_string(),
                    reason: ExtractionFailure::ArticleNotFound,
                },
                PaperFailure {
                    url: "b".to_string(),
                    reason: ExtractionFailure::Fetch("boom".to_string()),
                },
                PaperFailure {
                    url: "c".to_string(),
                    reason: ExtractionFailure::Fetch("again".to_string()),
                },
            ],
        };
        assert_eq!(report.count_failures(&ExtractionFailure::ArticleNotFound), 1);
        assert_eq!(
            report.count_failures(&ExtractionFailure::Fetch(String::new())),
            2
        );
        assert_eq!(report.count_failures(&ExtractionFailure::Timeout(0)), 0);
    }
}
