//! Crawl report output.

use super::to_pretty_json;
use crate::error::Result;
use crate::models::CrawlReport;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write `report` as pretty JSON to `path`, replacing any previous report.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_report(report: &CrawlReport, path: &Path) -> Result<()> {
    let bytes = to_pretty_json(report)?;
    fs::write(path, bytes).await?;
    info!(failures = report.failures.len(), "Wrote crawl report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionFailure;
    use crate::models::PaperFailure;

    #[tokio::test]
    async fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = CrawlReport {
            started_at: "2025-01-01T00:00:00+00:00".to_string(),
            finished_at: "2025-01-01T00:05:00+00:00".to_string(),
            issues_found: 2,
            papers_found: 6,
            saved: 5,
            failures: vec![PaperFailure {
                url: "https://example.com/issue/1/3".to_string(),
                reason: ExtractionFailure::Timeout(60),
            }],
        };

        write_report(&report, &path).await.unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).await.unwrap()).unwrap();
        assert_eq!(value["saved"], 5);
        assert_eq!(value["papers_found"], 6);
        assert_eq!(value["failures"][0]["reason"], "timed out after 60s");
    }
}
