//! Output generation: the JSON paper store and the crawl report.
//!
//! # Submodules
//!
//! - [`json`]: Appends batches of [`PaperRecord`](crate::models::PaperRecord)s
//!   to the JSON store
//! - [`report`]: Writes the [`CrawlReport`](crate::models::CrawlReport) of a run
//!
//! Both files are written with 4-space indentation and non-ASCII text kept
//! literally, so Turkish titles stay readable in the raw file.

pub mod json;
pub mod report;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Serialize `value` as pretty JSON with 4-space indentation.
pub(crate) fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}
