//! Batch persister for the JSON paper store.
//!
//! The store is a single JSON array. Each flush reads the whole array, appends
//! the batch in the order given, and rewrites the whole file. Nothing is
//! deduplicated: saving the same batch twice stores it twice.
//!
//! # Tolerated input
//!
//! A missing file, an unparseable file, or a file whose top level is not an
//! array are all read as an empty store. Entries already in the array are kept
//! as-is even if they do not look like paper records.
//!
//! # Write path
//!
//! The new contents go to `<store>.tmp` next to the store, which is then
//! renamed over it. The pipeline is the only writer during a run; a second
//! process writing the same store at the same time can still lose a batch.

use super::to_pretty_json;
use crate::error::Result;
use crate::models::PaperRecord;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument, warn};

/// Read the current store contents.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn load_store(path: &Path) -> Result<Vec<Value>> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(entries)) => Ok(entries),
        Ok(other) => {
            warn!(kind = json_kind(&other), "Store is not a JSON array; starting from empty");
            Ok(Vec::new())
        }
        Err(e) => {
            warn!(error = %e, "Store is not valid JSON; starting from empty");
            Ok(Vec::new())
        }
    }
}

/// Append `batch` to the store at `path`, rewriting the whole file.
#[instrument(level = "info", skip_all, fields(path = %path.display(), batch = batch.len()))]
pub async fn save_batch(path: &Path, batch: &[PaperRecord]) -> Result<()> {
    let mut entries = load_store(path).await?;
    entries.reserve(batch.len());
    for record in batch {
        entries.push(serde_json::to_value(record)?);
    }

    let bytes = to_pretty_json(&entries)?;
    let tmp = temp_path(path);
    fs::write(&tmp, bytes).await?;
    fs::rename(&tmp, path).await?;

    info!(total = entries.len(), "Saved {} papers to {}", batch.len(), path.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
