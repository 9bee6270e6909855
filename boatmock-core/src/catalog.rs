//! Boat record catalog
//!
//! The catalog is the flat directory of boat record files. Every scan
//! re-reads the directory from scratch; nothing is cached between calls.
//! Each `.json` entry is parsed independently so one malformed record
//! never hides the others.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{json, Map, Value};
use tokio::fs;

use crate::error::{GatewayError, GatewayResult};

/// File extension of boat record files (including the dot)
pub const RECORD_SUFFIX: &str = ".json";

/// Message carried by the marker that replaces an unparseable record
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON format";

/// File name → parsed record (or error marker).
///
/// Keys serialize in sorted order.
pub type Listing = BTreeMap<String, Value>;

/// The fixed object substituted for a record that fails to parse
pub fn invalid_json_marker() -> Value {
    json!({ "error": INVALID_JSON_MESSAGE })
}

/// Parse raw record bytes as JSON.
///
/// Numbers keep their source text, so integers wider than 64 bits survive.
/// Bytes that are not valid UTF-8 fail parsing like any other malformed input.
pub fn parse_record(bytes: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Recursively reorder object keys lexicographically.
///
/// Objects otherwise keep insertion order; the listing is always served sorted.
pub fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(fields) => {
            let mut entries: Vec<(String, Value)> = fields.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Scan `dir` non-recursively and aggregate every `.json` record.
///
/// Entries whose names are not valid UTF-8, or that are not regular files,
/// are skipped. A missing or unreadable directory is an error.
pub async fn scan_catalog(dir: &Path) -> GatewayResult<Listing> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| GatewayError::read_dir(dir, e))?;
    let mut listing = Listing::new();

    while let Some(entry) = entries.next_entry().await? {
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if !name.ends_with(RECORD_SUFFIX) {
            continue;
        }

        let path = entry.path();
        if !fs::metadata(&path).await?.is_file() {
            continue;
        }

        let bytes = fs::read(&path).await?;
        let value = match parse_record(&bytes) {
            Ok(value) => sort_keys(value),
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "Invalid JSON in boat record");
                invalid_json_marker()
            }
        };
        listing.insert(name, value);
    }

    Ok(listing)
}
