//! Boat record writer
//!
//! Each saved payload lands in a new file named by a random UUID, so
//! concurrent saves never target the same path. Writes are plain
//! `tokio::fs::write` calls: no locking, no fsync, no rename dance.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tokio::fs;
use uuid::Uuid;

use crate::catalog::RECORD_SUFFIX;
use crate::error::GatewayResult;

/// Generate a fresh record file name (`<uuid>.json`)
pub fn generate_record_name() -> String {
    format!("{}{}", Uuid::new_v4(), RECORD_SUFFIX)
}

/// Whether a payload counts as "nothing received".
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` are all empty.
pub fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Render a payload the way records are stored on disk.
///
/// Four-space indentation; non-ASCII characters are written as UTF-8, not escaped.
/// Keys stay in payload order and numbers keep their source text.
pub fn render_record(payload: &Value) -> GatewayResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    payload.serialize(&mut ser)?;
    Ok(buf)
}

/// Persist `payload` as a new record in `dir`, returning the written path.
pub async fn save_record(dir: &Path, payload: &Value) -> GatewayResult<PathBuf> {
    let path = dir.join(generate_record_name());
    let bytes = render_record(payload)?;
    fs::write(&path, bytes).await?;

    tracing::info!(path = %path.display(), "Saved boat record");
    Ok(path)
}
