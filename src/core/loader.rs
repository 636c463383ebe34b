//! Input loading: outline CSV and element repositories.
//!
//! Outline rows are validated here in full. Element records are only checked
//! for a uid; their payload is read later by whichever operation needs it.

use std::path::Path;

use encoding_rs::Encoding;
use tokio::fs;
use tracing::debug;

use crate::domain::{Element, OutlineRow, REQUIRED_COLUMNS};

use super::error::ShredError;

/// Encoding label of `elements.json` in LXP bundles.
///
/// `encoding_rs` follows the WHATWG label table and decodes `iso-8859-1` as
/// windows-1252. Bytes 0x80-0x9F therefore become typographic characters
/// (0x80 is '€') instead of the C1 control codes of a strict Latin-1 decode.
pub const DEFAULT_ELEMENTS_ENCODING: &str = "iso-8859-1";

/// Resolve an encoding label ("iso-8859-1", "utf-8", ...)
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding, ShredError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ShredError::UnknownEncoding(label.to_string()))
}

/// Fail unless `path` is an existing regular file
pub async fn ensure_file(path: &Path) -> Result<(), ShredError> {
    match fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(ShredError::InputNotFound(path.to_path_buf())),
    }
}

async fn read_bytes(path: &Path) -> Result<Vec<u8>, ShredError> {
    ensure_file(path).await?;
    fs::read(path).await.map_err(|e| ShredError::read(path, e))
}

/// Load the course outline (UTF-8, optional BOM, comma separated, header row)
pub async fn load_outline(path: &Path) -> Result<Vec<OutlineRow>, ShredError> {
    let bytes = read_bytes(path).await?;
    let rows = parse_outline(&bytes, path)?;
    debug!(path = %path.display(), rows = rows.len(), "Outline loaded");
    Ok(rows)
}

fn parse_outline(bytes: &[u8], path: &Path) -> Result<Vec<OutlineRow>, ShredError> {
    let content = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content);

    let headers = reader.headers()?.clone();
    if let Some(column) = REQUIRED_COLUMNS
        .iter()
        .find(|c| !headers.iter().any(|h| h == **c))
    {
        return Err(ShredError::MissingField {
            path: path.to_path_buf(),
            column: column.to_string(),
        });
    }

    reader
        .deserialize::<OutlineRow>()
        .map(|row| row.map_err(ShredError::from))
        .collect()
}

/// Load an element repository stored in a legacy text encoding
pub async fn load_elements(
    path: &Path,
    encoding: &'static Encoding,
) -> Result<Vec<Element>, ShredError> {
    let bytes = read_bytes(path).await?;
    let (text, used, had_errors) = encoding.decode(&bytes);
    debug!(
        path = %path.display(),
        encoding = used.name(),
        had_errors,
        "Element repository decoded"
    );
    parse_elements(text.as_bytes(), path)
}

/// Load a plain UTF-8 JSON element file
pub async fn load_json_elements(path: &Path) -> Result<Vec<Element>, ShredError> {
    let bytes = read_bytes(path).await?;
    parse_elements(&bytes, path)
}

/// Accept both `[record, ...]` and `{"<uid>": record, ...}`
fn parse_elements(bytes: &[u8], path: &Path) -> Result<Vec<Element>, ShredError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;

    let records = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        _ => return Err(ShredError::UnexpectedShape(path.to_path_buf())),
    };

    records
        .into_iter()
        .map(|r| serde_json::from_value(r).map_err(ShredError::from))
        .collect()
}
