//! Bundle-level operations: `concat`, `process` and `check_elements`.

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::domain::{ElementIndex, Outline, Report, TranscriptFinding};

use super::collector::collect;
use super::error::ShredError;
use super::loader::{
    encoding_for_label, load_elements, load_json_elements, load_outline, DEFAULT_ELEMENTS_ENCODING,
};
use super::render::{render_html, RenderOptions};
use super::resolver::{resolve, ResolveOptions};

/// Name of the element repository inside a bundle
pub const ELEMENTS_FILE: &str = "elements.json";

/// Name of the collected outline written next to the text files
pub const OUTLINE_FILE: &str = "outline.json";

/// Settings for [`concat`]
#[derive(Debug, Clone)]
pub struct ConcatOptions {
    pub resolve: ResolveOptions,

    /// Encoding of the bundle's `elements.json`
    pub elements_encoding: &'static Encoding,
}

impl Default for ConcatOptions {
    fn default() -> Self {
        Self {
            resolve: ResolveOptions::default(),
            elements_encoding: encoding_for_label(DEFAULT_ELEMENTS_ENCODING)
                .unwrap_or(encoding_rs::WINDOWS_1252),
        }
    }
}

/// Full pipeline: outline CSV + bundle directory -> per-page text files.
///
/// Also writes the collected outline to `<out_dir>/outline.json`, before the
/// element repository is loaded. Row totals and outcomes are recorded in
/// `report`, which keeps what was done even when the run fails part way.
#[instrument(skip(options, report), fields(csv = %csv_path.display(), bundle = %bundle_dir.display()))]
pub async fn concat(
    csv_path: &Path,
    bundle_dir: &Path,
    out_dir: &Path,
    options: &ConcatOptions,
    report: &mut Report,
) -> Result<(), ShredError> {
    let rows = load_outline(csv_path).await?;
    let collection = collect(&rows, options.resolve.key_max_len);
    report.total_txt = collection.total_txt;
    report.total_video = collection.total_video;
    info!(
        rows = rows.len(),
        pages = collection.outline.len(),
        html = collection.total_txt,
        video = collection.total_video,
        "Outline collected"
    );

    fs::create_dir_all(out_dir)
        .await
        .map_err(|e| ShredError::write(out_dir, e))?;
    write_outline(&collection.outline, out_dir).await?;

    let elements_path = bundle_dir.join(ELEMENTS_FILE);
    let elements = ElementIndex::from_elements(
        load_elements(&elements_path, options.elements_encoding).await?,
    );
    debug!(elements = elements.len(), "Element repository indexed");

    resolve(
        &collection.outline,
        &elements,
        bundle_dir,
        out_dir,
        &options.resolve,
        report,
    )
    .await
}

/// Persist the collected outline as pretty JSON (4-space indent)
pub async fn write_outline(outline: &Outline, out_dir: &Path) -> Result<PathBuf, ShredError> {
    let path = out_dir.join(OUTLINE_FILE);

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    outline.serialize(&mut serializer)?;

    fs::write(&path, buf)
        .await
        .map_err(|e| ShredError::write(&path, e))?;
    Ok(path)
}

/// Render every `HLXP_HTML` element of a JSON file to `<out_dir>/<prefix>-<uid>.txt`.
///
/// Returns the written paths. Existing files are overwritten.
#[instrument(skip(options), fields(input = %input.display()))]
pub async fn process(
    input: &Path,
    out_dir: &Path,
    prefix: &str,
    options: &RenderOptions,
) -> Result<Vec<PathBuf>, ShredError> {
    let is_dir = fs::metadata(out_dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(ShredError::NotADirectory(out_dir.to_path_buf()));
    }

    let elements = load_json_elements(input).await?;
    let mut written = Vec::new();

    for element in elements.iter().filter(|e| e.is_html()) {
        let path = out_dir.join(format!("{}-{}.txt", prefix, element.uid));
        let text = render_html(element.content(), options);
        fs::write(&path, text)
            .await
            .map_err(|e| ShredError::write(&path, e))?;
        debug!(uid = %element.uid, path = %path.display(), "Element rendered");
        written.push(path);
    }

    info!(
        elements = elements.len(),
        written = written.len(),
        "HTML elements processed"
    );
    Ok(written)
}

/// Report where each video element of a repository keeps its transcript
pub async fn check_elements(
    path: &Path,
    encoding: &'static Encoding,
) -> Result<Vec<TranscriptFinding>, ShredError> {
    let elements = load_elements(path, encoding).await?;

    Ok(elements
        .iter()
        .filter(|e| e.is_video())
        .map(|e| TranscriptFinding {
            uid: e.uid.clone(),
            location: e.transcript_location(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VideoEntry;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_outline_uses_four_space_indent() {
        let temp = TempDir::new().unwrap();
        let mut outline = Outline::new();
        let bucket = outline.entry("MODULE-Welcome".to_string()).or_default();
        bucket.txt.push("u1".to_string());
        bucket.video.push(VideoEntry {
            source: "t.txt".to_string(),
            target: "clip".to_string(),
        });

        let path = write_outline(&outline, temp.path()).await.unwrap();
        let written = std::fs::read_to_string(path).unwrap();

        assert!(written.starts_with("{\n    \"MODULE-Welcome\": {\n        \"txt\": ["));
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["MODULE-Welcome"]["video"][0]["target"], "clip");
    }

    #[tokio::test]
    async fn test_process_requires_directory() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in.json");
        std::fs::write(&input, "[]").unwrap();

        let err = process(&input, &temp.path().join("missing"), "x", &RenderOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ShredError::NotADirectory(_)));
    }
}
