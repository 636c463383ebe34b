//! Content resolution: turn collected buckets into files on disk.
//!
//! For every bucket the referenced HTML elements are rendered and
//! concatenated into `<out_dir>/<key>.txt`, and every transcript found in
//! the bundle is copied to `<out_dir>/<target>.txt`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

use crate::domain::{Bucket, ElementIndex, Outcome, Outline, Report, VideoEntry};

use super::error::ShredError;
use super::render::{render_html, RenderOptions};
use super::sanitize::{clean, DEFAULT_MAX_LEN};

/// What to do when the outline references a uid absent from the repository
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingElementPolicy {
    /// Abort the run
    #[default]
    Fail,

    /// Record the miss and continue with the next uid
    Skip,
}

impl std::fmt::Display for MissingElementPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingElementPolicy::Fail => write!(f, "fail"),
            MissingElementPolicy::Skip => write!(f, "skip"),
        }
    }
}

impl std::str::FromStr for MissingElementPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fail" | "abort" => Ok(MissingElementPolicy::Fail),
            "skip" => Ok(MissingElementPolicy::Skip),
            _ => anyhow::bail!("Unknown missing-element policy: {}", s),
        }
    }
}

/// Settings for [`resolve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    pub render: RenderOptions,
    pub missing_elements: MissingElementPolicy,

    /// Cap for sanitized transcript names
    pub key_max_len: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default().with_image_to_alt(true),
            missing_elements: MissingElementPolicy::default(),
            key_max_len: DEFAULT_MAX_LEN,
        }
    }
}

/// File stem for a copied transcript: target up to the first ".mp4", sanitized
pub fn transcript_stem(target: &str, max: usize) -> String {
    let stem = target.split(".mp4").next().unwrap_or_default();
    clean(stem, max)
}

/// Write page text and copy transcripts for every bucket, in key order.
///
/// Outcomes are pushed to `report` as they happen, so an aborted run still
/// accounts for the files written before the failure. Missing transcript
/// files are reported and skipped. A missing element either aborts the run
/// or is skipped, per [`MissingElementPolicy`].
#[instrument(skip_all, fields(out_dir = %out_dir.display()))]
pub async fn resolve(
    outline: &Outline,
    elements: &ElementIndex,
    bundle_dir: &Path,
    out_dir: &Path,
    options: &ResolveOptions,
    report: &mut Report,
) -> Result<(), ShredError> {
    for (key, bucket) in outline.iter() {
        if !bucket.txt.is_empty() {
            write_page(key, bucket, elements, out_dir, options, report).await?;
        }

        for entry in &bucket.video {
            copy_transcript(entry, bundle_dir, out_dir, options.key_max_len, report).await?;
        }
    }

    info!(
        written = report.written(),
        copied = report.copied(),
        skipped = report.skipped(),
        "Bundle resolved"
    );
    Ok(())
}

/// Render and concatenate the bucket's elements into `<key>.txt`
async fn write_page(
    key: &str,
    bucket: &Bucket,
    elements: &ElementIndex,
    out_dir: &Path,
    options: &ResolveOptions,
    report: &mut Report,
) -> Result<(), ShredError> {
    let mut content = String::new();

    for uid in &bucket.txt {
        let Some(element) = elements.get(uid) else {
            match options.missing_elements {
                MissingElementPolicy::Fail => {
                    return Err(ShredError::MissingElement {
                        key: key.to_string(),
                        uid: uid.clone(),
                    });
                }
                MissingElementPolicy::Skip => {
                    warn!(%key, %uid, "Element not found, skipping");
                    report.push(Outcome::SkippedMissingElement {
                        key: key.to_string(),
                        uid: uid.clone(),
                    });
                    continue;
                }
            }
        };

        content.push_str(&render_html(element.content(), &options.render));
    }

    if content.is_empty() {
        debug!(%key, "No text rendered");
        report.push(Outcome::SkippedEmpty {
            key: key.to_string(),
        });
        return Ok(());
    }

    let path = out_dir.join(format!("{}.txt", key));
    fs::write(&path, content)
        .await
        .map_err(|e| ShredError::write(&path, e))?;
    report.push(Outcome::Written { path });
    Ok(())
}

/// Copy one transcript if its source exists in the bundle
async fn copy_transcript(
    entry: &VideoEntry,
    bundle_dir: &Path,
    out_dir: &Path,
    max: usize,
    report: &mut Report,
) -> Result<(), ShredError> {
    let source = bundle_dir.join(&entry.source);

    if !is_file(&source).await {
        warn!(source = %source.display(), "Transcript not found");
        report.push(Outcome::SkippedSourceMissing { source });
        return Ok(());
    }

    let target: PathBuf = out_dir.join(format!("{}.txt", transcript_stem(&entry.target, max)));
    fs::copy(&source, &target)
        .await
        .map_err(|e| ShredError::write(&target, e))?;
    report.push(Outcome::Copied { source, target });
    Ok(())
}

async fn is_file(path: &Path) -> bool {
    fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_stem() {
        assert_eq!(transcript_stem("lesson1", DEFAULT_MAX_LEN), "lesson1");
        assert_eq!(transcript_stem("Intro clip.mp4", DEFAULT_MAX_LEN), "Intro_clip");
        assert_eq!(transcript_stem("a.mp4.b.mp4", DEFAULT_MAX_LEN), "a");
        assert_eq!(transcript_stem(".mp4", DEFAULT_MAX_LEN), "");
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "skip".parse::<MissingElementPolicy>().unwrap(),
            MissingElementPolicy::Skip
        );
        assert_eq!(
            " FAIL ".parse::<MissingElementPolicy>().unwrap(),
            MissingElementPolicy::Fail
        );
        assert!("maybe".parse::<MissingElementPolicy>().is_err());
    }

    #[test]
    fn test_default_options_render_alt_text() {
        let options = ResolveOptions::default();
        assert!(options.render.image_to_alt);
        assert_eq!(options.missing_elements, MissingElementPolicy::Fail);
    }
}
