//! Outline collection: bucket outline rows under their output keys.

use tracing::{debug, warn};

use crate::domain::{Collection, OutlineRow, VideoEntry};

use super::keys::make_key;

/// Bucket HTML element uids and video transcripts by output key.
///
/// Rows that are neither HTML nor video are ignored. Video rows without a
/// transcript file, or whose sample lacks the "Video: " marker, are skipped.
/// No row aborts the collection.
pub fn collect<'a>(rows: impl IntoIterator<Item = &'a OutlineRow>, max: usize) -> Collection {
    let mut collection = Collection::default();

    for (line, row) in rows.into_iter().enumerate() {
        if !row.is_html() && !row.is_video() {
            continue;
        }

        let key = make_key(row, max);
        let bucket = collection.outline.entry(key.clone()).or_default();

        if row.is_html() {
            bucket.txt.push(row.te_content_sample.clone());
            collection.total_txt += 1;
        }

        if row.is_video() {
            let Some(source) = row.transcript_source() else {
                debug!(%key, line, "Video row without transcript, skipping");
                continue;
            };
            let Some(target) = row.video_target() else {
                warn!(
                    %key,
                    line,
                    sample = %row.te_content_sample,
                    "Video row without 'Video: ' name, skipping"
                );
                continue;
            };

            bucket.video.push(VideoEntry {
                source: source.to_string(),
                target: target.to_string(),
            });
            collection.total_video += 1;
        }
    }

    debug!(
        buckets = collection.outline.len(),
        total_txt = collection.total_txt,
        total_video = collection.total_video,
        "Outline collected"
    );
    collection
}
