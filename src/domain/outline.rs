//! Course outline rows and the buckets they are collected into.
//!
//! An outline row associates a module/page with one content element.
//! Rows sharing the same derived key are merged into one [`Bucket`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Separator between the label and the video name in `te_content_sample`
pub const VIDEO_MARKER: &str = "Video: ";

/// Columns an outline CSV must carry
pub const REQUIRED_COLUMNS: [&str; 5] = ["module", "page", "te_type", "te_content_sample", "filename"];

/// One row of the course outline export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineRow {
    /// Module title (e.g. "Module 3: Intro", "Glossary")
    pub module: String,

    /// Page title
    pub page: String,

    /// Element type tag (HLXP_HTML, HLXP_VIDEO, ...)
    pub te_type: String,

    /// Element uid for HTML rows, "Video: <name>" for video rows
    pub te_content_sample: String,

    /// Transcript path relative to the bundle, empty when there is none
    pub filename: String,
}

impl OutlineRow {
    /// Row references an HTML element
    pub fn is_html(&self) -> bool {
        self.te_type.contains("HTML")
    }

    /// Row references a video element
    pub fn is_video(&self) -> bool {
        self.te_type.contains("VIDEO")
    }

    /// Display name of the video, the segment right after the first marker
    pub fn video_target(&self) -> Option<&str> {
        self.te_content_sample.split(VIDEO_MARKER).nth(1)
    }

    /// Transcript source path, if the row has one
    pub fn transcript_source(&self) -> Option<&str> {
        if self.filename.is_empty() {
            None
        } else {
            Some(&self.filename)
        }
    }
}

/// A transcript to copy into the output directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEntry {
    /// Transcript path relative to the bundle directory
    pub source: String,

    /// Video display name, used to name the copied file
    pub target: String,
}

/// Everything collected under one output key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Element uids whose text is concatenated, in encounter order
    pub txt: Vec<String>,

    /// Transcripts to copy, in encounter order
    pub video: Vec<VideoEntry>,
}

/// Key -> bucket mapping that keeps keys in first-seen order.
///
/// Serializes as a JSON object with keys in insertion order, which is the
/// layout written to `outline.json`.
pub type Outline = IndexMap<String, Bucket>;

/// Result of scanning the outline
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Number of HTML rows collected
    pub total_txt: usize,

    /// Number of video rows collected
    pub total_video: usize,

    pub outline: Outline,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(te_type: &str, sample: &str, filename: &str) -> OutlineRow {
        OutlineRow {
            module: "Module 1: Basics".to_string(),
            page: "Intro".to_string(),
            te_type: te_type.to_string(),
            te_content_sample: sample.to_string(),
            filename: filename.to_string(),
        }
    }

    #[test]
    fn test_type_matching_is_substring() {
        assert!(row("HLXP_HTML", "u1", "").is_html());
        assert!(!row("HLXP_HTML", "u1", "").is_video());
        assert!(row("VIDEO_TRANSCRIPT", "", "").is_video());

        let both = row("HTML_VIDEO", "", "");
        assert!(both.is_html() && both.is_video());
    }

    #[test]
    fn test_video_target_takes_second_segment() {
        assert_eq!(row("VIDEO", "Video: lesson1", "").video_target(), Some("lesson1"));
        assert_eq!(
            row("VIDEO", "Intro Video: a.mp4 Video: b", "").video_target(),
            Some("a.mp4 ")
        );
        assert_eq!(row("VIDEO", "no marker", "").video_target(), None);
    }

    #[test]
    fn test_transcript_source() {
        assert_eq!(row("VIDEO", "", "").transcript_source(), None);
        assert_eq!(row("VIDEO", "", "t/a.txt").transcript_source(), Some("t/a.txt"));
    }

    #[test]
    fn test_outline_keeps_insertion_order() {
        let mut outline = Outline::new();
        for (key, uid) in [("b", "1"), ("a", "2"), ("b", "3")] {
            outline.entry(key.to_string()).or_default().txt.push(uid.to_string());
        }

        assert_eq!(outline.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(outline.get("b").unwrap().txt, vec!["1", "3"]);
        assert_eq!(outline.len(), 2);
    }

    #[test]
    fn test_outline_serialization() {
        let mut outline = Outline::new();
        outline.entry("z-page".to_string()).or_default();
        outline.entry("a-page".to_string()).or_default().video.push(VideoEntry {
            source: "t.txt".to_string(),
            target: "lesson".to_string(),
        });

        let json = serde_json::to_string(&outline).unwrap();
        assert_eq!(
            json,
            r#"{"z-page":{"txt":[],"video":[]},"a-page":{"txt":[],"video":[{"source":"t.txt","target":"lesson"}]}}"#
        );
    }
}
