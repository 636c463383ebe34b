//! Domain types for shred.
//!
//! This module contains the core data structures:
//! - Outline: course outline rows and the buckets they collect into
//! - Element: repository records and the uid index
//! - Outcome: what happened to each output file

pub mod element;
pub mod outcome;
pub mod outline;

// Re-export commonly used types
pub use element::{
    Element, ElementIndex, TranscriptFinding, TranscriptLocation, HTML_ELEMENT_TYPE,
};
pub use outcome::{Outcome, Report};
pub use outline::{Bucket, Collection, Outline, OutlineRow, VideoEntry, REQUIRED_COLUMNS, VIDEO_MARKER};
