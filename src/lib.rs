//! shred - text extraction for LXP e-learning export bundles
//!
//! Reads a course outline (CSV) and an element repository
//! (`elements.json`), matches outline rows to HTML or video elements,
//! renders the HTML to plain text and writes one text file per page.
//! Video transcripts referenced by the outline are copied next to them.
//!
//! # Modules
//!
//! - `domain`: Data structures (OutlineRow, Element, Outline, Outcome)
//! - `core`: Conversion logic (sanitizer, key builder, collector, renderer, resolver)
//! - `config`: Configuration file and environment overrides
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # One text file per HLXP_HTML element
//! shred process elements.json out/ course
//!
//! # Full pipeline: outline + bundle -> per-page text files
//! shred concat --csvfile outline.csv --lxpdir bundle/ --outdir out/
//!
//! # Where do video elements keep their transcript?
//! shred check-elements --elements bundle/elements.json
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use crate::core::{
    check_elements, clean, collect, concat, make_key, process, render_html, resolve,
    ConcatOptions, MissingElementPolicy, RenderOptions, ResolveOptions, ShredError,
};
pub use crate::domain::{
    Bucket, Collection, Element, ElementIndex, Outcome, Outline, OutlineRow, Report,
    TranscriptFinding, TranscriptLocation, VideoEntry,
};
