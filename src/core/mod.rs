//! Core conversion logic.
//!
//! This module contains:
//! - Sanitize: filesystem-safe identifiers
//! - Keys: output key derivation for outline rows
//! - Collector: outline rows -> buckets
//! - Render: HTML -> plain text
//! - Loader: CSV and JSON input parsing
//! - Resolver: buckets -> text files and copied transcripts
//! - Pipeline: the `concat`, `process` and `check_elements` operations

pub mod collector;
pub mod error;
pub mod keys;
pub mod loader;
pub mod pipeline;
pub mod render;
pub mod resolver;
pub mod sanitize;

// Re-export commonly used types
pub use collector::collect;
pub use error::ShredError;
pub use keys::{make_key, module_label, FALLBACK_MODULE};
pub use loader::{encoding_for_label, load_elements, load_outline, DEFAULT_ELEMENTS_ENCODING};
pub use pipeline::{check_elements, concat, process, write_outline, ConcatOptions, ELEMENTS_FILE, OUTLINE_FILE};
pub use render::{render_html, RenderOptions, DEFAULT_WIDTH};
pub use resolver::{resolve, transcript_stem, MissingElementPolicy, ResolveOptions};
pub use sanitize::{clean, DEFAULT_MAX_LEN};
