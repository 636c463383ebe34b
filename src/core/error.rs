//! Errors raised by the conversion pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while extracting a bundle
#[derive(Debug, Error)]
pub enum ShredError {
    #[error("Input file not found or not a file: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Output path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Outline {} is missing required column '{column}'", .path.display())]
    MissingField { path: PathBuf, column: String },

    #[error("Element '{uid}' referenced by '{key}' not found in repository")]
    MissingElement { key: String, uid: String },

    #[error("Element repository {} is neither a JSON array nor an object", .0.display())]
    UnexpectedShape(PathBuf),

    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShredError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ShredError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ShredError::Write {
            path: path.into(),
            source,
        }
    }
}
