use std::path::PathBuf;

use tensorfield_lens::AnalysisError;
use thiserror::Error;

/// Errors reported by `fieldscope`.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Reading a config file or writing output failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to stdout failed.
    #[error("I/O error: {0}")]
    Stdout(#[from] std::io::Error),

    /// A config file did not parse, or output did not serialize.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The analysis pass rejected its input.
    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    /// No built-in field with this name exists for the requested pass.
    #[error("unknown {kind} field '{name}' (available: {available})")]
    UnknownField {
        kind: &'static str,
        name: String,
        available: String,
    },

    /// Grid arguments out of range.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
}

pub type Result<T> = std::result::Result<T, ToolError>;
