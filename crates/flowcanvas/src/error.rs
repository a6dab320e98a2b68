//! Error types for Flowcanvas operations.
//!
//! Layout and navigation never fail; [`FlowError`] covers the outer surface:
//! reading documents, parsing them and serializing results.

use std::io;

use thiserror::Error;

use flowcanvas_parser::ParseError;

/// The main error type for Flowcanvas operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the document text next to the located error so
/// callers can render a source snippet.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FlowError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
