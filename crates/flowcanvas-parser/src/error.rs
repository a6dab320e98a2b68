//! Errors raised while reading dialog documents.
//!
//! Only malformed document text is an error. Structurally odd but
//! well-formed JSON (unknown discriminators, missing fields) is handled by
//! [`DialogNode::classify`](crate::DialogNode::classify) through its
//! fallbacks and never reaches this module.

use std::{fmt, ops::Range};

use thiserror::Error;

/// Category of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The input is not syntactically valid JSON.
    Syntax,
    /// The input ended before the document was complete.
    UnexpectedEof,
    /// The input could not be read or decoded.
    InvalidData,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax error"),
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
            Self::InvalidData => write!(f, "invalid data"),
        }
    }
}

/// A located error in a dialog document.
///
/// Lines and columns are 1-based; `offset` is the byte offset of the
/// reported position in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message} at line {line}, column {column}")]
pub struct ParseError {
    kind: ParseErrorKind,
    message: String,
    line: usize,
    column: usize,
    offset: usize,
}

impl ParseError {
    /// Create a new parse error at the given location.
    pub fn new(
        kind: ParseErrorKind,
        message: impl Into<String>,
        line: usize,
        column: usize,
        offset: usize,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            column,
            offset,
        }
    }

    /// Build a parse error from a [`serde_json::Error`] raised on `source`.
    pub fn from_json(err: &serde_json::Error, source: &str) -> Self {
        use serde_json::error::Category;

        let kind = match err.classify() {
            Category::Syntax => ParseErrorKind::Syntax,
            Category::Eof => ParseErrorKind::UnexpectedEof,
            Category::Data | Category::Io => ParseErrorKind::InvalidData,
        };

        let line = err.line();
        let column = err.column();

        // serde_json appends the location to its message; it is reported separately here.
        let full = err.to_string();
        let suffix = format!(" at line {line} column {column}");
        let message = full.strip_suffix(&suffix).unwrap_or(&full).to_string();

        Self::new(
            kind,
            message,
            line,
            column,
            offset_of(source, line, column),
        )
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// The error message without location information.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// A one-byte span at the error position, for snippet rendering.
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + 1
    }
}

/// Byte offset of a 1-based `(line, column)` position, clamped to the source length.
fn offset_of(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();

    (line_start + column.saturating_sub(1)).min(source.len())
}
