//! Error adapter for converting FlowError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Parse errors carry
//! their document text and are rendered with a labelled snippet; every other
//! variant is rendered as a plain coded error.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use flowcanvas::FlowError;
use flowcanvas_parser::ParseError;

/// Adapter for a located dialog parse error.
pub struct ParseErrorAdapter<'a> {
    err: &'a ParseError,
    /// Source code for displaying snippets
    src: &'a str,
}

impl<'a> ParseErrorAdapter<'a> {
    /// Create a new parse error adapter.
    pub fn new(err: &'a ParseError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for ParseErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseErrorAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ParseErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.err.kind())
    }
}

impl std::error::Error for ParseErrorAdapter<'_> {}

impl MietteDiagnostic for ParseErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("flowcanvas::parse"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("dialog files must be a single JSON document"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = span_to_miette(self.err, self.src);
        let label = LabeledSpan::new_primary_with_span(Some(self.err.message().to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for non-diagnostic [`FlowError`] variants.
///
/// This adapter handles errors that don't have source locations, such as
/// I/O, serialization and configuration errors.
pub struct ErrorAdapter<'a>(pub &'a FlowError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            FlowError::Io(_) => "flowcanvas::io",
            FlowError::Parse { .. } => "flowcanvas::parse",
            FlowError::Json(_) => "flowcanvas::json",
            FlowError::Config(_) => "flowcanvas::config",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a located parse error or a non-diagnostic error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parse error with source location information.
    Diagnostic(ParseErrorAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert the error position to a miette [`SourceSpan`].
///
/// At end of input the span is empty so it never points past the source.
fn span_to_miette(err: &ParseError, src: &str) -> SourceSpan {
    let span = err.span();
    let start = span.start.min(src.len());
    let end = span.end.min(src.len());
    SourceSpan::new(start.into(), end - start)
}

/// Convert a [`FlowError`] into a reportable error.
///
/// Parse errors keep their source text for snippet rendering.
pub fn to_reportable(err: &FlowError) -> Reportable<'_> {
    match err {
        FlowError::Parse {
            err: parse_err,
            src,
        } => Reportable::Diagnostic(ParseErrorAdapter::new(parse_err, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
