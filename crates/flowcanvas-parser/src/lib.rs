//! Flowcanvas Parser
//!
//! Reads dialog documents and classifies their nodes.
//!
//! A dialog document is a JSON tree in which every composite node carries a
//! string discriminator (`$kind`). [`parse`] turns document text into a
//! [`serde_json::Value`], reporting malformed input as a located
//! [`ParseError`]. [`DialogNode::classify`] maps any node of that tree onto
//! the closed set of shapes the layout pipeline understands.
//!
//! # Example
//!
//! ```
//! use flowcanvas_parser::{DialogNode, parse};
//!
//! let dialog = parse(r#"{"$kind": "Microsoft.OnBeginDialog", "actions": []}"#).unwrap();
//! assert!(matches!(DialogNode::classify(&dialog), Some(DialogNode::StepList(_))));
//! ```

pub mod dialog;
pub mod error;

pub use dialog::{DialogNode, Step};
pub use error::ParseError;

use log::{debug, trace};
use serde_json::Value;

/// Parse dialog document text into a JSON value.
///
/// # Errors
///
/// Returns [`ParseError`] with the line, column and byte offset of the first
/// syntax error.
pub fn parse(source: &str) -> Result<Value, ParseError> {
    debug!(source_len = source.len(); "Parsing dialog document");

    let value: Value =
        serde_json::from_str(source).map_err(|err| ParseError::from_json(&err, source))?;

    trace!(kind = dialog::discriminator(&value).unwrap_or(""); "Parsed dialog root");
    Ok(value)
}
