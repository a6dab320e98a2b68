//! Flowcanvas CLI library
//!
//! This module contains the core CLI logic for the Flowcanvas layout tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use flowcanvas::{FlowBuilder, FlowError};

/// Run the Flowcanvas CLI application
///
/// This function reads a dialog file, lays it out and writes the resulting
/// graph to the output file as JSON.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `FlowError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Serialization errors
pub fn run(args: &Args) -> Result<(), FlowError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing dialog"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = FlowBuilder::new(app_config);
    let dialog = builder.parse(&source)?;
    let graph = builder.layout(&dialog);
    let json = builder.render_json(&graph, args.pretty)?;

    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Graph exported successfully");

    Ok(())
}
