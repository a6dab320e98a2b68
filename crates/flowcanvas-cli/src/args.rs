//! Command-line argument definitions for the Flowcanvas CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, output formatting and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Flowcanvas layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input dialog file
    #[arg(help = "Path to the input dialog file")]
    pub input: String,

    /// Path to the output JSON file
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Pretty-print the output JSON
    #[arg(long)]
    pub pretty: bool,
}
