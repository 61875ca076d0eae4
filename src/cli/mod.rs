//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for json-redactor using clap.

pub mod commands;

use clap::Parser;

/// json-redactor - redact sensitive values in JSON documents of any size
#[derive(Parser, Debug)]
#[command(name = "json-redactor")]
#[command(version, about, long_about = None)]
#[command(author = "json-redactor Contributors")]
pub struct Cli {
    /// Path to configuration file (optional)
    #[arg(short, long, env = "JSON_REDACTOR_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "JSON_REDACTOR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Redaction arguments
    #[command(flatten)]
    pub redact: commands::redact::RedactArgs,
}
