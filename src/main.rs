// json-redactor - Streaming redaction of sensitive JSON values
// Copyright (c) 2025 json-redactor Contributors
// Licensed under the MIT License

use anyhow::Context;
use clap::Parser;
use json_redactor::cli::commands::redact::report_error;
use json_redactor::cli::Cli;
use json_redactor::domain::RedactorError;
use json_redactor::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            e.downcast_ref::<RedactorError>()
                .map_or(1, RedactorError::exit_code)
        }
    };

    process::exit(exit_code);
}

/// Resolve configuration, set up logging and run the redaction
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    // Configuration errors are reported before logging exists
    let config = match cli
        .redact
        .resolve_config(cli.config.as_deref(), cli.log_level.as_deref())
    {
        Ok(config) => config,
        Err(e) => {
            report_error(&e);
            return Ok(e.exit_code());
        }
    };

    let _guard = init_logging(&config.logging.level, &config.logging)
        .context("Failed to initialize logging")?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "json-redactor");

    Ok(cli.redact.execute(&config))
}
