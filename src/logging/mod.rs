//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console logs on stderr
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Optional JSON file logging with rotation
//!
//! The redaction core never logs; only the command-line layer and the
//! configuration loader do.
//!
//! # Example
//!
//! ```no_run
//! use json_redactor::logging::init_logging;
//! use json_redactor::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of a redaction run
///
/// # Example
///
/// ```no_run
/// use json_redactor::log_redaction_start;
///
/// log_redaction_start!("<stdin>", "<stdout>");
/// ```
#[macro_export]
macro_rules! log_redaction_start {
    ($input:expr, $output:expr) => {
        tracing::info!(input = %$input, output = %$output, "Starting redaction");
    };
}

/// Log the completion of a redaction run
///
/// # Example
///
/// ```no_run
/// use json_redactor::log_redaction_complete;
/// use std::time::Duration;
///
/// log_redaction_complete!(Duration::from_millis(12));
/// ```
#[macro_export]
macro_rules! log_redaction_complete {
    ($duration:expr) => {
        tracing::info!(
            duration_ms = $duration.as_millis() as u64,
            "Redaction completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use json_redactor::log_error_with_context;
/// use json_redactor::domain::RedactorError;
///
/// let error = RedactorError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(error = %$error, context = $context, "Error occurred");
    };
}
