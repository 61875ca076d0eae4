//! Domain error types
//!
//! This module defines the error hierarchy for json-redactor. Configuration
//! problems (bad patterns, no matcher, unreadable config) are kept apart from
//! processing problems (broken JSON, failing streams) so callers can report
//! them differently.

use thiserror::Error;

/// Main json-redactor error type
#[derive(Debug, Error)]
pub enum RedactorError {
    /// Configuration-related errors, detected before any document is read
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A key pattern failed to compile
    #[error(transparent)]
    InvalidPattern(#[from] InvalidPatternError),

    /// Failure while parsing, traversing or serializing a document
    #[error(transparent)]
    Processing(#[from] ProcessingError),

    /// I/O errors outside of the document stream itself
    #[error("I/O error: {0}")]
    Io(String),
}

impl RedactorError {
    /// Whether this error was raised before processing started
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RedactorError::Configuration(_) | RedactorError::InvalidPattern(_)
        )
    }

    /// Process exit code for this error
    ///
    /// `2` for configuration problems, `1` for everything that went wrong
    /// while handling the document.
    pub fn exit_code(&self) -> i32 {
        if self.is_configuration() {
            2
        } else {
            1
        }
    }
}

/// A regular expression for key matching did not compile
#[derive(Debug, Error)]
#[error("Invalid regex '{pattern}': {source}")]
pub struct InvalidPatternError {
    pattern: String,
    #[source]
    source: regex::Error,
}

impl InvalidPatternError {
    /// Creates a new invalid pattern error
    pub fn new(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self {
            pattern: pattern.into(),
            source,
        }
    }

    /// The offending pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Failure anywhere in the parse / traverse / serialize chain
///
/// Output is written incrementally, so when this error is returned the
/// output stream may hold a truncated document.
#[derive(Debug, Error)]
#[error("Error processing JSON: {source}")]
pub struct ProcessingError {
    #[from]
    source: serde_json::Error,
}

impl ProcessingError {
    /// Line of the input where the failure was detected, if known
    pub fn line(&self) -> Option<usize> {
        match self.source.line() {
            0 => None,
            line => Some(line),
        }
    }

    /// Column of the input where the failure was detected, if known
    pub fn column(&self) -> Option<usize> {
        match self.source.column() {
            0 => None,
            column => Some(column),
        }
    }

    /// The underlying serde_json error
    pub fn inner(&self) -> &serde_json::Error {
        &self.source
    }
}

impl From<std::io::Error> for ProcessingError {
    fn from(err: std::io::Error) -> Self {
        Self {
            source: serde_json::Error::io(err),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for RedactorError {
    fn from(err: std::io::Error) -> Self {
        RedactorError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RedactorError {
    fn from(err: toml::de::Error) -> Self {
        RedactorError::Configuration(format!("TOML parse error: {err}"))
    }
}
