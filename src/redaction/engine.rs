//! Redaction engine
//!
//! [`RedactionEngine`] turns a [`RedactorConfig`] into a ready-to-use
//! traverser and output style, and runs documents through the pipeline.
//!
//! # Examples
//!
//! ```
//! use json_redactor::config::RedactorConfig;
//! use json_redactor::redaction::RedactionEngine;
//!
//! # fn example() -> json_redactor::domain::Result<()> {
//! let mut config = RedactorConfig::default();
//! config.matching.keys = vec!["email".to_string()];
//!
//! let engine = RedactionEngine::from_config(&config)?;
//! let mut output = Vec::new();
//! engine.process(r#"{"email":"a@x.com"}"#.as_bytes(), &mut output)?;
//! assert_eq!(output, br#"{"email":"***REDACTED***"}"#);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use super::matcher::{AnyMatcher, KeyMatcher, RegexMatcher};
use super::pipeline::{self, OutputStyle};
use super::redactor::RedactionStrategy;
use super::traverser::StreamTraverser;
use crate::config::RedactorConfig;
use crate::domain::errors::RedactorError;
use crate::domain::result::Result;
use std::io::{Read, Write};

/// Traverser type built from configuration
pub type ConfiguredTraverser = StreamTraverser<AnyMatcher, RedactionStrategy>;

/// Configured redaction engine
///
/// Immutable after construction; one engine can process any number of
/// documents, one pipeline run per document.
#[derive(Debug)]
pub struct RedactionEngine {
    traverser: ConfiguredTraverser,
    output_style: OutputStyle,
}

impl RedactionEngine {
    /// Create an engine from already built parts
    pub fn new(matcher: AnyMatcher, strategy: RedactionStrategy, output_style: OutputStyle) -> Self {
        Self {
            traverser: StreamTraverser::new(matcher, strategy),
            output_style,
        }
    }

    /// Build an engine from configuration
    ///
    /// The matcher holds one case-insensitive [`KeyMatcher`] for all literal
    /// keys (inline and from the key file), followed by one [`RegexMatcher`]
    /// per pattern, in configuration order.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no key or pattern is configured,
    /// the key file cannot be read or the configuration is invalid, and
    /// [`RedactorError::InvalidPattern`] when a pattern does not compile.
    pub fn from_config(config: &RedactorConfig) -> Result<Self> {
        config.validate().map_err(RedactorError::Configuration)?;

        if !config.has_matchers() {
            return Err(RedactorError::Configuration(
                "Must specify sensitive keys via --keys, --key-file or --keys-regex.".to_string(),
            ));
        }

        let mut matcher = AnyMatcher::default();

        let keys = config.resolved_keys()?;
        if !keys.is_empty() {
            matcher.push(KeyMatcher::new(keys));
        }

        for pattern in &config.matching.key_patterns {
            matcher.push(RegexMatcher::new(pattern)?);
        }

        if matcher.is_empty() {
            return Err(RedactorError::Configuration(
                "Key file does not contain any keys and no other matcher is configured"
                    .to_string(),
            ));
        }

        Ok(Self::new(matcher, config.strategy(), config.output.style))
    }

    /// Redact one JSON document from `input` into `output`
    ///
    /// # Errors
    ///
    /// Returns [`RedactorError::Processing`] on any failure while the
    /// document streams through.
    pub fn process<R: Read, W: Write>(&self, input: R, output: W) -> Result<()> {
        pipeline::run(input, output, &self.traverser, self.output_style)?;
        Ok(())
    }

    /// The configured traverser
    pub fn traverser(&self) -> &ConfiguredTraverser {
        &self.traverser
    }

    /// The configured output style
    pub fn output_style(&self) -> OutputStyle {
        self.output_style
    }
}
