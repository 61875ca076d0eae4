// json-redactor - Streaming redaction of sensitive JSON values
// Copyright (c) 2025 json-redactor Contributors
// Licensed under the MIT License

//! # json-redactor
//!
//! json-redactor replaces the values of sensitive keys in JSON documents of
//! arbitrary size. Documents are never materialized: bytes are parsed, walked
//! and re-serialized as the output is written.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`redaction`] - Matchers, redactors, the stream traverser and the pipeline
//! - [`domain`] - Error and result types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use json_redactor::redaction::{pipeline, AnyMatcher, KeyMatcher, OutputStyle, RedactionStrategy, StreamTraverser};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let matcher = AnyMatcher::new(vec![Box::new(KeyMatcher::new(["email"]))]);
//! let traverser = StreamTraverser::new(matcher, RedactionStrategy::mask());
//!
//! let input = r#"{"user":{"name":"Alice","EMAIL":"alice@x.com"}}"#;
//! let mut output = Vec::new();
//! pipeline::run(input.as_bytes(), &mut output, &traverser, OutputStyle::Compact)?;
//!
//! assert_eq!(
//!     String::from_utf8(output)?,
//!     r#"{"user":{"name":"Alice","EMAIL":"***REDACTED***"}}"#
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Redaction strategies
//!
//! - **Mask** replaces the value with a fixed placeholder without reading it
//!   into memory
//! - **Hash** replaces the value with the hex SHA-256 of its canonical JSON
//!   form, so equal values give equal digests regardless of key order
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`], whose error type
//! [`domain::RedactorError`] separates configuration errors (exit code 2)
//! from processing errors (exit code 1).

pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod redaction;
