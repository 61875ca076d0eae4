//! Streaming JSON redaction
//!
//! This module replaces the values of sensitive object keys in JSON documents
//! of any size, without holding the document in memory.
//!
//! # Architecture
//!
//! - **Matcher** ([`matcher`]): decides from a key whether its value is sensitive
//! - **Redactor** ([`redactor`]): replaces a sensitive value with a string
//! - **Traverser** ([`traverser`]): walks a lazily read value and re-emits it,
//!   redacted, as it is pulled
//! - **Pipeline** ([`pipeline`]): connects input bytes, traverser and output bytes
//! - **Engine** ([`engine`]): builds all of the above from configuration
//!
//! The whole chain is synchronous and pull-driven: the serializer asks for the
//! next piece of output, which makes the traverser ask the parser for the next
//! piece of input. Memory use is bounded by the parser's buffers plus, for
//! the hash strategy, the largest sensitive subtree being hashed.
//!
//! # Usage
//!
//! ```rust,no_run
//! use json_redactor::redaction::{pipeline, AnyMatcher, KeyMatcher, OutputStyle, RedactionStrategy, RegexMatcher, StreamTraverser};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let matcher = AnyMatcher::new(vec![
//!     Box::new(KeyMatcher::new(["email"])),
//!     Box::new(RegexMatcher::new("(?i)token")?),
//! ]);
//! let traverser = StreamTraverser::new(matcher, RedactionStrategy::hash());
//!
//! let input = std::io::stdin();
//! let output = std::io::stdout();
//! pipeline::run(input.lock(), output.lock(), &traverser, OutputStyle::Compact)?;
//! # Ok(())
//! # }
//! ```

pub mod canonical;
pub mod engine;
pub mod matcher;
pub mod pipeline;
pub mod redactor;
pub mod traverser;

// Re-export main types
pub use engine::{ConfiguredTraverser, RedactionEngine};
pub use matcher::{AnyMatcher, KeyMatcher, Matcher, RegexMatcher};
pub use pipeline::OutputStyle;
pub use redactor::{HashRedactor, MaskRedactor, RedactionStrategy, Redactor, StrategyKind};
pub use traverser::{Redacted, StreamTraverser};
