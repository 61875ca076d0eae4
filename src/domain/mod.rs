//! Domain types for json-redactor.
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T, RedactorError>`]:
//!
//! ```rust
//! use json_redactor::domain::{RedactorError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = json_redactor::config::load_config("json-redactor.toml")?;
//!     config.validate().map_err(RedactorError::Configuration)?;
//!     Ok(())
//! }
//! ```
//!
//! Configuration errors ([`RedactorError::Configuration`],
//! [`RedactorError::InvalidPattern`]) are raised before a document is read.
//! Everything that fails while a document streams through surfaces as a
//! single [`ProcessingError`].

pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{InvalidPatternError, ProcessingError, RedactorError};
pub use result::Result;
