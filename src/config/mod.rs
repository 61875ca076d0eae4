//! Configuration management for json-redactor.
//!
//! # Overview
//!
//! json-redactor reads an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment variable overrides (`JSON_REDACTOR_*`)
//! - Default values for every setting
//! - Validation before any document is processed
//!
//! Command-line flags are merged on top of the loaded configuration by the
//! CLI layer.
//!
//! # Example Configuration
//!
//! ```toml
//! [matching]
//! keys = ["email", "password"]
//! key_file = "sensitive-keys.txt"
//! key_patterns = ["(?i)token$"]
//!
//! [redaction]
//! strategy = "hash"
//!
//! [output]
//! style = "pretty"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use json_redactor::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("json-redactor.toml")?;
//! println!("Strategy: {}", config.redaction.strategy);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{apply_env_overrides, load_config, load_key_file, split_keys};
pub use schema::{LoggingConfig, MatchingConfig, OutputConfig, RedactionConfig, RedactorConfig};
