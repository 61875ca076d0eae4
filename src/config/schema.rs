//! Configuration schema types
//!
//! This module defines the configuration structure for json-redactor. Every
//! section is optional in the TOML file; missing sections take their defaults.

use crate::domain::errors::RedactorError;
use crate::domain::result::Result;
use crate::redaction::redactor::mask::DEFAULT_PLACEHOLDER;
use crate::redaction::redactor::{HashRedactor, MaskRedactor, RedactionStrategy, StrategyKind};
use crate::redaction::OutputStyle;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main json-redactor configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedactorConfig {
    /// Which keys are sensitive
    #[serde(default)]
    pub matching: MatchingConfig,

    /// How sensitive values are replaced
    #[serde(default)]
    pub redaction: RedactionConfig,

    /// Output layout
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RedactorConfig {
    /// Validates the configuration
    ///
    /// Only checks values that can be judged without touching the file
    /// system or compiling patterns; those are checked when the engine is
    /// built.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.matching.validate()?;
        self.redaction.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// All literal keys: inline keys followed by the key file's keys
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the key file cannot be read
    pub fn resolved_keys(&self) -> Result<Vec<String>> {
        let mut keys = self.matching.keys.clone();
        if let Some(ref path) = self.matching.key_file {
            keys.extend(super::loader::load_key_file(path)?);
        }
        Ok(keys)
    }

    /// Whether at least one key source or pattern is configured
    pub fn has_matchers(&self) -> bool {
        !self.matching.keys.is_empty()
            || self.matching.key_file.is_some()
            || !self.matching.key_patterns.is_empty()
    }

    /// Build the redaction strategy described by this configuration
    pub fn strategy(&self) -> RedactionStrategy {
        match self.redaction.strategy {
            StrategyKind::Mask => {
                RedactionStrategy::Mask(MaskRedactor::with_placeholder(&self.redaction.mask_placeholder))
            }
            StrategyKind::Hash => RedactionStrategy::Hash(HashRedactor::new()),
        }
    }

    /// Load configuration from a TOML file
    ///
    /// Shortcut for [`load_config`](super::loader::load_config).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        super::loader::load_config(path)
    }

    /// Parse configuration from TOML text, without env handling
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: RedactorConfig = toml::from_str(contents)?;
        config.validate().map_err(RedactorError::Configuration)?;
        Ok(config)
    }
}

/// Sensitive key selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Literal keys, matched case-insensitively
    #[serde(default)]
    pub keys: Vec<String>,

    /// File with additional literal keys (comma and/or newline separated)
    #[serde(default)]
    pub key_file: Option<PathBuf>,

    /// Regular expressions searched in each key
    #[serde(default)]
    pub key_patterns: Vec<String>,
}

impl MatchingConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.keys.iter().any(|k| k.trim().is_empty()) {
            return Err("matching.keys must not contain empty keys".to_string());
        }
        if self.key_patterns.iter().any(|p| p.is_empty()) {
            return Err("matching.key_patterns must not contain empty patterns".to_string());
        }
        Ok(())
    }
}

/// Redaction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Strategy applied to sensitive values
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Placeholder used by the mask strategy
    #[serde(default = "default_mask_placeholder")]
    pub mask_placeholder: String,
}

impl RedactionConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.mask_placeholder.is_empty() {
            return Err("redaction.mask_placeholder must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            mask_placeholder: default_mask_placeholder(),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Compact or pretty-printed JSON
    #[serde(default)]
    pub style: OutputStyle,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid logging.level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            ));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path must be set when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_mask_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
