//! Redaction strategies
//!
//! A [`Redactor`] replaces the value stored under a sensitive key with a
//! string. It receives the value still unread, as a [`Deserializer`], and
//! decides for itself how much of it to realize.

pub mod hash;
pub mod mask;

pub use hash::HashRedactor;
pub use mask::MaskRedactor;

use serde::{Deserialize, Deserializer, Serialize};

/// Trait for redaction strategy implementations
pub trait Redactor: Send + Sync {
    /// Consume `value` and return its replacement
    ///
    /// The deserializer must be driven to the end of the value even when its
    /// content is discarded, so a streaming parser stays positioned on the
    /// next token.
    fn redact<'de, D>(&self, value: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>;
}

impl<R: Redactor + ?Sized> Redactor for &R {
    fn redact<'de, D>(&self, value: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        (**self).redact(value)
    }
}

/// Redaction strategy selected at configuration time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedactionStrategy {
    /// Replace with a fixed placeholder
    Mask(MaskRedactor),
    /// Replace with the SHA-256 digest of the canonical value
    Hash(HashRedactor),
}

impl RedactionStrategy {
    /// Mask strategy with the default placeholder
    pub fn mask() -> Self {
        Self::Mask(MaskRedactor::new())
    }

    /// Hash strategy
    pub fn hash() -> Self {
        Self::Hash(HashRedactor::new())
    }

    /// Configuration name of this strategy
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Mask(_) => StrategyKind::Mask,
            Self::Hash(_) => StrategyKind::Hash,
        }
    }
}

impl Default for RedactionStrategy {
    fn default() -> Self {
        Self::mask()
    }
}

impl Redactor for RedactionStrategy {
    fn redact<'de, D>(&self, value: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match self {
            Self::Mask(mask) => mask.redact(value),
            Self::Hash(hash) => hash.redact(value),
        }
    }
}

/// Strategy names as they appear in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Constant placeholder
    #[default]
    Mask,
    /// Deterministic SHA-256 digest
    Hash,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mask => write!(f, "mask"),
            Self::Hash => write!(f, "hash"),
        }
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mask" => Ok(Self::Mask),
            "hash" => Ok(Self::Hash),
            _ => Err(format!(
                "Invalid redaction strategy '{s}'. Must be one of: mask, hash"
            )),
        }
    }
}
