//! Mask redaction strategy

use super::Redactor;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Placeholder written in place of every masked value
pub const DEFAULT_PLACEHOLDER: &str = "***REDACTED***";

/// Mask strategy - replaces any value with a fixed placeholder
///
/// The original value is skipped, never built: a masked subtree costs no
/// memory no matter how large it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskRedactor {
    placeholder: String,
}

impl MaskRedactor {
    /// Create a mask redactor with the default placeholder
    pub fn new() -> Self {
        Self::with_placeholder(DEFAULT_PLACEHOLDER)
    }

    /// Create a mask redactor with a custom placeholder
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    /// The placeholder this redactor emits
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

impl Default for MaskRedactor {
    fn default() -> Self {
        Self::new()
    }
}

impl Redactor for MaskRedactor {
    fn redact<'de, D>(&self, value: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        IgnoredAny::deserialize(value)?;
        Ok(self.placeholder.clone())
    }
}
