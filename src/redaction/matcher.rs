//! Sensitive key matching
//!
//! A [`Matcher`] decides from an object key alone whether the value stored
//! under it must be redacted. Matchers hold only immutable configuration, so
//! one instance can serve any number of traversals.

use crate::domain::errors::InvalidPatternError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

/// Trait for sensitive key detection
pub trait Matcher: Send + Sync {
    /// Returns true when values stored under `key` must be redacted
    fn is_sensitive(&self, key: &str) -> bool;
}

impl<M: Matcher + ?Sized> Matcher for &M {
    fn is_sensitive(&self, key: &str) -> bool {
        (**self).is_sensitive(key)
    }
}

impl<M: Matcher + ?Sized> Matcher for Box<M> {
    fn is_sensitive(&self, key: &str) -> bool {
        (**self).is_sensitive(key)
    }
}

impl<M: Matcher + ?Sized> Matcher for Arc<M> {
    fn is_sensitive(&self, key: &str) -> bool {
        (**self).is_sensitive(key)
    }
}

/// Case-insensitive key set matcher
#[derive(Debug, Clone, Default)]
pub struct KeyMatcher {
    keys: HashSet<String>,
}

impl KeyMatcher {
    /// Create a matcher for the given keys
    ///
    /// An empty key set is legal and matches nothing.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keys: keys
                .into_iter()
                .map(|key| key.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Number of distinct (case-folded) keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the matcher has no keys at all
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Matcher for KeyMatcher {
    fn is_sensitive(&self, key: &str) -> bool {
        self.keys.contains(&key.to_lowercase())
    }
}

/// Regular expression key matcher
///
/// Uses search semantics: the pattern may match anywhere in the key unless
/// it anchors itself with `^`/`$`.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// Compile `pattern` into a matcher
    pub fn new(pattern: &str) -> Result<Self, InvalidPatternError> {
        let regex = Regex::new(pattern).map_err(|e| InvalidPatternError::new(pattern, e))?;
        Ok(Self { regex })
    }

    /// The source pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Matcher for RegexMatcher {
    fn is_sensitive(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }
}

/// Composite matcher: sensitive when any child says so
///
/// Children are consulted left to right and evaluation stops at the first
/// match. With no children nothing is sensitive.
#[derive(Default)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    /// Create a composite from an ordered list of matchers
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    /// Append a matcher, consulted after the existing ones
    pub fn push(&mut self, matcher: impl Matcher + 'static) {
        self.matchers.push(Box::new(matcher));
    }

    /// Number of child matchers
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Whether there are no child matchers
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Matcher for AnyMatcher {
    fn is_sensitive(&self, key: &str) -> bool {
        self.matchers.iter().any(|m| m.is_sensitive(key))
    }
}

impl std::fmt::Debug for AnyMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyMatcher")
            .field("matchers", &self.matchers.len())
            .finish()
    }
}
