//! CLI command implementations

pub mod redact;
