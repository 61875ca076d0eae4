//! Pipeline driver: bytes in, redacted bytes out
//!
//! Wires a streaming `serde_json` parser, a [`StreamTraverser`] and a
//! streaming `serde_json` serializer together. The serializer pulls; each pull
//! travels back through the traverser into the parser and, when the parser
//! runs out of buffered bytes, into `input`.

use super::matcher::Matcher;
use super::redactor::Redactor;
use super::traverser::StreamTraverser;
use crate::domain::errors::ProcessingError;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter, Read, Write};

/// Deepest array/object nesting accepted, serde_json's recursion limit
pub const MAX_NESTING_DEPTH: usize = 128;

/// Layout of the emitted JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStyle {
    /// No insignificant whitespace
    #[default]
    Compact,
    /// Two-space indentation, trailing newline
    Pretty,
}

impl std::fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compact => write!(f, "compact"),
            Self::Pretty => write!(f, "pretty"),
        }
    }
}

impl std::str::FromStr for OutputStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(format!(
                "Invalid output style '{s}'. Must be one of: compact, pretty"
            )),
        }
    }
}

/// Redact one JSON document from `input` into `output`
///
/// The input must hold exactly one JSON document, optionally surrounded by
/// whitespace. Output is written as it is produced; on error the output
/// holds whatever was emitted before the failure.
///
/// Arrays and objects may nest at most [`MAX_NESTING_DEPTH`] levels deep;
/// deeper documents fail with a processing error instead of exhausting the
/// stack. Numbers keep every source digit; only the exponent marker is
/// rewritten as `e` with an explicit sign (`1E2` becomes `1e+2`).
///
/// # Errors
///
/// Any parse, traversal, redaction, serialization or I/O failure is returned
/// as a single [`ProcessingError`].
///
/// # Examples
///
/// ```
/// use json_redactor::redaction::{pipeline, KeyMatcher, MaskRedactor, OutputStyle, StreamTraverser};
///
/// let traverser = StreamTraverser::new(KeyMatcher::new(["email"]), MaskRedactor::new());
/// let mut output = Vec::new();
/// pipeline::run(
///     r#"{"name":"Alice","email":"alice@x.com"}"#.as_bytes(),
///     &mut output,
///     &traverser,
///     OutputStyle::Compact,
/// )?;
/// assert_eq!(output, br#"{"name":"Alice","email":"***REDACTED***"}"#);
/// # Ok::<(), json_redactor::domain::ProcessingError>(())
/// ```
pub fn run<I, O, M, R>(
    input: I,
    output: O,
    traverser: &StreamTraverser<M, R>,
    style: OutputStyle,
) -> Result<(), ProcessingError>
where
    I: Read,
    O: Write,
    M: Matcher,
    R: Redactor,
{
    let mut deserializer = serde_json::Deserializer::from_reader(BufReader::new(input));
    let mut writer = BufWriter::new(output);

    {
        let redacted = traverser.transform(&mut deserializer);
        match style {
            OutputStyle::Compact => {
                let mut serializer = serde_json::Serializer::new(&mut writer);
                redacted.serialize(&mut serializer)?;
            }
            OutputStyle::Pretty => {
                let mut serializer = serde_json::Serializer::pretty(&mut writer);
                redacted.serialize(&mut serializer)?;
                writer.write_all(b"\n")?;
            }
        }
    }

    deserializer.end()?;
    writer.flush()?;
    Ok(())
}
