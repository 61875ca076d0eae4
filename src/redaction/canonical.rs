//! Canonical JSON serialization for content hashing
//!
//! Two values that differ only in object key order must produce the same
//! bytes, so objects are written with their keys sorted. Arrays are ordered
//! data and are written as-is.
//!
//! The byte layout is fixed: `", "` and `": "` separators, ASCII-only
//! strings with `\uXXXX` escapes, integers with all their digits, floats in
//! shortest round-trip form with the exponent rules below. Changing any of
//! this changes every digest.
//!
//! Numbers arrive as their source text (`arbitrary_precision`), so integers
//! of any size stay exact and floats are rounded only once, correctly.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::ser::Formatter;
use serde_json::Value;
use std::io;

/// Serialize `value` into its canonical byte form
pub fn to_canonical_vec(value: &Value) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, CanonicalFormatter);
    Canonical(value).serialize(&mut serializer)?;
    Ok(buf)
}

/// Serialize `value` into its canonical string form
pub fn to_canonical_string(value: &Value) -> serde_json::Result<String> {
    let bytes = to_canonical_vec(value)?;
    String::from_utf8(bytes).map_err(<serde_json::Error as serde::ser::Error>::custom)
}

/// Serialize wrapper that visits object entries in sorted key order
struct Canonical<'a>(&'a Value);

impl Serialize for Canonical<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Object(map) => {
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));

                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    out.serialize_entry(key, &Canonical(value))?;
                }
                out.end()
            }
            Value::Array(items) => {
                let mut out = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    out.serialize_element(&Canonical(item))?;
                }
                out.end()
            }
            primitive => primitive.serialize(serializer),
        }
    }
}

/// `serde_json` formatter producing the canonical layout
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(format_float(value).as_bytes())
    }

    fn write_f32<W>(&mut self, writer: &mut W, value: f32) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_f64(writer, f64::from(value))
    }

    fn write_number_str<W>(&mut self, writer: &mut W, value: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if is_integer_literal(value) {
            if value.trim_start_matches('-').bytes().all(|b| b == b'0') {
                return writer.write_all(b"0");
            }
            return writer.write_all(value.as_bytes());
        }

        let float: f64 = value
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("{value}: {e}")))?;
        writer.write_all(format_float(float).as_bytes())
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if fragment.bytes().all(|b| (0x20..0x7f).contains(&b)) {
            return writer.write_all(fragment.as_bytes());
        }

        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if (' '..='~').contains(&ch) {
                let mut buf = [0u8; 1];
                writer.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Whether a JSON number literal has neither fraction nor exponent
fn is_integer_literal(value: &str) -> bool {
    !value.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'))
}

/// Shortest round-trip float text
///
/// Fixed notation (always with a fractional part) for decimal exponents in
/// `-4..16`, scientific notation with a signed two-digit minimum exponent
/// otherwise.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if (-4..16).contains(&exponent) {
        let fixed = value.to_string();
        if fixed.contains('.') {
            fixed
        } else {
            format!("{fixed}.0")
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sorted_keys_and_separators() {
        let value = json!({"d": {"f": 11, "e": 10}, "c": [3, 4], "b": 2, "a": 1});
        assert_eq!(
            to_canonical_string(&value).unwrap(),
            r#"{"a": 1, "b": 2, "c": [3, 4], "d": {"e": 10, "f": 11}}"#
        );
    }

    #[test]
    fn test_arrays_keep_order() {
        let value = json!([3, 1, 2]);
        assert_eq!(to_canonical_string(&value).unwrap(), "[3, 1, 2]");
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(to_canonical_string(&json!({})).unwrap(), "{}");
        assert_eq!(to_canonical_string(&json!([])).unwrap(), "[]");
    }

    #[test]
    fn test_primitives() {
        assert_eq!(to_canonical_string(&json!(null)).unwrap(), "null");
        assert_eq!(to_canonical_string(&json!(true)).unwrap(), "true");
        assert_eq!(to_canonical_string(&json!(-7)).unwrap(), "-7");
        assert_eq!(to_canonical_string(&json!("x")).unwrap(), r#""x""#);
    }

    #[test]
    fn test_non_ascii_escaped() {
        let value = json!("é😀\u{7f}");
        assert_eq!(
            to_canonical_string(&value).unwrap(),
            r#""\u00e9\ud83d\ude00\u007f""#
        );
    }

    #[test]
    fn test_control_characters_escaped() {
        let value = json!("a\"b\\c\nd\te\u{1}");
        assert_eq!(
            to_canonical_string(&value).unwrap(),
            r#""a\"b\\c\nd\te\u0001""#
        );
    }

    #[test]
    fn test_keys_escaped_too() {
        let value = json!({"ü": 1});
        assert_eq!(to_canonical_string(&value).unwrap(), r#"{"\u00fc": 1}"#);
    }

    #[test]
    fn test_float_format() {
        assert_eq!(format_float(1.5), "1.5");
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(-0.0), "-0.0");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(1e-5), "1e-05");
        assert_eq!(format_float(1e15), "1000000000000000.0");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(123456789012345678.0), "1.2345678901234568e+17");
        assert_eq!(format_float(2.5e-300), "2.5e-300");
        assert_eq!(format_float(f64::NAN), "NaN");
        assert_eq!(format_float(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_big_integers_exact() {
        let value: Value =
            serde_json::from_str(r#"{"b": 18446744073709551616, "a": -9223372036854775809}"#)
                .unwrap();
        assert_eq!(
            to_canonical_string(&value).unwrap(),
            r#"{"a": -9223372036854775809, "b": 18446744073709551616}"#
        );
    }

    #[test]
    fn test_number_literals_normalized() {
        let value: Value = serde_json::from_str("[1E2, -0, 1e400, 1.0715660391465826e-75]").unwrap();
        assert_eq!(
            to_canonical_string(&value).unwrap(),
            "[100.0, 0, Infinity, 1.0715660391465826e-75]"
        );
    }

    #[test]
    fn test_canonical_string_is_ascii() {
        let value = json!({"k": "ü 😀"});
        assert!(to_canonical_string(&value).unwrap().is_ascii());
    }

    #[test]
    fn test_float_in_document() {
        let value = json!({"x": 2.0, "y": [0.1, 1e20]});
        assert_eq!(
            to_canonical_string(&value).unwrap(),
            r#"{"x": 2.0, "y": [0.1, 1e+20]}"#
        );
    }
}
