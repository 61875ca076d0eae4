//! Streaming traversal engine
//!
//! [`StreamTraverser::transform`] wraps an unread JSON value (any serde
//! [`Deserializer`]) into a [`Redacted`] value that implements [`Serialize`].
//! Nothing is read until a serializer asks for it: serializing a `Redacted`
//! drives the deserializer and the serializer in lock-step, one scalar,
//! element or entry at a time, so parser, traverser and serializer form a
//! single pull chain.
//!
//! For every object entry the key is checked with the [`Matcher`]:
//! - sensitive: the still-unread value goes to the [`Redactor`] and its
//!   string result is emitted in place of the original;
//! - otherwise the value is wrapped in a fresh `Redacted` and emitted,
//!   recursing into it.
//!
//! Arrays are re-emitted element by element, scalars are passed through.
//! Key order, element order and array length never change.
//!
//! # Example
//!
//! ```
//! use json_redactor::redaction::{KeyMatcher, MaskRedactor, StreamTraverser};
//!
//! let traverser = StreamTraverser::new(KeyMatcher::new(["email"]), MaskRedactor::new());
//! let mut input = serde_json::Deserializer::from_str(r#"{"name":"Alice","email":"alice@x.com"}"#);
//! let output = serde_json::to_string(&traverser.transform(&mut input)).unwrap();
//! assert_eq!(output, r#"{"name":"Alice","email":"***REDACTED***"}"#);
//! ```

use super::matcher::Matcher;
use super::redactor::Redactor;
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, Serialize, SerializeMap, SerializeSeq, Serializer};
use std::cell::RefCell;
use std::fmt;

// With `arbitrary_precision`, serde_json hands every number that is not a
// 64-bit integer (floats, big integers) to visitors as a one-entry map under
// this key, holding the source digits. An object whose first key is this
// exact string is read as a number too; serde_json's `Value` shares that.
const NUMBER_TOKEN: &str = "$serde_json::private::Number";

/// Key-driven redaction over lazily read JSON
///
/// Holds exactly one matcher and one redactor and no per-document state, so
/// a single instance can be reused for any number of documents.
#[derive(Debug, Clone)]
pub struct StreamTraverser<M, R> {
    matcher: M,
    redactor: R,
}

impl<M, R> StreamTraverser<M, R>
where
    M: Matcher,
    R: Redactor,
{
    /// Combine a matcher and a redactor
    pub fn new(matcher: M, redactor: R) -> Self {
        Self { matcher, redactor }
    }

    /// The key matcher
    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// The redactor applied to sensitive values
    pub fn redactor(&self) -> &R {
        &self.redactor
    }

    /// Wrap an unread value into its lazily produced redacted form
    ///
    /// The returned value reads `value` only while being serialized, and can
    /// be serialized once.
    pub fn transform<'de, D>(&self, value: D) -> Redacted<'_, M, R, D>
    where
        D: Deserializer<'de>,
    {
        Redacted {
            traverser: self,
            value: RefCell::new(Some(value)),
        }
    }
}

/// Lazily produced redacted value
///
/// Serializing it pulls the wrapped deserializer on demand. A second
/// serialization fails because the underlying value has been consumed.
pub struct Redacted<'t, M, R, D> {
    traverser: &'t StreamTraverser<M, R>,
    value: RefCell<Option<D>>,
}

impl<M, R, D> fmt::Debug for Redacted<'_, M, R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let consumed = self.value.try_borrow().map_or(true, |v| v.is_none());
        f.debug_struct("Redacted")
            .field("consumed", &consumed)
            .finish()
    }
}

impl<'de, M, R, D> Serialize for Redacted<'_, M, R, D>
where
    M: Matcher,
    R: Redactor,
    D: Deserializer<'de>,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self
            .value
            .borrow_mut()
            .take()
            .ok_or_else(|| <S::Error as ser::Error>::custom("lazy JSON value already consumed"))?;

        value
            .deserialize_any(TraverseVisitor {
                traverser: self.traverser,
                serializer,
            })
            .map_err(d2s)
    }
}

/// Re-emits whatever the deserializer produces into `serializer`
struct TraverseVisitor<'t, M, R, S> {
    traverser: &'t StreamTraverser<M, R>,
    serializer: S,
}

impl<'de, M, R, S> Visitor<'de> for TraverseVisitor<'_, M, R, S>
where
    M: Matcher,
    R: Redactor,
    S: Serializer,
{
    type Value = S::Ok;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<S::Ok, E> {
        self.serializer.serialize_bool(v).map_err(s2d)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<S::Ok, E> {
        self.serializer.serialize_i64(v).map_err(s2d)
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<S::Ok, E> {
        self.serializer.serialize_i128(v).map_err(s2d)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<S::Ok, E> {
        self.serializer.serialize_u64(v).map_err(s2d)
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<S::Ok, E> {
        self.serializer.serialize_u128(v).map_err(s2d)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<S::Ok, E> {
        self.serializer.serialize_f64(v).map_err(s2d)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<S::Ok, E> {
        self.serializer.serialize_str(v).map_err(s2d)
    }

    fn visit_unit<E: de::Error>(self) -> Result<S::Ok, E> {
        self.serializer.serialize_unit().map_err(s2d)
    }

    fn visit_none<E: de::Error>(self) -> Result<S::Ok, E> {
        self.serializer.serialize_none().map_err(s2d)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<S::Ok, D::Error>
    where
        D: Deserializer<'de>,
    {
        self.traverser
            .transform(deserializer)
            .serialize(self.serializer)
            .map_err(s2d)
    }

    fn visit_bytes<E: de::Error>(self, _v: &[u8]) -> Result<S::Ok, E> {
        Err(E::custom("unsupported JSON shape: bytes"))
    }

    fn visit_newtype_struct<D>(self, _deserializer: D) -> Result<S::Ok, D::Error>
    where
        D: Deserializer<'de>,
    {
        Err(de::Error::custom("unsupported JSON shape: newtype"))
    }

    fn visit_enum<A>(self, _data: A) -> Result<S::Ok, A::Error>
    where
        A: de::EnumAccess<'de>,
    {
        Err(de::Error::custom("unsupported JSON shape: enum"))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<S::Ok, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut out = self.serializer.serialize_seq(None).map_err(s2d)?;
        while seq
            .next_element_seed(ElementSeed {
                traverser: self.traverser,
                out: &mut out,
            })?
            .is_some()
        {}
        out.end().map_err(s2d)
    }

    fn visit_map<A>(self, mut map: A) -> Result<S::Ok, A::Error>
    where
        A: MapAccess<'de>,
    {
        let Some(first_key) = map.next_key::<String>()? else {
            let out = self.serializer.serialize_map(Some(0)).map_err(s2d)?;
            return out.end().map_err(s2d);
        };

        if first_key == NUMBER_TOKEN {
            let literal: String = map.next_value()?;
            let number: serde_json::Number = literal.parse().map_err(de::Error::custom)?;
            return number.serialize(self.serializer).map_err(s2d);
        }

        let mut out = self.serializer.serialize_map(None).map_err(s2d)?;
        let mut next_key = Some(first_key);
        while let Some(key) = next_key {
            out.serialize_key(&key).map_err(s2d)?;

            if self.traverser.matcher.is_sensitive(&key) {
                let replacement = map.next_value_seed(RedactSeed {
                    redactor: &self.traverser.redactor,
                })?;
                out.serialize_value(&replacement).map_err(s2d)?;
            } else {
                map.next_value_seed(EntrySeed {
                    traverser: self.traverser,
                    out: &mut out,
                })?;
            }
            next_key = map.next_key::<String>()?;
        }
        out.end().map_err(s2d)
    }
}

/// Streams one array element straight into the enclosing sequence
struct ElementSeed<'a, 't, M, R, O> {
    traverser: &'t StreamTraverser<M, R>,
    out: &'a mut O,
}

impl<'de, M, R, O> DeserializeSeed<'de> for ElementSeed<'_, '_, M, R, O>
where
    M: Matcher,
    R: Redactor,
    O: SerializeSeq,
{
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        self.out
            .serialize_element(&self.traverser.transform(deserializer))
            .map_err(s2d)
    }
}

/// Streams one non-sensitive object value straight into the enclosing map
struct EntrySeed<'a, 't, M, R, O> {
    traverser: &'t StreamTraverser<M, R>,
    out: &'a mut O,
}

impl<'de, M, R, O> DeserializeSeed<'de> for EntrySeed<'_, '_, M, R, O>
where
    M: Matcher,
    R: Redactor,
    O: SerializeMap,
{
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        self.out
            .serialize_value(&self.traverser.transform(deserializer))
            .map_err(s2d)
    }
}

/// Hands a sensitive, still unread value to the redactor
struct RedactSeed<'r, R> {
    redactor: &'r R,
}

impl<'de, R> DeserializeSeed<'de> for RedactSeed<'_, R>
where
    R: Redactor,
{
    type Value = String;

    fn deserialize<D>(self, deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        self.redactor.redact(deserializer)
    }
}

// Errors cross the serializer/deserializer boundary as messages; the
// position suffix serde_json appends is parsed back on the other side.
fn s2d<E: ser::Error, F: de::Error>(err: E) -> F {
    F::custom(err)
}

fn d2s<E: de::Error, F: ser::Error>(err: E) -> F {
    F::custom(err)
}
