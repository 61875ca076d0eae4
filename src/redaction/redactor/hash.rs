//! Hash redaction strategy

use super::Redactor;
use crate::redaction::canonical::to_canonical_vec;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Hash strategy - replaces a value with the SHA-256 of its canonical form
///
/// Object key order does not affect the digest; array element order does.
///
/// The whole value is realized in memory before hashing, so the memory cost
/// of this strategy is the size of the largest sensitive subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashRedactor;

impl HashRedactor {
    /// Create a new hash redactor
    pub fn new() -> Self {
        Self
    }

    /// Digest of an already realized value
    pub fn digest(&self, value: &Value) -> serde_json::Result<String> {
        let canonical = to_canonical_vec(value)?;
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        Ok(format!("{:x}", hasher.finalize()))
    }
}

impl Redactor for HashRedactor {
    fn redact<'de, D>(&self, value: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let realized = Value::deserialize(value)?;
        self.digest(&realized).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_digests() {
        let redactor = HashRedactor::new();
        assert_eq!(
            redactor.redact(json!("alice@x.com")).unwrap(),
            "953ae984bba4d281f03a0f10b246bd9e4d90bca47b82dcb263dbe1ce771ba85c"
        );
        assert_eq!(
            redactor.redact(json!(null)).unwrap(),
            "74234e98afe7498fb5daf1f36ac2d78acc339464f950703b8c019892f982b90b"
        );
        assert_eq!(
            redactor.redact(json!(true)).unwrap(),
            "b5bea41b6c623f7c09f1bf24dcae58ebab3c0cdd90ad966bc43a45b44867e12b"
        );
        assert_eq!(
            redactor.redact(json!(1.5)).unwrap(),
            "9f29a130438b81170b92a42650f9a94291ecad60bd47af2a3886e75f7f728725"
        );
        assert_eq!(
            redactor.redact(json!("é😀\u{7f}")).unwrap(),
            "4af8f4098cde2b44268dd58659f2dcb077f5e8e384d6a8f86baa8d507aaaf933"
        );
    }

    #[test]
    fn test_key_order_independent() {
        let redactor = HashRedactor::new();
        let first = redactor
            .redact(json!({"a": 1, "b": 2, "c": [3, 4], "d": {"e": 10, "f": 11}}))
            .unwrap();
        let second = redactor
            .redact(json!({"d": {"f": 11, "e": 10}, "c": [3, 4], "b": 2, "a": 1}))
            .unwrap();
        assert_eq!(
            first,
            "66cf71a6d9a3e0274c702ac00363e4283e38c4eb8e7452b81918de835514b4d9"
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_array_order_significant() {
        let redactor = HashRedactor::new();
        let forward = redactor.redact(json!(["a", "b"])).unwrap();
        let reversed = redactor.redact(json!(["b", "a"])).unwrap();
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_streamed_and_materialized_agree() {
        let redactor = HashRedactor::new();
        let text = r#"{"d": {"f": 11, "e": 10}, "c": [3, 4], "b": 2, "a": 1}"#;
        let mut de = serde_json::Deserializer::from_reader(text.as_bytes());
        let streamed = redactor.redact(&mut de).unwrap();
        let materialized = redactor
            .redact(serde_json::from_str::<Value>(text).unwrap())
            .unwrap();
        assert_eq!(streamed, materialized);
    }

    #[test]
    fn test_digest_is_lowercase_hex() {
        let digest = HashRedactor::new().redact(json!({"k": "v"})).unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
