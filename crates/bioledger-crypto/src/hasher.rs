use serde_json::Value;
use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Unkeyed, unsalted SHA-256 content hasher.
///
/// Raw credential samples are digested as-is, so the digest of a sample is
/// exactly `sha256(sample)` in lowercase hex and can be reproduced by any
/// independent tool. Structured content (block headers) is digested through
/// its canonical JSON encoding, see [`canonical_json`].
pub struct ContentHasher;

impl ContentHasher {
    /// Hash raw bytes and return the lowercase hex digest.
    pub fn digest(data: &[u8]) -> String {
        hex::encode(Self::raw_hash(data))
    }

    /// Hash the canonical JSON encoding of a value.
    pub fn digest_canonical(value: &Value) -> String {
        Self::digest(canonical_json(value).as_bytes())
    }

    /// Verify that data produces the expected hex digest.
    pub fn verify(data: &[u8], expected: &str) -> bool {
        Self::digest(data).eq_ignore_ascii_case(expected)
    }

    /// Raw SHA-256 output (for low-level use).
    pub fn raw_hash(data: &[u8]) -> [u8; 32] {
        Sha256::digest(data).into()
    }
}

/// Encode a JSON value canonically: compact, with object keys sorted at
/// every depth.
///
/// `serde_json::Map` is ordered by key unless the `preserve_order` feature is
/// enabled, which this workspace never does.
pub fn canonical_json(value: &Value) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn digest_matches_known_sha256() {
        assert_eq!(
            ContentHasher::digest(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            ContentHasher::digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn digest_is_lowercase_hex_of_fixed_length() {
        let d = ContentHasher::digest(b"thumbprint-raw-A");
        assert_eq!(d.len(), DIGEST_HEX_LEN);
        assert!(d.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn verify_correct_data() {
        let d = ContentHasher::digest(b"test data");
        assert!(ContentHasher::verify(b"test data", &d));
        assert!(ContentHasher::verify(b"test data", &d.to_uppercase()));
    }

    #[test]
    fn verify_incorrect_data() {
        let d = ContentHasher::digest(b"original");
        assert!(!ContentHasher::verify(b"tampered", &d));
    }

    #[test]
    fn canonical_json_sorts_keys() {
        let value = json!({"b": 1, "a": {"z": true, "m": null}, "c": [3, {"y": 1, "x": 2}]});
        assert_eq!(
            canonical_json(&value),
            r#"{"a":{"m":null,"z":true},"b":1,"c":[3,{"x":2,"y":1}]}"#
        );
    }

    #[test]
    fn canonical_json_escapes_keys_and_strings() {
        let value = json!({"k\"ey": "va\nlue"});
        assert_eq!(canonical_json(&value), r#"{"k\"ey":"va\nlue"}"#);
    }

    #[test]
    fn canonical_digest_ignores_insertion_order() {
        let mut first = serde_json::Map::new();
        first.insert("index".into(), json!(1));
        first.insert("nonce".into(), json!(7));
        let mut second = serde_json::Map::new();
        second.insert("nonce".into(), json!(7));
        second.insert("index".into(), json!(1));
        assert_eq!(
            ContentHasher::digest_canonical(&Value::Object(first)),
            ContentHasher::digest_canonical(&Value::Object(second))
        );
    }

    proptest! {
        #[test]
        fn digest_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            prop_assert_eq!(ContentHasher::digest(&data), ContentHasher::digest(&data));
        }

        #[test]
        fn digest_round_trips_through_raw_hash(
            data in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let raw = hex::encode(ContentHasher::raw_hash(&data));
            prop_assert_eq!(ContentHasher::digest(&data), raw);
        }
    }
}
