//! Deterministic reordering of captured JSON payloads.
//!
//! Upstream systems are free to emit object keys and unordered result sets
//! in a different order on every run. Canonicalizing a payload removes that
//! noise so that two semantically identical responses serialize to the same
//! bytes: object keys are sorted lexicographically at every nesting level,
//! and arrays are sorted by a content fingerprint of each element.
//!
//! Array reordering is deliberately order-destroying. It is the right thing
//! for unordered result sets and the wrong thing for sequences whose
//! position carries meaning, which is why canonicalization is opt-in per
//! run rather than always on.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Recursively reorders `value` into its canonical form.
///
/// Object keys are sorted lexicographically; array elements are sorted by
/// the SHA-256 digest of their canonical compact encoding, digests compared
/// lexicographically. Scalars pass through unchanged. The result contains
/// exactly the same values as the input; only order differs.
#[must_use]
pub fn canonicalize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map
                .into_iter()
                .map(|(key, entry)| (key, canonicalize_value(entry)))
                .collect();
            entries.sort_by(|left, right| left.0.cmp(&right.0));

            let mut sorted = Map::with_capacity(entries.len());
            for (key, entry) in entries {
                sorted.insert(key, entry);
            }
            Value::Object(sorted)
        }
        Value::Array(items) => {
            let mut items: Vec<Value> = items.into_iter().map(canonicalize_value).collect();
            items.sort_by_cached_key(content_fingerprint);
            Value::Array(items)
        }
        scalar => scalar,
    }
}

/// SHA-256 over the canonical compact JSON encoding of `value`.
///
/// Only meaningful for values that are already canonical; `canonicalize_value`
/// sorts children before fingerprinting their parent array.
fn content_fingerprint(value: &Value) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(value.to_string().as_bytes());
    hasher.finalize().into()
}
