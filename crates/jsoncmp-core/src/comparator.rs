//! Comparator — canonical serialization and sameness test
//!
//! Two documents are the same when their normalized forms serialize to
//! identical canonical strings.
//!
//! # Canonical form
//!
//! Compact JSON with object keys in insertion order. Keys are never sorted, so
//! `{"a":1,"b":2}` and `{"b":2,"a":1}` are *different*. This is stricter than
//! logical JSON equality and is relied on by existing fixtures.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::normalizer::normalize;

/// Outcome of comparing one pair, with fingerprints of both sides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub same: bool,
    pub left_digest: String,
    pub right_digest: String,
}

/// Normalize both documents and test them for sameness
pub fn compare(mut left: Value, mut right: Value) -> bool {
    normalize(&mut left);
    normalize(&mut right);
    canonical_form(&left) == canonical_form(&right)
}

/// Like [`compare`], also returning the canonical digest of each side
pub fn compare_detailed(mut left: Value, mut right: Value) -> Comparison {
    normalize(&mut left);
    normalize(&mut right);

    let left_canonical = canonical_form(&left);
    let right_canonical = canonical_form(&right);

    Comparison {
        same: left_canonical == right_canonical,
        left_digest: digest_hex(&left_canonical),
        right_digest: digest_hex(&right_canonical),
    }
}

/// Serialize a document to its canonical string (insertion-ordered, compact)
pub fn canonical_form(doc: &Value) -> String {
    doc.to_string()
}

/// SHA-256 of a document's canonical form, as lowercase hex
pub fn canonical_digest(doc: &Value) -> String {
    digest_hex(&canonical_form(doc))
}

fn digest_hex(canonical: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let result = hasher.finalize();
    result.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    // ── Sameness ───────────────────────────────────────

    #[test]
    fn test_identical_documents_same() {
        let doc = json!({"a": 1, "b": [true, null, "x"]});
        assert!(compare(doc.clone(), doc));
    }

    #[test]
    fn test_key_case_ignored() {
        let left = parse(r#"{"Name": "x", "Nested": {"DEPTH": 2}}"#);
        let right = parse(r#"{"name": "x", "nested": {"depth": 2}}"#);
        assert!(compare(left, right));
    }

    #[test]
    fn test_value_case_significant() {
        let left = parse(r#"{"name": "Alice"}"#);
        let right = parse(r#"{"name": "alice"}"#);
        assert!(!compare(left, right));
    }

    #[test]
    fn test_hex_value_case_ignored() {
        let left = parse(r#"{"type": "HEX", "val": "0xAB"}"#);
        let right = parse(r#"{"type": "HEX", "val": "0xab"}"#);
        assert!(compare(left, right));
    }

    #[test]
    fn test_non_hex_value_case_significant() {
        let left = parse(r#"{"type": "DEC", "val": "0xAB"}"#);
        let right = parse(r#"{"type": "DEC", "val": "0xab"}"#);
        assert!(!compare(left, right));
    }

    #[test]
    fn test_key_order_significant() {
        let left = parse(r#"{"a": 1, "b": 2}"#);
        let right = parse(r#"{"b": 2, "a": 1}"#);
        assert!(!compare(left, right), "canonical form must not reorder keys");
    }

    #[test]
    fn test_array_objects_not_normalized() {
        let left = parse(r#"{"list": [{"A": 1}]}"#);
        let right = parse(r#"{"list": [{"a": 1}]}"#);
        assert!(!compare(left, right));
    }

    #[test]
    fn test_hex_context_not_inherited() {
        let left = parse(r#"{"type": "HEX", "child": {"val": "0xAB"}}"#);
        let right = parse(r#"{"type": "HEX", "child": {"val": "0xab"}}"#);
        assert!(!compare(left, right));
    }

    #[test]
    fn test_array_order_significant() {
        assert!(!compare(json!([1, 2]), json!([2, 1])));
    }

    #[test]
    fn test_type_difference_detected() {
        assert!(!compare(json!({"a": 1}), json!({"a": "1"})));
        assert!(!compare(json!({"a": null}), json!({})));
    }

    // ── End-to-end scenario ────────────────────────────

    #[test]
    fn test_exact_case_hex_trigger_end_to_end() {
        let left = parse(r#"[{"Type":"HEX","Val":"0xAB"}]"#);
        let right = parse(r#"[{"type":"hex","val":"0xAB"}]"#);

        let left_norm = crate::normalizer::normalized(left.clone());
        let right_norm = crate::normalizer::normalized(right.clone());
        assert_eq!(canonical_form(&left_norm), r#"[{"type":"HEX","val":"0xab"}]"#);
        assert_eq!(canonical_form(&right_norm), r#"[{"type":"hex","val":"0xAB"}]"#);

        assert!(!compare(left, right), "lowercase `hex` must not trigger lowering");
    }

    // ── Canonical form ─────────────────────────────────

    #[test]
    fn test_canonical_form_keeps_insertion_order() {
        let doc = parse(r#"{"z": 1, "a": {"y": 2, "b": 3}}"#);
        assert_eq!(canonical_form(&doc), r#"{"z":1,"a":{"y":2,"b":3}}"#);
    }

    #[test]
    fn test_canonical_form_is_compact() {
        let doc = parse("{ \"a\" : [ 1 , 2 ] ,\n \"b\" : \"x y\" }");
        assert_eq!(canonical_form(&doc), r#"{"a":[1,2],"b":"x y"}"#);
    }

    // ── Digests ────────────────────────────────────────

    #[test]
    fn test_digest_is_sha256_hex() {
        let digest = canonical_digest(&json!({}));
        assert_eq!(digest.len(), 64);
        // SHA-256("{}")
        assert_eq!(
            digest,
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn test_detailed_digests_match_on_same() {
        let left = parse(r#"{"Type": "HEX", "Val": "0xAB"}"#);
        let right = parse(r#"{"type": "HEX", "val": "0xab"}"#);
        let result = compare_detailed(left, right);
        assert!(result.same);
        assert_eq!(result.left_digest, result.right_digest);
        assert_eq!(
            result.left_digest,
            canonical_digest(&parse(r#"{"type":"HEX","val":"0xab"}"#))
        );
    }

    #[test]
    fn test_detailed_digests_differ_on_fail() {
        let result = compare_detailed(json!({"a": 1}), json!({"a": 2}));
        assert!(!result.same);
        assert_ne!(result.left_digest, result.right_digest);
    }

    #[test]
    fn test_detailed_agrees_with_compare() {
        let cases = [
            (json!({"A": 1}), json!({"a": 1})),
            (json!({"a": 1, "b": 2}), json!({"b": 2, "a": 1})),
            (json!([{"T": 1}]), json!([{"t": 1}])),
        ];
        for (left, right) in cases {
            assert_eq!(
                compare(left.clone(), right.clone()),
                compare_detailed(left, right).same
            );
        }
    }

    // ── Determinism proof (100 iterations) ─────────────

    #[test]
    fn test_determinism_100_iterations() {
        let left = parse(r#"{"Reg": {"Type": "HEX", "Val": "0xFF"}, "List": [1]}"#);
        let right = parse(r#"{"reg": {"type": "HEX", "val": "0xff"}, "list": [1]}"#);
        let first = compare_detailed(left.clone(), right.clone());
        for i in 0..100 {
            let result = compare_detailed(left.clone(), right.clone());
            assert_eq!(first, result, "Determinism failure at iteration {}", i);
        }
        assert!(first.same);
    }
}
