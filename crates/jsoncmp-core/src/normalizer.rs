//! Document normalizer — folds key case and lowers tagged hex values
//!
//! The normalizer rewrites a parsed JSON document in place so that two
//! documents differing only in key casing (and in the casing of values
//! tagged as hexadecimal) serialize to the same canonical form.
//!
//! # Rules
//!
//! Per object level, keys are visited in insertion order:
//!
//! 1. Each key is renamed to its lowercase form, keeping its position.
//! 2. A key folding to `type` records its value as the level's last seen type.
//! 3. A key folding to `val` has its string value lowercased when the last
//!    seen type is exactly `"HEX"`. The tag match is case-sensitive.
//! 4. A value that is an object is normalized as a new level with an empty
//!    type context. Arrays are not descended into.
//!
//! A root that is an array has its object elements normalized as levels of
//! their own; arrays below the root are left untouched.
//!
//! # Guarantees
//!
//! - **Idempotent**: `normalize(normalize(x)) == normalize(x)`
//! - **Order preserving**: key order is never re-sorted
//! - **Total**: never fails on a parsed document

use serde_json::{Map, Value};

/// Key whose value sets the type context of an object level
pub const TYPE_KEY: &str = "type";

/// Key whose value is lowered under a hex type context
pub const VAL_KEY: &str = "val";

/// Type tag that marks a hexadecimal value (matched case-sensitively)
pub const HEX_TAG: &str = "HEX";

// ── Public API ─────────────────────────────────────────────

/// Normalize a document in place
///
/// Objects are normalized recursively. A root array has each of its object
/// elements normalized; every other root value is already normal.
pub fn normalize(doc: &mut Value) {
    match doc {
        Value::Object(map) => normalize_object(map),
        Value::Array(items) => {
            for item in items.iter_mut() {
                if let Value::Object(map) = item {
                    normalize_object(map);
                }
            }
        }
        _ => {}
    }
}

/// Normalize an owned document and hand it back
pub fn normalized(mut doc: Value) -> Value {
    normalize(&mut doc);
    doc
}

/// Normalize one object level with a fresh type context
///
/// Keys are visited in input order. Each one is taken out and its
/// value written under the lowercase name: appended at the end when that name
/// is free, written over the existing entry otherwise. Renaming every key this
/// way keeps the input order.
///
/// When two keys fold to the same name the outcome depends on which one is
/// already lowercase: `{"Key":1,"key":2}` becomes `{"key":1}` because `Key`
/// overwrites `key` before `key` is visited, while `{"key":1,"KEY":2}` becomes
/// `{"key":2}`.
pub fn normalize_object(map: &mut Map<String, Value>) {
    let order: Vec<String> = map.keys().cloned().collect();
    let mut entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
    let mut context = TypeContext::default();

    for key in order {
        let Some(pos) = entries.iter().position(|(k, _)| *k == key) else {
            continue;
        };
        let (_, value) = entries.remove(pos);
        let key = key.to_lowercase();

        let slot = match entries.iter().position(|(k, _)| *k == key) {
            Some(existing) => {
                entries[existing].1 = value;
                existing
            }
            None => {
                entries.push((key.clone(), value));
                entries.len() - 1
            }
        };
        let value = &mut entries[slot].1;

        if key == VAL_KEY && context.is_hex() {
            lower_string(value);
        }
        if key == TYPE_KEY {
            context.observe(value);
        }
        if let Value::Object(child) = value {
            normalize_object(child);
        }
    }

    map.extend(entries);
}

// ── Type context ───────────────────────────────────────────

/// Single-slot memory of the last `type` value seen on one object level
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct TypeContext {
    hex: bool,
}

impl TypeContext {
    fn observe(&mut self, type_value: &Value) {
        self.hex = matches!(type_value, Value::String(tag) if tag == HEX_TAG);
    }

    fn is_hex(&self) -> bool {
        self.hex
    }
}

/// Lowercase a string value; any other value is left as is
fn lower_string(value: &mut Value) {
    if let Value::String(s) = value {
        *s = s.to_lowercase();
    }
}
