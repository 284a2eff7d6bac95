//! Key-preserving merge of two mappings
//!
//! Unlike a deep merge, the destination's key set is fixed: a source value
//! replaces the destination value for a shared key, and keys that exist only
//! in the source are never introduced. Values are replaced whole; nested
//! objects are not merged recursively.
//!
//! ## Example
//!
//! ```
//! use json_filler::merge::merge;
//! use serde_json::json;
//!
//! let destination = json!({"a": 1, "b": 2});
//! let source = json!({"b": 3, "c": 4});
//! let merged = merge(
//!     destination.as_object().unwrap(),
//!     source.as_object().unwrap(),
//! );
//! assert_eq!(serde_json::Value::Object(merged), json!({"a": 1, "b": 3}));
//! ```

use log::debug;

use crate::mapping::Mapping;

/// Merge `source` into a copy of `destination`.
pub fn merge(destination: &Mapping, source: &Mapping) -> Mapping {
    let mut merged = destination.clone();
    merge_into(&mut merged, source);
    merged
}

/// Merge `source` into `target` in place.
///
/// Returns the number of keys whose value came from `source`.
pub fn merge_into(target: &mut Mapping, source: &Mapping) -> usize {
    let mut replaced = 0;
    for (key, existing) in target.iter_mut() {
        if let Some(value) = source.get(key) {
            *existing = value.clone();
            replaced += 1;
        }
    }

    debug!(
        "Merged {} of {} keys from source ({} source keys ignored)",
        replaced,
        target.len(),
        source.len() - replaced
    );
    replaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn map(value: Value) -> Mapping {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_merge_source_wins_for_shared_keys() {
        let merged = merge(&map(json!({"a": 1, "b": 2})), &map(json!({"b": "x"})));
        assert_eq!(Value::Object(merged), json!({"a": 1, "b": "x"}));
    }

    #[test]
    fn test_merge_never_adds_source_only_keys() {
        let merged = merge(&map(json!({"a": 1})), &map(json!({"z": 26, "y": 25})));
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(merged["a"], json!(1));
    }

    #[test]
    fn test_merge_preserves_destination_order() {
        let merged = merge(
            &map(json!({"c": 1, "a": 2, "b": 3})),
            &map(json!({"b": 30, "a": 20})),
        );
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["c", "a", "b"]);
        assert_eq!(Value::Object(merged), json!({"c": 1, "a": 20, "b": 30}));
    }

    #[test]
    fn test_merge_replaces_nested_objects_whole() {
        let merged = merge(
            &map(json!({"nested": {"keep": true, "x": 1}})),
            &map(json!({"nested": {"x": 2}})),
        );
        assert_eq!(merged["nested"], json!({"x": 2}));
    }

    #[test]
    fn test_merge_source_null_overwrites() {
        let merged = merge(&map(json!({"a": 1})), &map(json!({"a": null})));
        assert_eq!(merged["a"], Value::Null);
    }

    #[test]
    fn test_merge_into_counts_replacements() {
        let mut target = map(json!({"a": 1, "b": 2, "c": 3}));
        let replaced = merge_into(&mut target, &map(json!({"a": 0, "c": 0, "d": 0})));
        assert_eq!(replaced, 2);
    }

    #[test]
    fn test_merge_empty_destination() {
        let merged = merge(&Mapping::new(), &map(json!({"a": 1})));
        assert!(merged.is_empty());
    }
}
