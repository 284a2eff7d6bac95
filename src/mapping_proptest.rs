//! Property-based tests for the mapping stages.
//!
//! These tests use proptest to generate random mappings and verify that the
//! key-set invariants of coercion, merging and overrides hold for all inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::coerce::coerce;
    use crate::dates::{is_bare_date, is_timestamp, truncate_timestamp, DateBundle};
    use crate::export::export;
    use crate::mapping::{Mapping, ReferenceSchema, Side, UntypedMapping};
    use crate::merge::merge;
    use crate::overrides::{apply_overrides, OverrideRules};
    use crate::parse::parse_mapping;
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use std::collections::BTreeSet;

    fn key() -> impl Strategy<Value = String> {
        "[A-Z_]{1,8}"
    }

    /// Reference values of every coercible kind. String-typed references are
    /// the only ones that accept arbitrary raw text without error.
    fn reference_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(json!("")),
            Just(json!(true)),
            Just(json!([])),
            Just(json!({})),
        ]
    }

    fn scalar_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(|n| json!(n)),
            "[a-z0-9 ]{0,10}".prop_map(Value::String),
        ]
    }

    fn mapping(values: impl Strategy<Value = Value>) -> impl Strategy<Value = Mapping> {
        prop::collection::vec((key(), values), 0..12)
            .prop_map(|pairs| pairs.into_iter().collect::<Mapping>())
    }

    fn untyped() -> impl Strategy<Value = UntypedMapping> {
        prop::collection::vec((key(), "[a-z0-9 ,]{0,12}"), 0..12)
            .prop_map(|pairs| pairs.into_iter().collect::<UntypedMapping>())
    }

    fn keys<'a>(keys: impl Iterator<Item = &'a String>) -> BTreeSet<String> {
        keys.cloned().collect()
    }

    // ============================================================================
    // coerce property tests
    // ============================================================================

    proptest! {
        /// Property: coerced key set is the intersection of value and reference keys
        #[test]
        fn coerce_keeps_exactly_shared_keys(
            values in untyped(),
            reference in mapping(reference_value()),
        ) {
            let result = coerce(&values, &ReferenceSchema::from_mapping(&reference)).unwrap();
            let expected: BTreeSet<String> = keys(values.keys())
                .intersection(&keys(reference.keys()))
                .cloned()
                .collect();
            prop_assert_eq!(keys(result.keys()), expected);
        }

        /// Property: coercing against a string reference returns the raw text
        #[test]
        fn coerce_string_reference_is_identity(values in untyped()) {
            let reference: Mapping = values.keys().map(|k| (k.clone(), json!(""))).collect();
            let result = coerce(&values, &ReferenceSchema::from_mapping(&reference)).unwrap();
            for (key, raw) in &values {
                let expected = if raw == "null" { Value::Null } else { json!(raw) };
                prop_assert_eq!(&result[key], &expected);
            }
        }
    }

    // ============================================================================
    // merge property tests
    // ============================================================================

    proptest! {
        /// Property: merged key set equals the destination key set
        #[test]
        fn merge_preserves_destination_keys(
            destination in mapping(scalar_value()),
            source in mapping(scalar_value()),
        ) {
            let merged = merge(&destination, &source);
            prop_assert_eq!(
                merged.keys().collect::<Vec<_>>(),
                destination.keys().collect::<Vec<_>>()
            );
        }

        /// Property: every shared key takes the source value
        #[test]
        fn merge_source_wins(
            destination in mapping(scalar_value()),
            source in mapping(scalar_value()),
        ) {
            let merged = merge(&destination, &source);
            for (key, value) in &merged {
                let expected = source.get(key).unwrap_or(&destination[key]);
                prop_assert_eq!(value, expected);
            }
        }
    }

    // ============================================================================
    // override property tests
    // ============================================================================

    proptest! {
        /// Property: overrides keep the key set and order of their input
        #[test]
        fn overrides_preserve_keys(
            merged in mapping(scalar_value()),
            product in "[A-Za-z ]{0,6}",
            convert in any::<bool>(),
        ) {
            let rules = OverrideRules::builder()
                .product_type(product)
                .dates(DateBundle {
                    date_1: "2024-01-16".to_string(),
                    ..Default::default()
                })
                .build();
            let result = apply_overrides(&merged, &rules, convert);
            prop_assert_eq!(
                result.keys().collect::<Vec<_>>(),
                merged.keys().collect::<Vec<_>>()
            );
        }

        /// Property: empty rules without conversion change nothing
        #[test]
        fn empty_rules_are_identity(merged in mapping(scalar_value())) {
            let result = apply_overrides(&merged, &OverrideRules::empty(), false);
            prop_assert_eq!(result, merged);
        }
    }

    // ============================================================================
    // date and export property tests
    // ============================================================================

    proptest! {
        /// Property: truncating a valid timestamp yields a bare date
        #[test]
        fn truncated_timestamp_is_bare_date(
            year in 1000i32..9999,
            month in 1u32..=12,
            day in 1u32..=28,
            hour in 0u32..24,
            fraction in "[0-9]{1,6}",
        ) {
            let text = format!("{:04}-{:02}-{:02}T{:02}:15:30.{}", year, month, day, hour, fraction);
            prop_assert!(is_timestamp(&text));
            prop_assert!(is_bare_date(&truncate_timestamp(&text)));
        }

        /// Property: export is stable through a parse round trip
        #[test]
        fn export_is_stable(
            source in prop::collection::vec(
                (key(), prop_oneof![
                    Just(Value::Null),
                    any::<bool>().prop_map(Value::Bool),
                    any::<i32>().prop_map(|n| json!(n)),
                    r"[a-z0-9\\\n\t\r\x01]{0,10}".prop_map(Value::String),
                ]),
                0..10,
            )
        ) {
            let original: Mapping = source.into_iter().collect();
            let first = export(&original);
            let reparsed = parse_mapping(&first, Side::Destination).unwrap();
            prop_assert_eq!(export(&reparsed), first);
        }
    }
}
