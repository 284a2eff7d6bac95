//! Settings override layer
//!
//! Post-processes a merged mapping. Every key is resolved exactly once, by
//! the first of these that applies:
//!
//! 1. the key is a well-known field with a non-empty configured value;
//! 2. the key is a date alias and the matching bundle date is a bare date;
//! 3. timestamp conversion is on and the value is a timestamp, which is
//!    truncated to its date;
//! 4. otherwise the value is kept.
//!
//! [`OverrideRules`] are immutable and built through [`OverrideRulesBuilder`],
//! which trims every configured value.

use log::debug;
use serde_json::Value;

use crate::dates::{is_bare_date, is_timestamp_value, truncate_timestamp, DateBundle, DateSlot};
use crate::mapping::Mapping;

/// Well-known fields that user-supplied values can replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKey {
    ProductType,
    ContactId,
    AccountNumber,
    ContractNumber,
    CommunicationType,
}

impl RuleKey {
    pub const ALL: [RuleKey; 5] = [
        RuleKey::ProductType,
        RuleKey::ContactId,
        RuleKey::AccountNumber,
        RuleKey::ContractNumber,
        RuleKey::CommunicationType,
    ];

    /// Canonical key name and its `PRIMARY_` alias.
    pub fn names(self) -> [&'static str; 2] {
        match self {
            RuleKey::ProductType => ["PRODUCT_TYPE", "PRIMARY_PRODUCT_TYPE"],
            RuleKey::ContactId => ["CONTACT_ID", "PRIMARY_CONTACT_ID"],
            RuleKey::AccountNumber => ["ACCOUNT_NUMBER", "PRIMARY_ACCOUNT_NUMBER"],
            RuleKey::ContractNumber => ["CONTRACT_NUMBER", "PRIMARY_CONTRACT_NUMBER"],
            RuleKey::CommunicationType => ["COMMUNICATION_TYPE", "PRIMARY_COMMUNICATION_TYPE"],
        }
    }

    pub fn for_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.names().contains(&key))
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Date slot addressed by a mapping key, if the key is a date alias.
pub fn date_slot_for_key(key: &str) -> Option<DateSlot> {
    let slot = match key {
        "DATE1" | "DATE_1" | "PRIMARY_ACCOUNT_DATE1" | "PRIMARY_ACCOUNT_DATE_1" => DateSlot::Date1,
        "DATE2" | "DATE_2" | "PRIMARY_ACCOUNT_DATE2" | "PRIMARY_ACCOUNT_DATE_2" => DateSlot::Date2,
        "DATE3" | "DATE_3" | "PRIMARY_ACCOUNT_DATE3" | "PRIMARY_ACCOUNT_DATE_3" => DateSlot::Date3,
        "STD" | "PRIMARY_ACCOUNT_STD" => DateSlot::Std,
        "NEXT_STD" | "PRIMARY_ACCOUNT_NEXT_STD" => DateSlot::NextStd,
        _ => return None,
    };
    Some(slot)
}

/// User-supplied override values for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideRules {
    values: [String; 5],
    dates: Option<DateBundle>,
}

impl OverrideRules {
    /// Rules that never fire; used by the double-product workflow.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> OverrideRulesBuilder {
        OverrideRulesBuilder::default()
    }

    /// Configured value for a field, if non-empty.
    pub fn value(&self, rule: RuleKey) -> Option<&str> {
        let value = self.values[rule.index()].as_str();
        (!value.is_empty()).then_some(value)
    }

    pub fn dates(&self) -> Option<&DateBundle> {
        self.dates.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_none() && self.values.iter().all(String::is_empty)
    }

    /// Replacement for `key` under rule 1, if any.
    fn rule_value(&self, key: &str) -> Option<&str> {
        RuleKey::for_key(key).and_then(|rule| self.value(rule))
    }

    /// Replacement for `key` under rule 2, if any.
    fn date_value(&self, key: &str) -> Option<&str> {
        let slot = date_slot_for_key(key)?;
        let date = self.dates.as_ref()?.get(slot).trim();
        is_bare_date(date).then_some(date)
    }
}

/// Builder for [`OverrideRules`]. Values are trimmed on entry.
#[derive(Debug, Clone, Default)]
pub struct OverrideRulesBuilder {
    rules: OverrideRules,
}

impl OverrideRulesBuilder {
    pub fn value(mut self, rule: RuleKey, value: impl AsRef<str>) -> Self {
        self.rules.values[rule.index()] = value.as_ref().trim().to_string();
        self
    }

    pub fn product_type(self, value: impl AsRef<str>) -> Self {
        self.value(RuleKey::ProductType, value)
    }

    pub fn contact_id(self, value: impl AsRef<str>) -> Self {
        self.value(RuleKey::ContactId, value)
    }

    pub fn account_number(self, value: impl AsRef<str>) -> Self {
        self.value(RuleKey::AccountNumber, value)
    }

    pub fn contract_number(self, value: impl AsRef<str>) -> Self {
        self.value(RuleKey::ContractNumber, value)
    }

    pub fn communication_type(self, value: impl AsRef<str>) -> Self {
        self.value(RuleKey::CommunicationType, value)
    }

    pub fn dates(mut self, dates: DateBundle) -> Self {
        self.rules.dates = Some(dates);
        self
    }

    pub fn build(self) -> OverrideRules {
        self.rules
    }
}

/// Which branch resolved a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Rule,
    Date,
    Truncated,
    Kept,
}

/// Resolve a single key/value pair.
pub fn resolve(
    key: &str,
    value: &Value,
    rules: &OverrideRules,
    convert_timestamps: bool,
) -> (Resolution, Value) {
    if let Some(replacement) = rules.rule_value(key) {
        return (Resolution::Rule, Value::String(replacement.to_string()));
    }
    if let Some(date) = rules.date_value(key) {
        return (Resolution::Date, Value::String(date.to_string()));
    }
    if convert_timestamps && is_timestamp_value(value) {
        if let Some(text) = value.as_str() {
            return (Resolution::Truncated, Value::String(truncate_timestamp(text)));
        }
    }
    (Resolution::Kept, value.clone())
}

/// Apply override rules to every key of `merged`.
pub fn apply_overrides(merged: &Mapping, rules: &OverrideRules, convert_timestamps: bool) -> Mapping {
    let mut counts = [0usize; 4];
    let result = merged
        .iter()
        .map(|(key, value)| {
            let (resolution, value) = resolve(key, value, rules, convert_timestamps);
            counts[resolution as usize] += 1;
            (key.clone(), value)
        })
        .collect();

    debug!(
        "Overrides: {} rule, {} date, {} truncated, {} kept",
        counts[0], counts[1], counts[2], counts[3]
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Mapping {
        value.as_object().cloned().unwrap()
    }

    fn bundle() -> DateBundle {
        DateBundle {
            date_1: "2024-01-16".to_string(),
            date_2: " 2024-01-17 ".to_string(),
            date_3: "not a date".to_string(),
            std: "2024-01-31".to_string(),
            next_std: "2024-02-29".to_string(),
        }
    }

    #[test]
    fn test_rule_key_aliases() {
        assert_eq!(RuleKey::for_key("PRODUCT_TYPE"), Some(RuleKey::ProductType));
        assert_eq!(RuleKey::for_key("PRIMARY_CONTACT_ID"), Some(RuleKey::ContactId));
        assert_eq!(RuleKey::for_key("product_type"), None);
    }

    #[test]
    fn test_date_aliases() {
        assert_eq!(date_slot_for_key("DATE_1"), Some(DateSlot::Date1));
        assert_eq!(date_slot_for_key("PRIMARY_ACCOUNT_DATE3"), Some(DateSlot::Date3));
        assert_eq!(date_slot_for_key("PRIMARY_ACCOUNT_NEXT_STD"), Some(DateSlot::NextStd));
        assert_eq!(date_slot_for_key("DATE4"), None);
    }

    #[test]
    fn test_builder_trims_values() {
        let rules = OverrideRules::builder().contact_id("  42 ").build();
        assert_eq!(rules.value(RuleKey::ContactId), Some("42"));
        assert_eq!(rules.value(RuleKey::ProductType), None);
    }

    #[test]
    fn test_whitespace_only_value_never_fires() {
        let rules = OverrideRules::builder().product_type("   ").build();
        let result = apply_overrides(&map(json!({"PRODUCT_TYPE": "Common"})), &rules, false);
        assert_eq!(result["PRODUCT_TYPE"], json!("Common"));
    }

    #[test]
    fn test_rule_beats_date_and_timestamp() {
        let rules = OverrideRules::builder()
            .product_type("Kvk")
            .dates(bundle())
            .build();
        let merged = map(json!({"PRODUCT_TYPE": "2022-11-28T08:25:47.123000"}));
        let result = apply_overrides(&merged, &rules, true);
        assert_eq!(result["PRODUCT_TYPE"], json!("Kvk"));
    }

    #[test]
    fn test_date_alias_uses_trimmed_bundle_date() {
        let rules = OverrideRules::builder().dates(bundle()).build();
        let merged = map(json!({
            "DATE1": "old",
            "PRIMARY_ACCOUNT_DATE_2": 5,
            "NEXT_STD": null
        }));
        let result = apply_overrides(&merged, &rules, false);
        assert_eq!(result["DATE1"], json!("2024-01-16"));
        assert_eq!(result["PRIMARY_ACCOUNT_DATE_2"], json!("2024-01-17"));
        assert_eq!(result["NEXT_STD"], json!("2024-02-29"));
    }

    #[test]
    fn test_invalid_bundle_date_falls_through_to_timestamp() {
        let rules = OverrideRules::builder().dates(bundle()).build();
        let merged = map(json!({"DATE3": "2022-11-28T08:25:47.123000"}));
        let result = apply_overrides(&merged, &rules, true);
        assert_eq!(result["DATE3"], json!("2022-11-28"));
    }

    #[test]
    fn test_timestamp_kept_when_conversion_off() {
        let merged = map(json!({"CREATED": "2022-11-28T08:25:47.123000"}));
        let result = apply_overrides(&merged, &OverrideRules::empty(), false);
        assert_eq!(result["CREATED"], json!("2022-11-28T08:25:47.123000"));
    }

    #[test]
    fn test_empty_rules_only_truncate() {
        let merged = map(json!({
            "PRODUCT_TYPE": "Common",
            "DATE1": "x",
            "CREATED": "2022-11-28T08:25:47.123000",
            "COUNT": 3
        }));
        let result = apply_overrides(&merged, &OverrideRules::empty(), true);
        assert_eq!(
            Value::Object(result),
            json!({
                "PRODUCT_TYPE": "Common",
                "DATE1": "x",
                "CREATED": "2022-11-28",
                "COUNT": 3
            })
        );
    }

    #[test]
    fn test_resolution_reports_branch() {
        let rules = OverrideRules::builder()
            .account_number("A-1")
            .dates(bundle())
            .build();
        let value = json!("v");
        assert_eq!(resolve("PRIMARY_ACCOUNT_NUMBER", &value, &rules, true).0, Resolution::Rule);
        assert_eq!(resolve("STD", &value, &rules, true).0, Resolution::Date);
        assert_eq!(resolve("OTHER", &value, &rules, true).0, Resolution::Kept);
        assert_eq!(
            resolve("OTHER", &json!("2022-11-28T08:25:47.1"), &rules, true).0,
            Resolution::Truncated
        );
    }

    #[test]
    fn test_key_order_and_count_preserved() {
        let merged = map(json!({"z": 1, "DATE1": 2, "a": 3}));
        let result = apply_overrides(&merged, &OverrideRules::builder().dates(bundle()).build(), true);
        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["z", "DATE1", "a"]);
    }

    #[test]
    fn test_empty_rules_report_empty() {
        assert!(OverrideRules::empty().is_empty());
        assert!(!OverrideRules::builder().contact_id("1").build().is_empty());
    }
}
