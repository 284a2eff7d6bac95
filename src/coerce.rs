//! Type coercion of raw string values
//!
//! Narrows an [`UntypedMapping`] to the keys of a reference schema and
//! converts each raw value to the kind the reference records for that key.
//! Keys missing from the reference are dropped, and so are keys whose
//! reference value is `null`: the result only ever holds keys known to both
//! sides.
//!
//! Conversion rules, after the literal `null` check:
//!
//! | reference kind | result |
//! |---|---|
//! | boolean | `true` for any non-empty string |
//! | integer, float | integer if the text parses as one, else float |
//! | string | the raw text |
//! | object | the raw text, not decoded |
//! | list | the text split on `,`, items trimmed; empty text gives `[]` |

use log::debug;
use serde_json::{Number, Value};

use crate::error::{Error, Result};
use crate::mapping::{Mapping, ReferenceSchema, UntypedMapping, ValueKind};

/// Raw text that always coerces to JSON `null`.
pub const NULL_LITERAL: &str = "null";

/// Coerce raw values to the kinds recorded in `schema`.
///
/// Output keys follow the order of `values`.
///
/// # Errors
///
/// Returns `Error::Coercion` when a value for a numeric key is neither an
/// integer nor a finite float.
pub fn coerce(values: &UntypedMapping, schema: &ReferenceSchema) -> Result<Mapping> {
    let mut result = Mapping::new();

    for (key, raw) in values {
        let Some(kind) = schema.kind(key) else {
            debug!("Dropping '{}': not in reference", key);
            continue;
        };

        if let Some(value) = coerce_value(key, raw, kind)? {
            result.insert(key.clone(), value);
        } else {
            debug!("Dropping '{}': reference kind {} is not coercible", key, kind);
        }
    }

    Ok(result)
}

/// Convenience wrapper building the schema from a reference mapping.
pub fn coerce_with_reference(values: &UntypedMapping, reference: &Mapping) -> Result<Mapping> {
    coerce(values, &ReferenceSchema::from_mapping(reference))
}

/// Convert one raw value. `Ok(None)` means the key is dropped.
pub fn coerce_value(key: &str, raw: &str, kind: ValueKind) -> Result<Option<Value>> {
    if raw == NULL_LITERAL {
        return Ok(Some(Value::Null));
    }

    let value = match kind {
        // Truthiness, not a lexical parse: "false" is non-empty and so true.
        ValueKind::Bool => Value::Bool(!raw.is_empty()),
        ValueKind::Int | ValueKind::Float => Value::Number(parse_number(key, raw)?),
        ValueKind::String | ValueKind::Map => Value::String(raw.to_string()),
        ValueKind::List => Value::Array(split_list(raw)),
        ValueKind::Null => return Ok(None),
    };

    Ok(Some(value))
}

fn parse_number(key: &str, raw: &str) -> Result<Number> {
    let text = raw.trim();
    if let Ok(int) = text.parse::<i64>() {
        return Ok(Number::from(int));
    }
    if let Ok(int) = text.parse::<u64>() {
        return Ok(Number::from(int));
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| Error::Coercion {
            key: key.to_string(),
            value: raw.to_string(),
            expected: "number".to_string(),
        })
}

fn split_list(raw: &str) -> Vec<Value> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',')
        .map(|item| Value::String(item.trim().to_string()))
        .collect()
}
