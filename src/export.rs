//! Mapping export
//!
//! Output is produced in two steps. The mapping is first rendered in a
//! literal notation (single-quoted strings, `True`/`False`/`None`, `, `
//! between items), then that text is rewritten by plain substitutions, in
//! this order:
//!
//! 1. `'` becomes `"`
//! 2. `True` becomes `true`
//! 3. `False` becomes `false`
//! 4. `None` becomes `null`
//! 5. every `,` is followed by a newline
//!
//! The substitutions do not know about string boundaries: a string value
//! containing `'`, `,` or one of the literal words is rewritten too. Keep
//! such values out of exported mappings. Backslashes and control
//! characters are escaped while rendering, before any substitution.

use serde_json::Value;

use crate::mapping::Mapping;

/// Render a mapping as export text.
pub fn export(mapping: &Mapping) -> String {
    let mut literal = String::new();
    write_mapping(&mut literal, mapping);

    literal
        .replace('\'', "\"")
        .replace("True", "true")
        .replace("False", "false")
        .replace("None", "null")
        .replace(',', ",\n")
}

fn write_mapping(out: &mut String, mapping: &Mapping) {
    out.push('{');
    for (index, (key, value)) in mapping.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        write_string(out, key);
        out.push_str(": ");
        write_value(out, value);
    }
    out.push('}');
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(number) => out.push_str(&number.to_string()),
        Value::String(text) => write_string(out, text),
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => write_mapping(out, map),
    }
}

/// Quote `text`, escaping backslashes and control characters so the result
/// stays a valid JSON string once the quotes are swapped.
fn write_string(out: &mut String, text: &str) {
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\u{20}' || c == '\u{7f}' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
}
