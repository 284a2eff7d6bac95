//! Flat `KEY=VALUE` text parsing
//!
//! Each non-blank line holds one entry. The line is split on its first `=`;
//! key and value are trimmed. Later duplicates of a key replace the earlier
//! value but keep its position.

use log::debug;

use crate::error::{Error, Result};
use crate::mapping::UntypedMapping;

/// Parse newline-delimited `KEY=VALUE` text into an untyped mapping.
///
/// # Errors
///
/// Returns `Error::MalformedLine` for a non-blank line without `=`. The
/// reported line number is one-based and counts blank lines.
pub fn parse_flat(text: &str) -> Result<UntypedMapping> {
    let mut mapping = UntypedMapping::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once('=').ok_or_else(|| Error::MalformedLine {
            line_number: index + 1,
            line: line.to_string(),
        })?;
        mapping.insert(key.trim().to_string(), value.trim().to_string());
    }

    debug!("Parsed {} flat entries", mapping.len());
    Ok(mapping)
}
