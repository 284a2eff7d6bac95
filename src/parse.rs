//! Structured-text parsing
//!
//! Decodes JSON object text into a [`Mapping`]. Failures are reported as
//! [`Error::Decode`] whose message ends in a side tag (`-T` for the
//! destination record, `-F` for the source record) so the error can be routed
//! back to the input it came from, either through the attached
//! [`DecoderErrorLocation`] or by re-reading the message with
//! [`parse_error_message`].

use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::mapping::{Mapping, Mode, Side};
use crate::reference::ReferenceStore;

static LOCATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"line (\d+) column (\d+) \(char (\d+)\)-([TF])\s*$")
        .expect("location pattern is valid")
});

/// Where a structured-text parse failed and which input it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderErrorLocation {
    /// One-based line number.
    pub line: usize,
    /// One-based column number; zero when the decoder stopped at a line end.
    pub column: usize,
    /// Zero-based character offset into the whole text.
    pub offset: usize,
    pub side: Side,
}

/// Parse JSON object text into a mapping.
///
/// # Errors
///
/// Returns `Error::Decode` when the text is not valid JSON or its top-level
/// value is not an object.
pub fn parse_mapping(text: &str, side: Side) -> Result<Mapping> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => {
            debug!("Parsed {} keys from {} text", map.len(), side);
            Ok(map)
        }
        Ok(_) => {
            let start = text.len() - text.trim_start().len();
            let (line, column) = line_column(text, start);
            Err(decode_error(
                "expected a JSON object",
                text,
                line,
                column,
                side,
            ))
        }
        Err(err) => {
            let line = err.line();
            let column = err.column();
            let raw = err.to_string();
            let suffix = format!(" at line {} column {}", line, column);
            let reason = raw.strip_suffix(&suffix).unwrap_or(&raw);
            Err(decode_error(reason, text, line, column, side))
        }
    }
}

/// True when source text should be replaced by the default reference mapping.
pub fn is_blank_source(text: &str) -> bool {
    text.is_empty() || text == "\n"
}

/// Parse source-side text, falling back to the stored default reference
/// mapping for `mode` when the text is blank.
pub fn parse_source(text: &str, references: &ReferenceStore, mode: Mode) -> Result<Mapping> {
    if is_blank_source(text) {
        debug!("Source text is blank, loading default {} reference", mode);
        return references.load(mode);
    }
    parse_mapping(text, Side::Source)
}

/// Recover a [`DecoderErrorLocation`] from decoder message text such as
/// `expected value: line 2 column 1 (char 2)-F`.
///
/// # Errors
///
/// Returns `Error::UnexpectedErrorMessage` when the markers are missing.
pub fn parse_error_message(message: &str) -> Result<DecoderErrorLocation> {
    let unexpected = || Error::UnexpectedErrorMessage {
        message: message.to_string(),
    };

    let captures = LOCATION_PATTERN.captures(message).ok_or_else(unexpected)?;
    let number = |index: usize| -> Result<usize> {
        captures[index].parse::<usize>().map_err(|_| unexpected())
    };
    let side = captures[4]
        .chars()
        .next()
        .and_then(Side::from_tag)
        .ok_or_else(unexpected)?;

    Ok(DecoderErrorLocation {
        line: number(1)?,
        column: number(2)?,
        offset: number(3)?,
        side,
    })
}

fn decode_error(reason: &str, text: &str, line: usize, column: usize, side: Side) -> Error {
    let offset = char_offset(text, line, column);
    Error::Decode {
        message: format!(
            "{}: line {} column {} (char {})-{}",
            reason,
            line,
            column,
            offset,
            side.tag()
        ),
        location: DecoderErrorLocation {
            line,
            column,
            offset,
            side,
        },
    }
}

/// Character offset of a one-based (line, byte column) position.
fn char_offset(text: &str, line: usize, column: usize) -> usize {
    let mut byte = 0;
    for (index, segment) in text.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            byte += column.saturating_sub(1).min(segment.len());
            break;
        }
        byte += segment.len();
    }

    let mut boundary = byte.min(text.len());
    while !text.is_char_boundary(boundary) {
        boundary -= 1;
    }
    text[..boundary].chars().count()
}

/// One-based line and column of a byte index.
fn line_column(text: &str, byte: usize) -> (usize, usize) {
    let before = &text[..byte];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    (line, before[line_start..].chars().count() + 1)
}
