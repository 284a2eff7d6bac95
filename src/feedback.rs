//! User-facing feedback
//!
//! The engine reports failures as [`Error`] values. This module turns them
//! into a short message for the user plus, for decode errors, the location
//! to highlight in the input that failed. Nothing here is re-raised: an
//! error message whose location cannot be recovered is logged and shown
//! without a highlight.

use log::warn;

use crate::error::Error;
use crate::mapping::Side;
use crate::parse::{parse_error_message, DecoderErrorLocation};
use crate::table::{NAME_COLUMN, SUPPORTED_EXTENSIONS, VALUE_COLUMN};

/// Message plus optional highlight for one failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub highlight: Option<DecoderErrorLocation>,
}

impl Feedback {
    fn plain(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            highlight: None,
        }
    }
}

/// Input field label for a side.
pub fn side_label(side: Side) -> &'static str {
    match side {
        Side::Destination => "1. JSON to fill",
        Side::Source => "2. JSON to take values from",
    }
}

/// Build feedback for an engine error.
pub fn feedback_for(err: &Error) -> Feedback {
    match err {
        Error::Decode { message, .. } => match highlight_from_message(message) {
            Some(location) => Feedback {
                message: format!(
                    "Invalid JSON in '{}' at line {}, column {}",
                    side_label(location.side),
                    location.line,
                    location.column
                ),
                highlight: Some(location),
            },
            None => Feedback::plain(format!("Invalid JSON: {}", message)),
        },
        Error::UnsupportedExtension { .. } => Feedback::plain(format!(
            "Unsupported file extension. Supported extensions: {}",
            SUPPORTED_EXTENSIONS.join(", ")
        )),
        Error::MissingColumns { .. } => Feedback::plain(format!(
            "The table must have two columns named '{}' and '{}'",
            NAME_COLUMN, VALUE_COLUMN
        )),
        Error::FileNotFound { path } => {
            Feedback::plain(format!("File not found: {}", path.display()))
        }
        Error::Coercion {
            key,
            value,
            expected,
        } => Feedback::plain(format!(
            "Value '{}' of '{}' cannot be converted to a {}",
            value, key, expected
        )),
        Error::MalformedLine { line_number, line } => Feedback::plain(format!(
            "Line {} must look like KEY=VALUE: '{}'",
            line_number, line
        )),
        other => Feedback::plain(other.to_string()),
    }
}

/// Recover a highlight location from decoder message text. Unrecognised
/// text is logged and yields `None`.
pub fn highlight_from_message(message: &str) -> Option<DecoderErrorLocation> {
    match parse_error_message(message) {
        Ok(location) => Some(location),
        Err(err) => {
            warn!("{}", err);
            None
        }
    }
}

/// The line containing `location` with a caret under the offending
/// character.
pub fn excerpt(text: &str, location: &DecoderErrorLocation) -> Option<String> {
    let line = text.lines().nth(location.line.checked_sub(1)?)?;
    let before = text
        .chars()
        .take(location.offset)
        .collect::<String>();
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count();
    Some(format!("{}\n{}^", line, " ".repeat(column)))
}
