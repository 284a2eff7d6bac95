//! # Error Handling
//!
//! This module defines the centralized error type for the `json-filler`
//! engine. It uses the `thiserror` library to build a single `Error` enum
//! covering every failure the engine can report, each variant carrying the
//! context a caller needs to turn it into a message for the user.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Parse failures carry a
//!   [`DecoderErrorLocation`] so the caller can point at the offending
//!   character in the input it came from.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! The engine fails fast: no function in this crate retries or silently
//! recovers from an error. Translation to display text lives in
//! [`crate::feedback`].

use std::path::PathBuf;

use thiserror::Error;

use crate::parse::DecoderErrorLocation;

/// Main error type for json-filler operations
#[derive(Error, Debug)]
pub enum Error {
    /// Structured text could not be decoded into a mapping.
    ///
    /// `message` is the raw decoder message with the side tag (`-T` or
    /// `-F`) appended; `location` is the same information in parsed form.
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        location: DecoderErrorLocation,
    },

    /// A decoder message did not contain the expected location markers.
    #[error("Unexpected error message, can't locate it: {message}")]
    UnexpectedErrorMessage { message: String },

    /// A line of flat `KEY=VALUE` text has no `=` separator.
    #[error("Malformed line {line_number}: '{line}' has no '=' separator")]
    MalformedLine { line_number: usize, line: String },

    /// A raw value could not be converted to the type its reference implies.
    #[error("Coercion error: cannot convert value '{value}' of key '{key}' to {expected}")]
    Coercion {
        key: String,
        value: String,
        expected: String,
    },

    /// A tabular input file has an extension the reader does not handle.
    #[error("Unsupported extension for {}: supported extensions are {}", path.display(), supported.join(", "))]
    UnsupportedExtension {
        path: PathBuf,
        supported: Vec<String>,
    },

    /// A tabular input file lacks one or more required column headers.
    #[error("Missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// A file the engine needs does not exist.
    #[error("No such file or directory: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The spreadsheet reader failed to open or read a workbook.
    #[error("Spreadsheet error: {message}")]
    Spreadsheet { message: String },

    /// A preset operation referenced a missing name or duplicated one.
    #[error("Preset error: {message}")]
    Preset { message: String },

    /// A date-offset update named a key that does not exist.
    #[error("No date offset with name: {key}")]
    UnknownDateKey { key: String },

    /// A day offset moved the date outside the representable calendar.
    #[error("Date offset out of range: {offset} days")]
    DateOutOfRange { offset: i64 },

    /// Settings content was readable but not usable.
    #[error("Settings error: {message}")]
    Settings { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON (de)serialization error outside of user-supplied text.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
