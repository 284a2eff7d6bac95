//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `json-filler` command-line tool. Each subcommand is defined in its own
//! file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct (or a subcommand enum) derived using `clap`.
//! - An `execute` function that takes the parsed arguments and the data
//!   layout and calls into the `json_filler` library.
//!
//! Library errors are converted to user-facing text here, through
//! [`json_filler::feedback`], so every command reports failures the same way.

pub mod dates;
pub mod fill;
pub mod init;
pub mod preset;
pub mod sage;
pub mod table;
pub mod window;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use json_filler::error::Error;
use json_filler::feedback::{excerpt, feedback_for, side_label};
use json_filler::mapping::Side;

/// Read a text input; `-` reads standard input.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read standard input")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Print the result to stdout or write it to `output`.
pub(crate) fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, format!("{}\n", text))
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}

/// Convert a library error into a user-facing error.
///
/// `inputs` holds the text of each side so decode errors can show the
/// offending line.
pub(crate) fn report(err: Error, inputs: &[(Side, &str)]) -> anyhow::Error {
    let feedback = feedback_for(&err);
    if let Some(location) = feedback.highlight {
        let text = inputs
            .iter()
            .find(|(side, _)| *side == location.side)
            .map(|(_, text)| *text);
        if let Some(snippet) = text.and_then(|text| excerpt(text, &location)) {
            eprintln!("{}:", side_label(location.side));
            eprintln!("{}", snippet);
        }
    }
    log::debug!("{:?}", err);
    anyhow::anyhow!(feedback.message)
}
