//! # JSON Filler CLI
//!
//! This is the binary entry point for the `json-filler` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Installing the logger at the requested level.
//! - Executing the appropriate command and translating library errors into
//!   user-friendly output.
//!
//! The engine itself is defined in the `lib.rs` library crate, so the binary
//! stays a thin shell around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
