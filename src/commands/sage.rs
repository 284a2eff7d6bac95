//! Sage command implementation
//!
//! Converts flat `KEY=VALUE` text into a typed JSON record. Value types come
//! from a reference record, or from the mode's default reference when none
//! is given.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use json_filler::defaults::DataLayout;
use json_filler::mapping::{Mode, Side};
use json_filler::pipeline::{convert_flat, resolve_reference};

use super::{emit, read_input, report};

/// Arguments for the sage command
#[derive(Args, Debug)]
pub struct SageArgs {
    /// Flat `KEY=VALUE` text, one entry per line (`-` for stdin)
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// JSON record whose value types drive the conversion
    #[arg(short, long, value_name = "PATH")]
    pub reference: Option<PathBuf>,

    /// Default reference to use when no reference is given
    #[arg(short, long, default_value = "mono")]
    pub mode: Mode,

    /// Write the result to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Execute the sage command
pub fn execute(args: SageArgs, layout: &DataLayout) -> Result<()> {
    let flat = read_input(&args.input)?;
    let reference_text = match &args.reference {
        Some(path) => read_input(path)?,
        None => String::new(),
    };

    let reference = resolve_reference(&reference_text, args.mode, &layout.references())
        .map_err(|err| report(err, &[(Side::Source, &reference_text)]))?;
    let result = convert_flat(&flat, &reference).map_err(|err| report(err, &[]))?;

    emit(&result, args.output.as_deref())
}
