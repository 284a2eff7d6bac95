//! Table command implementation
//!
//! Converts the `variable_name`/`variable_value` columns of a spreadsheet
//! into a typed JSON record.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use json_filler::defaults::DataLayout;
use json_filler::mapping::{Mode, Side};
use json_filler::pipeline::{convert_table, resolve_reference};

use super::{emit, read_input, report};

/// Arguments for the table command
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Spreadsheet to read (xlsx, xlsm, xlsb, xls or ods)
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

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

/// Execute the table command
pub fn execute(args: TableArgs, layout: &DataLayout) -> Result<()> {
    let reference_text = match &args.reference {
        Some(path) => read_input(path)?,
        None => String::new(),
    };

    let reference = resolve_reference(&reference_text, args.mode, &layout.references())
        .map_err(|err| report(err, &[(Side::Source, &reference_text)]))?;
    let result = convert_table(&args.path, &reference).map_err(|err| report(err, &[]))?;

    emit(&result, args.output.as_deref())
}
