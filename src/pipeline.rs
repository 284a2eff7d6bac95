//! End-to-end workflows
//!
//! Each function runs one user action from input text to export text:
//!
//! - [`fill`]: destination + source JSON → merge → overrides → export
//! - [`convert_flat`]: `KEY=VALUE` text + reference → coerce → export
//! - [`convert_table`]: spreadsheet + reference → coerce → export
//!
//! The destination is always parsed before the source, so a failure is
//! reported for the first malformed input in that order.

use std::path::Path;

use log::info;

use crate::coerce::coerce;
use crate::error::Result;
use crate::export::export;
use crate::flat::parse_flat;
use crate::mapping::{Mapping, Mode, ReferenceSchema, Side};
use crate::merge::merge;
use crate::overrides::{apply_overrides, OverrideRules};
use crate::parse::{parse_mapping, parse_source};
use crate::reference::ReferenceStore;
use crate::table::read_table;

/// Options for [`fill`].
#[derive(Debug, Clone)]
pub struct FillOptions {
    pub mode: Mode,
    pub rules: OverrideRules,
    pub convert_timestamps: bool,
}

impl FillOptions {
    /// Options with no override rules and timestamp conversion on.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            rules: OverrideRules::empty(),
            convert_timestamps: true,
        }
    }

    pub fn with_rules(self, rules: OverrideRules) -> Self {
        Self { rules, ..self }
    }

    pub fn with_convert_timestamps(self, convert_timestamps: bool) -> Self {
        Self {
            convert_timestamps,
            ..self
        }
    }
}

/// Fill the destination record from the source record.
///
/// Blank source text (empty or a single newline) selects the default
/// reference mapping of `options.mode`.
pub fn fill(
    destination: &str,
    source: &str,
    options: &FillOptions,
    references: &ReferenceStore,
) -> Result<String> {
    let merged = fill_mapping(destination, source, options, references)?;
    Ok(export(&merged))
}

/// [`fill`] without the final export step.
pub fn fill_mapping(
    destination: &str,
    source: &str,
    options: &FillOptions,
    references: &ReferenceStore,
) -> Result<Mapping> {
    let destination = parse_mapping(destination, Side::Destination)?;
    let source = parse_source(source, references, options.mode)?;
    let merged = merge(&destination, &source);
    let result = apply_overrides(&merged, &options.rules, options.convert_timestamps);
    info!("Filled {} keys ({} mode)", result.len(), options.mode);
    Ok(result)
}

/// Resolve reference text: whitespace-only text selects the default
/// reference of `mode`, anything else is parsed as the source record.
pub fn resolve_reference(text: &str, mode: Mode, references: &ReferenceStore) -> Result<Mapping> {
    if text.trim().is_empty() {
        references.load(mode)
    } else {
        parse_mapping(text, Side::Source)
    }
}

/// Convert flat `KEY=VALUE` text to export text typed after `reference`.
pub fn convert_flat(flat: &str, reference: &Mapping) -> Result<String> {
    let values = parse_flat(flat)?;
    let typed = coerce(&values, &ReferenceSchema::from_mapping(reference))?;
    info!("Converted {} of {} flat entries", typed.len(), values.len());
    Ok(export(&typed))
}

/// Convert a spreadsheet's name/value columns to export text typed after
/// `reference`.
pub fn convert_table(path: &Path, reference: &Mapping) -> Result<String> {
    let values = read_table(path)?;
    let typed = coerce(&values, &ReferenceSchema::from_mapping(reference))?;
    info!(
        "Converted {} of {} table rows from {}",
        typed.len(),
        values.len(),
        path.display()
    );
    Ok(export(&typed))
}
