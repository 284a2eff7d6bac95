//! # JSON Filler Library
//!
//! This library reconciles key/value records. It merges a destination JSON
//! record with a source record, applies user-supplied override values, and
//! converts untyped values from flat `KEY=VALUE` text or spreadsheets into
//! the types implied by a reference record. It is used by the `json-filler`
//! command-line tool but holds no terminal or UI logic of its own.
//!
//! ## Quick Example
//!
//! ```
//! use json_filler::mapping::Side;
//! use json_filler::merge::merge;
//! use json_filler::overrides::{apply_overrides, OverrideRules};
//! use json_filler::parse::parse_mapping;
//! use json_filler::export::export;
//!
//! let destination = parse_mapping(r#"{"PRODUCT_TYPE": "Common", "ID": 1}"#, Side::Destination).unwrap();
//! let source = parse_mapping(r#"{"ID": 2, "EXTRA": true}"#, Side::Source).unwrap();
//!
//! let merged = merge(&destination, &source);
//! let rules = OverrideRules::builder().product_type("Kvk").build();
//! let result = apply_overrides(&merged, &rules, true);
//!
//! assert_eq!(export(&result), "{\"PRODUCT_TYPE\": \"Kvk\",\n \"ID\": 2}");
//! ```
//!
//! ## Core Concepts
//!
//! - **Mappings (`mapping`)**: typed and untyped insertion-ordered records,
//!   plus the reference schema used as a type oracle.
//! - **Parsing (`parse`, `flat`, `table`)**: JSON object text, flat
//!   `KEY=VALUE` text and two-column spreadsheets.
//! - **Reconciliation (`merge`, `overrides`)**: key-preserving merge followed
//!   by a fixed-priority override pass.
//! - **Coercion (`coerce`)**: raw strings to the types of a reference.
//! - **Dates (`dates`)**: date/timestamp classification and relative dates.
//! - **Export (`export`)**: one-entry-per-line JSON text.
//! - **Persistence (`reference`, `settings`, `defaults`)**: default reference
//!   documents, presets, date offsets and window settings.
//!
//! ## Execution Flow
//!
//! [`pipeline::fill`] runs parse → merge → overrides → export.
//! [`pipeline::convert_flat`] and [`pipeline::convert_table`] run
//! parse → coerce → export. [`feedback`] turns any [`error::Error`] into a
//! message for the user.

pub mod coerce;
pub mod dates;
pub mod defaults;
pub mod error;
pub mod export;
pub mod feedback;
pub mod flat;
pub mod mapping;
pub mod merge;
pub mod overrides;
pub mod parse;
pub mod pipeline;
pub mod reference;
pub mod settings;
pub mod table;

#[cfg(test)]
mod mapping_proptest;
