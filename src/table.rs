//! Spreadsheet input
//!
//! Reads the first worksheet of a workbook and collects two columns, located
//! by their header names, into an [`UntypedMapping`]: row `i` contributes
//! `variable_name[i]` → `variable_value[i]`. Every other column is ignored.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{NaiveDateTime, NaiveTime};
use log::{debug, warn};

use crate::dates::{DATE_FORMAT, TIMESTAMP_FORMAT};
use crate::error::{Error, Result};
use crate::mapping::UntypedMapping;

/// Header of the key column.
pub const NAME_COLUMN: &str = "variable_name";
/// Header of the value column.
pub const VALUE_COLUMN: &str = "variable_value";
/// Extensions the reader accepts, lowercase, without the dot.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Check that `path` has a supported spreadsheet extension.
pub fn check_extension(path: &Path) -> Result<()> {
    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));

    if supported {
        Ok(())
    } else {
        Err(Error::UnsupportedExtension {
            path: path.to_path_buf(),
            supported: SUPPORTED_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        })
    }
}

/// Read the name/value columns of a spreadsheet.
///
/// # Errors
///
/// - `Error::UnsupportedExtension` for an unknown extension
/// - `Error::FileNotFound` when the file is missing
/// - `Error::Spreadsheet` when the workbook cannot be read
/// - `Error::MissingColumns` when a required header is absent
pub fn read_table(path: &Path) -> Result<UntypedMapping> {
    check_extension(path)?;
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| Error::Spreadsheet {
        message: format!("failed to open {}: {}", path.display(), e),
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Spreadsheet {
            message: format!("no worksheet found in {}", path.display()),
        })?
        .map_err(|e| Error::Spreadsheet {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    debug!("Read {} rows from {}", rows.len(), path.display());

    rows_to_mapping(&rows)
}

/// Collect the name/value columns of already-stringified rows. The first row
/// is the header.
pub fn rows_to_mapping(rows: &[Vec<String>]) -> Result<UntypedMapping> {
    let header = rows.first().map(Vec::as_slice).unwrap_or_default();
    let position = |name: &str| header.iter().position(|cell| cell.trim() == name);

    let (name_index, value_index) = match (position(NAME_COLUMN), position(VALUE_COLUMN)) {
        (Some(name), Some(value)) => (name, value),
        (name, value) => {
            let mut columns = Vec::new();
            if name.is_none() {
                columns.push(NAME_COLUMN.to_string());
            }
            if value.is_none() {
                columns.push(VALUE_COLUMN.to_string());
            }
            return Err(Error::MissingColumns { columns });
        }
    };

    let mut mapping = UntypedMapping::new();
    for (index, row) in rows.iter().enumerate().skip(1) {
        let name = row.get(name_index).map(String::as_str).unwrap_or_default();
        if name.is_empty() {
            warn!("Skipping row {}: empty {}", index + 1, NAME_COLUMN);
            continue;
        }
        let value = row.get(value_index).cloned().unwrap_or_default();
        mapping.insert(name.to_string(), value);
    }

    Ok(mapping)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        Data::DateTime(value) if value.is_datetime() => value
            .as_datetime()
            .map(format_datetime)
            .unwrap_or_else(|| value.to_string()),
        Data::DateTimeIso(text) => text
            .parse::<NaiveDateTime>()
            .map(format_datetime)
            .unwrap_or_else(|_| text.clone()),
        other => other.to_string(),
    }
}

/// Midnight values are written as bare dates, anything else as a timestamp.
fn format_datetime(value: NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format(DATE_FORMAT).to_string()
    } else {
        value.format(TIMESTAMP_FORMAT).to_string()
    }
}
