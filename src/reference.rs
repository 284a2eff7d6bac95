//! Default reference mappings
//!
//! One JSON document per [`Mode`] lives under the references directory
//! (`mono.json`, `double.json`). The engine only reads them; [`seed`] writes
//! the initial documents when a data directory is first set up.
//!
//! [`seed`]: ReferenceStore::seed

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error};
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::mapping::{Mapping, Mode, Side};
use crate::parse::parse_mapping;

/// Read access to the per-mode default reference documents.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    root: PathBuf,
}

impl ReferenceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, mode: Mode) -> PathBuf {
        self.root.join(format!("{}.json", mode))
    }

    /// Load the default reference mapping for `mode`.
    ///
    /// # Errors
    ///
    /// `Error::FileNotFound` when the document is missing, `Error::Decode`
    /// (tagged as source) when it is not a JSON object.
    pub fn load(&self, mode: Mode) -> Result<Mapping> {
        let path = self.path_for(mode);
        let text = fs::read_to_string(&path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                error!("No such file or directory: {}", path.display());
                Error::FileNotFound { path: path.clone() }
            } else {
                Error::Io(err)
            }
        })?;

        let mapping = parse_mapping(&text, Side::Source)?;
        debug!(
            "Loaded {} reference with {} keys from {}",
            mode,
            mapping.len(),
            path.display()
        );
        Ok(mapping)
    }

    /// Write the built-in reference documents for any mode that has none.
    ///
    /// With `overwrite`, existing documents are replaced. Returns the paths
    /// that were written.
    pub fn seed(&self, overwrite: bool) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.root)?;
        let mut written = Vec::new();
        for mode in [Mode::Mono, Mode::Double] {
            let path = self.path_for(mode);
            if path.exists() && !overwrite {
                continue;
            }
            let text = serde_json::to_string_pretty(&builtin_reference(mode))?;
            fs::write(&path, text + "\n")?;
            debug!("Seeded {} reference at {}", mode, path.display());
            written.push(path);
        }
        Ok(written)
    }
}

/// Reference document shipped with the tool.
pub fn builtin_reference(mode: Mode) -> Value {
    match mode {
        Mode::Mono => json!({
            "CONTACT_ID": "",
            "ACCOUNT_NUMBER": "",
            "CONTRACT_NUMBER": "",
            "PRODUCT_TYPE": "Common",
            "COMMUNICATION_TYPE": "Call",
            "DATE1": "",
            "DATE2": "",
            "DATE3": "",
            "STD": "",
            "NEXT_STD": "",
            "AMOUNT": 0,
            "IS_ACTIVE": false,
            "TAGS": []
        }),
        Mode::Double => json!({
            "PRIMARY_CONTACT_ID": "",
            "PRIMARY_ACCOUNT_NUMBER": "",
            "PRIMARY_CONTRACT_NUMBER": "",
            "PRIMARY_PRODUCT_TYPE": "Common",
            "PRIMARY_COMMUNICATION_TYPE": "Call",
            "PRIMARY_ACCOUNT_DATE1": "",
            "PRIMARY_ACCOUNT_DATE2": "",
            "PRIMARY_ACCOUNT_DATE3": "",
            "PRIMARY_ACCOUNT_STD": "",
            "PRIMARY_ACCOUNT_NEXT_STD": "",
            "AMOUNT": 0,
            "IS_ACTIVE": false,
            "TAGS": []
        }),
    }
}
