//! Default locations for json-filler data.
//!
//! All persistent state lives under one data directory:
//!
//! ```text
//! <data-dir>/
//!   settings/window_settings.json
//!   settings/filler_settings.json
//!   references/mono.json
//!   references/double.json
//! ```

use std::path::{Path, PathBuf};

use crate::reference::ReferenceStore;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "JSON_FILLER_DATA";

/// Returns the default data directory.
///
/// Uses the platform-appropriate configuration directory:
/// - Linux: `~/.config/json-filler` (XDG Base Directory)
/// - macOS: `~/Library/Application Support/json-filler`
/// - Windows: `{FOLDERID_RoamingAppData}\json-filler`
///
/// Falls back to `.json-filler` in the current directory if the platform
/// directory cannot be determined.
pub fn default_data_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("json-filler"))
        .unwrap_or_else(|| PathBuf::from(".json-filler"))
}

/// Paths of every document under a data directory.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn window_settings(&self) -> PathBuf {
        self.root.join("settings").join("window_settings.json")
    }

    pub fn filler_settings(&self) -> PathBuf {
        self.root.join("settings").join("filler_settings.json")
    }

    pub fn references_dir(&self) -> PathBuf {
        self.root.join("references")
    }

    pub fn references(&self) -> ReferenceStore {
        ReferenceStore::new(self.references_dir())
    }
}

impl Default for DataLayout {
    fn default() -> Self {
        Self::new(default_data_dir())
    }
}
