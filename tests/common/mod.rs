//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_file("dest.json", records::DESTINATION);
//!     fixture.command().arg("fill").arg("-d").arg("dest.json").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use json_filler::defaults::{DataLayout, DATA_DIR_ENV};
use json_filler::settings::{FillerSettings, JsonStore, WindowSettings};
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::records;
    pub use super::TestFixture;
}

/// JSON records used across tests.
#[allow(dead_code)]
pub mod records {
    pub const DESTINATION: &str = r#"{
    "CONTACT_ID": "0",
    "PRODUCT_TYPE": "Common",
    "DATE1": "2023-01-01",
    "OPENED_AT": "2023-05-06T07:08:09.123",
    "AMOUNT": 0
}"#;

    pub const SOURCE: &str = r#"{
    "CONTACT_ID": "55",
    "AMOUNT": 250,
    "EXTRA": "ignored"
}"#;

    /// Missing comma after the first entry: decode error on line 3.
    pub const BROKEN: &str = "{\n    \"A\": 1\n    \"B\": 2\n}";

    pub const FLAT: &str = "CONTACT_ID=77\nAMOUNT=12.5\nIS_ACTIVE=yes\nTAGS=a, b\n";
}

/// A temporary working directory with an initialised data directory.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a fixture whose data directory holds default settings and
    /// the built-in reference documents.
    pub fn new() -> Self {
        let fixture = Self::bare();
        let layout = fixture.layout();
        JsonStore::new(layout.window_settings())
            .save(&WindowSettings::default())
            .expect("Failed to write window settings");
        JsonStore::new(layout.filler_settings())
            .save(&FillerSettings::default())
            .expect("Failed to write filler settings");
        layout
            .references()
            .seed(true)
            .expect("Failed to seed references");
        fixture
    }

    /// Create a fixture with an empty data directory.
    pub fn bare() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Copy a file from `tests/testdata` into the temp directory.
    #[allow(dead_code)]
    pub fn with_testdata(self, name: &str) -> Self {
        let source = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("testdata")
            .join(name);
        self.temp_dir
            .child(name)
            .write_file(&source)
            .expect("Failed to copy test data");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.temp_dir.path().join("data")
    }

    pub fn layout(&self) -> DataLayout {
        DataLayout::new(self.data_dir())
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// A `json-filler` command running in the temp directory against the
    /// fixture's data directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("json-filler");
        cmd.current_dir(self.path())
            .env(DATA_DIR_ENV, self.data_dir())
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
