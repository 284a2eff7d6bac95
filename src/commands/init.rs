//! Init command implementation
//!
//! Creates the data directory with default window settings, empty filler
//! settings and the built-in reference documents. Existing files are kept
//! unless `--force` is given.

use anyhow::Result;
use clap::Args;
use json_filler::defaults::DataLayout;
use json_filler::settings::{FillerSettings, JsonStore, WindowSettings};

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite existing settings and reference documents
    #[arg(short, long)]
    pub force: bool,
}

/// Execute the init command
pub fn execute(args: InitArgs, layout: &DataLayout) -> Result<()> {
    let mut written = Vec::new();

    let window = JsonStore::new(layout.window_settings());
    if args.force || !window.exists() {
        window.save(&WindowSettings::default())?;
        written.push(window.path().to_path_buf());
    }

    let filler = JsonStore::new(layout.filler_settings());
    if args.force || !filler.exists() {
        filler.save(&FillerSettings::default())?;
        written.push(filler.path().to_path_buf());
    }

    written.extend(layout.references().seed(args.force)?);

    if written.is_empty() {
        println!("Nothing to do: {} is already set up", layout.root().display());
    } else {
        for path in &written {
            println!("Created {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_all_documents() {
        let temp = TempDir::new().unwrap();
        let layout = DataLayout::new(temp.path());
        execute(InitArgs { force: false }, &layout).unwrap();

        assert!(layout.window_settings().exists());
        assert!(layout.filler_settings().exists());
        assert!(layout.references_dir().join("mono.json").exists());
        assert!(layout.references_dir().join("double.json").exists());
    }

    #[test]
    fn test_init_keeps_existing_without_force() {
        let temp = TempDir::new().unwrap();
        let layout = DataLayout::new(temp.path());
        execute(InitArgs { force: false }, &layout).unwrap();
        std::fs::write(layout.window_settings(), "custom").unwrap();

        execute(InitArgs { force: false }, &layout).unwrap();
        assert_eq!(
            std::fs::read_to_string(layout.window_settings()).unwrap(),
            "custom"
        );

        execute(InitArgs { force: true }, &layout).unwrap();
        assert_ne!(
            std::fs::read_to_string(layout.window_settings()).unwrap(),
            "custom"
        );
    }
}
