//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use json_filler::defaults::{default_data_dir, DataLayout};

use crate::commands;

/// JSON Filler - Reconcile JSON records and convert flat or tabular values
#[derive(Parser, Debug)]
#[command(name = "json-filler")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Data directory holding settings and reference documents
    #[arg(long, global = true, value_name = "PATH", env = "JSON_FILLER_DATA")]
    data_dir: Option<PathBuf>,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create default settings and reference documents
    Init(commands::init::InitArgs),

    /// Fill a destination JSON record from a source record
    Fill(commands::fill::FillArgs),

    /// Convert flat KEY=VALUE text to typed JSON
    Sage(commands::sage::SageArgs),

    /// Convert a two-column spreadsheet to typed JSON
    Table(commands::table::TableArgs),

    /// Show or change date offsets and the dates they produce
    Dates(commands::dates::DatesArgs),

    /// Manage override presets
    #[command(subcommand)]
    Preset(commands::preset::PresetCommand),

    /// Show or change window settings
    #[command(subcommand)]
    Window(commands::window::WindowCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let layout = DataLayout::new(self.data_dir.unwrap_or_else(default_data_dir));
        log::debug!("Using data directory {}", layout.root().display());

        match self.command {
            Commands::Init(args) => commands::init::execute(args, &layout),
            Commands::Fill(args) => commands::fill::execute(args, &layout),
            Commands::Sage(args) => commands::sage::execute(args, &layout),
            Commands::Table(args) => commands::table::execute(args, &layout),
            Commands::Dates(args) => commands::dates::execute(args, &layout),
            Commands::Preset(command) => commands::preset::execute(command, &layout),
            Commands::Window(command) => commands::window::execute(command, &layout),
        }
    }
}

/// Install `env_logger`. `RUST_LOG`, when set, takes precedence over the
/// `--log-level` flag.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
