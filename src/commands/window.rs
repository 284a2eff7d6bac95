//! # Window Command Implementation
//!
//! Shows or changes the persisted window settings. Only the fields given to
//! `set` change; the rest keep their stored values.

use anyhow::Result;
use clap::{Args, Subcommand};
use json_filler::defaults::DataLayout;
use json_filler::settings::{AppearanceMode, WindowSettingsHandler, WindowSettingsUpdate};

use super::report;

#[derive(Subcommand, Debug)]
pub enum WindowCommand {
    /// Print the current window settings
    Show,
    /// Change window settings
    Set(SetArgs),
}

/// Arguments for the window set command
#[derive(Args, Debug)]
pub struct SetArgs {
    #[arg(long)]
    pub title: Option<String>,

    /// Window size, as WIDTHxHEIGHT
    #[arg(long, value_name = "WxH")]
    pub geometry: Option<String>,

    /// Minimum window size, as WIDTHxHEIGHT
    #[arg(long, value_name = "WxH")]
    pub minsize_geometry: Option<String>,

    /// dark, light or system
    #[arg(long, value_name = "MODE")]
    pub appearance_mode: Option<AppearanceMode>,

    #[arg(long, value_name = "THEME")]
    pub color_theme: Option<String>,
}

impl From<SetArgs> for WindowSettingsUpdate {
    fn from(args: SetArgs) -> Self {
        WindowSettingsUpdate {
            title: args.title,
            geometry: args.geometry,
            minsize_geometry: args.minsize_geometry,
            appearance_mode: args.appearance_mode,
            color_theme: args.color_theme,
        }
    }
}

/// Execute a window subcommand
pub fn execute(command: WindowCommand, layout: &DataLayout) -> Result<()> {
    let mut settings =
        WindowSettingsHandler::open(layout.window_settings()).map_err(|e| report(e, &[]))?;

    let current = match command {
        WindowCommand::Show => settings.current(),
        WindowCommand::Set(args) => settings
            .update(&WindowSettingsUpdate::from(args))
            .map_err(|e| report(e, &[]))?,
    };
    println!("{}", serde_json::to_string_pretty(current)?);
    Ok(())
}
