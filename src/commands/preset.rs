//! # Preset Command Implementation
//!
//! This module implements the `preset` subcommand, which manages the named
//! override value sets stored in the filler settings.
//!
//! ## Subcommands
//!
//! - **`list`**: Print the preset names of a mode
//! - **`show`**: Print one preset as JSON
//! - **`add`**: Save a new preset (names are unique per mode)
//! - **`delete`**: Remove a preset by name

use anyhow::Result;
use clap::{Args, Subcommand};
use json_filler::defaults::DataLayout;
use json_filler::mapping::Mode;
use json_filler::settings::{FillerSettingsHandler, Preset};

use super::report;

#[derive(Subcommand, Debug)]
pub enum PresetCommand {
    /// List preset names
    List(ListArgs),
    /// Show one preset
    Show(NameArgs),
    /// Save a new preset
    Add(AddArgs),
    /// Delete a preset
    Delete(NameArgs),
}

/// Arguments for the preset list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Mode whose presets are listed
    #[arg(short, long, default_value = "mono")]
    pub mode: Mode,
}

/// Arguments naming one preset
#[derive(Args, Debug)]
pub struct NameArgs {
    /// Preset name
    pub name: String,

    /// Mode the preset belongs to
    #[arg(short, long, default_value = "mono")]
    pub mode: Mode,
}

/// Arguments for the preset add command
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Preset name
    pub name: String,

    /// Mode the preset belongs to
    #[arg(short, long, default_value = "mono")]
    pub mode: Mode,

    #[arg(long, value_name = "VALUE", default_value = "")]
    pub contact_id: String,

    #[arg(long, value_name = "VALUE", default_value = "")]
    pub account_number: String,

    #[arg(long, value_name = "VALUE", default_value = "")]
    pub contract_number: String,

    #[arg(long, value_name = "VALUE", default_value = "")]
    pub product_type: String,

    #[arg(long, value_name = "VALUE", default_value = "")]
    pub communication_type: String,
}

impl From<AddArgs> for Preset {
    fn from(args: AddArgs) -> Self {
        Preset {
            name: args.name,
            contact_id: args.contact_id,
            account_number: args.account_number,
            contract_number: args.contract_number,
            product_type: args.product_type,
            communication_type: args.communication_type,
        }
    }
}

/// Execute a preset subcommand
pub fn execute(command: PresetCommand, layout: &DataLayout) -> Result<()> {
    let mut settings =
        FillerSettingsHandler::open(layout.filler_settings()).map_err(|e| report(e, &[]))?;

    match command {
        PresetCommand::List(args) => {
            let names = settings.preset_names(args.mode);
            if names.is_empty() {
                println!("No presets for {} mode", args.mode);
            }
            for name in names {
                println!("{}", name);
            }
        }
        PresetCommand::Show(args) => {
            let preset = settings
                .preset(args.mode, &args.name)
                .map_err(|e| report(e, &[]))?;
            println!("{}", serde_json::to_string_pretty(preset)?);
        }
        PresetCommand::Add(args) => {
            let mode = args.mode;
            let preset = Preset::from(args);
            let name = preset.name.clone();
            settings
                .add_preset(mode, preset)
                .map_err(|e| report(e, &[]))?;
            println!("Saved preset '{}' ({} mode)", name, mode);
        }
        PresetCommand::Delete(args) => {
            settings
                .delete_preset(args.mode, &args.name)
                .map_err(|e| report(e, &[]))?;
            println!("Deleted preset '{}' ({} mode)", args.name, args.mode);
        }
    }
    Ok(())
}
