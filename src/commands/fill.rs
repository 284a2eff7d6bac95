//! Fill command implementation
//!
//! Merges a source JSON record into a destination record, applies override
//! values and prints the exported result. Override values come from a saved
//! preset, from individual flags, or both (flags win). They only apply in
//! mono mode; the double workflow runs with an empty rule set.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use json_filler::dates::{DateBundle, DateSlot};
use json_filler::defaults::DataLayout;
use json_filler::mapping::{Mode, Side};
use json_filler::overrides::{OverrideRules, OverrideRulesBuilder, RuleKey};
use json_filler::pipeline::{fill, FillOptions};
use json_filler::settings::FillerSettingsHandler;
use log::warn;

use super::{emit, read_input, report};

/// Arguments for the fill command
#[derive(Args, Debug)]
pub struct FillArgs {
    /// JSON record whose keys are kept (`-` for stdin)
    #[arg(short, long, value_name = "PATH")]
    pub destination: PathBuf,

    /// JSON record supplying values; defaults to the mode's reference
    #[arg(short, long, value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Product workflow (mono or double)
    #[arg(short, long, default_value = "mono")]
    pub mode: Mode,

    /// Saved preset to take override values from
    #[arg(short, long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Override for PRODUCT_TYPE
    #[arg(long, value_name = "VALUE")]
    pub product_type: Option<String>,

    /// Override for CONTACT_ID
    #[arg(long, value_name = "VALUE")]
    pub contact_id: Option<String>,

    /// Override for ACCOUNT_NUMBER
    #[arg(long, value_name = "VALUE")]
    pub account_number: Option<String>,

    /// Override for CONTRACT_NUMBER
    #[arg(long, value_name = "VALUE")]
    pub contract_number: Option<String>,

    /// Override for COMMUNICATION_TYPE
    #[arg(long, value_name = "VALUE")]
    pub communication_type: Option<String>,

    /// Compute override dates from the saved date offsets
    #[arg(long)]
    pub calculate_dates: bool,

    /// Override for DATE1 aliases
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date1: Option<String>,

    /// Override for DATE2 aliases
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date2: Option<String>,

    /// Override for DATE3 aliases
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date3: Option<String>,

    /// Override for STD aliases
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub std: Option<String>,

    /// Override for NEXT_STD aliases
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub next_std: Option<String>,

    /// Keep date-time values instead of truncating them to dates
    #[arg(long)]
    pub keep_timestamps: bool,

    /// Write the result to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl FillArgs {
    fn field_overrides(&self) -> [(RuleKey, Option<&String>); 5] {
        [
            (RuleKey::ProductType, self.product_type.as_ref()),
            (RuleKey::ContactId, self.contact_id.as_ref()),
            (RuleKey::AccountNumber, self.account_number.as_ref()),
            (RuleKey::ContractNumber, self.contract_number.as_ref()),
            (RuleKey::CommunicationType, self.communication_type.as_ref()),
        ]
    }

    fn date_overrides(&self) -> [(DateSlot, Option<&String>); 5] {
        [
            (DateSlot::Date1, self.date1.as_ref()),
            (DateSlot::Date2, self.date2.as_ref()),
            (DateSlot::Date3, self.date3.as_ref()),
            (DateSlot::Std, self.std.as_ref()),
            (DateSlot::NextStd, self.next_std.as_ref()),
        ]
    }

    fn has_overrides(&self) -> bool {
        self.preset.is_some()
            || self.calculate_dates
            || self.field_overrides().iter().any(|(_, v)| v.is_some())
            || self.date_overrides().iter().any(|(_, v)| v.is_some())
    }
}

/// Execute the fill command
pub fn execute(args: FillArgs, layout: &DataLayout) -> Result<()> {
    let destination = read_input(&args.destination)?;
    let source = match &args.source {
        Some(path) => read_input(path)?,
        None => String::new(),
    };

    let rules = match args.mode {
        Mode::Mono => build_rules(&args, layout)?,
        Mode::Double => {
            if args.has_overrides() {
                warn!("Override values are ignored in double mode");
            }
            OverrideRules::empty()
        }
    };
    let options = FillOptions::new(args.mode)
        .with_rules(rules)
        .with_convert_timestamps(!args.keep_timestamps);

    let result = fill(&destination, &source, &options, &layout.references()).map_err(|err| {
        report(
            err,
            &[(Side::Destination, &destination), (Side::Source, &source)],
        )
    })?;

    emit(&result, args.output.as_deref())
}

fn build_rules(args: &FillArgs, layout: &DataLayout) -> Result<OverrideRules> {
    let settings = if args.preset.is_some() || args.calculate_dates {
        Some(FillerSettingsHandler::open(layout.filler_settings()).map_err(|e| report(e, &[]))?)
    } else {
        None
    };

    let mut builder = match (&args.preset, &settings) {
        (Some(name), Some(settings)) => settings
            .preset(Mode::Mono, name)
            .map_err(|e| report(e, &[]))?
            .rules(),
        _ => OverrideRulesBuilder::default(),
    };
    for (rule, value) in args.field_overrides() {
        if let Some(value) = value {
            builder = builder.value(rule, value);
        }
    }

    let mut dates = match &settings {
        Some(settings) if args.calculate_dates => settings
            .date_offsets(Mode::Mono)
            .compute()
            .map_err(|e| report(e, &[]))?,
        _ => DateBundle::default(),
    };
    let mut any_dates = args.calculate_dates;
    for (slot, value) in args.date_overrides() {
        if let Some(value) = value {
            dates = dates.with(slot, value.as_str());
            any_dates = true;
        }
    }
    if any_dates {
        builder = builder.dates(dates);
    }

    Ok(builder.build())
}
