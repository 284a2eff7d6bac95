//! Dates command implementation
//!
//! Shows the saved day offsets of a mode and the dates they produce.
//! `--set date_2=14` changes an offset before showing it.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use json_filler::dates::{DateBundle, DateOffsets, DATE_FORMAT};
use json_filler::defaults::DataLayout;
use json_filler::mapping::Mode;
use json_filler::settings::FillerSettingsHandler;

use super::report;

/// Arguments for the dates command
#[derive(Args, Debug)]
pub struct DatesArgs {
    /// Mode whose offsets are shown or changed
    #[arg(short, long, default_value = "mono")]
    pub mode: Mode,

    /// Change an offset, as NAME=DAYS (date_1, date_2, date_3 or std)
    #[arg(long = "set", value_name = "NAME=DAYS", value_parser = parse_assignment)]
    pub set: Vec<(String, i64)>,

    /// Compute dates relative to this day instead of today
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_day)]
    pub today: Option<NaiveDate>,
}

fn parse_assignment(raw: &str) -> std::result::Result<(String, i64), String> {
    let (name, days) = raw
        .split_once('=')
        .ok_or_else(|| format!("'{}' must look like NAME=DAYS", raw))?;
    let days = days
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("'{}' is not a whole number of days", days.trim()))?;
    Ok((name.trim().to_string(), days))
}

fn parse_day(raw: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|err| format!("{}: {}", raw, err))
}

/// Execute the dates command
pub fn execute(args: DatesArgs, layout: &DataLayout) -> Result<()> {
    let mut settings =
        FillerSettingsHandler::open(layout.filler_settings()).map_err(|e| report(e, &[]))?;

    if !args.set.is_empty() {
        let updates = args.set.iter().map(|(name, days)| (name.as_str(), *days));
        settings
            .set_date_offsets(args.mode, updates)
            .map_err(|e| report(e, &[]))?;
        log::info!("Updated {} {} date offset(s)", args.set.len(), args.mode);
    }

    let offsets = settings.date_offsets(args.mode);
    let dates = match args.today {
        Some(today) => offsets.compute_from(today),
        None => offsets.compute(),
    }
    .map_err(|e| report(e, &[]))?;

    print!("{}", render(args.mode, &offsets, &dates));
    Ok(())
}

fn render(mode: Mode, offsets: &DateOffsets, dates: &DateBundle) -> String {
    let mut out = format!("Offsets ({}):\n", mode);
    let values = [offsets.date_1, offsets.date_2, offsets.date_3, offsets.std];
    for (name, days) in DateOffsets::KEYS.iter().zip(values) {
        out.push_str(&format!("  {:<8} {:+}\n", name, days));
    }
    out.push_str("Dates:\n");
    for (name, date) in [
        ("DATE1", &dates.date_1),
        ("DATE2", &dates.date_2),
        ("DATE3", &dates.date_3),
        ("STD", &dates.std),
        ("NEXT_STD", &dates.next_std),
    ] {
        out.push_str(&format!("  {:<8} {}\n", name, date));
    }
    out
}
