//! Integration tests for the reconciliation pipeline through the public
//! library API.

use json_filler::dates::DateOffsets;
use json_filler::defaults::DataLayout;
use json_filler::error::Error;
use json_filler::export::export;
use json_filler::mapping::{Mode, Side};
use json_filler::overrides::OverrideRules;
use json_filler::parse::{parse_error_message, parse_mapping};
use json_filler::pipeline::{convert_flat, fill, resolve_reference, FillOptions};
use json_filler::settings::{FillerSettings, FillerSettingsHandler, JsonStore, Preset};
use tempfile::TempDir;

fn layout(temp: &TempDir) -> DataLayout {
    let layout = DataLayout::new(temp.path());
    layout.references().seed(false).unwrap();
    JsonStore::new(layout.filler_settings())
        .save(&FillerSettings::default())
        .unwrap();
    layout
}

#[test]
fn test_fill_keeps_destination_shape() {
    let temp = TempDir::new().unwrap();
    let layout = layout(&temp);

    let destination = r#"{"B": 1, "A": "x", "C": null}"#;
    let source = r#"{"A": "y", "Z": 3, "C": [1]}"#;
    let text = fill(destination, source, &FillOptions::new(Mode::Mono), &layout.references())
        .unwrap();

    assert_eq!(text, "{\"B\": 1,\n \"A\": \"y\",\n \"C\": [1]}");
}

#[test]
fn test_fill_with_preset_and_dates() {
    let temp = TempDir::new().unwrap();
    let layout = layout(&temp);

    let mut settings = FillerSettingsHandler::open(layout.filler_settings()).unwrap();
    settings
        .add_preset(
            Mode::Mono,
            Preset {
                name: "daily".to_string(),
                contact_id: "7".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
    settings.set_date_offset(Mode::Mono, "std", 30).unwrap();

    let dates = settings
        .date_offsets(Mode::Mono)
        .compute_from(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .unwrap();
    let rules = settings
        .preset(Mode::Mono, "daily")
        .unwrap()
        .rules()
        .dates(dates)
        .build();

    let destination = r#"{"CONTACT_ID": "", "STD": "", "NEXT_STD": "", "UPDATED": "2024-03-04T05:06:07.5"}"#;
    let options = FillOptions::new(Mode::Mono).with_rules(rules);
    let text = fill(destination, "", &options, &layout.references()).unwrap();

    assert_eq!(
        text,
        "{\"CONTACT_ID\": \"7\",\n \"STD\": \"2024-01-31\",\n \"NEXT_STD\": \"2024-02-29\",\n \"UPDATED\": \"2024-03-04\"}"
    );
}

#[test]
fn test_decode_error_round_trips_through_message() {
    let temp = TempDir::new().unwrap();
    let layout = layout(&temp);

    let err = fill("{}", "{\"a\": }", &FillOptions::new(Mode::Mono), &layout.references())
        .unwrap_err();
    let Error::Decode { message, location } = err else {
        panic!("expected a decode error");
    };
    assert_eq!(location.side, Side::Source);
    assert_eq!(parse_error_message(&message).unwrap(), location);
}

#[test]
fn test_export_reparses_to_same_record() {
    let record = parse_mapping(r#"{"n": 1.5, "ok": false, "list": ["a"], "nested": {"k": null}}"#, Side::Source)
        .unwrap();
    let text = export(&record);
    assert_eq!(parse_mapping(&text, Side::Source).unwrap(), record);
}

#[test]
fn test_convert_flat_uses_default_reference_for_blank_text() {
    let temp = TempDir::new().unwrap();
    let layout = layout(&temp);

    let reference = resolve_reference("  \n", Mode::Double, &layout.references()).unwrap();
    let text = convert_flat("PRIMARY_CONTACT_ID=5\nAMOUNT=3\nUNKNOWN=1", &reference).unwrap();
    assert_eq!(text, "{\"PRIMARY_CONTACT_ID\": \"5\",\n \"AMOUNT\": 3}");
}

#[test]
fn test_empty_rules_and_offsets_defaults() {
    assert!(OverrideRules::empty().is_empty());
    assert_eq!(DateOffsets::default(), DateOffsets::new(0, 0, 0, 0));
}
