//! Calendar-date helpers
//!
//! Two fixed text formats are recognised:
//!
//! - bare date: `YYYY-MM-DD`
//! - timestamp: `YYYY-MM-DDTHH:MM:SS.ffffff` (one to six fraction digits)
//!
//! The classifiers check both the shape and that the text names a real
//! calendar date/time; anything else, including non-string JSON values, is
//! simply "not a date". The relative-date calculator turns day offsets into a
//! [`DateBundle`].

use std::sync::LazyLock;

use chrono::{Local, Months, NaiveDate, NaiveDateTime, TimeDelta};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

static BARE_DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

static TIMESTAMP_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{1,6}$")
        .expect("timestamp pattern is valid")
});

/// True for `YYYY-MM-DD` text naming a real date.
pub fn is_bare_date(text: &str) -> bool {
    BARE_DATE_SHAPE.is_match(text) && NaiveDate::parse_from_str(text, DATE_FORMAT).is_ok()
}

/// True for `YYYY-MM-DDTHH:MM:SS.ffffff` text naming a real instant.
pub fn is_timestamp(text: &str) -> bool {
    TIMESTAMP_SHAPE.is_match(text) && NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).is_ok()
}

/// [`is_timestamp`] over a JSON value; false for non-strings.
pub fn is_timestamp_value(value: &Value) -> bool {
    value.as_str().is_some_and(is_timestamp)
}

/// Date portion of timestamp text. Callers check [`is_timestamp`] first.
pub fn truncate_timestamp(text: &str) -> String {
    text.split_once('T')
        .map_or(text, |(date, _)| date)
        .to_string()
}

/// Day offsets from today, one per computed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateOffsets {
    pub date_1: i64,
    pub date_2: i64,
    pub date_3: i64,
    pub std: i64,
}

impl DateOffsets {
    /// Names accepted by [`DateOffsets::with_offset`].
    pub const KEYS: [&'static str; 4] = ["date_1", "date_2", "date_3", "std"];

    pub fn new(date_1: i64, date_2: i64, date_3: i64, std: i64) -> Self {
        Self {
            date_1,
            date_2,
            date_3,
            std,
        }
    }

    /// Copy with one offset replaced by name.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownDateKey` for a name outside [`Self::KEYS`].
    pub fn with_offset(self, key: &str, days: i64) -> Result<Self> {
        let mut updated = self;
        match key {
            "date_1" => updated.date_1 = days,
            "date_2" => updated.date_2 = days,
            "date_3" => updated.date_3 = days,
            "std" => updated.std = days,
            _ => {
                return Err(Error::UnknownDateKey {
                    key: key.to_string(),
                })
            }
        }
        Ok(updated)
    }

    /// Compute the bundle relative to the local current date.
    pub fn compute(&self) -> Result<DateBundle> {
        self.compute_from(Local::now().date_naive())
    }

    /// Compute the bundle relative to `today`.
    ///
    /// `next_std` is one calendar month after `std`, clamped to the last day
    /// of the target month.
    ///
    /// # Errors
    ///
    /// Returns `Error::DateOutOfRange` if an offset leaves the calendar.
    pub fn compute_from(&self, today: NaiveDate) -> Result<DateBundle> {
        let std = shift(today, self.std)?;
        let next_std = std
            .checked_add_months(Months::new(1))
            .ok_or(Error::DateOutOfRange { offset: self.std })?;

        Ok(DateBundle {
            date_1: format_date(shift(today, self.date_1)?),
            date_2: format_date(shift(today, self.date_2)?),
            date_3: format_date(shift(today, self.date_3)?),
            std: format_date(std),
            next_std: format_date(next_std),
        })
    }
}

fn shift(today: NaiveDate, days: i64) -> Result<NaiveDate> {
    TimeDelta::try_days(days)
        .and_then(|delta| today.checked_add_signed(delta))
        .ok_or(Error::DateOutOfRange { offset: days })
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// One of the five computed dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateSlot {
    Date1,
    Date2,
    Date3,
    Std,
    NextStd,
}

/// Five date strings, normally computed from [`DateOffsets`] but editable by
/// the user before use.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateBundle {
    pub date_1: String,
    pub date_2: String,
    pub date_3: String,
    pub std: String,
    pub next_std: String,
}

impl DateBundle {
    pub fn get(&self, slot: DateSlot) -> &str {
        match slot {
            DateSlot::Date1 => &self.date_1,
            DateSlot::Date2 => &self.date_2,
            DateSlot::Date3 => &self.date_3,
            DateSlot::Std => &self.std,
            DateSlot::NextStd => &self.next_std,
        }
    }

    /// Copy with one slot replaced.
    pub fn with(mut self, slot: DateSlot, value: impl Into<String>) -> Self {
        let value = value.into();
        match slot {
            DateSlot::Date1 => self.date_1 = value,
            DateSlot::Date2 => self.date_2 = value,
            DateSlot::Date3 => self.date_3 = value,
            DateSlot::Std => self.std = value,
            DateSlot::NextStd => self.next_std = value,
        }
        self
    }
}
