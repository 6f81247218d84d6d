//! Human-written dates for REST APIs.
//!
//! Accepts simple offsets from today, e.g. `1d` (one day from now), `1w`
//! (one week), `-2M` (two calendar months ago), and plain ISO dates
//! (`YYYY-MM-DD`).

use std::str::FromStr;

use chrono::{DateTime, Months, NaiveDate, NaiveTime, TimeDelta, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use strum_macros::{Display, EnumString};
use tracing::debug;

use crate::error::FieldError;
use crate::traits::Field;

pub const HUMANIZED_DATE_ERROR: &str = "Can't parse humanized date!";

static HUMANIZED_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?P<number>-?[0-9]+)(?P<unit>[dwM])|(?P<iso_date>[0-9]{4}-[0-9]{2}-[0-9]{2}))$")
        .expect("humanized date pattern compiles")
});

/// Offset units understood by [`HumanizedDate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum TimeUnit {
    #[strum(serialize = "d")]
    Days,
    #[strum(serialize = "w")]
    Weeks,
    #[strum(serialize = "M")]
    Months,
}

impl TimeUnit {
    /// `base` shifted by `count` of this unit, `None` on overflow.
    pub fn shift(&self, base: DateTime<Utc>, count: i64) -> Option<DateTime<Utc>> {
        match self {
            TimeUnit::Days => base.checked_add_signed(TimeDelta::try_days(count)?),
            TimeUnit::Weeks => base.checked_add_signed(TimeDelta::try_weeks(count)?),
            TimeUnit::Months => {
                let months = Months::new(u32::try_from(count.unsigned_abs()).ok()?);
                if count < 0 {
                    base.checked_sub_months(months)
                } else {
                    base.checked_add_months(months)
                }
            }
        }
    }
}

fn parse_error() -> FieldError {
    FieldError::Parse(HUMANIZED_DATE_ERROR.to_string())
}

/// Deserialize-only field turning humanized date text into a UTC instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HumanizedDate {
    keep_time: bool,
}

impl HumanizedDate {
    /// Relative dates land on midnight UTC.
    pub fn new() -> Self {
        HumanizedDate { keep_time: false }
    }

    /// Relative dates keep the current time of day.
    pub fn keep_time() -> Self {
        HumanizedDate { keep_time: true }
    }

    /// Parse `value` relative to `now` instead of the system clock.
    pub fn deserialize_at(&self, value: &Value, now: DateTime<Utc>) -> Result<DateTime<Utc>, FieldError> {
        let text = value.as_str().ok_or(FieldError::Type)?;
        let caps = HUMANIZED_DATE_RE.captures(text).ok_or_else(parse_error)?;

        if let Some(iso) = caps.name("iso_date") {
            let date = NaiveDate::parse_from_str(iso.as_str(), "%Y-%m-%d").map_err(|_| parse_error())?;
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }

        let (Some(number), Some(unit)) = (caps.name("number"), caps.name("unit")) else {
            return Err(parse_error());
        };
        let count: i64 = number.as_str().parse().map_err(|_| parse_error())?;
        let unit = TimeUnit::from_str(unit.as_str()).map_err(|_| parse_error())?;

        let base = if self.keep_time {
            now
        } else {
            now.date_naive().and_time(NaiveTime::MIN).and_utc()
        };

        debug!(
            event = "HumanizedDate",
            phase = "Relative",
            count = count,
            unit = %unit,
            base = %base
        );

        unit.shift(base, count).ok_or_else(parse_error)
    }
}

impl Field for HumanizedDate {
    type Input = DateTime<Utc>;
    type Output = DateTime<Utc>;

    fn serialize(&self, _value: &DateTime<Utc>) -> Result<Value, FieldError> {
        Err(FieldError::NotImplemented)
    }

    fn deserialize(&self, value: &Value) -> Result<DateTime<Utc>, FieldError> {
        self.deserialize_at(value, Utc::now())
    }
}
