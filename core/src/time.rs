use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Calendar-day identifier, rendered as `YYYY-MM-DD` so lexical and
/// chronological order agree.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Day on which `at` falls in the time zone `tz`.
    pub fn from_timestamp<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> Self {
        Self(at.with_timezone(tz).date_naive())
    }

    /// Day on which `at` falls in the local time zone.
    pub fn local(at: &DateTime<Utc>) -> Self {
        Self::from_timestamp(at, &Local)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(s.trim(), DAY_FORMAT)
            .map_err(|e| anyhow!("Invalid day '{}': {}", s, e))?;
        Ok(Self(date))
    }
}

impl TryFrom<String> for DayKey {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DayKey> for String {
    fn from(day: DayKey) -> Self {
        day.to_string()
    }
}

/// Resolves a day argument relative to `today`.
///
/// Accepts `today`/`tod`, `yesterday`/`yest`, `-Nd` and `YYYY-MM-DD`.
pub fn parse_day(input: &str, today: NaiveDate) -> Result<DayKey> {
    let input = input.trim();
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(DayKey(today)),
        "yesterday" | "yest" => return days_before(today, 1, input),
        _ => {}
    }

    if let Some(rest) = input.strip_prefix('-') {
        if let Some(num_str) = rest.strip_suffix('d') {
            let count: i64 = num_str
                .parse()
                .map_err(|_| anyhow!("Invalid relative day: {}", input))?;
            return days_before(today, count, input);
        }
    }

    input.parse()
}

fn days_before(today: NaiveDate, count: i64, input: &str) -> Result<DayKey> {
    Duration::try_days(count)
        .and_then(|delta| today.checked_sub_signed(delta))
        .map(DayKey)
        .ok_or_else(|| anyhow!("Relative day out of range: {}", input))
}

/// Parses a local `YYYY-MM-DD HH:MM[:SS]` timestamp into UTC.
pub fn parse_local_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M"))
        .map_err(|_| anyhow!("Could not parse timestamp: {}", input))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| anyhow!("Timestamp does not exist in the local time zone: {}", input))
}
