//! Line-oriented input parsing and pattern-based calendar date utilities.
//!
//! Two independent halves:
//!
//! - [`input`] reads one line from any [`std::io::BufRead`] source and turns it
//!   into a string, `i32`, `char` or `f64`, failing fast with [`InputError`].
//!   [`console`] layers interactive prompting and retries on top of it.
//! - [`CalendarDate`] plus the functions in [`convert`] parse, format, reformat
//!   and validate dates against letter patterns such as `dd/MM/yyyy`, and
//!   [`DateRange`] generates random dates.

mod consts;
mod prelude;
mod range;
mod types;

pub mod console;
pub mod convert;
pub mod input;
pub mod locale;
pub mod pattern;

pub use consts::*;
pub use convert::{
    Resolution, format_date, format_date_in, is_valid_date, is_valid_date_with, parse_date,
    parse_date_in, parse_date_lenient, parse_date_lenient_in, parse_date_or_sentinel,
    reformat_date_string, reformat_date_string_in,
};
pub use input::InputError;
pub use locale::Locale;
pub use pattern::Pattern;
pub use range::{DateRange, RangeError, generate_random_date, generate_random_date_inclusive};
pub use types::{Day, Month, Year, days_in_month, is_leap_year};

use crate::prelude::*;
use chrono::{Datelike, NaiveDate, Weekday};
use std::str::FromStr;

/// Offset between chrono's day count from 0001-01-01 (day 1) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// A day on the proleptic Gregorian calendar, years 1 through 9999.
///
/// Every value denotes a date that exists: the day is validated against the
/// month length of its year. Displays as ISO 8601 (`yyyy-MM-dd`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateParseError {
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[display(fmt = "Expected {expected} at position {position}")]
    Mismatch { position: usize, expected: String },
    #[display(fmt = "Unparsed text after date: {_0:?}")]
    TrailingInput(String),
    #[display(fmt = "Pattern has no {_0} field")]
    MissingField(&'static str),
    #[display(fmt = "{date} is a {actual}, not a {parsed}")]
    WeekdayMismatch {
        date: CalendarDate,
        parsed: Weekday,
        actual: Weekday,
    },
    #[display(fmt = "Date is outside years 1-{}", MAX_YEAR)]
    OutOfRange,
}

impl std::error::Error for DateParseError {}

impl CalendarDate {
    /// Fallback returned by [`parse_date_or_sentinel`]: 1900-01-01.
    pub const SENTINEL: Self = Self {
        year: Year::new_const(1900),
        month: Month::new_const(1),
        day: Day::new_const(1),
    };

    /// Creates a date, rejecting any day that does not exist in its month.
    ///
    /// # Errors
    /// Returns the `InvalidYear`, `InvalidMonth` or `InvalidDay` variant of
    /// [`DateParseError`] for the first component that is out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from already-validated components.
    ///
    /// # Errors
    /// Returns `DateParseError::InvalidDay` if `day` is past the end of `month`.
    pub fn from_parts(year: Year, month: Month, day: Day) -> Result<Self, DateParseError> {
        let day = Day::new(day.get(), year, month)?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    pub fn weekday(&self) -> Weekday {
        self.to_naive().weekday()
    }

    pub fn to_naive(self) -> NaiveDate {
        // Every CalendarDate is a valid chrono date; the fallback is unreachable.
        NaiveDate::from_ymd_opt(
            i32::from(self.year()),
            u32::from(self.month()),
            u32::from(self.day()),
        )
        .unwrap_or(NaiveDate::MIN)
    }

    /// Days since 1970-01-01 (negative before it).
    pub fn to_epoch_day(self) -> i64 {
        i64::from(self.to_naive().num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
    }

    /// Inverse of [`CalendarDate::to_epoch_day`].
    ///
    /// # Errors
    /// Returns `DateParseError::OutOfRange` if the day falls outside years 1-9999.
    pub fn from_epoch_day(epoch_day: i64) -> Result<Self, DateParseError> {
        let days_from_ce = epoch_day
            .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
            .and_then(|d| i32::try_from(d).ok())
            .ok_or(DateParseError::OutOfRange)?;
        NaiveDate::from_num_days_from_ce_opt(days_from_ce)
            .ok_or(DateParseError::OutOfRange)
            .and_then(Self::try_from)
    }

    /// The following day, or `None` after 9999-12-31.
    pub fn succ(self) -> Option<Self> {
        self.to_naive().succ_opt().and_then(|d| Self::try_from(d).ok())
    }

    /// The preceding day, or `None` before 0001-01-01.
    pub fn pred(self) -> Option<Self> {
        self.to_naive().pred_opt().and_then(|d| Self::try_from(d).ok())
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.to_naive()
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = DateParseError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        let year = u16::try_from(date.year()).map_err(|_| DateParseError::OutOfRange)?;
        if year == 0 || year > MAX_YEAR {
            return Err(DateParseError::OutOfRange);
        }
        // chrono guarantees month 1-12 and day 1-31
        Self::new(year, date.month() as u8, date.day() as u8)
    }
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    /// Parses ISO 8601 extended dates (`yyyy-MM-dd`), strictly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateParseError::EmptyInput);
        }
        parse_date(trimmed, USA)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
