//! String/date conversions driven by pattern strings.
//!
//! Strict parsing is the default everywhere. Lenient parsing is only reached
//! through the `_lenient` functions and [`reformat_date_string`]. An empty
//! pattern string stands for [`DEFAULT_PATTERN`] in every function here.

use crate::locale::{Locale, SPANISH};
use crate::pattern::{Pattern, RawFields};
use crate::prelude::*;
use crate::{CalendarDate, DEFAULT_PATTERN, DateParseError, ISO_BASIC, MAX_YEAR};

/// How parsed field values become a calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Reject anything that is not a real calendar day, and any weekday name
    /// that disagrees with the date.
    #[default]
    Strict,
    /// Carry overflowing months and days forward: June 31 becomes July 1,
    /// month 13 becomes January of the next year. Weekday names are ignored.
    Lenient,
}

impl Resolution {
    /// # Errors
    /// Returns `DateParseError::MissingField` if the pattern lacked a year,
    /// month or day, or a range error from the chosen policy.
    pub fn resolve(self, fields: RawFields) -> Result<CalendarDate, DateParseError> {
        let year = fields.year.ok_or(DateParseError::MissingField("year"))?;
        let month = fields.month.ok_or(DateParseError::MissingField("month"))?;
        let day = fields.day.ok_or(DateParseError::MissingField("day"))?;

        match self {
            Self::Strict => {
                let date = CalendarDate::new(year, month, day)?;
                match fields.weekday {
                    Some(parsed) if parsed != date.weekday() => {
                        Err(DateParseError::WeekdayMismatch {
                            date,
                            parsed,
                            actual: date.weekday(),
                        })
                    }
                    _ => Ok(date),
                }
            }
            Self::Lenient => {
                let months = i64::from(year) * 12 + i64::from(month) - 1;
                let year = u16::try_from(months.div_euclid(12))
                    .ok()
                    .filter(|y| (1..=MAX_YEAR).contains(y))
                    .ok_or(DateParseError::OutOfRange)?;
                // rem_euclid(12) + 1 is always 1..=12
                let month = u8::try_from(months.rem_euclid(12) + 1)
                    .map_err(|_| DateParseError::OutOfRange)?;
                let first = CalendarDate::new(year, month, 1)?;
                CalendarDate::from_epoch_day(first.to_epoch_day() + i64::from(day) - 1)
            }
        }
    }
}

impl Pattern {
    /// Parses `text` and resolves it with the given policy.
    ///
    /// # Errors
    /// Any [`DateParseError`] from reading the fields or resolving them.
    pub fn parse(
        &self,
        text: &str,
        locale: &Locale,
        resolution: Resolution,
    ) -> Result<CalendarDate, DateParseError> {
        resolution.resolve(self.parse_fields(text, locale)?)
    }
}

fn parse_with(
    text: &str,
    pattern: &str,
    locale: &Locale,
    resolution: Resolution,
) -> Result<CalendarDate, DateParseError> {
    Pattern::compile(or_default(pattern))?.parse(text, locale, resolution)
}

/// Parses `text` against `pattern`, rejecting dates that do not exist.
///
/// ```
/// use datekit::{CalendarDate, ESP, parse_date};
///
/// let date = parse_date("18/10/2016", ESP).unwrap();
/// assert_eq!(date, CalendarDate::new(2016, 10, 18).unwrap());
/// assert!(parse_date("31/06/2022", ESP).is_err());
/// ```
///
/// # Errors
/// Returns a [`DateParseError`] if the pattern is malformed, the text does not
/// follow it, or the fields name no real calendar day.
pub fn parse_date(text: &str, pattern: &str) -> Result<CalendarDate, DateParseError> {
    parse_date_in(text, pattern, &SPANISH)
}

/// [`parse_date`] with an explicit name table.
///
/// # Errors
/// See [`parse_date`].
pub fn parse_date_in(
    text: &str,
    pattern: &str,
    locale: &Locale,
) -> Result<CalendarDate, DateParseError> {
    parse_with(text, pattern, locale, Resolution::Strict)
}

/// Parses `text` against `pattern`, normalizing impossible days forward.
///
/// ```
/// use datekit::{CalendarDate, ISO_BASIC, parse_date_lenient};
///
/// let date = parse_date_lenient("20220631", ISO_BASIC).unwrap();
/// assert_eq!(date, CalendarDate::new(2022, 7, 1).unwrap());
/// ```
///
/// # Errors
/// Returns a [`DateParseError`] if the pattern is malformed, the text does not
/// follow it, or the normalized date leaves years 1-9999.
pub fn parse_date_lenient(text: &str, pattern: &str) -> Result<CalendarDate, DateParseError> {
    parse_date_lenient_in(text, pattern, &SPANISH)
}

/// [`parse_date_lenient`] with an explicit name table.
///
/// # Errors
/// See [`parse_date_lenient`].
pub fn parse_date_lenient_in(
    text: &str,
    pattern: &str,
    locale: &Locale,
) -> Result<CalendarDate, DateParseError> {
    parse_with(text, pattern, locale, Resolution::Lenient)
}

/// Legacy strict parse that never fails: any error is logged and
/// [`CalendarDate::SENTINEL`] (1900-01-01) comes back instead.
///
/// Prefer [`parse_date`]; the sentinel is indistinguishable from a real
/// 1900-01-01 input.
pub fn parse_date_or_sentinel(text: &str, pattern: &str) -> CalendarDate {
    parse_date(text, pattern).unwrap_or_else(|err| {
        warn!("date {text:?} does not match {pattern:?}, using sentinel: {err}");
        CalendarDate::SENTINEL
    })
}

/// Renders `date` with `pattern`, using Spanish names.
///
/// Rendering itself cannot fail; [`Pattern::format`] is the infallible form
/// for an already compiled pattern.
///
/// ```
/// use datekit::{CalendarDate, format_date};
///
/// let date = CalendarDate::new(2016, 10, 18).unwrap();
/// assert_eq!(format_date(&date, "dd 'de' MMMM 'de' yyyy").unwrap(), "18 de octubre de 2016");
/// assert_eq!(format_date(&date, "").unwrap(), "20161018");
/// ```
///
/// # Errors
/// Returns `DateParseError::InvalidPattern` only if the pattern string does
/// not compile.
pub fn format_date(date: &CalendarDate, pattern: &str) -> Result<String, DateParseError> {
    format_date_in(date, pattern, &SPANISH)
}

/// [`format_date`] with an explicit name table.
///
/// # Errors
/// See [`format_date`].
pub fn format_date_in(
    date: &CalendarDate,
    pattern: &str,
    locale: &Locale,
) -> Result<String, DateParseError> {
    Ok(Pattern::compile(or_default(pattern))?.format(date, locale))
}

/// Converts a date string from one pattern to another.
///
/// Input is parsed leniently,
/// so `"20150229"` in `yyyyMMdd` comes out as March 1st.
///
/// ```
/// use datekit::reformat_date_string;
///
/// let out = reformat_date_string("18/10/2016", "dd/MM/yyyy", "dd-MM-yyyy").unwrap();
/// assert_eq!(out, "18-10-2016");
/// ```
///
/// # Errors
/// Returns a [`DateParseError`] if either pattern is malformed or the input
/// does not follow the input pattern.
pub fn reformat_date_string(
    text: &str,
    input_pattern: &str,
    output_pattern: &str,
) -> Result<String, DateParseError> {
    reformat_date_string_in(text, input_pattern, output_pattern, &SPANISH)
}

/// [`reformat_date_string`] with an explicit name table for both sides.
///
/// # Errors
/// See [`reformat_date_string`].
pub fn reformat_date_string_in(
    text: &str,
    input_pattern: &str,
    output_pattern: &str,
    locale: &Locale,
) -> Result<String, DateParseError> {
    let date = parse_with(text, input_pattern, locale, Resolution::Lenient)?;
    format_date_in(&date, output_pattern, locale)
}

/// Whether `text` is a real calendar day in [`ISO_BASIC`] (`yyyyMMdd`) form.
pub fn is_valid_date(text: &str) -> bool {
    is_valid_date_with(text, ISO_BASIC)
}

/// Whether `text` is a real calendar day under `pattern`. Never fails; a
/// malformed pattern counts as invalid.
pub fn is_valid_date_with(text: &str, pattern: &str) -> bool {
    match parse_date(text, pattern) {
        Ok(_) => true,
        Err(err) => {
            debug!("rejected date {text:?} for {pattern:?}: {err}");
            false
        }
    }
}

const fn or_default(pattern: &str) -> &str {
    if pattern.is_empty() {
        DEFAULT_PATTERN
    } else {
        pattern
    }
}
