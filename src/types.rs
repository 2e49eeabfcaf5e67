use crate::DateParseError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MAX_YEAR, MIN_DAY, TWO_DIGIT_YEAR_BASE,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `DateParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, DateParseError> {
        let non_zero = NonZeroU16::new(value).ok_or(DateParseError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(DateParseError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Compile-time constructor for constants; panics during const evaluation
    /// if `value` is out of range.
    pub(crate) const fn new_const(value: u16) -> Self {
        match NonZeroU16::new(value) {
            Some(v) if value <= MAX_YEAR => Self(v),
            _ => panic!("year out of range"),
        }
    }

    /// Resolves a two-digit year (`yy`) into the century starting at
    /// `TWO_DIGIT_YEAR_BASE`, so `22` becomes 2022.
    ///
    /// # Errors
    /// Returns `DateParseError::InvalidYear` if `value` has more than two digits.
    pub fn from_two_digits(value: u16) -> Result<Self, DateParseError> {
        if value > 99 {
            return Err(DateParseError::InvalidYear(value));
        }
        Self::new(TWO_DIGIT_YEAR_BASE + value)
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// Last two digits, as rendered by the `yy` pattern token
    #[inline]
    pub const fn two_digits(self) -> u16 {
        self.0.get() % 100
    }

    pub const fn is_leap(self) -> bool {
        is_leap_year(self.0.get())
    }
}

impl TryFrom<u16> for Year {
    type Error = DateParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0.get())
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `DateParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, DateParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(DateParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(DateParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    pub(crate) const fn new_const(value: u8) -> Self {
        match NonZeroU8::new(value) {
            Some(v) if value <= MAX_MONTH => Self(v),
            _ => panic!("month out of range"),
        }
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Zero-based position, for indexing locale name tables
    #[inline]
    pub const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl TryFrom<u8> for Month {
    type Error = DateParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0.get())
    }
}

/// A day-of-month value. Constructed through [`Day::new`] it is guaranteed to
/// exist in the given year and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it exists in the given year and month
    ///
    /// # Errors
    /// Returns `DateParseError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, DateParseError> {
        let invalid = || DateParseError::InvalidDay {
            year: year.get(),
            month: month.get(),
            day: value,
        };

        let non_zero = NonZeroU8::new(value).ok_or_else(invalid)?;
        if value > month_length(year.get(), month) {
            return Err(invalid());
        }
        Ok(Self(non_zero))
    }

    /// Compile-time constructor for constants; only the `1..=28` range every
    /// month shares is accepted.
    pub(crate) const fn new_const(value: u8) -> Self {
        match NonZeroU8::new(value) {
            Some(v) if value <= 28 => Self(v),
            _ => panic!("day out of range"),
        }
    }

    /// Last day of the given month
    pub fn last_of(year: Year, month: Month) -> Self {
        // every month has at least 28 days
        Self(NonZeroU8::new(month_length(year.get(), month)).unwrap_or(NonZeroU8::MIN))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = DateParseError;

    /// Context-free conversion: only the `1..=31` range can be checked here.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let invalid = DateParseError::InvalidDay {
            year: 0,
            month: 0,
            day: value,
        };
        if !(MIN_DAY..=31).contains(&value) {
            return Err(invalid);
        }
        NonZeroU8::new(value).map(Self).ok_or(invalid)
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0.get())
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Number of days in `month` of `year`, or `None` if `month` is not 1-12.
pub fn days_in_month(year: u16, month: u8) -> Option<u8> {
    Month::new(month).ok().map(|month| month_length(year, month))
}

const fn month_length(year: u16, month: Month) -> u8 {
    let month = month.get();
    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_bounds() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(9999).is_ok());
        assert!(matches!(Year::new(0), Err(DateParseError::InvalidYear(0))));
        assert!(matches!(
            Year::new(10000),
            Err(DateParseError::InvalidYear(10000))
        ));
    }

    #[test]
    fn test_year_two_digits() {
        assert_eq!(Year::from_two_digits(22).unwrap().get(), 2022);
        assert_eq!(Year::from_two_digits(0).unwrap().get(), 2000);
        assert!(Year::from_two_digits(100).is_err());
        assert_eq!(Year::new(1950).unwrap().two_digits(), 50);
        assert_eq!(Year::new(2005).unwrap().two_digits(), 5);
    }

    #[test]
    fn test_year_display_is_zero_padded() {
        assert_eq!(Year::new(2024).unwrap().to_string(), "2024");
        assert_eq!(Year::new(33).unwrap().to_string(), "0033");
    }

    #[test]
    fn test_month_bounds() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
        assert!(matches!(Month::new(0), Err(DateParseError::InvalidMonth(0))));
        assert!(matches!(
            Month::new(13),
            Err(DateParseError::InvalidMonth(13))
        ));
    }

    #[test]
    fn test_month_index_and_display() {
        let month = Month::new(8).unwrap();
        assert_eq!(month.index(), 7);
        assert_eq!(month.to_string(), "08");
    }

    #[test]
    fn test_day_new_respects_month_length() {
        let y2023 = Year::new(2023).unwrap();
        let y2024 = Year::new(2024).unwrap();
        let feb = Month::new(2).unwrap();
        let apr = Month::new(4).unwrap();

        assert!(Day::new(28, y2023, feb).is_ok());
        assert!(Day::new(29, y2023, feb).is_err());
        assert!(Day::new(29, y2024, feb).is_ok());
        assert!(Day::new(30, y2024, apr).is_ok());
        assert!(matches!(
            Day::new(31, y2024, apr),
            Err(DateParseError::InvalidDay {
                year: 2024,
                month: 4,
                day: 31
            })
        ));
        assert!(Day::new(0, y2024, apr).is_err());
    }

    #[test]
    fn test_day_last_of() {
        let feb = Month::new(2).unwrap();
        assert_eq!(Day::last_of(Year::new(2016).unwrap(), feb).get(), 29);
        assert_eq!(Day::last_of(Year::new(2015).unwrap(), feb).get(), 28);
        assert_eq!(
            Day::last_of(Year::new(2015).unwrap(), Month::new(12).unwrap()).get(),
            31
        );
    }

    #[test]
    fn test_day_try_from_u8() {
        let day: Day = 15.try_into().unwrap();
        assert_eq!(day.get(), 15);
        assert!(Day::try_from(0).is_err());
        assert!(Day::try_from(32).is_err());
    }

    #[test]
    fn test_newtype_serde() {
        let year = Year::new(2024).unwrap();
        assert_eq!(serde_json::to_string(&year).unwrap(), "2024");
        let month: Month = serde_json::from_str("8").unwrap();
        assert_eq!(month.get(), 8);
        assert!(serde_json::from_str::<Month>("13").is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: u16,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2016,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2015,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_days_in_month_non_leap_table() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(
                days_in_month(2023, month),
                Some(expected[month as usize]),
                "Month {month} has incorrect day count"
            );
        }
        assert_eq!(days_in_month(2024, 2), Some(29));
    }

    #[test]
    fn test_days_in_month_rejects_out_of_range_months() {
        assert_eq!(days_in_month(2022, 0), None);
        assert_eq!(days_in_month(2022, 13), None);
        assert_eq!(days_in_month(2022, u8::MAX), None);
    }
}
