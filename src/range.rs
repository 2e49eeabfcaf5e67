use rand::Rng;

use crate::CalendarDate;

/// A closed interval of calendar days. The start is never after the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: CalendarDate,
    end:   CalendarDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: CalendarDate, end: CalendarDate },

    /// A half-open range whose end does not come after its start.
    #[error("Empty date range: end ({end}) is not after start ({start})")]
    Empty { start: CalendarDate, end: CalendarDate },
}

impl DateRange {
    /// Creates a closed range `[start, end]`.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates the range `[start, end)`, stored as `[start, end - 1 day]`.
    ///
    /// # Errors
    /// Returns `RangeError::Empty` if `end <= start`.
    pub fn half_open(start: CalendarDate, end: CalendarDate) -> Result<Self, RangeError> {
        let empty = RangeError::Empty { start, end };
        if end <= start {
            return Err(empty);
        }
        // end > start >= 0001-01-01, so a predecessor exists
        let last = end.pred().ok_or(empty)?;
        Ok(Self { start, end: last })
    }

    /// First day of the range
    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    /// Last day of the range (inclusive)
    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Number of days covered, always at least 1.
    pub fn len_days(&self) -> u64 {
        (self.end.to_epoch_day() - self.start.to_epoch_day()).unsigned_abs() + 1
    }

    /// A day drawn uniformly from the range using the thread-local RNG.
    pub fn random_date(&self) -> CalendarDate {
        self.random_date_with(&mut rand::thread_rng())
    }

    /// A day drawn uniformly from the range using `rng`.
    pub fn random_date_with<R: Rng + ?Sized>(&self, rng: &mut R) -> CalendarDate {
        let day = rng.gen_range(self.start.to_epoch_day()..=self.end.to_epoch_day());
        // every epoch day between two valid dates is itself valid
        CalendarDate::from_epoch_day(day).unwrap_or(self.start)
    }
}

/// A random date in `[start, end)`: the start may come out, the end never does.
///
/// ```
/// use datekit::{CalendarDate, generate_random_date};
///
/// let start = CalendarDate::new(1950, 1, 1).unwrap();
/// let end = CalendarDate::new(2022, 3, 1).unwrap();
/// let date = generate_random_date(start, end).unwrap();
/// assert!(start <= date && date < end);
/// ```
///
/// # Errors
/// Returns `RangeError::Empty` if `end <= start`.
pub fn generate_random_date(
    start: CalendarDate,
    end: CalendarDate,
) -> Result<CalendarDate, RangeError> {
    DateRange::half_open(start, end).map(|range| range.random_date())
}

/// A random date in `[start, end]`, both bounds included.
///
/// # Errors
/// Returns `RangeError::InvalidRange` if start > end.
pub fn generate_random_date_inclusive(
    start: CalendarDate,
    end: CalendarDate,
) -> Result<CalendarDate, RangeError> {
    DateRange::new(start, end).map(|range| range.random_date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_new_range_cases() {
        struct TestCase {
            start:          CalendarDate,
            end:            CalendarDate,
            should_succeed: bool,
            description:    &'static str,
        }

        let cases = [
            TestCase {
                start:          date(1990, 1, 1),
                end:            date(2000, 1, 1),
                should_succeed: true,
                description:    "valid range (start < end)",
            },
            TestCase {
                start:          date(2000, 1, 1),
                end:            date(1990, 1, 1),
                should_succeed: false,
                description:    "invalid range (start > end)",
            },
            TestCase {
                start:          date(2000, 1, 1),
                end:            date(2000, 1, 1),
                should_succeed: true,
                description:    "single day (start == end)",
            },
        ];

        for case in &cases {
            let range = DateRange::new(case.start, case.end);
            assert_eq!(range.is_ok(), case.should_succeed, "{}", case.description);
        }
    }

    #[test]
    fn test_half_open() {
        let range = DateRange::half_open(date(2022, 1, 1), date(2022, 3, 1))
            .expect("failed to construct half-open range");
        assert_eq!(range.start(), date(2022, 1, 1));
        assert_eq!(range.end(), date(2022, 2, 28));

        assert!(matches!(
            DateRange::half_open(date(2022, 1, 1), date(2022, 1, 1)),
            Err(RangeError::Empty { .. })
        ));
    }

    #[test]
    fn test_contains() {
        let range = DateRange::new(date(1990, 1, 1), date(2000, 12, 31)).expect("range");

        assert!(range.contains(&date(1990, 1, 1)));
        assert!(range.contains(&date(2000, 12, 31)));
        assert!(!range.contains(&date(1989, 12, 31)));
        assert!(!range.contains(&date(2001, 1, 1)));
    }

    #[test]
    fn test_len_days() {
        let range = DateRange::new(date(2016, 2, 27), date(2016, 3, 1)).expect("leap range");
        assert_eq!(range.len_days(), 4);
        let single = DateRange::new(date(2016, 3, 1), date(2016, 3, 1)).expect("single day");
        assert_eq!(single.len_days(), 1);
    }

    #[test]
    fn test_generate_random_date_excludes_end() {
        let start = date(1950, 1, 1);
        let end = date(2022, 3, 1);
        for _ in 0..1000 {
            let d = generate_random_date(start, end).expect("non-empty range");
            assert!(start <= d, "{d} before {start}");
            assert!(d < end, "{d} not before {end}");
        }
    }

    #[test]
    fn test_generate_random_date_inclusive_bounds() {
        let start = date(2022, 2, 27);
        let end = date(2022, 3, 1);
        for _ in 0..200 {
            let d = generate_random_date_inclusive(start, end).expect("non-empty range");
            assert!(start <= d && d <= end);
        }
        // single-day range has one possible answer
        assert_eq!(generate_random_date_inclusive(end, end).unwrap(), end);
        assert!(generate_random_date_inclusive(end, start).is_err());
    }

    #[test]
    fn test_generate_random_date_empty_range() {
        let day = date(2022, 3, 1);
        assert!(matches!(
            generate_random_date(day, day),
            Err(RangeError::Empty { .. })
        ));
        assert!(generate_random_date(day, date(2022, 3, 2)).unwrap() == day);
    }

    #[test]
    fn test_random_date_with_seeded_rng_covers_range() {
        let range = DateRange::new(date(2020, 1, 1), date(2020, 1, 3)).expect("small range");
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..300 {
            seen.insert(range.random_date_with(&mut rng));
        }
        assert_eq!(
            seen.into_iter().collect::<Vec<_>>(),
            vec![date(2020, 1, 1), date(2020, 1, 2), date(2020, 1, 3)]
        );
    }
}
