//! Compiled date patterns.
//!
//! Pattern letters follow the common `yyyy`/`MM`/`dd` letter convention:
//!
//! | Letters | Meaning | Parsing |
//! |---|---|---|
//! | `yyyy` | year, zero padded | exactly 4 digits |
//! | `yy` | year within 2000-2099 | exactly 2 digits |
//! | `y` | year, unpadded | 1-4 digits |
//! | `MMMM` / `MMM` | month name, full / short | locale table, any case |
//! | `MM` / `M` | month number | 2 digits / 1-2 digits |
//! | `dd` / `d` | day of month | 2 digits / 1-2 digits |
//! | `EEEE` / `E`..`EEE` | weekday name, full / short | locale table, any case |
//!
//! Text between single quotes is literal and `''` is a quote. Every other
//! non-letter is literal as well.

use crate::locale::{Locale, NameStyle};
use crate::{CalendarDate, DateParseError, Year};
use chrono::Weekday;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    TwoDigitYear,
    Month,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Width {
    Fixed(usize),
    UpTo(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number(Field, Width),
    MonthName(NameStyle),
    WeekdayName(NameStyle),
    Literal(String),
}

/// A pattern string compiled once and reusable for parsing and formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
}

/// Field values read from text before calendar resolution.
///
/// Numbers are unchecked: month 13 or day 31 of June survive until a
/// [`crate::Resolution`] decides what to do with them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawFields {
    pub year: Option<u16>,
    pub month: Option<u8>,
    pub day: Option<u8>,
    pub weekday: Option<Weekday>,
}

impl Pattern {
    /// Compiles a pattern string.
    ///
    /// # Errors
    /// Returns `DateParseError::InvalidPattern` for an empty pattern, an
    /// unterminated quote, an unsupported letter or letter count.
    pub fn compile(source: &str) -> Result<Self, DateParseError> {
        let invalid = |reason: String| DateParseError::InvalidPattern {
            pattern: source.to_owned(),
            reason,
        };
        if source.is_empty() {
            return Err(invalid("pattern is empty".to_owned()));
        }

        let mut tokens = Vec::new();
        let mut chars = source.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\'' {
                let mut text = String::new();
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    push_literal(&mut tokens, "'");
                    continue;
                }
                loop {
                    match chars.next() {
                        Some('\'') if chars.peek() == Some(&'\'') => {
                            chars.next();
                            text.push('\'');
                        }
                        Some('\'') => break,
                        Some(other) => text.push(other),
                        None => return Err(invalid("unterminated quote".to_owned())),
                    }
                }
                push_literal(&mut tokens, &text);
            } else if c.is_ascii_alphabetic() {
                let mut count = 1;
                while chars.peek() == Some(&c) {
                    chars.next();
                    count += 1;
                }
                let token = letter_token(c, count).ok_or_else(|| {
                    invalid(format!("unsupported field {}", c.to_string().repeat(count)))
                })?;
                tokens.push(token);
            } else {
                push_literal(&mut tokens, c.encode_utf8(&mut [0; 4]));
            }
        }

        Ok(Self {
            source: source.to_owned(),
            tokens,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Renders `date` using the names in `locale`.
    pub fn format(&self, date: &CalendarDate, locale: &Locale) -> String {
        self.display(date, locale).to_string()
    }

    /// Lazily renders `date`, for writing straight into a formatter.
    pub const fn display<'a>(
        &'a self,
        date: &'a CalendarDate,
        locale: &'a Locale,
    ) -> Formatted<'a> {
        Formatted {
            pattern: self,
            date,
            locale,
        }
    }

    /// Reads raw field values from `text` without checking the calendar.
    ///
    /// # Errors
    /// Returns `DateParseError::EmptyInput`, `Mismatch` when the text does not
    /// follow the pattern, or `TrailingInput` when text is left over.
    pub fn parse_fields(&self, text: &str, locale: &Locale) -> Result<RawFields, DateParseError> {
        if text.is_empty() {
            return Err(DateParseError::EmptyInput);
        }

        let mut fields = RawFields::default();
        let mut pos = 0;
        for token in &self.tokens {
            let rest = &text[pos..];
            match *token {
                Token::Number(field, width) => {
                    let (value, len) = take_digits(rest, width).ok_or_else(|| {
                        DateParseError::Mismatch {
                            position: pos,
                            expected: describe(field, width),
                        }
                    })?;
                    pos += len;
                    match field {
                        Field::Year => fields.year = Some(value),
                        Field::TwoDigitYear => {
                            fields.year = Some(Year::from_two_digits(value)?.get());
                        }
                        // at most two digits, always fits
                        Field::Month => fields.month = u8::try_from(value).ok(),
                        Field::Day => fields.day = u8::try_from(value).ok(),
                    }
                }
                Token::MonthName(style) => {
                    let (month, len) =
                        locale
                            .match_month(rest, style)
                            .ok_or_else(|| DateParseError::Mismatch {
                                position: pos,
                                expected: "month name".to_owned(),
                            })?;
                    fields.month = Some(month);
                    pos += len;
                }
                Token::WeekdayName(style) => {
                    let (weekday, len) =
                        locale
                            .match_weekday(rest, style)
                            .ok_or_else(|| DateParseError::Mismatch {
                                position: pos,
                                expected: "weekday name".to_owned(),
                            })?;
                    fields.weekday = Some(weekday);
                    pos += len;
                }
                Token::Literal(ref literal) => {
                    if !rest.starts_with(literal.as_str()) {
                        return Err(DateParseError::Mismatch {
                            position: pos,
                            expected: format!("{literal:?}"),
                        });
                    }
                    pos += literal.len();
                }
            }
        }

        if pos < text.len() {
            return Err(DateParseError::TrailingInput(text[pos..].to_owned()));
        }
        Ok(fields)
    }
}

/// A date rendered through a [`Pattern`]; see [`Pattern::display`].
pub struct Formatted<'a> {
    pattern: &'a Pattern,
    date: &'a CalendarDate,
    locale: &'a Locale,
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.date;
        for token in &self.pattern.tokens {
            match *token {
                Token::Number(Field::Year, Width::Fixed(width)) => {
                    write!(f, "{:0width$}", date.year())?;
                }
                Token::Number(Field::Year, Width::UpTo(_)) => write!(f, "{}", date.year())?,
                Token::Number(Field::TwoDigitYear, _) => {
                    write!(f, "{:02}", date.year_typed().two_digits())?;
                }
                Token::Number(Field::Month, Width::Fixed(width)) => {
                    write!(f, "{:0width$}", date.month())?;
                }
                Token::Number(Field::Month, Width::UpTo(_)) => write!(f, "{}", date.month())?,
                Token::Number(Field::Day, Width::Fixed(width)) => {
                    write!(f, "{:0width$}", date.day())?;
                }
                Token::Number(Field::Day, Width::UpTo(_)) => write!(f, "{}", date.day())?,
                Token::MonthName(style) => {
                    f.write_str(self.locale.month_name(date.month_typed(), style))?;
                }
                Token::WeekdayName(style) => {
                    f.write_str(self.locale.weekday_name(date.weekday(), style))?;
                }
                Token::Literal(ref text) => f.write_str(text)?,
            }
        }
        Ok(())
    }
}

impl FromStr for Pattern {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn letter_token(letter: char, count: usize) -> Option<Token> {
    let token = match (letter, count) {
        ('y', 1) => Token::Number(Field::Year, Width::UpTo(4)),
        ('y', 2) => Token::Number(Field::TwoDigitYear, Width::Fixed(2)),
        ('y', 4) => Token::Number(Field::Year, Width::Fixed(4)),
        ('M', 1) => Token::Number(Field::Month, Width::UpTo(2)),
        ('M', 2) => Token::Number(Field::Month, Width::Fixed(2)),
        ('M', 3) => Token::MonthName(NameStyle::Short),
        ('M', 4) => Token::MonthName(NameStyle::Full),
        ('d', 1) => Token::Number(Field::Day, Width::UpTo(2)),
        ('d', 2) => Token::Number(Field::Day, Width::Fixed(2)),
        ('E', 1..=3) => Token::WeekdayName(NameStyle::Short),
        ('E', 4) => Token::WeekdayName(NameStyle::Full),
        _ => return None,
    };
    Some(token)
}

fn push_literal(tokens: &mut Vec<Token>, text: &str) {
    if let Some(Token::Literal(last)) = tokens.last_mut() {
        last.push_str(text);
    } else {
        tokens.push(Token::Literal(text.to_owned()));
    }
}

/// Reads ASCII digits from the start of `text`. Returns the value and the
/// number of bytes consumed.
fn take_digits(text: &str, width: Width) -> Option<(u16, usize)> {
    let available = text.bytes().take_while(u8::is_ascii_digit).count();
    let len = match width {
        Width::Fixed(n) if available >= n => n,
        Width::UpTo(max) if available >= 1 => available.min(max),
        _ => return None,
    };
    text[..len].parse().ok().map(|value| (value, len))
}

fn describe(field: Field, width: Width) -> String {
    let name = match field {
        Field::Year | Field::TwoDigitYear => "year",
        Field::Month => "month",
        Field::Day => "day",
    };
    match width {
        Width::Fixed(n) => format!("{n}-digit {name}"),
        Width::UpTo(n) => format!("1-{n} digit {name}"),
    }
}
