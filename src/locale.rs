//! Month and weekday name tables used by the `MMMM`/`MMM` and `EEEE`/`E`
//! pattern tokens.
//!
//! A [`Locale`] is plain data. Adding a language means declaring another
//! table; nothing in the pattern engine changes.

use crate::Month;
use chrono::Weekday;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Whether a name token renders the full or the abbreviated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameStyle {
    Full,
    Short,
}

/// Localized calendar names. Weekday tables start on Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    /// BCP 47 tag, informational only
    pub tag: &'static str,
    pub months: [&'static str; 12],
    pub short_months: [&'static str; 12],
    pub weekdays: [&'static str; 7],
    pub short_weekdays: [&'static str; 7],
}

/// Spanish (Spain). The crate-wide default.
pub const SPANISH: Locale = Locale {
    tag: "es-ES",
    months: [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ],
    short_months: [
        "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
    ],
    weekdays: [
        "lunes",
        "martes",
        "miércoles",
        "jueves",
        "viernes",
        "sábado",
        "domingo",
    ],
    short_weekdays: ["lun", "mar", "mié", "jue", "vie", "sáb", "dom"],
};

pub const ENGLISH: Locale = Locale {
    tag: "en-US",
    months: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    short_months: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    weekdays: [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ],
    short_weekdays: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
};

impl Default for Locale {
    fn default() -> Self {
        SPANISH
    }
}

impl Locale {
    pub const fn month_name(&self, month: Month, style: NameStyle) -> &'static str {
        match style {
            NameStyle::Full => self.months[month.index()],
            NameStyle::Short => self.short_months[month.index()],
        }
    }

    pub fn weekday_name(&self, weekday: Weekday, style: NameStyle) -> &'static str {
        let index = weekday.num_days_from_monday() as usize;
        match style {
            NameStyle::Full => self.weekdays[index],
            NameStyle::Short => self.short_weekdays[index],
        }
    }

    /// Matches a month name at the start of `text`, ignoring case.
    /// Returns the month number and the number of bytes consumed.
    pub fn match_month(&self, text: &str, style: NameStyle) -> Option<(u8, usize)> {
        let table = match style {
            NameStyle::Full => &self.months,
            NameStyle::Short => &self.short_months,
        };
        longest_prefix(table, text).and_then(|(index, len)| {
            u8::try_from(index + 1).ok().map(|month| (month, len))
        })
    }

    /// Matches a weekday name at the start of `text`, ignoring case.
    pub fn match_weekday(&self, text: &str, style: NameStyle) -> Option<(Weekday, usize)> {
        let table = match style {
            NameStyle::Full => &self.weekdays,
            NameStyle::Short => &self.short_weekdays,
        };
        longest_prefix(table, text).map(|(index, len)| (WEEK[index], len))
    }
}

/// Finds the longest table entry that prefixes `text` case-insensitively.
fn longest_prefix(table: &[&str], text: &str) -> Option<(usize, usize)> {
    table
        .iter()
        .enumerate()
        .filter_map(|(index, name)| {
            let chars = name.chars().count();
            let consumed: usize = text.chars().take(chars).map(char::len_utf8).sum();
            let candidate = &text[..consumed];
            (candidate.chars().count() == chars && candidate.to_lowercase() == name.to_lowercase())
                .then_some((index, consumed))
        })
        .max_by_key(|&(_, consumed)| consumed)
}
