/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Two-digit years (`yy`) resolve into the century starting here
pub const TWO_DIGIT_YEAR_BASE: u16 = 2000;

// Built-in patterns

/// ISO 8601 basic format, e.g. `20220720`
pub const ISO_BASIC: &str = "yyyyMMdd";
/// USA format, e.g. `2022-07-20`
pub const USA: &str = "yyyy-MM-dd";
/// Spanish format, e.g. `20/07/2022`
pub const ESP: &str = "dd/MM/yyyy";
/// Spanish short format, e.g. `20/07/22`
pub const ESP_SHORT: &str = "dd/MM/yy";
/// Spanish verbose format with month names, e.g. `20 de julio de 2022`
pub const ESP_VERBOSE: &str = "dd 'de' MMMM 'de' yyyy";
/// Spanish bank format, e.g. `20072022`
pub const BANK: &str = "ddMMyyyy";
/// Spanish short bank format, e.g. `200722`
pub const BANK_SHORT: &str = "ddMMyy";

/// Pattern used wherever the caller passes an empty one
pub const DEFAULT_PATTERN: &str = ISO_BASIC;
