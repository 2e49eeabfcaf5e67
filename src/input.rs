//! Fail-fast readers for one line of input.
//!
//! Every function reads exactly one line from a caller-supplied
//! [`BufRead`] and converts it. Pass the reader by value to release it once
//! the line is read, or pass `&mut reader` to keep using it afterwards:
//!
//! ```
//! use std::io::Cursor;
//! use datekit::input;
//!
//! let mut source = Cursor::new("42\nhola\n");
//! assert_eq!(input::read_integer(&mut source).unwrap(), 42);
//! assert_eq!(input::read_string(&mut source).unwrap(), "hola");
//! assert!(input::read_string(&mut source).is_err());
//! ```

use std::io::{self, BufRead};
use std::num::{ParseFloatError, ParseIntError};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error("input stream is exhausted")]
    EndOfInput,

    #[error("not an integer: {input:?}")]
    InvalidInteger {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("not a number: {input:?}")]
    InvalidDouble {
        input: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("expected a character, got an empty line")]
    EmptyLine,

    #[error("no valid input after {0} attempts")]
    AttemptsExhausted(u32),
}

impl InputError {
    /// True when the line was read but did not have the expected shape, as
    /// opposed to the source itself failing.
    pub const fn is_parse(&self) -> bool {
        matches!(
            self,
            Self::InvalidInteger { .. } | Self::InvalidDouble { .. } | Self::EmptyLine
        )
    }
}

/// Reads one line without its `\n` or `\r\n` terminator.
///
/// # Errors
/// `InputError::EndOfInput` if the source has no more data, `InputError::Io`
/// if reading fails or the line is not UTF-8.
pub fn read_string<R: BufRead>(mut source: R) -> Result<String, InputError> {
    let mut line = String::new();
    if source.read_line(&mut line)? == 0 {
        return Err(InputError::EndOfInput);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

/// Reads one line and keeps at most `max_length` characters of it.
///
/// # Errors
/// See [`read_string`].
pub fn read_string_max<R: BufRead>(source: R, max_length: usize) -> Result<String, InputError> {
    let line = read_string(source)?;
    Ok(truncate(&line, max_length).to_owned())
}

/// Reads one line and parses it as a base-10 `i32`. An optional leading `+`
/// or `-` is allowed; whitespace is not.
///
/// # Errors
/// `InputError::InvalidInteger` for an empty line, stray characters or
/// overflow, plus the errors of [`read_string`].
pub fn read_integer<R: BufRead>(source: R) -> Result<i32, InputError> {
    parse_integer(read_string(source)?)
}

/// Like [`read_integer`], but only the first `max_length` characters of the
/// line are parsed.
///
/// # Errors
/// See [`read_integer`].
pub fn read_integer_max<R: BufRead>(source: R, max_length: usize) -> Result<i32, InputError> {
    let line = read_string(source)?;
    parse_integer(truncate(&line, max_length).to_owned())
}

/// Reads one line and returns its first character.
///
/// # Errors
/// `InputError::EmptyLine` if the line is empty, plus the errors of
/// [`read_string`].
pub fn read_char<R: BufRead>(source: R) -> Result<char, InputError> {
    read_string(source)?.chars().next().ok_or(InputError::EmptyLine)
}

/// Reads one line and parses it as an `f64` (`3.5`, `-1e-3`, `inf`, ...).
/// Surrounding whitespace is ignored.
///
/// # Errors
/// `InputError::InvalidDouble` on malformed input, plus the errors of
/// [`read_string`].
pub fn read_double<R: BufRead>(source: R) -> Result<f64, InputError> {
    let line = read_string(source)?;
    line.trim()
        .parse::<f64>()
        .map_err(|source| InputError::InvalidDouble {
            input: line.clone(),
            source,
        })
}

/// The first `max_length` characters of `s`, or all of `s` if shorter.
pub fn truncate(s: &str, max_length: usize) -> &str {
    s.char_indices()
        .nth(max_length)
        .map_or(s, |(end, _)| &s[..end])
}

fn parse_integer(input: String) -> Result<i32, InputError> {
    input
        .parse()
        .map_err(|source| InputError::InvalidInteger { input, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    /// A reader that fails on every call.
    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device unplugged"))
        }
    }

    #[test]
    fn test_read_string_cases() {
        let cases = [
            "La gramola es lo que mola",
            "Pero la bola mola más que la gramola",
            "1277",
            "345.78",
            "20220720",
            "R",
        ];

        for case in cases {
            assert_eq!(read_string(Cursor::new(case)).unwrap(), case);
            assert_eq!(read_string(Cursor::new(format!("{case}\n"))).unwrap(), case);
            assert_eq!(read_string(Cursor::new(format!("{case}\r\n"))).unwrap(), case);
        }
    }

    #[test]
    fn test_read_string_reads_one_line_at_a_time() {
        let mut source = Cursor::new("first\n\nthird");
        assert_eq!(read_string(&mut source).unwrap(), "first");
        assert_eq!(read_string(&mut source).unwrap(), "");
        assert_eq!(read_string(&mut source).unwrap(), "third");
        assert!(matches!(
            read_string(&mut source),
            Err(InputError::EndOfInput)
        ));
    }

    #[test]
    fn test_read_string_io_errors() {
        let result = read_string(io::BufReader::new(Broken));
        assert!(matches!(result, Err(InputError::Io(_))));
        assert!(!result.unwrap_err().is_parse());

        let invalid_utf8 = read_string(Cursor::new(vec![0xff, 0xfe, b'\n']));
        assert!(matches!(invalid_utf8, Err(InputError::Io(_))));
    }

    #[test]
    fn test_read_string_max() {
        struct TestCase {
            input: &'static str,
            max_length: usize,
            expected: &'static str,
        }

        let cases = [
            TestCase {
                input: "A test string 32 characters long",
                max_length: 27,
                expected: "A test string 32 characters",
            },
            TestCase {
                input: "This string is shorter",
                max_length: 27,
                expected: "This string is shorter",
            },
            TestCase {
                input: "This string is same size as the maxLength",
                max_length: 41,
                expected: "This string is same size as the maxLength",
            },
            TestCase {
                input: "anything",
                max_length: 0,
                expected: "",
            },
        ];

        for case in &cases {
            let line = read_string_max(Cursor::new(case.input), case.max_length).unwrap();
            assert_eq!(line, case.expected);
            assert!(line.chars().count() <= case.max_length);
        }
    }

    #[test]
    fn test_truncate_is_prefix_of_min_length() {
        let samples = ["", "a", "mañana", "日本語のテキスト", "plain ascii"];
        for s in samples {
            for n in 0..12 {
                let t = truncate(s, n);
                assert!(s.starts_with(t));
                assert_eq!(t.chars().count(), s.chars().count().min(n), "{s:?} to {n}");
            }
        }
    }

    #[test]
    fn test_read_integer_accepts_signed_decimal() {
        let cases = [
            ("0", 0),
            ("1277", 1277),
            ("-45", -45),
            ("+45", 45),
            ("2147483647", i32::MAX),
            ("-2147483648", i32::MIN),
        ];
        for (text, expected) in cases {
            assert_eq!(read_integer(Cursor::new(text)).unwrap(), expected, "{text}");
        }
    }

    #[test]
    fn test_read_integer_rejects_malformed() {
        let cases = ["", "12a", " 12", "12 ", "1.5", "--1", "+", "2147483648", "١٢"];
        for text in cases {
            let err = read_integer(Cursor::new(text)).unwrap_err();
            assert!(
                matches!(err, InputError::InvalidInteger { ref input, .. } if input == text),
                "{text:?} gave {err:?}"
            );
            assert!(err.is_parse());
        }
    }

    #[test]
    fn test_read_integer_max_truncates_before_parsing() {
        assert_eq!(read_integer_max(Cursor::new("20220720"), 4).unwrap(), 2022);
        assert_eq!(read_integer_max(Cursor::new("-123"), 2).unwrap(), -1);
        assert_eq!(read_integer_max(Cursor::new("12"), 10).unwrap(), 12);
        // the dropped tail is never looked at
        assert_eq!(read_integer_max(Cursor::new("12ab"), 2).unwrap(), 12);
        assert!(read_integer_max(Cursor::new("ab12"), 2).is_err());
    }

    #[test]
    fn test_read_char() {
        assert_eq!(read_char(Cursor::new("R")).unwrap(), 'R');
        assert_eq!(read_char(Cursor::new("ñandú\n")).unwrap(), 'ñ');
        assert_eq!(read_char(Cursor::new(" x")).unwrap(), ' ');
        assert!(matches!(
            read_char(Cursor::new("\n")),
            Err(InputError::EmptyLine)
        ));
    }

    #[test]
    fn test_read_double() {
        let cases = [
            ("345.78", 345.78),
            ("-0.5", -0.5),
            ("1e3", 1000.0),
            ("2.5E-2", 0.025),
            ("  7 ", 7.0),
            ("12", 12.0),
        ];
        for (text, expected) in cases {
            let value = read_double(Cursor::new(text)).unwrap();
            assert!((value - expected).abs() < f64::EPSILON, "{text}: {value}");
        }
        assert!(read_double(Cursor::new("inf")).unwrap().is_infinite());
    }

    #[test]
    fn test_read_double_rejects_malformed() {
        for text in ["", "abc", "1,5", "1.2.3", "e5"] {
            let err = read_double(Cursor::new(text)).unwrap_err();
            assert!(matches!(err, InputError::InvalidDouble { .. }), "{text:?}");
        }
    }

    #[test]
    fn test_owned_source_is_released() {
        // Passing by value moves the reader in; it is dropped after the call.
        let source = Cursor::new("once\n");
        assert_eq!(read_string(source).unwrap(), "once");
    }
}
