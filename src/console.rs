//! Interactive reading with prompts and retries.
//!
//! [`Prompter`] wraps the fail-fast readers in [`crate::input`]: a line that
//! does not parse makes it write a retry prompt and read again, up to an
//! optional attempt limit. I/O failures are never retried.
//!
//! The free functions at the bottom are the legacy console API. They are
//! bound to the process stdin/stdout, retry without limit and swallow I/O
//! errors into a default value. New code should use [`crate::input`] or a
//! bounded [`Prompter`] instead.

use std::io::{self, BufRead, Stdout, StdinLock, Write};
use std::num::NonZeroU32;

use crate::input::{self, InputError};
use crate::prelude::*;

const INTEGER_RETRY: &str = "The entered value is not a number. Please enter a number: ";
const CHAR_RETRY: &str =
    "The entered value is not a valid character\nPlease enter a new valid character 'char' type: ";
const DOUBLE_RETRY: &str =
    "The entered value is not a 'double' type number\nPlease enter a 'double' type number: ";
const PRESS_ENTER: &str = "Press ENTER to continue";

/// Reads typed values from `reader`, writing retry prompts to `writer`.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    max_attempts: Option<NonZeroU32>,
}

impl Prompter<StdinLock<'static>, Stdout> {
    /// A prompter over the process console with unlimited retries.
    ///
    /// Dropping it releases the stdin lock; the process-wide handle itself
    /// stays open for later readers.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// A prompter with unlimited retries.
    pub const fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            max_attempts: None,
        }
    }

    /// Gives up with `InputError::AttemptsExhausted` after `attempts`
    /// unparseable lines.
    #[must_use]
    pub const fn with_max_attempts(mut self, attempts: NonZeroU32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Retries until valid input arrives or the source fails.
    #[must_use]
    pub const fn unbounded(mut self) -> Self {
        self.max_attempts = None;
        self
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// # Errors
    /// Any I/O error or end of input from the reader.
    pub fn read_string(&mut self) -> Result<String, InputError> {
        input::read_string(&mut self.reader)
    }

    /// # Errors
    /// Any I/O error or end of input from the reader.
    pub fn read_string_max(&mut self, max_length: usize) -> Result<String, InputError> {
        input::read_string_max(&mut self.reader, max_length)
    }

    /// # Errors
    /// `InputError::AttemptsExhausted`, or an I/O error from either side.
    pub fn read_integer(&mut self) -> Result<i32, InputError> {
        self.retry(INTEGER_RETRY, |reader| input::read_integer(reader))
    }

    /// # Errors
    /// `InputError::AttemptsExhausted`, or an I/O error from either side.
    pub fn read_integer_max(&mut self, max_length: usize) -> Result<i32, InputError> {
        self.retry(INTEGER_RETRY, |reader| {
            input::read_integer_max(reader, max_length)
        })
    }

    /// # Errors
    /// `InputError::AttemptsExhausted`, or an I/O error from either side.
    pub fn read_char(&mut self) -> Result<char, InputError> {
        self.retry(CHAR_RETRY, |reader| input::read_char(reader))
    }

    /// # Errors
    /// `InputError::AttemptsExhausted`, or an I/O error from either side.
    pub fn read_double(&mut self) -> Result<f64, InputError> {
        self.retry(DOUBLE_RETRY, |reader| input::read_double(reader))
    }

    /// Asks the user to press ENTER and waits for one line.
    ///
    /// # Errors
    /// Any I/O error from either side, or end of input.
    pub fn press_enter(&mut self) -> Result<(), InputError> {
        self.writer.write_all(PRESS_ENTER.as_bytes())?;
        self.writer.flush()?;
        self.read_string().map(drop)
    }

    fn retry<T>(
        &mut self,
        prompt: &str,
        mut read: impl FnMut(&mut R) -> Result<T, InputError>,
    ) -> Result<T, InputError> {
        let mut attempts: u32 = 0;
        loop {
            match read(&mut self.reader) {
                Err(err) if err.is_parse() => {
                    attempts = attempts.saturating_add(1);
                    debug!("rejected console input (attempt {attempts}): {err}");
                    if self.max_attempts.is_some_and(|max| attempts >= max.get()) {
                        return Err(InputError::AttemptsExhausted(attempts));
                    }
                    self.writer.write_all(prompt.as_bytes())?;
                    self.writer.flush()?;
                }
                other => return other,
            }
        }
    }
}

fn or_default<T>(result: Result<T, InputError>, default: T) -> T {
    result.unwrap_or_else(|err| {
        warn!("console read failed, returning default: {err}");
        default
    })
}

/// Legacy: one line from stdin, or `""` if stdin fails.
#[deprecated(note = "swallows I/O errors; use `datekit::input` or a bounded `Prompter`")]
pub fn read_string() -> String {
    or_default(Prompter::stdio().read_string(), String::new())
}

/// Legacy: one line from stdin truncated to `max_length` characters.
#[deprecated(note = "swallows I/O errors; use `datekit::input` or a bounded `Prompter`")]
pub fn read_string_max(max_length: usize) -> String {
    or_default(Prompter::stdio().read_string_max(max_length), String::new())
}

/// Legacy: prompts until stdin yields an integer; `0` if stdin fails.
#[deprecated(note = "swallows I/O errors; use `datekit::input` or a bounded `Prompter`")]
pub fn read_integer() -> i32 {
    or_default(Prompter::stdio().read_integer(), 0)
}

/// Legacy: like [`read_integer`], parsing only the first `max_length`
/// characters of each line.
#[deprecated(note = "swallows I/O errors; use `datekit::input` or a bounded `Prompter`")]
pub fn read_integer_max(max_length: usize) -> i32 {
    or_default(Prompter::stdio().read_integer_max(max_length), 0)
}

/// Legacy: prompts until stdin yields a non-empty line; `' '` if stdin fails.
#[deprecated(note = "swallows I/O errors; use `datekit::input` or a bounded `Prompter`")]
pub fn read_char() -> char {
    or_default(Prompter::stdio().read_char(), ' ')
}

/// Legacy: prompts until stdin yields a number; `0.0` if stdin fails.
#[deprecated(note = "swallows I/O errors; use `datekit::input` or a bounded `Prompter`")]
pub fn read_double() -> f64 {
    or_default(Prompter::stdio().read_double(), 0.0)
}

/// Legacy: prints "Press ENTER to continue" and waits for a line.
#[deprecated(note = "swallows I/O errors; use `datekit::input` or a bounded `Prompter`")]
pub fn press_enter() {
    if let Err(err) = Prompter::stdio().press_enter() {
        warn!("console read failed: {err}");
    }
}
