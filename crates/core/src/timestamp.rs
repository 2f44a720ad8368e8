//! Strict RFC3339 timestamp parsing.
//!
//! Every function in this crate reads its timestamps through
//! [`Timestamp::parse`]. The accepted grammar is:
//!
//! ```text
//! YYYY-MM-DD 'T' HH:MM:SS [ '.' fraction ] ( 'Z' | ('+' | '-') HH:MM )
//! ```
//!
//! Separators are case-sensitive, the offset is mandatory and nothing may
//! follow it. There is no lenient variant.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, TimeDelta};
use tracing::trace;

use crate::error::{ParseError, ParseErrorKind};

/// An absolute instant that remembers the UTC offset it was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    inner: DateTime<FixedOffset>,
}

impl Timestamp {
    /// Parse RFC3339 text.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeutils_core::Timestamp;
    ///
    /// let ts = Timestamp::parse("2024-01-15T10:30:00-08:00").unwrap();
    /// assert_eq!(ts.unix_seconds(), 1705343400);
    /// assert_eq!(ts.offset_seconds(), -8 * 3600);
    ///
    /// assert!(Timestamp::parse("2024-01-15 10:30:00").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        match parse_rfc3339(input) {
            Ok(inner) => Ok(Self { inner }),
            Err(kind) => {
                trace!(input, reason = %kind, "timestamp: rejected");
                Err(ParseError::new(input, kind))
            }
        }
    }

    /// The underlying date-time in its original offset.
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.inner
    }

    /// Whole seconds since 1970-01-01T00:00:00Z.
    ///
    /// Sub-second precision is dropped by flooring, so instants before the
    /// epoch with a fraction round away from zero.
    #[must_use]
    pub fn unix_seconds(&self) -> i64 {
        self.inner.timestamp()
    }

    /// Offset from UTC in seconds (east positive).
    #[must_use]
    pub fn offset_seconds(&self) -> i32 {
        self.inner.offset().local_minus_utc()
    }

    /// Signed time elapsed from `earlier` to `self`.
    #[must_use]
    pub fn signed_duration_since(&self, earlier: &Timestamp) -> TimeDelta {
        self.inner.signed_duration_since(earlier.inner)
    }
}

impl FromStr for Timestamp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

/// Byte cursor over ASCII-only grammar positions.
///
/// The cursor only ever advances over ASCII bytes, so `pos` always sits on a
/// char boundary of the original input.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn unexpected(&self, expected: &'static str) -> ParseErrorKind {
        match self.input[self.pos..].chars().next() {
            Some(found) => ParseErrorKind::Unexpected {
                expected,
                found,
                position: self.pos,
            },
            None => ParseErrorKind::UnexpectedEnd { expected },
        }
    }

    /// Read exactly `count` ASCII digits.
    fn digits(&mut self, count: usize, expected: &'static str) -> Result<u32, ParseErrorKind> {
        let mut value = 0u32;
        for _ in 0..count {
            match self.peek() {
                Some(b) if b.is_ascii_digit() => {
                    value = value * 10 + u32::from(b - b'0');
                    self.pos += 1;
                }
                _ => return Err(self.unexpected(expected)),
            }
        }
        Ok(value)
    }

    fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), ParseErrorKind> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Fractional seconds after the '.', as nanoseconds.
    ///
    /// At least one digit is required; digits past the ninth are read but
    /// do not contribute.
    fn fraction(&mut self) -> Result<u32, ParseErrorKind> {
        let start = self.pos;
        let mut nanos = 0u32;
        let mut scale = 100_000_000u32;
        while let Some(b) = self.peek().filter(u8::is_ascii_digit) {
            nanos += u32::from(b - b'0') * scale;
            scale /= 10;
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.unexpected("fractional second digits"));
        }
        Ok(nanos)
    }

    fn offset(&mut self) -> Result<FixedOffset, ParseErrorKind> {
        let sign = match self.peek() {
            None => return Err(ParseErrorKind::MissingOffset),
            Some(b'Z') => {
                self.pos += 1;
                return FixedOffset::east_opt(0).ok_or(ParseErrorKind::Unrepresentable);
            }
            Some(b'+') => 1,
            Some(b'-') => -1,
            Some(_) => return Err(self.unexpected("'Z' or a ±HH:MM offset")),
        };
        self.pos += 1;

        let hours = self.digits(2, "offset hour")?;
        check_range("offset hour", hours, 0..=23)?;
        self.expect(b':', "':' in offset")?;
        let minutes = self.digits(2, "offset minute")?;
        check_range("offset minute", minutes, 0..=59)?;

        // Both parts are range-checked, so this fits comfortably in an i32.
        let seconds = sign * (hours * 3600 + minutes * 60) as i32;
        FixedOffset::east_opt(seconds).ok_or(ParseErrorKind::Unrepresentable)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }
}

fn check_range(
    field: &'static str,
    value: u32,
    range: std::ops::RangeInclusive<u32>,
) -> Result<(), ParseErrorKind> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ParseErrorKind::OutOfRange { field, value })
    }
}

fn parse_rfc3339(input: &str) -> Result<DateTime<FixedOffset>, ParseErrorKind> {
    if input.is_empty() {
        return Err(ParseErrorKind::Empty);
    }
    let mut cur = Cursor::new(input);

    let year = cur.digits(4, "four-digit year")?;
    cur.expect(b'-', "'-' after year")?;
    let month = cur.digits(2, "two-digit month")?;
    check_range("month", month, 1..=12)?;
    cur.expect(b'-', "'-' after month")?;
    let day = cur.digits(2, "two-digit day")?;
    // A four-digit year always fits in i32.
    let date = NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or(ParseErrorKind::OutOfRange { field: "day", value: day })?;

    cur.expect(b'T', "'T' between date and time")?;
    let hour = cur.digits(2, "two-digit hour")?;
    check_range("hour", hour, 0..=23)?;
    cur.expect(b':', "':' after hour")?;
    let minute = cur.digits(2, "two-digit minute")?;
    check_range("minute", minute, 0..=59)?;
    cur.expect(b':', "':' after minute")?;
    let second = cur.digits(2, "two-digit second")?;
    check_range("second", second, 0..=59)?;

    let nanos = if cur.eat(b'.') { cur.fraction()? } else { 0 };
    let offset = cur.offset()?;

    let rest = cur.rest();
    if !rest.is_empty() {
        return Err(ParseErrorKind::TrailingText {
            rest: rest.to_string(),
        });
    }

    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
        .ok_or(ParseErrorKind::Unrepresentable)?;
    date.and_time(time)
        .and_local_timezone(offset)
        .single()
        .ok_or(ParseErrorKind::Unrepresentable)
}
