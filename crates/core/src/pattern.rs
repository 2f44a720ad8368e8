//! strftime pattern compilation and rendering.
//!
//! A pattern is compiled once into literal runs and directives, so an
//! unknown directive is reported before anything is rendered. Rendering
//! itself is delegated to chrono's formatting items.
//!
//! | Directive | Meaning | Example |
//! |-----------|---------|---------|
//! | `%A` / `%a` | Weekday name, full / abbreviated | `Monday` / `Mon` |
//! | `%B` / `%b` / `%h` | Month name, full / abbreviated | `January` / `Jan` |
//! | `%C` | Century, zero-padded | `20` |
//! | `%c` | Date and time | `Mon Jan 15 10:30:00 2024` |
//! | `%D` / `%x` | `%m/%d/%y` | `01/15/24` |
//! | `%d` / `%e` | Day of month, zero / space padded | `05` / ` 5` |
//! | `%F` | `%Y-%m-%d` | `2024-01-15` |
//! | `%H` / `%k` | Hour (00-23), zero / space padded | `09` / ` 9` |
//! | `%I` / `%l` | Hour (01-12), zero / space padded | `02` / ` 2` |
//! | `%j` | Day of year | `015` |
//! | `%M` | Minute | `30` |
//! | `%m` | Month number | `01` |
//! | `%n` / `%t` | Newline / tab | |
//! | `%p` | `AM` or `PM` | `PM` |
//! | `%R` | `%H:%M` | `14:30` |
//! | `%r` | `%I:%M:%S %p` | `02:30:00 PM` |
//! | `%S` | Second | `45` |
//! | `%T` / `%X` | `%H:%M:%S` | `14:30:45` |
//! | `%U` / `%W` | Week of year, Sunday / Monday start | `02` |
//! | `%u` / `%w` | Weekday number, Monday=1..7 / Sunday=0..6 | `1` |
//! | `%V` | ISO 8601 week number | `03` |
//! | `%v` | `%e-%b-%Y` | `15-Jan-2024` |
//! | `%Y` / `%y` | Year, four / two digits | `2024` / `24` |
//! | `%Z` | `UTC` for a zero offset, otherwise `+hhmm` | `-0800` |
//! | `%z` | UTC offset as `+hhmm` | `+0530` |
//! | `%%` | A literal `%` | |

use std::fmt::Write as _;

use chrono::format::{Fixed, Item, Numeric, Pad};

use crate::error::FormatError;
use crate::timestamp::Timestamp;

const fn zero(numeric: Numeric) -> Item<'static> {
    Item::Numeric(numeric, Pad::Zero)
}

const fn space(numeric: Numeric) -> Item<'static> {
    Item::Numeric(numeric, Pad::Space)
}

const fn fixed(fixed: Fixed) -> Item<'static> {
    Item::Fixed(fixed)
}

const fn lit(text: &'static str) -> Item<'static> {
    Item::Literal(text)
}

const WEEKDAY_FULL: &[Item<'static>] = &[fixed(Fixed::LongWeekdayName)];
const WEEKDAY_ABBREV: &[Item<'static>] = &[fixed(Fixed::ShortWeekdayName)];
const MONTH_FULL: &[Item<'static>] = &[fixed(Fixed::LongMonthName)];
const MONTH_ABBREV: &[Item<'static>] = &[fixed(Fixed::ShortMonthName)];
const CENTURY: &[Item<'static>] = &[zero(Numeric::YearDiv100)];
const DATE_AND_TIME: &[Item<'static>] = &[
    fixed(Fixed::ShortWeekdayName),
    lit(" "),
    fixed(Fixed::ShortMonthName),
    lit(" "),
    space(Numeric::Day),
    lit(" "),
    zero(Numeric::Hour),
    lit(":"),
    zero(Numeric::Minute),
    lit(":"),
    zero(Numeric::Second),
    lit(" "),
    zero(Numeric::Year),
];
const AMERICAN_DATE: &[Item<'static>] = &[
    zero(Numeric::Month),
    lit("/"),
    zero(Numeric::Day),
    lit("/"),
    zero(Numeric::YearMod100),
];
const DAY_ZERO: &[Item<'static>] = &[zero(Numeric::Day)];
const DAY_SPACE: &[Item<'static>] = &[space(Numeric::Day)];
const ISO_DATE: &[Item<'static>] = &[
    zero(Numeric::Year),
    lit("-"),
    zero(Numeric::Month),
    lit("-"),
    zero(Numeric::Day),
];
const HOUR24_ZERO: &[Item<'static>] = &[zero(Numeric::Hour)];
const HOUR24_SPACE: &[Item<'static>] = &[space(Numeric::Hour)];
const HOUR12_ZERO: &[Item<'static>] = &[zero(Numeric::Hour12)];
const HOUR12_SPACE: &[Item<'static>] = &[space(Numeric::Hour12)];
const DAY_OF_YEAR: &[Item<'static>] = &[zero(Numeric::Ordinal)];
const MINUTE: &[Item<'static>] = &[zero(Numeric::Minute)];
const MONTH: &[Item<'static>] = &[zero(Numeric::Month)];
const AMPM: &[Item<'static>] = &[fixed(Fixed::UpperAmPm)];
const CLOCK_NO_SECONDS: &[Item<'static>] =
    &[zero(Numeric::Hour), lit(":"), zero(Numeric::Minute)];
const CLOCK_12HOUR: &[Item<'static>] = &[
    zero(Numeric::Hour12),
    lit(":"),
    zero(Numeric::Minute),
    lit(":"),
    zero(Numeric::Second),
    lit(" "),
    fixed(Fixed::UpperAmPm),
];
const SECOND: &[Item<'static>] = &[zero(Numeric::Second)];
const CLOCK: &[Item<'static>] = &[
    zero(Numeric::Hour),
    lit(":"),
    zero(Numeric::Minute),
    lit(":"),
    zero(Numeric::Second),
];
const WEEK_FROM_SUNDAY: &[Item<'static>] = &[zero(Numeric::WeekFromSun)];
const WEEK_FROM_MONDAY: &[Item<'static>] = &[zero(Numeric::WeekFromMon)];
const WEEK_ISO: &[Item<'static>] = &[zero(Numeric::IsoWeek)];
const WEEKDAY_FROM_MONDAY: &[Item<'static>] = &[zero(Numeric::WeekdayFromMon)];
const WEEKDAY_FROM_SUNDAY: &[Item<'static>] = &[zero(Numeric::NumDaysFromSun)];
const VMS_DATE: &[Item<'static>] = &[
    space(Numeric::Day),
    lit("-"),
    fixed(Fixed::ShortMonthName),
    lit("-"),
    zero(Numeric::Year),
];
const YEAR: &[Item<'static>] = &[zero(Numeric::Year)];
const YEAR2: &[Item<'static>] = &[zero(Numeric::YearMod100)];
const OFFSET: &[Item<'static>] = &[fixed(Fixed::TimezoneOffset)];

#[derive(Debug, Clone)]
enum Segment<'p> {
    /// Text copied through unchanged.
    Literal(&'p str),
    /// A directive rendered by chrono.
    Items(&'static [Item<'static>]),
    /// `%Z`: depends on the offset of the instant being rendered.
    ZoneName,
}

/// Map the character after a '%' to what it renders.
fn directive(conversion: char) -> Option<Segment<'static>> {
    let items = match conversion {
        'A' => WEEKDAY_FULL,
        'a' => WEEKDAY_ABBREV,
        'B' => MONTH_FULL,
        'b' | 'h' => MONTH_ABBREV,
        'C' => CENTURY,
        'c' => DATE_AND_TIME,
        'D' | 'x' => AMERICAN_DATE,
        'd' => DAY_ZERO,
        'e' => DAY_SPACE,
        'F' => ISO_DATE,
        'H' => HOUR24_ZERO,
        'I' => HOUR12_ZERO,
        'j' => DAY_OF_YEAR,
        'k' => HOUR24_SPACE,
        'l' => HOUR12_SPACE,
        'M' => MINUTE,
        'm' => MONTH,
        'p' => AMPM,
        'R' => CLOCK_NO_SECONDS,
        'r' => CLOCK_12HOUR,
        'S' => SECOND,
        'T' | 'X' => CLOCK,
        'U' => WEEK_FROM_SUNDAY,
        'u' => WEEKDAY_FROM_MONDAY,
        'V' => WEEK_ISO,
        'v' => VMS_DATE,
        'W' => WEEK_FROM_MONDAY,
        'w' => WEEKDAY_FROM_SUNDAY,
        'Y' => YEAR,
        'y' => YEAR2,
        'z' => OFFSET,
        'Z' => return Some(Segment::ZoneName),
        'n' => return Some(Segment::Literal("\n")),
        't' => return Some(Segment::Literal("\t")),
        '%' => return Some(Segment::Literal("%")),
        _ => return None,
    };
    Some(Segment::Items(items))
}

/// A compiled strftime pattern, borrowing its literal text from the source.
#[derive(Debug, Clone)]
pub struct Pattern<'p> {
    segments: Vec<Segment<'p>>,
}

impl<'p> Pattern<'p> {
    /// Compile a pattern, rejecting unknown directives and a trailing `%`.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeutils_core::{Pattern, Timestamp};
    ///
    /// let pattern = Pattern::compile("%I:%M %p").unwrap();
    /// let ts = Timestamp::parse("2024-01-15T14:30:00Z").unwrap();
    /// assert_eq!(pattern.render(&ts).unwrap(), "02:30 PM");
    ///
    /// assert!(Pattern::compile("%Q").is_err());
    /// ```
    pub fn compile(pattern: &'p str) -> Result<Self, FormatError> {
        let mut segments = Vec::new();
        let mut rest = pattern;
        let mut consumed = 0;

        while let Some(idx) = rest.find('%') {
            if idx > 0 {
                segments.push(Segment::Literal(&rest[..idx]));
            }
            let position = consumed + idx;
            let Some(conversion) = rest[idx + 1..].chars().next() else {
                return Err(FormatError::TrailingPercent { position });
            };
            let segment = directive(conversion).ok_or(FormatError::UnknownDirective {
                directive: conversion,
                position,
            })?;
            segments.push(segment);

            let step = idx + 1 + conversion.len_utf8();
            rest = &rest[step..];
            consumed += step;
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest));
        }

        Ok(Self { segments })
    }

    /// Render the pattern for an instant, in the instant's own offset.
    pub fn render(&self, timestamp: &Timestamp) -> Result<String, FormatError> {
        let dt = timestamp.as_datetime();
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Items(items) => write!(out, "{}", dt.format_with_items(items.iter()))
                    .map_err(|_| FormatError::Render)?,
                Segment::ZoneName if timestamp.offset_seconds() == 0 => out.push_str("UTC"),
                Segment::ZoneName => write!(out, "{}", dt.format_with_items(OFFSET.iter()))
                    .map_err(|_| FormatError::Render)?,
            }
        }
        Ok(out)
    }
}
