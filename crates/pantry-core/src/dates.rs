//! Calendar helpers for the weekly planner.
//!
//! All functions work on [`jiff::civil::Date`], a calendar date with no time
//! of day and no time zone. The only place a time zone enters is [`today`],
//! which reads the wall clock in the system zone and keeps the local calendar
//! fields. Nothing here converts through UTC, so a date picked late in the
//! evening west of Greenwich stays on the same day.

use std::fmt;
use std::str::FromStr;

use jiff::{
    civil::{Date, Weekday},
    ToSpan, Zoned,
};
use serde::{Deserialize, Serialize};

use crate::error::{PantryError, Result};

/// Number of days shown before the centre of the calendar strip.
pub const STRIP_DAYS_BEFORE: i32 = 15;

/// Number of days shown after the centre of the calendar strip.
pub const STRIP_DAYS_AFTER: i32 = 14;

/// Lowercase three-letter weekday token used on the wire (`mon`..`sun`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    /// All seven tokens, Monday first.
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    /// The token for the weekday a date falls on.
    pub fn of(date: Date) -> Self {
        date.weekday().into()
    }

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Mon => "mon",
            Day::Tue => "tue",
            Day::Wed => "wed",
            Day::Thu => "thu",
            Day::Fri => "fri",
            Day::Sat => "sat",
            Day::Sun => "sun",
        }
    }

    /// Capitalised label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Monday => Day::Mon,
            Weekday::Tuesday => Day::Tue,
            Weekday::Wednesday => Day::Wed,
            Weekday::Thursday => Day::Thu,
            Weekday::Friday => Day::Fri,
            Weekday::Saturday => Day::Sat,
            Weekday::Sunday => Day::Sun,
        }
    }
}

impl From<Day> for Weekday {
    fn from(day: Day) -> Self {
        match day {
            Day::Mon => Weekday::Monday,
            Day::Tue => Weekday::Tuesday,
            Day::Wed => Weekday::Wednesday,
            Day::Thu => Weekday::Thursday,
            Day::Fri => Weekday::Friday,
            Day::Sat => Weekday::Saturday,
            Day::Sun => Weekday::Sunday,
        }
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mon" | "monday" => Ok(Day::Mon),
            "tue" | "tuesday" => Ok(Day::Tue),
            "wed" | "wednesday" => Ok(Day::Wed),
            "thu" | "thursday" => Ok(Day::Thu),
            "fri" | "friday" => Ok(Day::Fri),
            "sat" | "saturday" => Ok(Day::Sat),
            "sun" | "sunday" => Ok(Day::Sun),
            _ => Err(format!("Invalid day: {s}")),
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First day of the week containing `date`, for a week that begins on
/// `first_day`.
///
/// The result is idempotent: feeding it back in returns the same date.
///
/// # Errors
///
/// Returns `PantryError::InvalidDate` when the start would fall before the
/// earliest representable date.
///
/// # Examples
///
/// ```rust
/// use jiff::civil::date;
/// use pantry_core::dates::{week_start, Day};
///
/// // Thursday 14 March 2024, weeks starting on Sunday
/// let start = week_start(date(2024, 3, 14), Day::Sun).unwrap();
/// assert_eq!(start, date(2024, 3, 10));
/// assert_eq!(week_start(start, Day::Sun).unwrap(), start);
/// ```
pub fn week_start(date: Date, first_day: Day) -> Result<Date> {
    let first = Weekday::from(first_day).to_monday_zero_offset();
    let current = date.weekday().to_monday_zero_offset();
    let back = i64::from((current - first).rem_euclid(7));
    Ok(date.checked_sub(back.days())?)
}

/// True when `date` already sits on the configured first day of the week.
pub fn is_week_start(date: Date, first_day: Day) -> bool {
    Day::of(date) == first_day
}

/// The seven consecutive dates of the week beginning at `start`.
///
/// # Errors
///
/// Returns `PantryError::InvalidDate` near the end of the supported range.
pub fn week_dates(start: Date) -> Result<Vec<Date>> {
    (0..7i64)
        .map(|offset| start.checked_add(offset.days()).map_err(PantryError::from))
        .collect()
}

/// Move by whole months, clamping to the last day of the target month.
///
/// January 31 plus one month is the last day of February.
///
/// # Errors
///
/// Returns `PantryError::InvalidDate` when the result is out of range.
pub fn shift_months(date: Date, months: i32) -> Result<Date> {
    Ok(date.checked_add(months.months())?)
}

/// Dates of the scrolling calendar strip centred on `center`.
///
/// # Errors
///
/// Returns `PantryError::InvalidDate` near the ends of the supported range.
pub fn visible_dates(center: Date) -> Result<Vec<Date>> {
    (-STRIP_DAYS_BEFORE..=STRIP_DAYS_AFTER)
        .map(|offset| center.checked_add(offset.days()).map_err(PantryError::from))
        .collect()
}

/// Current date read from the local calendar of the system time zone.
pub fn today() -> Date {
    Zoned::now().date()
}

/// Canonical `YYYY-MM-DD` rendering.
pub fn format_iso(date: Date) -> String {
    date.strftime("%Y-%m-%d").to_string()
}

/// Parse a canonical `YYYY-MM-DD` date.
///
/// Surrounding whitespace is ignored. Other ISO 8601 forms, such as the
/// basic `YYYYMMDD` form or a date with a time attached, are rejected
/// rather than truncated.
///
/// # Errors
///
/// Returns `PantryError::InvalidInput` when the text is not shaped like
/// `YYYY-MM-DD`, and `PantryError::InvalidDate` for a date that does not
/// exist, such as `2024-02-30`.
pub fn parse_iso(text: &str) -> Result<Date> {
    let text = text.trim();
    if !is_iso_shaped(text) {
        return Err(PantryError::invalid_input("date")
            .with_reason(format!("expected YYYY-MM-DD, got '{text}'")));
    }
    Ok(text.parse::<Date>()?)
}

fn is_iso_shaped(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, byte)| match i {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}
