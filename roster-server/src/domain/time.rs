//! Duty time handling.
//!
//! Rosters print times as "HH:MM" strings. The strict layout may prefix a
//! time with `A` to mark that it falls on the following day ("A01:15").
//! The raw text is kept exactly as printed; callers that need arithmetic
//! use [`DutyTime::to_naive_time`] and [`DutyTime::is_next_day`].

use std::fmt;

use chrono::NaiveTime;
use serde::{Serialize, Serializer};

/// A clock time as printed on a roster.
///
/// Only the shape is validated (two digits, colon, two digits, optional
/// leading `A`), matching what roster extraction produces. Values such as
/// "24:00" are kept; [`DutyTime::to_naive_time`] returns `None` for them.
///
/// # Examples
///
/// ```
/// use roster_server::domain::DutyTime;
///
/// let t = DutyTime::parse("A01:15").unwrap();
/// assert!(t.is_next_day());
/// assert_eq!(t.clock(), "01:15");
/// assert_eq!(t.to_string(), "A01:15");
///
/// assert!(DutyTime::parse("1:15").is_none());
/// assert!(DutyTime::parse("B01:15").is_none());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DutyTime {
    next_day: bool,
    /// "HH:MM" bytes.
    clock: [u8; 5],
}

impl DutyTime {
    /// Parse "HH:MM" or "AHH:MM".
    pub fn parse(s: &str) -> Option<Self> {
        let (next_day, rest) = match s.strip_prefix('A') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let bytes = rest.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return None;
        }

        if ![bytes[0], bytes[1], bytes[3], bytes[4]]
            .iter()
            .all(u8::is_ascii_digit)
        {
            return None;
        }

        Some(Self {
            next_day,
            clock: [bytes[0], bytes[1], bytes[2], bytes[3], bytes[4]],
        })
    }

    /// True if the time carried the `A` (next day) prefix.
    pub fn is_next_day(&self) -> bool {
        self.next_day
    }

    /// The "HH:MM" part, without any prefix.
    pub fn clock(&self) -> &str {
        std::str::from_utf8(&self.clock).unwrap_or_default()
    }

    /// Returns the hour digits as a number (not range-checked).
    pub fn hour(&self) -> u32 {
        two_digits(self.clock[0], self.clock[1])
    }

    /// Returns the minute digits as a number (not range-checked).
    pub fn minute(&self) -> u32 {
        two_digits(self.clock[3], self.clock[4])
    }

    /// Convert to a chrono time, or `None` if the digits are out of range.
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0)
    }
}

fn two_digits(tens: u8, units: u8) -> u32 {
    u32::from(tens - b'0') * 10 + u32::from(units - b'0')
}

impl fmt::Debug for DutyTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DutyTime({self})")
    }
}

impl fmt::Display for DutyTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.next_day {
            f.write_str("A")?;
        }
        f.write_str(self.clock())
    }
}

impl Serialize for DutyTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
