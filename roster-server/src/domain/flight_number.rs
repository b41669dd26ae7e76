//! Flight number type.

use std::fmt;

use serde::{Serialize, Serializer};

/// A validated roster flight number.
///
/// Roster flight numbers are a literal `D` followed by three or four digits
/// (e.g., "D123", "D5012"). The airline designator is not printed on the
/// roster, so only the `D` prefix and the numeric part are present.
///
/// `FlightNumber::parse` returns `None` for anything else rather than an
/// error: roster lines that are not flight numbers are expected, not invalid.
///
/// # Examples
///
/// ```
/// use roster_server::domain::FlightNumber;
///
/// let f = FlightNumber::parse("D5012").unwrap();
/// assert_eq!(f.as_str(), "D5012");
///
/// assert!(FlightNumber::parse("D12").is_none());
/// assert!(FlightNumber::parse("AK123").is_none());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlightNumber {
    bytes: [u8; 5],
    len: u8,
}

impl FlightNumber {
    /// Parse a flight number: `D` then 3-4 ASCII digits, nothing else.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();

        if !(4..=5).contains(&bytes.len()) {
            return None;
        }

        if bytes[0] != b'D' || !bytes[1..].iter().all(u8::is_ascii_digit) {
            return None;
        }

        let mut buf = [0u8; 5];
        buf[..bytes.len()].copy_from_slice(bytes);

        Some(FlightNumber {
            bytes: buf,
            len: bytes.len() as u8,
        })
    }

    /// Returns the flight number as a string slice.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }
}

impl fmt::Debug for FlightNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlightNumber({})", self.as_str())
    }
}

impl fmt::Display for FlightNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FlightNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
