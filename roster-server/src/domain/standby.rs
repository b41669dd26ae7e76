//! Standby shift code type.

use std::fmt;

use serde::{Serialize, Serializer};

/// A validated standby shift code.
///
/// Standby codes are `D7S` followed by a single digit identifying the
/// shift (e.g., "D7S1").
///
/// # Examples
///
/// ```
/// use roster_server::domain::StandbyCode;
///
/// let sb = StandbyCode::parse("D7S3").unwrap();
/// assert_eq!(sb.as_str(), "D7S3");
///
/// assert!(StandbyCode::parse("D7S").is_none());
/// assert!(StandbyCode::parse("D7S12").is_none());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StandbyCode([u8; 4]);

impl StandbyCode {
    /// Parse a standby code. The whole input must be the code.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();

        if bytes.len() != 4 || &bytes[..3] != b"D7S" || !bytes[3].is_ascii_digit() {
            return None;
        }

        Some(StandbyCode([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Returns the standby code as a string slice.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for StandbyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StandbyCode({})", self.as_str())
    }
}

impl fmt::Display for StandbyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StandbyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
