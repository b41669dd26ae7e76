//! Roster layouts and their lexical rules.
//!
//! Both supported layouts share one classifier and one assembler. What
//! differs between them is captured here as a table of switches.

use std::fmt;
use std::str::FromStr;

/// Text that identifies the strict (AirAsia) layout.
const STRICT_MARKER: &str = "AIR ASIA";

/// Per-layout lexical rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalRules {
    /// Find a standby code anywhere in a line rather than requiring the
    /// whole line to be the code.
    pub embedded_standby: bool,

    /// Recognise OFF / REST / AL lines as off/rest duties.
    pub off_rest_markers: bool,

    /// Accept an `A` (next day) prefix on times.
    pub next_day_prefix: bool,

    /// Accept a trailing `*` on airport codes.
    pub starred_airports: bool,
}

/// Rules for the AirAsia roster layout.
pub const STRICT_RULES: LexicalRules = LexicalRules {
    embedded_standby: true,
    off_rest_markers: false,
    next_day_prefix: true,
    starred_airports: true,
};

/// Rules for the plain generic layout.
pub const GENERIC_RULES: LexicalRules = LexicalRules {
    embedded_standby: false,
    off_rest_markers: true,
    next_day_prefix: false,
    starred_airports: false,
};

/// A supported roster layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterFormat {
    /// AirAsia rosters: extraction noise, `A`-prefixed next-day times,
    /// starred airports, and a printed date range.
    Strict,
    /// Plain one-token-per-line rosters with off/rest days.
    Generic,
}

impl RosterFormat {
    /// Pick a layout from the roster text.
    ///
    /// Only the strict layout has a reliable signature; anything else
    /// returns `None` and callers must choose a layout explicitly.
    pub fn detect(text: &str) -> Option<Self> {
        text.contains(STRICT_MARKER).then_some(RosterFormat::Strict)
    }

    pub fn rules(&self) -> &'static LexicalRules {
        match self {
            RosterFormat::Strict => &STRICT_RULES,
            RosterFormat::Generic => &GENERIC_RULES,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RosterFormat::Strict => "strict",
            RosterFormat::Generic => "generic",
        }
    }
}

impl fmt::Display for RosterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown layout name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown roster format: {0}")]
pub struct UnknownFormat(pub String);

impl FromStr for RosterFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(RosterFormat::Strict),
            "generic" => Ok(RosterFormat::Generic),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}
