//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Duty;
use crate::parser::ParsedRoster;

/// Query parameters for roster parsing.
#[derive(Debug, Default, Deserialize)]
pub struct ParseQuery {
    /// `strict`, `generic` or `auto` (the default)
    pub format: Option<String>,
}

/// Strict roster response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrictRosterResponse {
    pub duties: Vec<Duty>,
    pub start_date: String,
    pub end_date: String,
}

impl From<ParsedRoster> for StrictRosterResponse {
    fn from(roster: ParsedRoster) -> Self {
        Self {
            duties: roster.duties,
            start_date: roster.period.start_date,
            end_date: roster.period.end_date,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
