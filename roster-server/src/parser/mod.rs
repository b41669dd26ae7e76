//! Crew roster text parser.
//!
//! Turns the text extracted from a roster document into duties:
//!
//! 1. every line is cleaned and classified ([`token`]),
//! 2. the token stream is grouped into duties ([`assembler`]),
//! 3. airports of candidate flight duties are resolved in one batch
//!    ([`resolve`]),
//! 4. incomplete duties are dropped.
//!
//! Parsing never fails. Unrecognised lines are noise, incomplete duties are
//! dropped, and airport lookup problems leave bare codes in place.

pub mod assembler;
pub mod resolve;
pub mod rules;
pub mod token;


use std::time::Duration;

use tracing::info;

use crate::airports::AirportResolver;
use crate::domain::{Duty, RosterPeriod};

pub use assembler::{Assembled, DutyAssembler, Mode, assemble};
pub use resolve::{apply_airports, resolve_airports, unique_airport_codes};
pub use rules::{GENERIC_RULES, LexicalRules, RosterFormat, STRICT_RULES, UnknownFormat};
pub use token::{Token, classify, normalize_line};

/// A parsed roster.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRoster {
    /// Layout the roster was read with.
    pub format: RosterFormat,

    /// Complete duties in roster order.
    pub duties: Vec<Duty>,

    /// Printed roster period (empty if none was found).
    pub period: RosterPeriod,
}

/// Parse a roster, detecting its layout from the text.
///
/// Returns `None` if the layout is not recognised.
pub async fn parse_roster<R: AirportResolver>(
    text: &str,
    resolver: &R,
    resolve_timeout: Duration,
) -> Option<ParsedRoster> {
    let format = RosterFormat::detect(text)?;
    Some(parse_with_format(text, format, resolver, resolve_timeout).await)
}

/// Parse a roster with an explicitly chosen layout.
pub async fn parse_with_format<R: AirportResolver>(
    text: &str,
    format: RosterFormat,
    resolver: &R,
    resolve_timeout: Duration,
) -> ParsedRoster {
    let Assembled { mut duties, period } = assemble(text, format.rules());
    let assembled = duties.len();

    let resolved = resolve_airports(&mut duties, resolver, resolve_timeout).await;
    retain_complete(&mut duties);

    info!(
        %format,
        assembled,
        kept = duties.len(),
        resolved,
        "parsed roster"
    );

    ParsedRoster {
        format,
        duties,
        period,
    }
}

/// Drop duties missing fields their kind requires.
pub fn retain_complete(duties: &mut Vec<Duty>) {
    duties.retain(Duty::is_complete);
}
