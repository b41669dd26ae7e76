//! Line classification.
//!
//! Every roster line is cleaned of invisible formatting characters and
//! classified into exactly one [`Token`]. Precedence is fixed: the first
//! matching category wins and lines matching nothing are [`Token::Noise`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{DutyTime, FlightNumber, IataCode, OvernightMarker, RosterPeriod, StandbyCode};

use super::rules::LexicalRules;

/// Zero-width characters left behind by PDF text extraction.
const INVISIBLE: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{2}/[0-9]{2}/[0-9]{4})\s*-\s*([0-9]{2}/[0-9]{2}/[0-9]{4})")
        .expect("date range pattern")
});

static EMBEDDED_STANDBY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"D7S[0-9]").expect("standby pattern"));

static OFF_REST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:OFF|REST|AL)+$").expect("off/rest pattern"));

/// A classified roster line.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// "DD/MM/YYYY - DD/MM/YYYY"
    DateRange(RosterPeriod),
    Standby(StandbyCode),
    /// TRG or CRM: training codes that carry no duty information.
    Training(&'static str),
    /// OFF / REST / AL marker, verbatim.
    OffRest(String),
    FlightNumber(FlightNumber),
    Time(DutyTime),
    /// Airport code; `starred` records a trailing `*` (a leg operated as
    /// a different duty), which is not kept on the duty.
    Airport { code: IataCode, starred: bool },
    Overnight(OvernightMarker),
    Noise,
}

impl Token {
    /// Short category name, for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Token::DateRange(_) => "date_range",
            Token::Standby(_) => "standby",
            Token::Training(_) => "training",
            Token::OffRest(_) => "off_rest",
            Token::FlightNumber(_) => "flight_number",
            Token::Time(_) => "time",
            Token::Airport { .. } => "airport",
            Token::Overnight(_) => "overnight",
            Token::Noise => "noise",
        }
    }

    /// The text that classifies back to this token, or `None` for noise.
    pub fn canonical(&self) -> Option<String> {
        let text = match self {
            Token::DateRange(period) => format!("{} - {}", period.start_date, period.end_date),
            Token::Standby(code) => code.to_string(),
            Token::Training(marker) => marker.to_string(),
            Token::OffRest(marker) => marker.clone(),
            Token::FlightNumber(flight) => flight.to_string(),
            Token::Time(time) => time.to_string(),
            Token::Airport { code, starred } => {
                if *starred {
                    format!("{code}*")
                } else {
                    code.to_string()
                }
            }
            Token::Overnight(marker) => marker.glyph().to_string(),
            Token::Noise => return None,
        };
        Some(text)
    }
}

/// Strip invisible formatting characters and surrounding whitespace.
pub fn normalize_line(line: &str) -> String {
    let visible: String = line.chars().filter(|c| !INVISIBLE.contains(c)).collect();
    visible.trim().to_string()
}

/// Classify one roster line under the given rules.
pub fn classify(line: &str, rules: &LexicalRules) -> Token {
    let normalized = normalize_line(line);
    let mut line = normalized.as_str();

    if let Some(caps) = DATE_RANGE.captures(line) {
        return Token::DateRange(RosterPeriod::new(&caps[1], &caps[2]));
    }

    if rules.embedded_standby
        && let Some(m) = EMBEDDED_STANDBY.find(line)
    {
        line = m.as_str();
    }
    if let Some(code) = StandbyCode::parse(line) {
        return Token::Standby(code);
    }

    match line {
        "TRG" => return Token::Training("TRG"),
        "CRM" => return Token::Training("CRM"),
        _ => {}
    }

    if rules.off_rest_markers && OFF_REST.is_match(line) {
        return Token::OffRest(line.to_string());
    }

    if let Some(flight) = FlightNumber::parse(line) {
        return Token::FlightNumber(flight);
    }

    if let Some(time) = DutyTime::parse(line)
        && (rules.next_day_prefix || !time.is_next_day())
    {
        return Token::Time(time);
    }

    if let Some(token) = classify_airport(line, rules) {
        return token;
    }

    if let Some(marker) = OvernightMarker::parse(line) {
        return Token::Overnight(marker);
    }

    Token::Noise
}

fn classify_airport(line: &str, rules: &LexicalRules) -> Option<Token> {
    let (bare, starred) = match line.strip_suffix('*') {
        Some(bare) if rules.starred_airports => (bare, true),
        Some(_) => return None,
        None => (line, false),
    };

    IataCode::parse(bare)
        .ok()
        .map(|code| Token::Airport { code, starred })
}
