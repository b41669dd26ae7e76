//! Duty assembly.
//!
//! [`DutyAssembler`] consumes classified tokens in roster order and groups
//! them into duties. A duty is pushed whenever a token unambiguously starts
//! the next one (a flight number, a standby code, an off/rest marker) or when
//! a standby shift receives its end time. Whatever is still open at the end
//! of input is flushed by [`DutyAssembler::finish`].

use tracing::{debug, trace};

use crate::domain::{Duty, DutyKind, DutyTime, RosterPeriod};

use super::rules::LexicalRules;
use super::token::{Token, classify};

/// What the next time token means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Times fill departure, arrival, then duty end.
    #[default]
    Normal,
    /// A standby code was read: times fill start, then end.
    StandbyOpen,
    /// An off/rest marker was read: the next time is the reporting time.
    OffRestOpen,
}

/// Output of assembly, before airport resolution and filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembled {
    /// Every duty in roster order, including incomplete ones.
    pub duties: Vec<Duty>,

    /// Range from the first date-range line, or empty.
    pub period: RosterPeriod,
}

/// State machine turning a token stream into duties.
#[derive(Debug)]
pub struct DutyAssembler<'r> {
    rules: &'r LexicalRules,
    current: Duty,
    mode: Mode,
    duties: Vec<Duty>,
    period: Option<RosterPeriod>,
}

impl<'r> DutyAssembler<'r> {
    pub fn new(rules: &'r LexicalRules) -> Self {
        Self {
            rules,
            current: Duty::default(),
            mode: Mode::Normal,
            duties: Vec::new(),
            period: None,
        }
    }

    /// Current mode (for inspection in tests and diagnostics).
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Classify one raw line and feed it in.
    pub fn push_line(&mut self, line: &str) {
        let token = classify(line, self.rules);
        self.push_token(token);
    }

    /// Feed one token.
    pub fn push_token(&mut self, token: Token) {
        trace!(category = token.category(), mode = ?self.mode, "roster token");

        match token {
            Token::DateRange(period) => {
                if self.period.is_none() {
                    self.period = Some(period);
                }
            }
            Token::Training(_) | Token::Noise => {}
            Token::FlightNumber(flight) => {
                self.flush_current();
                self.current.flight_number = Some(flight);
                self.mode = Mode::Normal;
            }
            Token::Standby(code) => {
                self.flush_current();
                self.current.standby_code = Some(code);
                self.mode = Mode::StandbyOpen;
            }
            Token::OffRest(marker) => {
                self.flush_current();
                self.current.kind = DutyKind::OffRest(marker);
                self.mode = Mode::OffRestOpen;
            }
            Token::Time(time) => self.push_time(time),
            Token::Airport { code, .. } => {
                if self.current.departure_airport.is_none() {
                    self.current.departure_airport = Some(code.into());
                } else if self.current.arrival_airport.is_none() {
                    self.current.arrival_airport = Some(code.into());
                }
            }
            Token::Overnight(marker) => {
                self.current.overnight_marker = Some(marker);
            }
        }
    }

    fn push_time(&mut self, time: DutyTime) {
        match self.mode {
            Mode::StandbyOpen => {
                if self.current.start_time.is_none() {
                    self.current.start_time = Some(time);
                } else {
                    self.current.end_time = Some(time);
                    self.current.kind = DutyKind::Standby;
                    let duty = std::mem::take(&mut self.current);
                    self.push_duty(duty);
                    self.mode = Mode::Normal;
                }
            }
            Mode::OffRestOpen => {
                self.current.reporting_time = Some(time);
                self.mode = Mode::Normal;
            }
            Mode::Normal => {
                let duty = &mut self.current;
                let slot = [
                    &mut duty.departure_time,
                    &mut duty.arrival_time,
                    &mut duty.duty_end_time,
                ]
                .into_iter()
                .find(|slot| slot.is_none());

                if let Some(slot) = slot {
                    *slot = Some(time);
                }
            }
        }
    }

    /// Finalize and push the in-progress duty, if it holds anything.
    fn flush_current(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let duty = std::mem::take(&mut self.current).finalize();
        self.push_duty(duty);
    }

    fn push_duty(&mut self, duty: Duty) {
        debug!(
            kind = %duty.kind,
            flight = ?duty.flight_number,
            standby = ?duty.standby_code,
            "duty assembled"
        );
        self.duties.push(duty);
    }

    /// Flush the open duty and fold reporting times into flight times.
    pub fn finish(mut self) -> Assembled {
        self.flush_current();

        for duty in &mut self.duties {
            duty.fold_reporting_time();
        }

        Assembled {
            duties: self.duties,
            period: self.period.unwrap_or_default(),
        }
    }
}

/// Run the assembler over every line of `text`.
pub fn assemble(text: &str, rules: &LexicalRules) -> Assembled {
    let mut assembler = DutyAssembler::new(rules);
    for line in text.lines() {
        assembler.push_line(line);
    }
    assembler.finish()
}
