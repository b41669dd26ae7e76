//! Duty records.
//!
//! A duty is one scheduled unit of work on a roster: a flight leg, a standby
//! shift, or an off/rest day. Fields are filled in incrementally while a
//! roster is read, so all of them are optional; [`Duty::is_complete`] says
//! whether a finished duty carries everything its kind requires.

use std::fmt;

use serde::{Serialize, Serializer};

use super::{AirportRef, DutyTime, FlightNumber, StandbyCode};

/// What kind of duty a record describes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DutyKind {
    /// Not yet decided (in-progress duties only).
    #[default]
    Unclassified,
    FlightDuty,
    Standby,
    /// Off, rest or annual-leave day. Holds the marker exactly as printed
    /// ("OFF", "REST", "AL", or a run of them such as "OFFOFF").
    OffRest(String),
}

impl DutyKind {
    /// Label used on the wire.
    pub fn label(&self) -> &str {
        match self {
            DutyKind::Unclassified => "UNCLASSIFIED",
            DutyKind::FlightDuty => "FLIGHT_DUTY",
            DutyKind::Standby => "STANDBY",
            DutyKind::OffRest(marker) => marker,
        }
    }
}

impl fmt::Display for DutyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for DutyKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Arrow glyph marking a duty that continues into or out of a layover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OvernightMarker {
    /// `→`
    Across,
    /// `↓`
    Down,
}

impl OvernightMarker {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "→" => Some(OvernightMarker::Across),
            "↓" => Some(OvernightMarker::Down),
            _ => None,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            OvernightMarker::Across => "→",
            OvernightMarker::Down => "↓",
        }
    }
}

impl Serialize for OvernightMarker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.glyph())
    }
}

/// One duty read from a roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Duty {
    #[serde(rename = "type")]
    pub kind: DutyKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<FlightNumber>,

    #[serde(rename = "standby", skip_serializing_if = "Option::is_none")]
    pub standby_code: Option<StandbyCode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DutyTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DutyTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<DutyTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<DutyTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duty_end_time: Option<DutyTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_airport: Option<AirportRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_airport: Option<AirportRef>,

    #[serde(rename = "overnight", skip_serializing_if = "Option::is_none")]
    pub overnight_marker: Option<OvernightMarker>,

    /// Report time read after an off/rest marker. Folded into the flight
    /// times once the roster has been read; never present in parser output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporting_time: Option<DutyTime>,
}

impl Duty {
    /// True if nothing at all has been recorded on this duty.
    pub fn is_empty(&self) -> bool {
        *self == Duty::default()
    }

    /// Decide the kind of a finished duty.
    ///
    /// Off/rest duties keep their marker. Anything else is a standby duty if
    /// it carries a standby code and a flight duty otherwise, whether or not
    /// the standby shift's end time was seen.
    pub fn finalize(mut self) -> Self {
        if !matches!(self.kind, DutyKind::OffRest(_)) {
            self.kind = if self.standby_code.is_some() {
                DutyKind::Standby
            } else {
                DutyKind::FlightDuty
            };
        }
        self
    }

    /// True if this duty carries a flight number and both flight times.
    ///
    /// These are the duties whose airports are worth resolving.
    pub fn has_flight_times(&self) -> bool {
        self.flight_number.is_some() && self.departure_time.is_some() && self.arrival_time.is_some()
    }

    /// True if the duty belongs in parser output.
    ///
    /// Only flight and standby duties with every field their kind requires
    /// qualify. Off/rest and unclassified duties never do.
    pub fn is_complete(&self) -> bool {
        match self.kind {
            DutyKind::FlightDuty => {
                self.has_flight_times()
                    && self.departure_airport.is_some()
                    && self.arrival_airport.is_some()
            }
            DutyKind::Standby => self.start_time.is_some() && self.end_time.is_some(),
            DutyKind::OffRest(_) | DutyKind::Unclassified => false,
        }
    }

    /// Shift an off/rest duty's times along by one slot so the reporting time
    /// becomes the departure time.
    ///
    /// `duty_end_time` takes the old arrival time, `arrival_time` the old
    /// departure time. Does nothing if no reporting time was recorded.
    pub fn fold_reporting_time(&mut self) {
        if let Some(reporting) = self.reporting_time.take() {
            self.duty_end_time = self.arrival_time;
            self.arrival_time = self.departure_time;
            self.departure_time = Some(reporting);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IataCode;

    fn t(s: &str) -> DutyTime {
        DutyTime::parse(s).unwrap()
    }

    fn airport(s: &str) -> AirportRef {
        AirportRef::from(IataCode::parse(s).unwrap())
    }

    fn flight() -> Duty {
        Duty {
            kind: DutyKind::FlightDuty,
            flight_number: FlightNumber::parse("D123"),
            departure_time: Some(t("08:00")),
            arrival_time: Some(t("09:30")),
            departure_airport: Some(airport("JFK")),
            arrival_airport: Some(airport("LAX")),
            ..Duty::default()
        }
    }

    #[test]
    fn default_duty_is_empty() {
        assert!(Duty::default().is_empty());

        let duty = Duty {
            overnight_marker: Some(OvernightMarker::Down),
            ..Duty::default()
        };
        assert!(!duty.is_empty());
    }

    #[test]
    fn finalize_assigns_kind() {
        let duty = Duty {
            flight_number: FlightNumber::parse("D123"),
            ..Duty::default()
        };
        assert_eq!(duty.finalize().kind, DutyKind::FlightDuty);

        let duty = Duty {
            standby_code: StandbyCode::parse("D7S1"),
            start_time: Some(t("06:00")),
            ..Duty::default()
        };
        assert_eq!(duty.finalize().kind, DutyKind::Standby);

        let duty = Duty {
            kind: DutyKind::OffRest("REST".into()),
            ..Duty::default()
        };
        assert_eq!(duty.finalize().kind, DutyKind::OffRest("REST".into()));
    }

    #[test]
    fn complete_flight_duty() {
        assert!(flight().is_complete());

        let mut missing = flight();
        missing.arrival_airport = None;
        assert!(!missing.is_complete());

        let mut missing = flight();
        missing.arrival_time = None;
        assert!(!missing.is_complete());

        let mut missing = flight();
        missing.flight_number = None;
        assert!(!missing.is_complete());
    }

    #[test]
    fn complete_standby_duty() {
        let mut duty = Duty {
            kind: DutyKind::Standby,
            standby_code: StandbyCode::parse("D7S2"),
            start_time: Some(t("06:00")),
            ..Duty::default()
        };
        assert!(!duty.is_complete());

        duty.end_time = Some(t("10:00"));
        assert!(duty.is_complete());
    }

    #[test]
    fn unclassified_is_never_complete() {
        let mut duty = flight();
        duty.kind = DutyKind::Unclassified;
        assert!(!duty.is_complete());
    }

    #[test]
    fn off_rest_is_never_complete() {
        let mut duty = flight();
        duty.kind = DutyKind::OffRest("OFF".into());
        assert!(!duty.is_complete());

        let bare = Duty {
            kind: DutyKind::OffRest("REST".into()),
            ..Duty::default()
        };
        assert!(!bare.is_complete());
    }

    #[test]
    fn fold_reporting_time_shifts_slots() {
        let mut duty = Duty {
            kind: DutyKind::OffRest("OFF".into()),
            reporting_time: Some(t("05:00")),
            departure_time: Some(t("06:00")),
            arrival_time: Some(t("07:00")),
            ..Duty::default()
        };

        duty.fold_reporting_time();

        assert_eq!(duty.departure_time, Some(t("05:00")));
        assert_eq!(duty.arrival_time, Some(t("06:00")));
        assert_eq!(duty.duty_end_time, Some(t("07:00")));
        assert_eq!(duty.reporting_time, None);
    }

    #[test]
    fn fold_without_reporting_time_is_noop() {
        let mut duty = flight();
        duty.fold_reporting_time();
        assert_eq!(duty, flight());
    }

    #[test]
    fn serialize_wire_names() {
        let mut duty = flight();
        duty.overnight_marker = Some(OvernightMarker::Across);

        let value = serde_json::to_value(&duty).unwrap();
        assert_eq!(value["type"], "FLIGHT_DUTY");
        assert_eq!(value["flightNumber"], "D123");
        assert_eq!(value["departureTime"], "08:00");
        assert_eq!(value["arrivalTime"], "09:30");
        assert_eq!(value["departureAirport"], "JFK");
        assert_eq!(value["arrivalAirport"], "LAX");
        assert_eq!(value["overnight"], "→");
        assert!(value.get("standby").is_none());
        assert!(value.get("reportingTime").is_none());
    }

    #[test]
    fn off_rest_kind_serializes_marker() {
        let duty = Duty {
            kind: DutyKind::OffRest("ALAL".into()),
            ..Duty::default()
        };
        let value = serde_json::to_value(&duty).unwrap();
        assert_eq!(value["type"], "ALAL");
    }
}
