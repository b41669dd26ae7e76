//! Domain types for crew rosters.
//!
//! This module contains the types a parsed roster is made of. Code types
//! (`IataCode`, `FlightNumber`, `StandbyCode`, `DutyTime`) enforce their
//! format at construction time, so code that receives them can trust them.

mod airport;
mod duty;
mod flight_number;
mod iata;
mod period;
mod standby;
mod time;

pub use airport::{Airport, AirportRef};
pub use duty::{Duty, DutyKind, OvernightMarker};
pub use flight_number::FlightNumber;
pub use iata::{IataCode, InvalidIata};
pub use period::RosterPeriod;
pub use standby::StandbyCode;
pub use time::DutyTime;
