//! Airport resolution for assembled duties.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use tracing::{debug, warn};

use crate::airports::{AirportResolver, resolve_with_timeout};
use crate::domain::{Airport, AirportRef, Duty, IataCode};

/// Unique bare airport codes worth resolving.
///
/// Only duties with a flight number and both flight times contribute:
/// anything else will not survive the completeness filter.
pub fn unique_airport_codes(duties: &[Duty]) -> BTreeSet<IataCode> {
    duties
        .iter()
        .filter(|duty| duty.has_flight_times())
        .flat_map(|duty| [&duty.departure_airport, &duty.arrival_airport])
        .filter_map(|field| field.as_ref().and_then(AirportRef::unresolved))
        .collect()
}

/// Replace bare codes with the matching airport records.
///
/// Codes with no matching record are left as they are. Returns the number
/// of fields that were replaced.
pub fn apply_airports(duties: &mut [Duty], airports: &[Airport]) -> usize {
    let by_code: HashMap<IataCode, &Airport> = airports
        .iter()
        .filter_map(|airport| airport.iata_code().map(|code| (code, airport)))
        .collect();

    let mut replaced = 0;
    for duty in duties.iter_mut() {
        for field in [&mut duty.departure_airport, &mut duty.arrival_airport] {
            let Some(code) = field.as_ref().and_then(AirportRef::unresolved) else {
                continue;
            };
            if let Some(airport) = by_code.get(&code) {
                *field = Some(AirportRef::Resolved(Box::new((*airport).clone())));
                replaced += 1;
            }
        }
    }
    replaced
}

/// Resolve the airports of `duties` in one batch.
///
/// Failures and timeouts are logged and leave every code unresolved; they
/// never fail the parse. Returns the number of fields that were replaced.
pub async fn resolve_airports<R: AirportResolver>(
    duties: &mut [Duty],
    resolver: &R,
    timeout: Duration,
) -> usize {
    let codes: Vec<IataCode> = unique_airport_codes(duties).into_iter().collect();
    if codes.is_empty() {
        return 0;
    }

    match resolve_with_timeout(resolver, &codes, timeout).await {
        Ok(airports) => {
            let replaced = apply_airports(duties, &airports);
            debug!(
                requested = codes.len(),
                returned = airports.len(),
                replaced,
                "resolved roster airports"
            );
            replaced
        }
        Err(e) => {
            warn!(error = %e, codes = codes.len(), "airport resolution failed; keeping bare codes");
            0
        }
    }
}
