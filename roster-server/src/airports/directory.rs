//! In-memory airport directory.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::{Airport, IataCode};

use super::AirportResolver;
use super::error::AirportError;

/// Airport lookup held entirely in memory.
///
/// Built from a list of airport records, typically loaded from a JSON
/// snapshot of the airport directory. Records without a valid IATA code
/// are skipped; if two records share a code the later one wins.
#[derive(Debug, Clone)]
pub struct AirportDirectory {
    airports: HashMap<IataCode, Airport>,
}

impl AirportDirectory {
    /// Build a directory from airport records.
    pub fn from_airports(airports: impl IntoIterator<Item = Airport>) -> Self {
        Self {
            airports: build_map(airports),
        }
    }

    /// Load a directory from a JSON snapshot (an array of airport records).
    pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Self, AirportError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| AirportError::Snapshot {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        let airports: Vec<Airport> =
            serde_json::from_str(&contents).map_err(|e| AirportError::Snapshot {
                message: format!("failed to parse {}: {}", path.display(), e),
            })?;

        Ok(Self::from_airports(airports))
    }

    /// Look up an airport by IATA code.
    pub fn get(&self, code: &IataCode) -> Option<&Airport> {
        self.airports.get(code)
    }

    /// Get the number of airports in the directory.
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    /// Check if the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

impl AirportResolver for AirportDirectory {
    async fn resolve_by_iata(&self, codes: &[IataCode]) -> Result<Vec<Airport>, AirportError> {
        Ok(codes.iter().filter_map(|c| self.get(c)).cloned().collect())
    }
}

/// Build the IATA → airport map, dropping records without a usable code.
fn build_map(airports: impl IntoIterator<Item = Airport>) -> HashMap<IataCode, Airport> {
    airports
        .into_iter()
        .filter_map(|airport| airport.iata_code().map(|code| (code, airport)))
        .collect()
}
