//! Caching layer for airport lookups.
//!
//! Crew rosters revisit the same handful of airports, so resolved airport
//! records are cached by IATA code. Only codes that resolved are cached;
//! unknown codes are asked for again on the next roster, since the
//! directory may have gained them.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::airports::{AirportError, AirportResolver};
use crate::domain::{Airport, IataCode};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Airport resolver with caching.
///
/// Wraps any [`AirportResolver`] and only forwards codes it has not seen.
pub struct CachedAirportResolver<R> {
    inner: R,
    airports: MokaCache<IataCode, Arc<Airport>>,
}

impl<R: AirportResolver> CachedAirportResolver<R> {
    /// Create a new cached resolver.
    pub fn new(inner: R, config: &CacheConfig) -> Self {
        let airports = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, airports }
    }
}

impl<R: AirportResolver> AirportResolver for CachedAirportResolver<R> {
    async fn resolve_by_iata(&self, codes: &[IataCode]) -> Result<Vec<Airport>, AirportError> {
        let mut found = Vec::with_capacity(codes.len());
        let mut missing = Vec::new();

        for code in codes {
            match self.airports.get(code).await {
                Some(airport) => found.push(Airport::clone(&airport)),
                None => missing.push(*code),
            }
        }

        debug!(
            hits = found.len(),
            misses = missing.len(),
            "airport cache lookup"
        );

        if missing.is_empty() {
            return Ok(found);
        }

        for airport in self.inner.resolve_by_iata(&missing).await? {
            if let Some(code) = airport.iata_code() {
                self.airports.insert(code, Arc::new(airport.clone())).await;
            }
            found.push(airport);
        }

        Ok(found)
    }
}
