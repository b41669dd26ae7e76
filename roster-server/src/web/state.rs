//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::airports::AirportBackend;
use crate::cache::CachedAirportResolver;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached airport source used to resolve roster airports
    pub resolver: Arc<CachedAirportResolver<AirportBackend>>,

    /// Upper bound on one airport resolution batch
    pub resolve_timeout: Duration,
}

impl AppState {
    /// Create a new app state.
    pub fn new(resolver: CachedAirportResolver<AirportBackend>, resolve_timeout: Duration) -> Self {
        Self {
            resolver: Arc::new(resolver),
            resolve_timeout,
        }
    }
}
