//! Airport lookup.
//!
//! The roster parser turns bare IATA codes into full airport records by
//! asking an [`AirportResolver`] for a batch of codes. Resolution is best
//! effort: codes the resolver does not return stay as plain codes.

mod client;
mod directory;
mod error;

use std::future::Future;
use std::time::Duration;

use crate::domain::{Airport, IataCode};

pub use client::{AirportClient, AirportClientConfig};
pub use directory::AirportDirectory;
pub use error::AirportError;

/// A source of airport records keyed by IATA code.
pub trait AirportResolver: Send + Sync {
    /// Look up airports for a batch of codes.
    ///
    /// Unknown codes are omitted from the result rather than reported.
    fn resolve_by_iata(
        &self,
        codes: &[IataCode],
    ) -> impl Future<Output = Result<Vec<Airport>, AirportError>> + Send;
}

/// Resolver that never finds anything.
///
/// Used when no airport directory is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl AirportResolver for NoopResolver {
    async fn resolve_by_iata(&self, _codes: &[IataCode]) -> Result<Vec<Airport>, AirportError> {
        Ok(Vec::new())
    }
}

/// The airport source chosen at startup.
#[derive(Debug, Clone)]
pub enum AirportBackend {
    Http(AirportClient),
    Directory(AirportDirectory),
    Noop(NoopResolver),
}

impl AirportBackend {
    pub fn name(&self) -> &'static str {
        match self {
            AirportBackend::Http(_) => "http",
            AirportBackend::Directory(_) => "directory",
            AirportBackend::Noop(_) => "noop",
        }
    }
}

impl AirportResolver for AirportBackend {
    async fn resolve_by_iata(&self, codes: &[IataCode]) -> Result<Vec<Airport>, AirportError> {
        match self {
            AirportBackend::Http(client) => client.resolve_by_iata(codes).await,
            AirportBackend::Directory(directory) => directory.resolve_by_iata(codes).await,
            AirportBackend::Noop(noop) => noop.resolve_by_iata(codes).await,
        }
    }
}

/// Resolve a batch of codes, giving up after `timeout`.
pub async fn resolve_with_timeout<R: AirportResolver>(
    resolver: &R,
    codes: &[IataCode],
    timeout: Duration,
) -> Result<Vec<Airport>, AirportError> {
    tokio::time::timeout(timeout, resolver.resolve_by_iata(codes))
        .await
        .map_err(|_| AirportError::Timeout(timeout))?
}
