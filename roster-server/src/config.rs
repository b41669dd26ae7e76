//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::airports::{
    AirportBackend, AirportClient, AirportClientConfig, AirportDirectory, AirportError,
    NoopResolver,
};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_RESOLVE_TIMEOUT_MS: u64 = 5_000;

/// Errors from reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid ROSTER_BIND_ADDR {value:?}")]
    InvalidBindAddr { value: String },

    #[error("invalid RESOLVE_TIMEOUT_MS {value:?}")]
    InvalidTimeout { value: String },

    #[error("airport backend: {0}")]
    Airport(#[from] AirportError),
}

/// Runtime configuration for the roster server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub airport_api_url: Option<String>,
    pub airport_api_key: Option<String>,
    /// JSON airport list used instead of the HTTP API when set.
    pub airport_snapshot: Option<PathBuf>,
    pub resolve_timeout: Duration,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = match get("ROSTER_BIND_ADDR") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidBindAddr { value })?,
            None => DEFAULT_BIND_ADDR
                .parse()
                .map_err(|_| ConfigError::InvalidBindAddr {
                    value: DEFAULT_BIND_ADDR.to_string(),
                })?,
        };

        let resolve_timeout_ms = match get("RESOLVE_TIMEOUT_MS") {
            Some(value) => value
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout { value })?,
            None => DEFAULT_RESOLVE_TIMEOUT_MS,
        };

        Ok(Self {
            bind_addr,
            airport_api_url: get("AIRPORT_API_URL"),
            airport_api_key: get("AIRPORT_API_KEY"),
            airport_snapshot: get("AIRPORT_SNAPSHOT").map(PathBuf::from),
            resolve_timeout: Duration::from_millis(resolve_timeout_ms),
        })
    }

    /// Pick the airport source.
    ///
    /// A snapshot file wins over the HTTP API. With neither configured the
    /// server still parses rosters, but airports stay as bare codes.
    pub fn build_backend(&self) -> Result<AirportBackend, ConfigError> {
        if let Some(path) = &self.airport_snapshot {
            let directory = AirportDirectory::load_snapshot(path)?;
            info!(path = %path.display(), airports = directory.len(), "loaded airport snapshot");
            return Ok(AirportBackend::Directory(directory));
        }

        if let Some(api_key) = &self.airport_api_key {
            let mut config = AirportClientConfig::new(api_key);
            if let Some(url) = &self.airport_api_url {
                config = config.with_base_url(url);
            }
            info!(base_url = %config.base_url, "using airport API");
            return Ok(AirportBackend::Http(AirportClient::new(config)?));
        }

        warn!("AIRPORT_API_KEY and AIRPORT_SNAPSHOT not set; airports will not be resolved");
        Ok(AirportBackend::Noop(NoopResolver))
    }
}
