//! Airport lookup error types.

/// Errors that can occur when resolving airports.
#[derive(Debug, thiserror::Error)]
pub enum AirportError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check AIRPORT_API_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Reading or writing a directory snapshot failed
    #[error("snapshot error: {message}")]
    Snapshot { message: String },

    /// Lookup did not finish in time
    #[error("airport lookup timed out after {0:?}")]
    Timeout(std::time::Duration),
}
