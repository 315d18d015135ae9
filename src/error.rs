//! Error types module.
//!
//! Every failure inside the sensor is one of these variants. The host only
//! ever sees a single collapsed failure envelope; the variant and its text
//! go to the log.

use thiserror::Error;

/// A specialized `Result` type for mpdns operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the DNS sensor.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (parameter files, sockets)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error (host parameter mapping, parameter files)
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// DNS resolver error (NXDOMAIN, no records, protocol failures)
    #[error("DNS resolver error: {0}")]
    Resolver(#[from] trust_dns_resolver::error::ResolveError),

    /// Network-related error (nameserver cannot be addressed or reached)
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration error (parameter out of range, missing field)
    #[error("Config error: {0}")]
    Config(String),

    /// Parse error (invalid domain name, unknown record type)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The query did not finish before the configured timeout
    #[error("Operation timed out after {0}s")]
    Timeout(u64),
}

impl Error {
    /// Create a new network error with a message.
    #[must_use]
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a new configuration error with a message.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new parse error with a message.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

impl From<color_eyre::Report> for Error {
    fn from(e: color_eyre::Report) -> Self {
        Self::Config(e.to_string())
    }
}
