//! Error types for airdash-core.
//!
//! This module defines all error types that can occur when talking to the
//! air-quality HTTP API or transforming its data.
//!
//! Transport failures are surfaced to the caller as-is and displayed to the
//! user; nothing in this crate retries or de-duplicates requests. The pure
//! aggregation operations never fail: empty input produces empty output or
//! the documented "absent"/"Unknown" sentinel.

use thiserror::Error;

/// Errors that can occur when fetching or transforming air-quality data.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The API host is not reachable.
    #[error("API not reachable at {url}: {source}")]
    NotReachable {
        /// The URL that could not be reached.
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The API returned a non-success response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response body, or the status line.
        message: String,
    },

    /// Failed to parse data received from the API or an export file.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create an API error from a status code and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

impl From<airdash_types::ParseError> for Error {
    fn from(err: airdash_types::ParseError) -> Self {
        Error::InvalidData(err.to_string())
    }
}

/// Result type alias using airdash-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::api(404, "not found");
        assert_eq!(err.to_string(), "API error (404): not found");

        let err = Error::InvalidUrl("ftp://nope".to_string());
        assert!(err.to_string().contains("ftp://nope"));

        let err = Error::InvalidData("bad row".to_string());
        assert_eq!(err.to_string(), "Invalid data: bad row");
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse_err = airdash_types::ParseError::InvalidValue("minute 2000".to_string());
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::InvalidData(_)));
        assert!(err.to_string().contains("minute 2000"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }
}
