//! Error types for data parsing in airdash-types.

use thiserror::Error;

/// Errors that can occur when parsing or constructing airdash data.
///
/// This error type is platform-agnostic and does not include
/// HTTP-specific errors (those belong in airdash-core).
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// A field value is outside its documented range.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A timestamp string could not be parsed.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Result type alias using airdash-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
