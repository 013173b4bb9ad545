//! Error types for the booking controller

use crate::validation::ValidationError;
use thiserror::Error;

/// Booking controller error type
#[derive(Error, Debug)]
pub enum BookingError {
    /// Configuration rejected
    #[error("config error: {0}")]
    Config(String),

    /// Client-side validation failure
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request could not be completed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failures talking to the booking endpoint.
///
/// Neither variant is shown to the user verbatim; both surface as the
/// generic retry message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection refused, DNS, TLS, aborted fetch
    #[error("network error: {0}")]
    Network(String),

    /// Response body missing or not JSON
    #[error("malformed response body: {0}")]
    Body(String),
}

/// Result type for the booking controller
pub type Result<T> = std::result::Result<T, BookingError>;
