//! Errors reported by external service adapters.

use thiserror::Error;

/// Failure of a call to an external collaborator (spreadsheet store,
/// template service, export service).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    /// The request never produced a response (DNS, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("api error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or status text.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Credentials were rejected or could not be obtained.
    #[error("authentication failed: {0}")]
    Auth(String),
}

impl ServiceError {
    /// Returns the HTTP status for API errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for service calls.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
