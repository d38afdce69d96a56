//! Error types for fetching

use std::fmt;
use thiserror::Error;

/// Failure of a single HTTP request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Request did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Could not connect (DNS, refused, TLS, reset)
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Upstream answered with a non-success status
    #[error("HTTP {0}")]
    Status(u16),

    /// Response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// The request itself could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Whether retrying the same request may succeed
    ///
    /// Connection problems, timeouts, body read failures and HTTP 408/429/5xx
    /// are transient; other statuses and malformed requests are not.
    pub fn is_transient(&self) -> bool {
        match self {
            TransportError::Timeout(_) | TransportError::Connect(_) | TransportError::Body(_) => true,
            TransportError::Status(code) => *code == 408 || *code == 429 || *code >= 500,
            TransportError::InvalidRequest(_) => false,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else if let Some(status) = e.status() {
            TransportError::Status(status.as_u16())
        } else if e.is_body() || e.is_decode() {
            TransportError::Body(e.to_string())
        } else if e.is_builder() {
            TransportError::InvalidRequest(e.to_string())
        } else {
            TransportError::Connect(e.to_string())
        }
    }
}

/// Why one attempt did not produce a usable page
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptFailure {
    /// Upstream served its "busy" page
    RateLimited,
    /// Transient transport failure
    Transport(TransportError),
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::RateLimited => write!(f, "rate limited by upstream"),
            AttemptFailure::Transport(e) => write!(f, "{}", e),
        }
    }
}

/// Terminal outcome of a failed fetch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Retry budget used up
    #[error("Retries exhausted after {attempts} attempts (last: {last})")]
    Exhausted {
        /// Number of requests issued
        attempts: u32,
        /// Failure of the final attempt
        last: AttemptFailure,
    },

    /// Non-transient failure; not retried
    #[error("Network error: {0}")]
    Network(TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(TransportError::Timeout("t".into()).is_transient());
        assert!(TransportError::Connect("c".into()).is_transient());
        assert!(TransportError::Body("b".into()).is_transient());
        assert!(TransportError::Status(503).is_transient());
        assert!(TransportError::Status(429).is_transient());
        assert!(TransportError::Status(408).is_transient());
        assert!(!TransportError::Status(404).is_transient());
        assert!(!TransportError::Status(400).is_transient());
        assert!(!TransportError::InvalidRequest("bad url".into()).is_transient());
    }

    #[test]
    fn test_exhausted_message() {
        let err = FetchError::Exhausted {
            attempts: 5,
            last: AttemptFailure::RateLimited,
        };
        assert_eq!(
            err.to_string(),
            "Retries exhausted after 5 attempts (last: rate limited by upstream)"
        );
    }
}
