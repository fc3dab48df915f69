//! Gateway error types.

use thiserror::Error;

/// Errors returned by gateway implementations.
///
/// A missing response is an error, never an implicit success.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The provider rejected or failed the call.
    #[error("{operation} failed: {message}")]
    Provider {
        /// Operation that failed (e.g. `ListAccessKeys`).
        operation: String,
        /// Provider error message.
        message: String,
    },

    /// The provider answered without the data the call must return.
    #[error("{operation} returned no {missing}")]
    NoResponse {
        /// Operation that was called.
        operation: String,
        /// What was missing from the response.
        missing: String,
    },

    /// An HTTP endpoint answered with a non-success status.
    #[error("{operation} failed: HTTP {status} {message}")]
    Http {
        /// Operation that was called.
        operation: String,
        /// HTTP status code.
        status: u16,
        /// Status text or response excerpt.
        message: String,
    },

    /// The call did not complete in time.
    #[error("{operation} timed out after {timeout_secs}s")]
    Timeout {
        /// Operation that was called.
        operation: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl GatewayError {
    /// Create a provider error.
    pub fn provider(operation: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Provider {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    /// Create a missing-response error.
    pub fn no_response(operation: impl Into<String>, missing: impl Into<String>) -> Self {
        Self::NoResponse {
            operation: operation.into(),
            missing: missing.into(),
        }
    }

    /// Whether retrying the same call may succeed.
    ///
    /// Throttling and 5xx answers are transient; a missing response or a 4xx
    /// answer will not change on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Timeout { .. } => true,
            GatewayError::Http { status, .. } => *status == 429 || *status >= 500,
            GatewayError::Provider { .. } | GatewayError::NoResponse { .. } => false,
        }
    }
}

/// Result type for gateway calls.
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_operation() {
        let err = GatewayError::provider("ListAccessKeys", "AccessDenied");
        assert_eq!(err.to_string(), "ListAccessKeys failed: AccessDenied");

        let err = GatewayError::no_response("CreateAccessKey", "access key");
        assert_eq!(err.to_string(), "CreateAccessKey returned no access key");
    }

    #[test]
    fn retry_classification() {
        let http = |status| GatewayError::Http {
            operation: "CreateTask".into(),
            status,
            message: String::new(),
        };
        assert!(http(503).is_retryable());
        assert!(http(429).is_retryable());
        assert!(!http(401).is_retryable());
        assert!(!GatewayError::no_response("GetParameter", "value").is_retryable());
        assert!(
            GatewayError::Timeout {
                operation: "Publish".into(),
                timeout_secs: 5
            }
            .is_retryable()
        );
    }
}
