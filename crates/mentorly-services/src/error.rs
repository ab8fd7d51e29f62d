//! Service error types.

use thiserror::Error;

/// Errors that can occur when talking to a third-party service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Live mode was requested without usable credentials.
    #[error("{service} is not configured: {reason}")]
    NotConfigured { service: String, reason: String },

    /// The service could not be reached.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// Video rendering finished in the failed state.
    #[error("video generation failed: {0}")]
    VideoFailed(String),
}

impl ServiceError {
    /// Whether retrying the same call later might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ServiceError::Unavailable(_)
            | ServiceError::RateLimited { .. }
            | ServiceError::Timeout(_) => true,
            ServiceError::ApiError { status, .. } => *status >= 500,
            ServiceError::NotConfigured { .. }
            | ServiceError::AuthenticationFailed(_)
            | ServiceError::NotFound(_)
            | ServiceError::VideoFailed(_) => false,
        }
    }

    pub(crate) fn not_configured(service: &str, reason: impl Into<String>) -> Self {
        ServiceError::NotConfigured {
            service: service.to_string(),
            reason: reason.into(),
        }
    }
}
