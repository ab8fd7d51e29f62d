//! Shared HTTP plumbing for the service clients.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::ServiceError;

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub(crate) fn build_client(timeout_secs: u64) -> Result<reqwest::Client, ServiceError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ServiceError::Unavailable(format!("failed to build HTTP client: {e}")))
}

/// Send a request and map transport failures and error statuses.
///
/// `resource` names what was asked for, for `NotFound`.
pub(crate) async fn send(
    request: reqwest::RequestBuilder,
    timeout_secs: u64,
    resource: &str,
) -> Result<reqwest::Response, ServiceError> {
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            ServiceError::Timeout(timeout_secs)
        } else {
            ServiceError::Unavailable(e.to_string())
        }
    })?;

    let status = response.status().as_u16();
    if status == 429 {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5)
            * 1000;
        return Err(ServiceError::RateLimited {
            retry_after_ms: retry_after,
        });
    }
    if status == 401 || status == 403 {
        let body = response.text().await.unwrap_or_default();
        return Err(ServiceError::AuthenticationFailed(body));
    }
    if status == 404 {
        return Err(ServiceError::NotFound(resource.to_string()));
    }
    if status >= 400 {
        let message = response.text().await.unwrap_or_default();
        return Err(ServiceError::ApiError { status, message });
    }

    Ok(response)
}

/// Decode a JSON response body.
pub(crate) async fn json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
    response.json().await.map_err(|e| ServiceError::ApiError {
        status: 0,
        message: format!("failed to parse response: {e}"),
    })
}

/// A key is usable when it is present and not a template placeholder.
pub(crate) fn key_is_usable(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && !key.contains("your_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_keys_are_rejected() {
        assert!(key_is_usable("pk_test_51H"));
        assert!(!key_is_usable(""));
        assert!(!key_is_usable("   "));
        assert!(!key_is_usable("your_stripe_publishable_key"));
        assert!(!key_is_usable("sk-your_tavus_api_key"));
    }
}
