//! HTTP status and transport error mapping shared by all providers.

use quizgen_core::error::ProviderError;

/// Default delay when a 429 carries no usable `retry-after` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

/// Map a transport-level failure.
pub(crate) fn send_error(e: reqwest::Error, timeout_secs: u64) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(timeout_secs)
    } else {
        ProviderError::NetworkError(e.to_string())
    }
}

/// Turn a non-success response into a [`ProviderError`].
///
/// `not_found` decides what a 404 means for this provider: chat APIs answer
/// 404 for unknown models, while the quiz server has no model concept.
pub(crate) async fn check_status(
    response: reqwest::Response,
    not_found: impl FnOnce(String) -> ProviderError,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status().as_u16();
    if status < 400 {
        return Ok(response);
    }

    if status == 429 {
        let header = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok());
        return Err(ProviderError::RateLimited {
            retry_after_ms: retry_after_ms(header),
        });
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_detail(&body);
    Err(match status {
        401 | 403 => ProviderError::AuthenticationFailed(message),
        404 => not_found(message),
        _ => ProviderError::ApiError { status, message },
    })
}

/// Milliseconds to wait for a `retry-after` header given in seconds.
fn retry_after_ms(header: Option<&str>) -> u64 {
    header
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
        .saturating_mul(1000)
}

/// Pull a human-readable message out of an error body. Understands
/// `{"detail": "..."}` and `{"error": {"message": "..."}}`; anything else is
/// returned verbatim.
pub(crate) fn error_detail(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };
    json.get("detail")
        .and_then(|d| d.as_str())
        .or_else(|| json.pointer("/error/message").and_then(|m| m.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}
