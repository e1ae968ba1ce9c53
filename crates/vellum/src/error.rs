//! Error types for the vellum client
//!
//! One enum covers HTTP statuses returned by the generation backend, transport
//! failures, response parsing, and media-library validation. Retry
//! classification reads the structured status through [`StatusHint`].

use std::time::Duration;
use thiserror::Error;
use vellum_core::retry::{FailureClass, StatusHint};

/// Result type alias for operations that can fail with a vellum error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the vellum client.
#[derive(Debug, Error)]
pub enum Error {
    /// Backend rejected the request (400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from the API
        message: String,
        /// Canonical status name from the API (e.g. `INVALID_ARGUMENT`)
        status_text: Option<String>,
    },

    /// Authentication failed (401).
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Permission denied (403), including invalid API keys.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Resource not found (404), either a model on the backend or an item in
    /// the media library.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded (429).
    #[error("Rate limit exceeded (429): {message}")]
    RateLimit {
        /// Error message from the API
        message: String,
        /// Time to wait before retrying, if the API provided one
        retry_after: Option<Duration>,
    },

    /// Internal server error (500).
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    /// Service temporarily unavailable or overloaded (503).
    #[error("Service unavailable (503): {0}")]
    ServiceUnavailable(String),

    /// Generic API error for status codes not covered above.
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
        /// Canonical status name from the API
        status_text: Option<String>,
    },

    /// Response did not have the expected shape.
    #[error("Failed to parse API response: {0}")]
    ResponseValidation(String),

    /// Model returned no text where text was required.
    #[error("No text response")]
    EmptyResponse,

    /// Model returned no inline image data.
    #[error("No image data in response")]
    NoImageData,

    /// Network or connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid caller-supplied input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing required configuration.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// Invalid HTTP header name.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// Other errors not covered by specific variants.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create an API error from an HTTP response status and body.
    ///
    /// Understands the backend's `{"error": {"code", "message", "status"}}`
    /// envelope and falls back to the raw body text.
    pub fn from_response(status: u16, body: &str, headers: &http::HeaderMap) -> Self {
        let (message, status_text, retry_delay) =
            match serde_json::from_str::<ApiErrorResponse>(body) {
                Ok(api_error) => {
                    let retry_delay = api_error.error.retry_delay();
                    (
                        api_error.error.message,
                        api_error.error.status,
                        retry_delay,
                    )
                }
                Err(_) => (body.to_string(), None, None),
            };

        match status {
            400 => Error::BadRequest {
                message,
                status_text,
            },
            401 => Error::Authentication(message),
            403 => Error::PermissionDenied(message),
            404 => Error::NotFound(message),
            429 => Error::RateLimit {
                message,
                retry_after: parse_retry_after(headers).or(retry_delay),
            },
            500 => Error::InternalServerError(message),
            503 => Error::ServiceUnavailable(message),
            _ => Error::ApiError {
                status,
                message,
                status_text,
            },
        }
    }

    /// The HTTP status this error corresponds to, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BadRequest { .. } => Some(400),
            Error::Authentication(_) => Some(401),
            Error::PermissionDenied(_) => Some(403),
            Error::NotFound(_) => Some(404),
            Error::RateLimit { .. } => Some(429),
            Error::InternalServerError(_) => Some(500),
            Error::ServiceUnavailable(_) => Some(503),
            Error::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// How the retry executor treats this error.
    pub fn failure_class(&self) -> FailureClass {
        FailureClass::classify(self)
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.failure_class().is_retryable()
    }

    /// Get retry delay if this is a rate limit error that carried one.
    pub fn retry_after(&self) -> Option<Duration> {
        if let Error::RateLimit { retry_after, .. } = self {
            *retry_after
        } else {
            None
        }
    }
}

impl StatusHint for Error {
    fn status_hint(&self) -> Option<u16> {
        self.status()
    }
}

// Helper structures for parsing API error responses

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetails,
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorDetails {
    message: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    details: Vec<serde_json::Value>,
}

impl ApiErrorDetails {
    /// `google.rpc.RetryInfo` detail, e.g. `{"retryDelay": "52s"}`.
    fn retry_delay(&self) -> Option<Duration> {
        self.details
            .iter()
            .filter_map(|detail| detail.get("retryDelay")?.as_str())
            .find_map(parse_seconds)
    }
}

fn parse_retry_after(headers: &http::HeaderMap) -> Option<Duration> {
    headers
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn parse_seconds(value: &str) -> Option<Duration> {
    value
        .strip_suffix('s')?
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_error_is_retryable() {
        assert!(
            Error::RateLimit {
                message: "quota".to_string(),
                retry_after: None,
            }
            .is_retryable()
        );
        assert!(Error::ServiceUnavailable("overloaded".to_string()).is_retryable());

        assert!(!Error::InternalServerError("test".to_string()).is_retryable());
        assert!(!Error::Authentication("test".to_string()).is_retryable());
        assert!(!Error::Timeout(Duration::from_secs(30)).is_retryable());
        assert!(!Error::EmptyResponse.is_retryable());
    }

    #[test]
    fn test_connection_error_mentioning_status_is_retryable() {
        let err = Error::Connection("upstream proxy returned 503".to_string());
        assert_eq!(err.failure_class(), FailureClass::Overloaded);
    }

    #[test]
    fn test_api_error_status_is_structured() {
        let err = Error::ApiError {
            status: 502,
            message: "bad gateway".to_string(),
            status_text: None,
        };
        assert_eq!(err.status_hint(), Some(502));
        assert_eq!(err.failure_class(), FailureClass::Terminal);
    }

    #[test]
    fn test_error_400_bad_request_parsing() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        let error = Error::from_response(400, body, &http::HeaderMap::new());

        assert_matches!(error, Error::BadRequest { message, status_text } => {
            assert_eq!(message, "API key not valid");
            assert_eq!(status_text.as_deref(), Some("INVALID_ARGUMENT"));
        });
    }

    #[test]
    fn test_error_403_permission_denied() {
        let body = r#"{"error":{"code":403,"message":"Method doesn't allow unregistered callers","status":"PERMISSION_DENIED"}}"#;
        let error = Error::from_response(403, body, &http::HeaderMap::new());

        assert_matches!(error, Error::PermissionDenied(msg) if msg.contains("unregistered"));
    }

    #[test]
    fn test_error_404_not_found() {
        let body = r#"{"error":{"code":404,"message":"models/gemini-1.5-flash is not found","status":"NOT_FOUND"}}"#;
        let error = Error::from_response(404, body, &http::HeaderMap::new());

        assert_matches!(error, Error::NotFound(msg) if msg.contains("gemini-1.5-flash"));
    }

    #[test]
    fn test_error_429_retry_delay_from_details() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED","details":[{"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"52s"}]}}"#;
        let error = Error::from_response(429, body, &http::HeaderMap::new());

        assert_eq!(error.retry_after(), Some(Duration::from_secs(52)));
        assert_eq!(error.failure_class(), FailureClass::RateLimited);
    }

    #[test]
    fn test_error_429_retry_after_header_wins() {
        let body = r#"{"error":{"code":429,"message":"slow down","details":[{"retryDelay":"52s"}]}}"#;
        let mut headers = http::HeaderMap::new();
        headers.insert("retry-after", "30".parse().unwrap());

        let error = Error::from_response(429, body, &headers);
        assert_eq!(error.retry_after(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_error_503_service_unavailable() {
        let body = r#"{"error":{"code":503,"message":"The model is overloaded. Please try again later.","status":"UNAVAILABLE"}}"#;
        let error = Error::from_response(503, body, &http::HeaderMap::new());

        assert_matches!(error, Error::ServiceUnavailable(ref msg) if msg.contains("overloaded"));
        assert_eq!(error.failure_class(), FailureClass::Overloaded);
    }

    #[test]
    fn test_error_invalid_json_fallback() {
        let error = Error::from_response(502, "Bad Gateway", &http::HeaderMap::new());

        assert_matches!(error, Error::ApiError { status: 502, message, status_text: None } => {
            assert_eq!(message, "Bad Gateway");
        });
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("52s"), Some(Duration::from_secs(52)));
        assert_eq!(parse_seconds("1.5s"), Some(Duration::from_millis(1500)));
        assert_eq!(parse_seconds("52"), None);
        assert_eq!(parse_seconds("-1s"), None);
    }

    #[test]
    fn test_display_keeps_status_indicator() {
        let err = Error::RateLimit {
            message: "quota".to_string(),
            retry_after: None,
        };
        assert!(err.to_string().contains("429"));
    }
}
