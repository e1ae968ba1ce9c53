//! Common test utilities and helpers

use serde_json::{Value, json};
use vellum::{Client, RetryConfig};
use wiremock::MockServer;

/// Create a test API key
#[allow(dead_code)]
pub fn test_api_key() -> String {
    "AIza-test-key-0123456789".to_string()
}

/// Retry knobs small enough for real-time tests.
#[allow(dead_code)]
pub fn fast_retry(max_retries: u32) -> RetryConfig {
    RetryConfig {
        max_retries,
        base_delay_ms: 10,
        rate_limit_floor_ms: 200,
        backoff_multiplier: 2.0,
    }
}

/// Client pointed at a mock server.
#[allow(dead_code)]
pub fn client(server: &MockServer, retry: RetryConfig) -> Client {
    Client::builder()
        .api_key(test_api_key())
        .base_url(server.uri())
        .retry(retry)
        .build()
        .expect("Failed to build client")
}

/// A `generateContent` body whose only part is `text`.
#[allow(dead_code)]
pub fn text_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "modelVersion": "gemini-2.5-flash"
    })
}

/// The backend's error envelope.
#[allow(dead_code)]
pub fn error_body(code: u16, status: &str, message: &str) -> Value {
    json!({"error": {"code": code, "message": message, "status": status}})
}
