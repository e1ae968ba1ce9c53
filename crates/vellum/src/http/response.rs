//! HTTP response handling

use crate::error::{Error, Result};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Check if the response is an error (4xx or 5xx status).
    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }

    /// Parse a successful response, converting HTTP errors to client errors.
    ///
    /// # Errors
    ///
    /// - the status-specific [`Error`] for 4xx/5xx responses
    /// - [`Error::Serialization`] if a success body is not the expected JSON
    pub fn parse_result<T: DeserializeOwned>(self) -> Result<T> {
        if self.is_error() {
            return Err(Error::from_response(
                self.status.as_u16(),
                &String::from_utf8_lossy(&self.body),
                &self.headers,
            ));
        }

        serde_json::from_slice(&self.body).map_err(Error::Serialization)
    }
}
