//! HTTP provider trait for abstracting the generation backend
//!
//! The `HttpProvider` trait lets the client run against the hosted API or any
//! compatible endpoint (a local proxy, a mock server in tests) through one
//! interface.

use crate::{
    error::Result,
    http::{Method, Response},
};
use async_trait::async_trait;
use std::fmt;

/// Provider trait for making HTTP requests to a generation backend.
///
/// Implementations handle authentication and URL construction for their
/// backend.
#[async_trait]
pub trait HttpProvider: Send + Sync + fmt::Debug {
    /// Make a request and return the raw response.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `path` - API endpoint path (e.g., "/v1beta/models/gemini-2.0-flash:generateContent")
    /// * `body` - Optional request body (will be serialized to JSON)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (network, timeout, etc.). Error
    /// statuses are returned as a `Response`; call
    /// [`Response::parse_result`] to turn them into errors.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&(dyn erased_serde::Serialize + Send + Sync)>,
    ) -> Result<Response>;

    /// Get the provider name for debugging/logging.
    fn provider_name(&self) -> &'static str;

    /// Get the base URL for this provider (for debugging).
    fn base_url(&self) -> &str;
}

/// Helper function to serialize a body to JSON bytes.
pub(crate) fn serialize_body(
    body: &(dyn erased_serde::Serialize + Send + Sync),
) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(crate::error::Error::Serialization)
}
