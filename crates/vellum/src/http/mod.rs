//! HTTP client abstraction
//!
//! This module provides the HTTP layer for the client. A request is a single
//! exchange; retries are applied one level up by the generators through
//! [`vellum_core::retry::RetryPolicy`].

pub use gemini_provider::{GeminiHttpProvider, GeminiHttpProviderBuilder};
pub use provider::HttpProvider;
pub use request::RequestBuilder;
pub use response::Response;

mod gemini_provider;
pub mod provider;
mod request;
mod response;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
