//! Gemini API HTTP provider implementation
//!
//! This provider sends requests to the Generative Language API with API-key
//! authentication and JSON bodies.

use super::{HttpProvider, Method, RequestBuilder, provider::serialize_body};
use crate::error::{Error, Result};
use async_trait::async_trait;
use http::{HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use std::{sync::Arc, time::Duration};
use url::Url;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP provider for the Gemini API.
///
/// # Example
///
/// ```rust,no_run
/// use vellum::http::GeminiHttpProvider;
/// use std::sync::Arc;
///
/// let provider = Arc::new(GeminiHttpProvider::builder()
///     .api_key("AIza...")
///     .build()
///     .unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct GeminiHttpProvider {
    pub(crate) inner: Arc<ProviderInner>,
}

#[derive(Debug)]
pub(crate) struct ProviderInner {
    /// HTTP client for making requests
    pub(crate) http_client: reqwest::Client,
    /// Base URL for the API
    pub(crate) base_url: Url,
    /// API key sent in the `x-goog-api-key` header
    pub(crate) api_key: SecretString,
    /// Default timeout for requests
    pub(crate) timeout: Duration,
    /// Custom headers to include with every request
    pub(crate) default_headers: http::HeaderMap,
}

impl GeminiHttpProvider {
    /// Create a new builder for configuring the provider.
    pub fn builder() -> GeminiHttpProviderBuilder {
        GeminiHttpProviderBuilder::default()
    }

    /// Create a request builder with provider configuration.
    fn build_request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.inner.base_url.join(path).map_err(|e| {
            Error::InvalidUrl(format!(
                "Failed to construct URL from path '{}': {}",
                path, e
            ))
        })?;

        let mut builder = RequestBuilder::new(method, url)
            .with_client(self.inner.http_client.clone())
            .timeout(self.inner.timeout)
            .header(
                http::header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );

        let mut key = HeaderValue::from_str(self.inner.api_key.expose_secret())
            .map_err(|_| Error::InvalidHeaderValue(API_KEY_HEADER.to_string()))?;
        key.set_sensitive(true);
        builder = builder.header(HeaderName::from_static(API_KEY_HEADER), key);

        for (key, value) in &self.inner.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        Ok(builder)
    }
}

#[async_trait]
impl HttpProvider for GeminiHttpProvider {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&(dyn erased_serde::Serialize + Send + Sync)>,
    ) -> Result<super::Response> {
        let mut builder = self.build_request(method, path)?;

        if let Some(body) = body {
            let body_bytes = serialize_body(body)?;
            builder = builder.body(body_bytes);
        }

        builder.send().await
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }
}

/// Builder for creating a `GeminiHttpProvider` with custom configuration.
///
/// # Example
///
/// ```rust,no_run
/// use vellum::http::GeminiHttpProvider;
///
/// let provider = GeminiHttpProvider::builder()
///     .api_key("AIza...")
///     .timeout(std::time::Duration::from_secs(60))
///     .build()
///     .unwrap();
/// ```
#[derive(Default)]
pub struct GeminiHttpProviderBuilder {
    api_key: Option<SecretString>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    default_headers: http::HeaderMap,
}

impl GeminiHttpProviderBuilder {
    /// Set the API key for authentication.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into().into_boxed_str()));
        self
    }

    /// Set an API key that is already wrapped in a secret.
    pub fn api_key_secret(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Set the base URL for the API.
    ///
    /// Defaults to `https://generativelanguage.googleapis.com`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add headers to include with every request.
    pub fn headers(mut self, headers: &http::HeaderMap) -> Self {
        for (key, value) in headers {
            self.default_headers.insert(key.clone(), value.clone());
        }
        self
    }

    /// Build the provider with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No API key is provided
    /// - The base URL is empty, unparseable, or not http(s)
    /// - HTTP client creation fails
    pub fn build(self) -> Result<GeminiHttpProvider> {
        let api_key = self.api_key.ok_or_else(|| {
            Error::MissingConfig(
                "API Key missing. Set GEMINI_API_KEY or provide a key explicitly".to_string(),
            )
        })?;

        if api_key.expose_secret().trim().is_empty() {
            return Err(Error::MissingConfig("API Key is empty".to_string()));
        }

        let timeout = self.timeout.unwrap_or(crate::config::DEFAULT_TIMEOUT);

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("vellum-rust/{}", crate::VERSION))
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        let base_url_string = self
            .base_url
            .unwrap_or_else(|| crate::DEFAULT_BASE_URL.to_string());

        if base_url_string.trim().is_empty() {
            return Err(Error::InvalidUrl("Base URL cannot be empty".to_string()));
        }

        let base_url: Url = base_url_string
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("{}", e)))?;

        match base_url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(Error::InvalidUrl(format!(
                    "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
                    scheme
                )));
            }
        }

        let inner = Arc::new(ProviderInner {
            http_client,
            base_url,
            api_key,
            timeout,
            default_headers: self.default_headers,
        });

        Ok(GeminiHttpProvider { inner })
    }
}
