//! Main client implementation for the generation API

use std::sync::Arc;
use std::time::Duration;

use vellum_core::retry::{RetryConfig, RetryPolicy};

use crate::{
    config::{ClientConfig, ModelConfig},
    error::{Error, Result},
    http::{GeminiHttpProvider, HttpProvider, Method},
    resources::{Articles, Images, Presentations},
    types::{GenerateContentRequest, GenerateContentResponse},
};

/// Client for the generation API.
///
/// The client is explicitly constructed and passed to whatever needs it;
/// cloning is cheap and clones share one connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use vellum::Client;
///
/// # async fn example() -> vellum::Result<()> {
/// let client = Client::new("AIza...")?;
/// let article = client.articles().generate("tide pools").await?;
/// println!("{}", article.title);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    /// HTTP provider for making requests (handles auth and URLs)
    provider: Arc<dyn HttpProvider>,
    /// Retry policy wrapped around every generation call
    retry: RetryPolicy,
    /// Model used by each generator
    models: ModelConfig,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("provider", &self.inner.provider)
            .field("retry", &self.inner.retry)
            .field("models", &self.inner.models)
            .finish()
    }
}

impl Client {
    /// Create a client with an API key and default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client over a custom HTTP provider with the default retry
    /// policy and models.
    pub fn from_provider(provider: Arc<dyn HttpProvider>) -> Self {
        Self::from_parts(provider, RetryPolicy::default(), ModelConfig::default())
    }

    /// Create a client from its parts.
    pub fn from_parts(
        provider: Arc<dyn HttpProvider>,
        retry: RetryPolicy,
        models: ModelConfig,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                provider,
                retry,
                models,
            }),
        }
    }

    /// Create a client from a configuration object.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or blank, or the base URL
    /// is invalid.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let mut provider_builder = GeminiHttpProvider::builder()
            .timeout(config.timeout)
            .headers(&config.default_headers);

        if let Some(api_key) = config.api_key {
            provider_builder = provider_builder.api_key_secret(api_key);
        }
        if let Some(base_url) = config.base_url {
            provider_builder = provider_builder.base_url(base_url);
        }

        let provider = Arc::new(provider_builder.build()?);

        Ok(Self::from_parts(
            provider,
            RetryPolicy::from(&config.retry),
            config.models,
        ))
    }

    /// Create a client from environment variables.
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] when no API key is set.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env())
    }

    /// Image generation.
    pub fn images(&self) -> Images<'_> {
        Images::new(self)
    }

    /// Article generation.
    pub fn articles(&self) -> Articles<'_> {
        Articles::new(self)
    }

    /// Presentation outline generation.
    pub fn presentations(&self) -> Presentations<'_> {
        Presentations::new(self)
    }

    /// Send one `generateContent` request.
    ///
    /// This is a single exchange with no retries; the generators wrap it in
    /// [`retry_policy`](Self::retry_policy).
    ///
    /// # Errors
    ///
    /// Transport failures, error statuses (see [`Error::from_response`]) and
    /// bodies that do not parse.
    #[tracing::instrument(skip(self, request), fields(provider = self.inner.provider.provider_name()))]
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        if model.trim().is_empty() {
            return Err(Error::InvalidInput("model cannot be empty".to_string()));
        }

        let path = format!("/v1beta/models/{}:generateContent", model);
        let body: &(dyn erased_serde::Serialize + Send + Sync) = request;
        self.inner
            .provider
            .request(Method::POST, &path, Some(body))
            .await?
            .parse_result()
    }

    /// The retry policy applied to generation calls.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.inner.retry
    }

    /// The models used by the generators.
    pub fn models(&self) -> &ModelConfig {
        &self.inner.models
    }

    /// Get the base URL for the API
    pub fn base_url(&self) -> &str {
        self.inner.provider.base_url()
    }
}

/// Builder for creating a configured [`Client`].
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Start from an existing configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Set the API key for authentication.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(secrecy::SecretString::new(
            api_key.into().into_boxed_str(),
        ));
        self
    }

    /// Set the base URL for the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the timeout for a single HTTP exchange.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the retry configuration.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Set the maximum number of retries.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.retry.max_retries = max_retries;
        self
    }

    /// Set the models used by the generators.
    pub fn models(mut self, models: ModelConfig) -> Self {
        self.config.models = models;
        self
    }

    /// Add a custom default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: http::HeaderName = key_str
            .parse()
            .map_err(|_| Error::InvalidHeaderName(key_str.clone()))?;
        let value: http::HeaderValue = value_str
            .parse()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the client with the configured options.
    ///
    /// # Errors
    ///
    /// See [`Client::from_config`].
    pub fn build(self) -> Result<Client> {
        Client::from_config(self.config)
    }
}
