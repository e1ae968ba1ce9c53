//! Configuration for the generation client

use http::HeaderMap;
use secrecy::SecretString;
use std::time::Duration;
use vellum_core::retry::RetryConfig;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for the generation client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key for the generation backend
    pub api_key: Option<SecretString>,

    /// Base URL for the API
    pub base_url: Option<String>,

    /// Timeout for a single HTTP exchange
    pub timeout: Duration,

    /// Retry policy knobs for generation calls
    pub retry: RetryConfig,

    /// Model used by each generator
    pub models: ModelConfig,

    /// Custom headers to include with every request
    pub default_headers: HeaderMap,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
            models: ModelConfig::default(),
            default_headers: HeaderMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with an API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::new(api_key.into().into_boxed_str())),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    /// This will look for:
    /// - `GEMINI_API_KEY` or `GOOGLE_API_KEY` for authentication
    /// - `GEMINI_BASE_URL` for the API base URL
    /// - `GEMINI_TIMEOUT` for request timeout (in seconds)
    /// - `GEMINI_MAX_RETRIES` for maximum retry attempts
    /// - `GEMINI_BASE_DELAY_MS` for the first backoff delay
    /// - `GEMINI_RATE_LIMIT_FLOOR_MS` for the minimum wait after a 429
    ///
    /// Numeric values that fail to parse are ignored.
    #[cfg(feature = "env")]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_process_env()
    }

    /// Same as [`from_env`](Self::from_env) without reading a `.env` file.
    #[cfg(feature = "env")]
    pub fn from_process_env() -> Self {
        use std::env;

        let mut config = Self::default();

        if let Ok(api_key) = env::var("GEMINI_API_KEY").or_else(|_| env::var("GOOGLE_API_KEY")) {
            config.api_key = Some(SecretString::new(api_key.into_boxed_str()));
        }

        if let Ok(base_url) = env::var("GEMINI_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Some(timeout_secs) = parse_env::<u64>("GEMINI_TIMEOUT") {
            config.timeout = Duration::from_secs(timeout_secs);
        }

        if let Some(max_retries) = parse_env::<u32>("GEMINI_MAX_RETRIES") {
            config.retry.max_retries = max_retries;
        }

        if let Some(base_delay_ms) = parse_env::<u64>("GEMINI_BASE_DELAY_MS") {
            config.retry.base_delay_ms = base_delay_ms;
        }

        if let Some(floor_ms) = parse_env::<u64>("GEMINI_RATE_LIMIT_FLOOR_MS") {
            config.retry.rate_limit_floor_ms = floor_ms;
        }

        config
    }

    /// Merge this configuration with another, with the other taking precedence.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.timeout != DEFAULT_TIMEOUT {
            self.timeout = other.timeout;
        }
        if other.retry != RetryConfig::default() {
            self.retry = other.retry;
        }
        if other.models != ModelConfig::default() {
            self.models = other.models;
        }
        for (key, value) in other.default_headers.iter() {
            self.default_headers.insert(key.clone(), value.clone());
        }

        self
    }
}

#[cfg(feature = "env")]
fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok()?.trim().parse().ok()
}

/// Model identifiers used by the generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Model for image generation
    pub image: String,
    /// Model for article generation
    pub article: String,
    /// Model for presentation outlines
    pub presentation: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            image: "gemini-2.0-flash".to_string(),
            article: "gemini-2.5-flash".to_string(),
            presentation: "gemini-2.0-flash".to_string(),
        }
    }
}

/// Builder for creating ClientConfig with a fluent API.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(SecretString::new(api_key.into().into_boxed_str()));
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout.
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

    /// Set the model configuration.
    pub fn models(mut self, models: ModelConfig) -> Self {
        self.config.models = models;
        self
    }

    /// Add a default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> crate::Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: http::HeaderName = key_str
            .parse()
            .map_err(|_| crate::Error::InvalidHeaderName(key_str.clone()))?;
        let value: http::HeaderValue = value_str
            .parse()
            .map_err(|_| crate::Error::InvalidHeaderValue(value_str.clone()))?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.retry, RetryConfig::default());
        assert_eq!(config.models.article, "gemini-2.5-flash");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfigBuilder::new()
            .api_key("test-key")
            .base_url("https://example.com")
            .timeout(Duration::from_secs(30))
            .max_retries(5)
            .build();

        assert_eq!(config.api_key.unwrap().expose_secret(), "test-key");
        assert_eq!(config.base_url, Some("https://example.com".to_string()));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry.max_retries, 5);
    }

    #[test]
    fn test_invalid_default_header() {
        let result = ClientConfigBuilder::new().default_header("bad header", "x");
        assert!(matches!(result, Err(crate::Error::InvalidHeaderName(_))));
    }

    #[test]
    fn test_config_merge() {
        let config1 = ClientConfig::with_api_key("key1");
        let config2 = ClientConfigBuilder::new()
            .base_url("https://example.com")
            .timeout(Duration::from_secs(30))
            .max_retries(1)
            .build();

        let merged = config1.merge(config2);
        assert!(merged.api_key.is_some());
        assert_eq!(merged.base_url, Some("https://example.com".to_string()));
        assert_eq!(merged.timeout, Duration::from_secs(30));
        assert_eq!(merged.retry.max_retries, 1);
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                ("GEMINI_API_KEY", Some("env-key")),
                ("GOOGLE_API_KEY", None),
                ("GEMINI_BASE_URL", Some("http://localhost:9000")),
                ("GEMINI_TIMEOUT", Some("15")),
                ("GEMINI_MAX_RETRIES", Some("not-a-number")),
                ("GEMINI_BASE_DELAY_MS", Some("250")),
                ("GEMINI_RATE_LIMIT_FLOOR_MS", Some("5000")),
            ],
            || {
                let config = ClientConfig::from_process_env();
                assert_eq!(config.api_key.unwrap().expose_secret(), "env-key");
                assert_eq!(config.base_url.as_deref(), Some("http://localhost:9000"));
                assert_eq!(config.timeout, Duration::from_secs(15));
                assert_eq!(config.retry.max_retries, 3);
                assert_eq!(config.retry.base_delay_ms, 250);
                assert_eq!(config.retry.rate_limit_floor_ms, 5000);
            },
        );
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_from_env_google_key_fallback() {
        temp_env::with_vars(
            [
                ("GEMINI_API_KEY", None),
                ("GOOGLE_API_KEY", Some("google-key")),
            ],
            || {
                let config = ClientConfig::from_process_env();
                assert_eq!(config.api_key.unwrap().expose_secret(), "google-key");
            },
        );
    }
}
