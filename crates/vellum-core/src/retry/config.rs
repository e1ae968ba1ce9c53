//! Serializable retry configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry knobs as they appear in configuration files.
///
/// Keys are camelCase and every field is optional; missing keys take the
/// defaults below.
///
/// | key                 | default |
/// |---------------------|---------|
/// | `maxRetries`        | 3       |
/// | `baseDelayMs`       | 1000    |
/// | `rateLimitFloorMs`  | 60000   |
/// | `backoffMultiplier` | 2.0     |
///
/// # Examples
///
/// ```rust
/// use vellum_core::retry::RetryConfig;
///
/// let config: RetryConfig = serde_json::from_str(r#"{"maxRetries": 5}"#).unwrap();
/// assert_eq!(config.max_retries, 5);
/// assert_eq!(config.base_delay_ms, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetryConfig {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds.
    pub base_delay_ms: u64,
    /// Minimum wait after a rate-limit failure, in milliseconds.
    pub rate_limit_floor_ms: u64,
    /// Factor applied to the delay after every retry.
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// Default number of retries.
    pub const DEFAULT_MAX_RETRIES: u32 = 3;
    /// Default base delay in milliseconds.
    pub const DEFAULT_BASE_DELAY_MS: u64 = 1_000;
    /// Default rate-limit floor in milliseconds.
    pub const DEFAULT_RATE_LIMIT_FLOOR_MS: u64 = 60_000;
    /// Default backoff multiplier.
    pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;

    /// Base delay as a [`Duration`].
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Rate-limit floor as a [`Duration`].
    pub fn rate_limit_floor(&self) -> Duration {
        Duration::from_millis(self.rate_limit_floor_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            base_delay_ms: Self::DEFAULT_BASE_DELAY_MS,
            rate_limit_floor_ms: Self::DEFAULT_RATE_LIMIT_FLOOR_MS,
            backoff_multiplier: Self::DEFAULT_BACKOFF_MULTIPLIER,
        }
    }
}
