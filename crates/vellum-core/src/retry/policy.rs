//! Bounded exponential backoff with a rate-limit floor.

use super::classify::FailureClass;
use super::config::RetryConfig;
use super::strategy::BackoffStrategy;
use std::time::Duration;

/// Retry policy for calls to a generative-AI backend.
///
/// Delays start at `base_delay` and are multiplied by `multiplier` after every
/// retry. Rate-limited failures never wait less than `rate_limit_floor`.
/// There is no jitter and no upper cap.
///
/// # Schedule
///
/// For retry `n` (0-indexed) with `delay_n = base_delay * multiplier^n`:
/// ```text
/// overloaded:   wait_n = delay_n
/// rate limited: wait_n = max(delay_n, rate_limit_floor)
/// ```
///
/// # Examples
///
/// ```rust
/// use vellum_core::retry::{BackoffStrategy, RetryPolicy};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // max_retries=3, base=1s, floor=60s, multiplier=2.0
/// let policy = RetryPolicy::default();
///
/// let policy = RetryPolicy::builder()
///     .max_retries(5)
///     .base_delay(Duration::from_millis(500))
///     .rate_limit_floor(Duration::from_secs(30))
///     .multiplier(2.0)
///     .build();
///
/// let result = policy.execute(|| async {
///     Ok::<_, std::io::Error>(42)
/// }).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
    rate_limit_floor: Duration,
    multiplier: f64,
}

impl RetryPolicy {
    /// Create a new builder for configuring the policy.
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self::builder().max_retries(0).build()
    }

    /// The minimum wait applied to rate-limited failures.
    pub fn rate_limit_floor(&self) -> Duration {
        self.rate_limit_floor
    }

    /// The factor applied to the delay after each retry.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Waits the policy would use if every attempt failed with `class`.
    ///
    /// Empty for terminal failures, otherwise one entry per retry.
    ///
    /// ```rust
    /// use vellum_core::retry::{FailureClass, RetryPolicy};
    /// use std::time::Duration;
    ///
    /// let waits = RetryPolicy::default().schedule(FailureClass::Overloaded);
    /// assert_eq!(waits, vec![
    ///     Duration::from_secs(1),
    ///     Duration::from_secs(2),
    ///     Duration::from_secs(4),
    /// ]);
    /// ```
    pub fn schedule(&self, class: FailureClass) -> Vec<Duration> {
        if !class.is_retryable() {
            return Vec::new();
        }

        let mut delay = self.base_delay;
        (0..self.max_retries)
            .map(|_| {
                let wait = self.wait_for(class, delay);
                delay = self.next_delay(delay);
                wait
            })
            .collect()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::builder()
            .max_retries(config.max_retries)
            .base_delay(config.base_delay())
            .rate_limit_floor(config.rate_limit_floor())
            .multiplier(config.backoff_multiplier)
            .build()
    }
}

impl From<RetryConfig> for RetryPolicy {
    fn from(config: RetryConfig) -> Self {
        Self::from(&config)
    }
}

impl BackoffStrategy for RetryPolicy {
    fn wait_for(&self, class: FailureClass, current: Duration) -> Duration {
        match class {
            FailureClass::RateLimited => current.max(self.rate_limit_floor),
            _ => current,
        }
    }

    fn next_delay(&self, current: Duration) -> Duration {
        Duration::try_from_secs_f64(current.as_secs_f64() * self.multiplier)
            .unwrap_or(Duration::MAX)
    }

    fn base_delay(&self) -> Duration {
        self.base_delay
    }

    fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

/// Builder for configuring [`RetryPolicy`].
///
/// Unset parameters fall back to [`RetryConfig::default`].
#[derive(Debug, Default)]
pub struct RetryPolicyBuilder {
    max_retries: Option<u32>,
    base_delay: Option<Duration>,
    rate_limit_floor: Option<Duration>,
    multiplier: Option<f64>,
}

impl RetryPolicyBuilder {
    /// Set the maximum number of retries after the initial attempt.
    ///
    /// Default: 3
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Set the delay before the first retry.
    ///
    /// Default: 1s
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = Some(delay);
        self
    }

    /// Set the minimum wait after a rate-limited failure.
    ///
    /// Default: 60s
    pub fn rate_limit_floor(mut self, floor: Duration) -> Self {
        self.rate_limit_floor = Some(floor);
        self
    }

    /// Set the exponential multiplier.
    ///
    /// Values below 1.0 (and NaN) are raised to 1.0 so delays never shrink.
    ///
    /// Default: 2.0
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = Some(multiplier.max(1.0));
        self
    }

    /// Build the [`RetryPolicy`].
    pub fn build(self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries.unwrap_or(RetryConfig::DEFAULT_MAX_RETRIES),
            base_delay: self
                .base_delay
                .unwrap_or(Duration::from_millis(RetryConfig::DEFAULT_BASE_DELAY_MS)),
            rate_limit_floor: self
                .rate_limit_floor
                .unwrap_or(Duration::from_millis(RetryConfig::DEFAULT_RATE_LIMIT_FLOOR_MS)),
            multiplier: self
                .multiplier
                .unwrap_or(RetryConfig::DEFAULT_BACKOFF_MULTIPLIER),
        }
    }
}
