//! The retry loop shared by every backoff strategy.

use super::classify::{FailureClass, StatusHint};
use async_trait::async_trait;
use std::error::Error;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// A strategy for retrying failed remote operations.
///
/// Implementations decide how long to wait and how the delay grows; the
/// provided [`execute`](BackoffStrategy::execute) loop owns the control flow:
///
/// 1. run the operation and return its value on success;
/// 2. classify the failure, returning it unchanged if it is terminal or the
///    retry budget is spent;
/// 3. otherwise wait [`wait_for`](BackoffStrategy::wait_for), grow the delay
///    with [`next_delay`](BackoffStrategy::next_delay), spend one retry and
///    go back to 1.
///
/// Every attempt awaits the previous one, so a single sequence never runs two
/// attempts at once. The loop holds no shared state; independent invocations
/// on the same strategy do not interact.
///
/// There is no cancellation hook or deadline. A sequence runs until success,
/// exhaustion or a terminal failure unless the caller drops the future.
///
/// # Examples
///
/// ```rust
/// use vellum_core::retry::{BackoffStrategy, FailureClass};
/// use std::time::Duration;
///
/// // A strategy that retries everything on a fixed one-second cadence.
/// struct Fixed;
///
/// impl BackoffStrategy for Fixed {
///     fn classify<E>(&self, _error: &E) -> FailureClass
///     where
///         E: vellum_core::retry::StatusHint + std::fmt::Display + ?Sized,
///     {
///         FailureClass::Overloaded
///     }
///
///     fn wait_for(&self, _class: FailureClass, current: Duration) -> Duration {
///         current
///     }
///
///     fn next_delay(&self, current: Duration) -> Duration {
///         current
///     }
///
///     fn base_delay(&self) -> Duration {
///         Duration::from_secs(1)
///     }
///
///     fn max_retries(&self) -> u32 {
///         2
///     }
/// }
/// ```
#[async_trait]
pub trait BackoffStrategy: Send + Sync {
    /// Execute an operation with retry logic.
    ///
    /// # Type Parameters
    /// - `F`: Function producing a fresh future for each attempt
    /// - `Fut`: The future returned by the function
    /// - `T`: Success type
    /// - `E`: Error type; classified through [`StatusHint`] and its message
    ///
    /// # Returns
    /// - `Ok(T)`: The value from the first successful attempt
    /// - `Err(E)`: The error from the last attempt, exactly as the operation
    ///   produced it
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vellum_core::retry::{BackoffStrategy, RetryPolicy};
    /// use std::time::Duration;
    /// use std::sync::atomic::{AtomicU32, Ordering};
    /// use std::sync::Arc;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let policy = RetryPolicy::builder()
    ///     .max_retries(3)
    ///     .base_delay(Duration::from_millis(10))
    ///     .build();
    ///
    /// let attempts = Arc::new(AtomicU32::new(0));
    /// let result = policy.execute(|| {
    ///     let attempts = Arc::clone(&attempts);
    ///     async move {
    ///         if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
    ///             Err(std::io::Error::other("503 Service Unavailable"))
    ///         } else {
    ///             Ok(42)
    ///         }
    ///     }
    /// }).await?;
    /// assert_eq!(result, 42);
    /// # Ok(())
    /// # }
    /// ```
    async fn execute<F, Fut, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: Fn() -> Fut + Send + Sync,
        Fut: Future<Output = Result<T, E>> + Send,
        T: Send,
        E: Error + StatusHint + Send + Sync + 'static,
    {
        let mut retries_left = self.max_retries();
        let mut delay = self.base_delay();

        loop {
            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            let class = self.classify(&error);
            if !class.is_retryable() || retries_left == 0 {
                return Err(error);
            }

            let wait = self.wait_for(class, delay);

            #[cfg(feature = "tracing")]
            tracing::warn!(
                status = %StatusLabel(error.status_hint().or(class.status())),
                class = %class,
                error = %error,
                wait_ms = wait.as_millis() as u64,
                retries_left,
                "Operation failed, retrying in {}ms ({} retries left)",
                wait.as_millis(),
                retries_left
            );

            drop(error);
            tokio::time::sleep(wait).await;
            delay = self.next_delay(delay);
            retries_left -= 1;
        }
    }

    /// Classify a failure.
    ///
    /// Defaults to [`FailureClass::classify`].
    fn classify<E>(&self, error: &E) -> FailureClass
    where
        E: StatusHint + fmt::Display + ?Sized,
    {
        FailureClass::classify(error)
    }

    /// How long to wait after a retryable failure of `class`, given the
    /// current delay value.
    fn wait_for(&self, class: FailureClass, current: Duration) -> Duration;

    /// The delay value for the next potential retry.
    ///
    /// Called after every wait, whatever branch produced it.
    fn next_delay(&self, current: Duration) -> Duration;

    /// The delay value before the first retry.
    fn base_delay(&self) -> Duration;

    /// Get the maximum number of retry attempts.
    ///
    /// If `max_retries() == 3`, the operation is attempted up to 4 times
    /// total (1 initial + 3 retries).
    fn max_retries(&self) -> u32;
}

#[cfg(feature = "tracing")]
struct StatusLabel(Option<u16>);

#[cfg(feature = "tracing")]
impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(status) => write!(f, "{}", status),
            None => f.write_str("error"),
        }
    }
}
