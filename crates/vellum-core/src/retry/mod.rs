//! Retry strategies and failure classification.
//!
//! # Key Types
//!
//! - [`BackoffStrategy`] - Core trait for retry strategies
//! - [`RetryPolicy`] - Bounded exponential backoff with a rate-limit floor
//! - [`FailureClass`] - Retryable vs. terminal classification of a failure
//! - [`RetryConfig`] - Serializable retry knobs
//!
//! # Examples
//!
//! ```rust
//! use vellum_core::retry::{BackoffStrategy, RetryPolicy};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let policy = RetryPolicy::builder()
//!     .max_retries(3)
//!     .base_delay(Duration::from_millis(100))
//!     .build();
//!
//! let result = policy.execute(|| async {
//!     // Your operation here
//!     Ok::<_, std::io::Error>(42)
//! }).await?;
//! # Ok(())
//! # }
//! ```

mod classify;
mod config;
mod policy;
mod strategy;

pub use classify::{FailureClass, StatusHint};
pub use config::RetryConfig;
pub use policy::{RetryPolicy, RetryPolicyBuilder};
pub use strategy::BackoffStrategy;
