#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Core abstractions for the vellum crates.
//!
//! This crate holds the pieces that have real failure-handling semantics and
//! no dependency on any particular backend:
//!
//! - **Failure classification** via [`FailureClass`] and the [`StatusHint`] trait
//!   - structured status codes first, message substrings as a fallback
//! - **Bounded retry** via the [`BackoffStrategy`] trait and [`RetryPolicy`]
//!   - exponential backoff without jitter
//!   - a fixed floor for rate-limit waits
//! - **Serializable knobs** via [`RetryConfig`]
//!
//! # Examples
//!
//! Using the prelude for convenient imports:
//!
//! ```rust
//! use vellum_core::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let policy = RetryPolicy::builder()
//!     .max_retries(3)
//!     .base_delay(Duration::from_millis(100))
//!     .build();
//!
//! let result = policy.execute(|| async {
//!     Ok::<_, std::io::Error>(42)
//! }).await?;
//! assert_eq!(result, 42);
//! # Ok(())
//! # }
//! ```
//!
//! [`FailureClass`]: retry::FailureClass
//! [`StatusHint`]: retry::StatusHint
//! [`BackoffStrategy`]: retry::BackoffStrategy
//! [`RetryPolicy`]: retry::RetryPolicy
//! [`RetryConfig`]: retry::RetryConfig

pub mod retry;

/// Convenient re-exports of commonly used items.
///
/// ```rust
/// use vellum_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::retry::{
        BackoffStrategy, FailureClass, RetryConfig, RetryPolicy, RetryPolicyBuilder, StatusHint,
    };
}
