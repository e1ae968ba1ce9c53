//! Logging setup for binaries and examples built on the client
//!
//! The library itself only emits `tracing` events:
//!
//! | target        | level   | event                                   |
//! |---------------|---------|-----------------------------------------|
//! | `vellum_core` | `warn`  | retry scheduled after a transient error |
//! | `vellum`      | `debug` | HTTP request sent / response received   |
//! | `vellum`      | `error` | a generation attempt failed             |
//!
//! [`init_tracing`] installs a formatting subscriber that honors `RUST_LOG`.

use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "vellum=info,vellum_core=warn";

/// Install a global formatting subscriber.
///
/// # Errors
///
/// Returns an error if `RUST_LOG` is malformed or a global subscriber is
/// already installed.
pub fn init_tracing() -> Result<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => EnvFilter::try_new(directives),
        Err(_) => EnvFilter::try_new(DEFAULT_FILTER),
    }
    .map_err(|e| Error::Other(anyhow::anyhow!("invalid log filter: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| Error::Other(anyhow::anyhow!("failed to install subscriber: {}", e)))
}
