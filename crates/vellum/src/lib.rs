//! # vellum
//!
//! Client and media model for the vellum media library:
//! - Image, article and presentation generation over the Gemini API
//! - Bounded retries with exponential backoff and a rate-limit floor
//!   (see [`vellum_core::retry`])
//! - Typed library items and a pluggable [`MediaLibrary`] store
//! - Helpers that normalize pasted YouTube, Vimeo, Spotify and Drive links
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vellum::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::from_env()?;
//!
//!     let deck = client.presentations().generate("the water cycle").await?;
//!     for slide in &deck.slides {
//!         println!("{}: {}", slide.title, slide.content.join(" / "));
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder, ModelConfig};
pub use error::{Error, Result};
pub use library::{InMemoryLibrary, MediaLibrary, rate_text};
pub use types::*;

// Module declarations
pub mod client;
pub mod config;
pub mod embed;
pub mod error;
pub mod http;
pub mod library;
pub mod resources;
pub mod types;

#[cfg(feature = "trace")]
#[cfg_attr(docsrs, doc(cfg(feature = "trace")))]
pub mod observability;

// Re-export the retry core
pub use vellum_core::retry::{BackoffStrategy, FailureClass, RetryConfig, RetryPolicy};

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use vellum::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BackoffStrategy, Client, ClientConfig, Error, MediaLibrary, Result, RetryPolicy,
        types::{GeneratedArticle, GeneratedImage, GeneratedPresentation, MediaType},
    };
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
