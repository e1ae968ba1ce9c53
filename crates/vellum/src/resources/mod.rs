//! Generation endpoints
//!
//! Each resource borrows the [`Client`](crate::Client) and runs one `generateContent`
//! exchange per attempt inside the client's retry policy.

pub mod articles;
pub mod images;
pub mod presentations;

pub use articles::Articles;
pub use images::Images;
pub use presentations::Presentations;

use crate::error::{Error, Result};

/// Reject blank prompts before anything goes over the wire.
pub(crate) fn require_input<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{} cannot be empty", field)));
    }
    Ok(trimmed)
}
