//! Transient vs. terminal classification of failures.

use std::fmt;

/// HTTP status that marks an upstream as temporarily overloaded.
pub const SERVICE_UNAVAILABLE: u16 = 503;

/// HTTP status that marks a request as rate limited.
pub const TOO_MANY_REQUESTS: u16 = 429;

/// How a failure should be treated by a retry strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    /// Upstream overload (503-equivalent). Retried with standard backoff.
    Overloaded,
    /// Rate limited (429-equivalent). Retried, but never sooner than the
    /// policy's rate-limit floor.
    RateLimited,
    /// Anything else. Propagated immediately.
    Terminal,
}

impl FailureClass {
    /// Classify a failure.
    ///
    /// A structured status from [`StatusHint::status_hint`] wins. When the
    /// failure carries none (or an unrelated one), the rendered message is
    /// searched for `"429"` and then `"503"`. The substring check is a
    /// heuristic for upstream clients that only report status inside free
    /// text, so an unrelated number in a message can trigger a retry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vellum_core::retry::FailureClass;
    ///
    /// let err = std::io::Error::other("upstream said 503 Service Unavailable");
    /// assert_eq!(FailureClass::classify(&err), FailureClass::Overloaded);
    ///
    /// let err = std::io::Error::other("permission denied");
    /// assert_eq!(FailureClass::classify(&err), FailureClass::Terminal);
    /// ```
    pub fn classify<E>(error: &E) -> Self
    where
        E: StatusHint + fmt::Display + ?Sized,
    {
        match error.status_hint() {
            Some(TOO_MANY_REQUESTS) => return Self::RateLimited,
            Some(SERVICE_UNAVAILABLE) => return Self::Overloaded,
            _ => {}
        }

        Self::from_message(&error.to_string())
    }

    /// Classify using only a human-readable message.
    pub fn from_message(message: &str) -> Self {
        if message.contains("429") {
            Self::RateLimited
        } else if message.contains("503") {
            Self::Overloaded
        } else {
            Self::Terminal
        }
    }

    /// Whether a strategy may re-attempt after this failure.
    pub fn is_retryable(self) -> bool {
        !matches!(self, Self::Terminal)
    }

    /// The HTTP status this class corresponds to, if any.
    pub fn status(self) -> Option<u16> {
        match self {
            Self::Overloaded => Some(SERVICE_UNAVAILABLE),
            Self::RateLimited => Some(TOO_MANY_REQUESTS),
            Self::Terminal => None,
        }
    }
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overloaded => write!(f, "overloaded"),
            Self::RateLimited => write!(f, "rate limited"),
            Self::Terminal => write!(f, "terminal"),
        }
    }
}

/// Exposes a structured HTTP-like status carried by an error.
///
/// Error types that know their status should override [`status_hint`]; the
/// default reports none, which leaves classification to the message fallback.
///
/// [`status_hint`]: StatusHint::status_hint
pub trait StatusHint {
    /// The status code attached to this failure, if any.
    fn status_hint(&self) -> Option<u16> {
        None
    }
}

impl StatusHint for std::io::Error {}

impl<T: StatusHint + ?Sized> StatusHint for Box<T> {
    fn status_hint(&self) -> Option<u16> {
        (**self).status_hint()
    }
}
