//! Sensitive data marker for automatic redaction
//!
//! Landing-zone documents carry account owner emails. The `Sensitive<T>`
//! wrapper keeps them out of log output and error text.

use std::fmt;

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use lzguard_core_types::Sensitive;
///
/// let email = Sensitive::new("owner@example.com");
/// assert_eq!(format!("{:?}", email), "***REDACTED***");
/// assert_eq!(email.expose(), &"owner@example.com");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying sensitive value
    ///
    /// Only comparisons (e.g. duplicate detection) should need this.
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
