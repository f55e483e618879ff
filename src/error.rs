//! Error types for the lru-store library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned by [`LruStore::try_new`](crate::policy::lru::LruStore::try_new)
//!   when the requested capacity is invalid.
//! - [`InvariantError`]: Returned by
//!   [`LruCore::check_invariants`](crate::policy::lru::LruCore::check_invariants)
//!   when the lookup index and the recency list disagree.
//!
//! Lookup misses are not errors anywhere in this crate; they surface as `None`
//! or `false`.
//!
//! ## Example Usage
//!
//! ```
//! use lru_store::error::ConfigError;
//! use lru_store::policy::lru::LruStore;
//!
//! let store: Result<LruStore<String, i32>, ConfigError> = LruStore::try_new(100);
//! assert!(store.is_ok());
//!
//! let bad = LruStore::<String, i32>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when the store's internal invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when store configuration is invalid.
///
/// # Example
///
/// ```
/// use lru_store::policy::lru::LruStore;
///
/// let err = LruStore::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("index/list length mismatch");
        assert_eq!(err.to_string(), "index/list length mismatch");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("dangling handle");
        assert_eq!(err.message(), "dangling handle");
        assert!(format!("{:?}", err).contains("dangling handle"));
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<InvariantError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("capacity must be greater than 0");
        assert_eq!(err.to_string(), "capacity must be greater than 0");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(b.message(), "x");
    }

    #[test]
    fn config_boxes_as_dyn_error() {
        let boxed: Box<dyn std::error::Error> = Box::new(ConfigError::new("bad capacity"));
        assert_eq!(boxed.to_string(), "bad capacity");
    }
}
