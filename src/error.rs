//! Error types for the lfukit library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods on [`FreqList`](crate::ds::FreqList)
//!   and [`LfuCache`](crate::policy::lfu::LfuCache)).
//!
//! Cache misses and degenerate capacity are defined outcomes, not errors, so
//! no public operation on the cache itself is fallible. `InvariantError`
//! exists for structural self-checks in tests and debugging sessions.
//!
//! ## Example Usage
//!
//! ```
//! use lfukit::policy::lfu::LfuCache;
//! use lfukit::traits::CoreCache;
//!
//! let mut cache: LfuCache<u64, &str> = LfuCache::new(4);
//! cache.insert(1, "one");
//! cache.insert(2, "two");
//!
//! // A healthy cache passes the structural self-check.
//! assert!(cache.check_invariants().is_ok());
//! ```

use std::fmt;

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` methods. Carries a human-readable
/// description of which invariant failed.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("bucket chain out of order");
        assert_eq!(err.to_string(), "bucket chain out of order");
    }

    #[test]
    fn invariant_debug_includes_message() {
        let err = InvariantError::new("stale handle");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("stale handle"));
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }
}
