//! Error types for kyrolookup.
//!
//! All errors are strongly typed using thiserror so callers can match on
//! the specific failure: an unresolved tie, a key that resolved to nothing,
//! or a lookup that was configured without the pieces it needs.

use thiserror::Error;

/// Top-level error type for lookup construction and resolution.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Two or more entities compete for one key and the tie-break policy
    /// could not pick a winner.
    #[error("Conflict for key '{key}': {} are tied", .candidates.join(", "))]
    Conflict {
        /// The colliding key (index key or fuzzy query).
        key: String,
        /// Canonical values of the competing entities.
        candidates: Vec<String>,
    },

    /// The full cascade found nothing and the not-found mode is `raise`.
    #[error("Key not found: '{key}'")]
    NotFound {
        /// The query key.
        key: String,
    },

    /// A required capability (the fuzzy scorer) is unavailable.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What is missing.
        message: String,
    },

    /// A configuration value is out of range.
    #[error("Invalid config field '{field}': {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl LookupError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a not-found error for `key`.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Returns true if this is a tie-break conflict.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Returns true if this is a not-found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a configuration error (missing capability or bad value).
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. } | Self::InvalidConfig { .. })
    }

    /// Returns true if this error is retryable.
    ///
    /// Lookups are pure functions of their input, so nothing is.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }
}

/// Result type alias for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;
