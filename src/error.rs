//! Error types for the fsalias library.
//!
//! This module provides the error hierarchy for all resolution and
//! probing operations, using `thiserror` for ergonomic error handling.
//!
//! The security-relevant kinds are `MalformedInput`, `UnresolvableInput`
//! (including `SymlinkLoop`) and `ProbeFailed`. None of them is ever
//! recovered locally into a default verdict: a caller that enforces
//! access rules must treat all of them as a deny.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with an fsalias error.
///
/// # Examples
///
/// ```
/// use fsalias::{Error, Result};
///
/// fn example_operation() -> Result<bool> {
///     Ok(true)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the fsalias library.
///
/// This enum encompasses all error conditions that can occur while
/// parsing a requested form, resolving it to a canonical path, or
/// probing the filesystem.
#[derive(Debug, Error)]
pub enum Error {
    /// A requested form could not be parsed at all.
    ///
    /// Covers syntactically invalid URL strings, unsupported URL
    /// schemes, and path segments that are not legal in the position
    /// they were used (e.g. a rooted `add_path` segment).
    #[error("malformed input '{input}': {reason}")]
    MalformedInput {
        /// The offending input, as given.
        input: String,
        /// The reason it could not be parsed.
        reason: String,
    },

    /// OS resolution could not produce an absolute path.
    #[error("unresolvable input {}: {reason}", path.display())]
    UnresolvableInput {
        /// The path that could not be resolved.
        path: PathBuf,
        /// The reason resolution failed.
        reason: String,
    },

    /// A symlink loop was detected during resolution.
    #[error("symlink loop detected: {}", path.display())]
    SymlinkLoop {
        /// The path where the loop was detected.
        path: PathBuf,
    },

    /// An I/O failure occurred during existence or identity probing.
    ///
    /// A probe failure is inconclusive, not a verdict: it must never be
    /// interpreted as "not an alias".
    #[error("probe failed for {}: {source}", path.display())]
    ProbeFailed {
        /// The path being probed when the failure occurred.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An I/O error occurred outside of probing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if the error indicates an input that could not be parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsalias::Error;
    ///
    /// let err = Error::MalformedInput {
    ///     input: "http://example.com".to_string(),
    ///     reason: "unsupported scheme".to_string(),
    /// };
    /// assert!(err.is_malformed());
    /// ```
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }

    /// Check if the error indicates that OS resolution failed.
    ///
    /// Covers both `UnresolvableInput` and `SymlinkLoop`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsalias::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::SymlinkLoop { path: PathBuf::from("/loop") };
    /// assert!(err.is_unresolvable());
    /// ```
    #[must_use]
    pub fn is_unresolvable(&self) -> bool {
        matches!(self, Self::UnresolvableInput { .. } | Self::SymlinkLoop { .. })
    }

    /// Check if the error is an inconclusive probe failure.
    #[must_use]
    pub fn is_probe_failed(&self) -> bool {
        matches!(self, Self::ProbeFailed { .. })
    }
}
