//! # Error Types
//!
//! Operational errors raised by `formkit-core`. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! Validation failures are not errors in this sense: a candidate value that
//! breaks a field rule is reported as a violation carrying an
//! [`ErrorMessage`](crate::messages::ErrorMessage), never through this type.

use thiserror::Error;

/// Top-level error type for formkit.
#[derive(Error, Debug)]
pub enum FormkitError {
    /// A regular expression could not be compiled.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The pattern source text.
        pattern: String,
        /// Underlying compilation error.
        #[source]
        source: regex::Error,
    },

    /// A date string matched none of the accepted formats.
    #[error("invalid date {0:?}")]
    InvalidDate(String),

    /// A validation context was not a JSON object.
    #[error("invalid validation context: expected a JSON object, got {0}")]
    InvalidContext(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
