//! Error types for the similarity-lookup boundary.
//!
//! A lookup failure is fatal to the build that issued it: the builder
//! surfaces the first error verbatim and abandons partial state, so a
//! half-built graph can never be mistaken for a complete one downstream.
//! Retry policy, if any, belongs to the caller.

use thiserror::Error;

/// Failure from the similarity-lookup service.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Transport-level failure (connect, timeout, TLS, ...)
    #[error("similarity service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status from the service
    #[error("similarity service returned status {status} for '{word}'")]
    Status {
        word: String,
        status: reqwest::StatusCode,
    },

    /// Response body did not decode to a neighbor list
    #[error("could not decode similarity response for '{word}': {message}")]
    Decode { word: String, message: String },
}
