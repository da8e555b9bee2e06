//! Similarity-lookup collaborator boundary.
//!
//! The graph builder only ever sees this trait; the HTTP client in
//! [`http`] is the production implementation, and tests substitute
//! in-memory tables.

pub mod http;

use crate::core::Neighbor;
use crate::errors::LookupError;

pub use http::{DhlabClient, DhlabConfig};

/// A ranked word-similarity source.
///
/// Implementations return neighbors ordered by decreasing score, as
/// provided by the underlying collection; the list may be empty. Any
/// failure aborts the in-progress build, so implementations should not
/// retry internally.
pub trait SimilarityLookup {
    fn lookup(&self, word: &str, limit: usize, model: &str) -> Result<Vec<Neighbor>, LookupError>;
}
