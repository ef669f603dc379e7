//! Error types for the search pipeline.
//!
//! [`SearchError`] stops a whole search before any lookup runs.
//! [`LookupError`] is per compound and never affects sibling compounds.
//! "No matches" is not an error: it is an empty
//! [`ResultBundle`](crate::ResultBundle).

use std::time::Duration;
use thiserror::Error;

/// Reasons a search produced no per-compound work at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Input was blank after trimming.
    #[error("please enter a compound name or chemical expression")]
    EmptyInput,
    /// The partial-match limit must be at least one.
    #[error("partial match limit must be at least 1")]
    InvalidLimit,
    /// Input looked like an expression but yielded no compound names.
    #[error("could not extract valid compound names from the expression {input:?}")]
    NothingExtracted { input: String },
}

/// A failed lookup for one compound.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),
    #[error("lookup provider failed: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LookupError {
    /// Wrap any provider-side error.
    pub fn provider<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        LookupError::Provider(err.into())
    }
}
