//! The contract between dbtree and a full-text search index.

use std::collections::HashSet;

use thiserror::Error;

/// Document identifiers (`pid` values) matched by a query.
pub type MatchSet = HashSet<String>;

/// A full-text index over ingested documents.
///
/// Implementations treat the query string opaquely, search every indexed field, and return
/// the pids of documents with at least one matching field. Searches are scoped to one
/// database label per call. An empty query returns an empty set.
pub trait SearchIndex {
    /// Runs `query` against the documents of `database`.
    fn search(&self, database: &str, query: &str) -> Result<MatchSet, SearchError>;
}

impl<T: SearchIndex + ?Sized> SearchIndex for &T {
    fn search(&self, database: &str, query: &str) -> Result<MatchSet, SearchError> {
        (**self).search(database, query)
    }
}

/// Failures reported by a search index.
///
/// Neither kind is fatal: callers degrade to an empty match set and surface a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The index could not be reached or failed while searching.
    #[error("search index unavailable: {0}")]
    Unavailable(String),

    /// The index rejected the query string.
    #[error("search index rejected query '{query}': {message}")]
    QueryParse {
        /// The rejected query.
        query: String,
        /// Parser message.
        message: String,
    },
}
