//! Error types for hierarchy construction.

use thiserror::Error;

/// Configuration problems that prevent building a hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// The database label is empty, so the tree has nothing to be rooted at.
    #[error("database label is empty; set one in the record source or configuration")]
    MissingDatabaseLabel,
}
