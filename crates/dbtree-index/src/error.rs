//! Index errors.

use std::{fmt::Display, io, path::PathBuf};

use thiserror::Error;

/// Failures while building, opening or reading the on-disk index.
///
/// Searches never surface these directly; the `SearchIndex` adapter folds them into
/// `SearchError::Unavailable`.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index directory could not be opened or created.
    #[error("cannot open index at {path}: {message}")]
    OpenIndex {
        /// Index directory.
        path: PathBuf,
        /// Underlying tantivy message.
        message: String,
    },

    /// Adding or deleting documents failed.
    #[error("index write failed: {0}")]
    Write(String),

    /// Reading counts or stored fields failed.
    #[error("index read failed: {0}")]
    Read(String),

    /// Committing pending changes failed.
    #[error("index commit failed: {0}")]
    Commit(String),

    /// Filesystem error around the index directory.
    #[error("index I/O error: {0}")]
    Io(#[from] io::Error),

    /// The configured stemmer is not a Snowball language.
    #[error("unsupported stemmer language '{0}'")]
    InvalidLanguage(String),
}

impl IndexError {
    /// `OpenIndex` for `path`.
    pub(crate) fn open_index(path: PathBuf, source: &impl Display) -> Self {
        Self::OpenIndex {
            path,
            message: source.to_string(),
        }
    }

    /// `Write` from any tantivy failure.
    pub(crate) fn write(source: &impl Display) -> Self {
        Self::Write(source.to_string())
    }

    /// `Read` from any tantivy failure.
    pub(crate) fn read(source: &impl Display) -> Self {
        Self::Read(source.to_string())
    }

    /// `Commit` from any tantivy failure.
    pub(crate) fn commit(source: &impl Display) -> Self {
        Self::Commit(source.to_string())
    }
}
