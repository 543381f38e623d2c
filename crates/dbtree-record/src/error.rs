//! Error types for record ingestion.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that abort an ingestion batch.
///
/// Field-level anomalies never produce an error; only an unreadable source does.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Failed to open or read a record file.
    #[error("failed to read record file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The record source is not well-formed.
    #[error("malformed record source at byte {position}: {message}")]
    Malformed {
        /// Byte offset in the source where the problem was detected.
        position: u64,
        /// Description of the problem.
        message: String,
    },
}

impl IngestError {
    /// Creates a `Malformed` error.
    pub(crate) fn malformed(position: u64, message: impl Into<String>) -> Self {
        Self::Malformed {
            position,
            message: message.into(),
        }
    }
}
