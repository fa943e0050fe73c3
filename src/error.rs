//! Error types for grading runs
//!
//! Input documents are all-or-nothing: a missing or malformed result or
//! weight document aborts the run before any score is produced. A garbled
//! score file is not an error at all (see [`crate::store`]); only failing
//! to write it is.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while grading a test report
#[derive(Error, Debug)]
pub enum GradeError {
    #[error("Cannot open {}: {source}", .path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed document {}: {reason}", .path.display())]
    MalformedDocument { path: PathBuf, reason: String },

    #[error("Failed to write score to {}: {source}", .path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {} to {}: {source}", .source_path.display(), .dest.display())]
    ArtifactCopy {
        source_path: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

impl GradeError {
    /// Build a `MalformedDocument` error for a document that was not read from disk
    pub fn malformed(reason: impl Into<String>) -> Self {
        GradeError::MalformedDocument {
            path: PathBuf::from("<memory>"),
            reason: reason.into(),
        }
    }

    /// Attach the source path to a `MalformedDocument` error raised on an in-memory tree
    pub(crate) fn at_path(self, at: &std::path::Path) -> Self {
        match self {
            GradeError::MalformedDocument { reason, .. } => GradeError::MalformedDocument {
                path: at.to_path_buf(),
                reason,
            },
            other => other,
        }
    }
}

pub type GradeResult<T> = Result<T, GradeError>;
