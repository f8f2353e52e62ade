//! Error types for content indexing

use std::path::PathBuf;

use thiserror::Error;

/// Failures while listing articles.
///
/// Missing front-matter fields are deliberately absent here: they surface as
/// `None` on the record instead.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The content directory is missing or cannot be listed.
    #[error("failed to read content directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An article file cannot be read (including non-UTF-8 content).
    #[error("failed to read article {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A per-file parse task panicked or was cancelled.
    #[error("article task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IndexError {
    /// Path of the directory or file that failed, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::ReadDir { path, .. } | Self::ReadFile { path, .. } => Some(path),
            Self::Join(_) => None,
        }
    }
}
