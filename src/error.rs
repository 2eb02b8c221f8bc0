//! Error types for the filesystem tree model and its outer layers.

use std::path::PathBuf;
use thiserror::Error;

/// Tree construction, query and mirroring errors
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("nil node")]
    NilNode,

    #[error("invalid file node: {0:?}")]
    InvalidFileNode(PathBuf),

    #[error("invalid directory node: {0:?}")]
    InvalidDirectoryNode(PathBuf),

    #[error("invalid directory: {0:?}")]
    InvalidDirectory(PathBuf),

    #[error("Failed to checksum {path:?}: {source}")]
    Checksum {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TreeError {
    /// Wrap an I/O error with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TreeError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors surfaced by configuration, logging and the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}
