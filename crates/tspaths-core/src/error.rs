//! Error types for tsconfig resolution

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tsconfig resolution
#[derive(Debug, Error)]
pub enum TsPathsError {
    /// The file exists but its text is not a valid configuration object
    #[error("{} is malformed {message}", path.display())]
    MalformedConfig { path: PathBuf, message: String },

    /// An explicitly requested project file or directory does not exist
    #[error("Project not found: {}", path.display())]
    ProjectNotFound { path: PathBuf },

    /// A file extends itself, directly or through other files
    #[error("Circular extends chain: {chain}")]
    CircularExtends { chain: String },

    /// File system I/O errors
    #[error("IO error for path '{}': {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    NotFound,
    Cycle,
    Io,
}

impl TsPathsError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TsPathsError::MalformedConfig { .. } => ErrorKind::Parse,
            TsPathsError::ProjectNotFound { .. } => ErrorKind::NotFound,
            TsPathsError::CircularExtends { .. } => ErrorKind::Cycle,
            TsPathsError::IoError { .. } => ErrorKind::Io,
        }
    }

    /// Create a malformed-config error for `path`
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedConfig {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error for `path`
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}
