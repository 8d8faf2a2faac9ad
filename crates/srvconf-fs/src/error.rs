//! Error types for srvconf-fs

use std::path::PathBuf;

use crate::filesystem::Capability;

/// Result type for srvconf-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in srvconf-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    #[error("Filesystem backend does not support {capability}")]
    MissingCapability { capability: Capability },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means no artifact could ever be produced by the backend.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingCapability { .. })
    }
}
