//! Error types for srvconf-core

/// Result type for srvconf-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while materializing configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Writing or copying one artifact failed
    #[error("Failed to materialize {artifact}: {source}")]
    Artifact {
        artifact: String,
        #[source]
        source: srvconf_fs::Error,
    },

    /// Inline data was supplied for an artifact that is only ever copied
    #[error("{artifact} does not accept inline configuration")]
    InlineNotSupported { artifact: String },

    /// The materialization config is incomplete or inconsistent
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Filesystem error outside any single artifact
    #[error(transparent)]
    Fs(#[from] srvconf_fs::Error),
}

impl Error {
    /// Name of the artifact this error belongs to, if any.
    pub fn artifact(&self) -> Option<&str> {
        match self {
            Self::Artifact { artifact, .. } | Self::InlineNotSupported { artifact } => {
                Some(artifact.as_str())
            }
            _ => None,
        }
    }

    /// Whether the backend lacks a primitive, so no later artifact can succeed either.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Artifact { source, .. } => source.is_fatal(),
            Self::Fs(source) => source.is_fatal(),
            _ => false,
        }
    }
}
