//! The filesystem interface materialization runs against
//!
//! Backends implement the primitives they support. A primitive left at its
//! default reports [`Error::MissingCapability`], which callers treat as fatal.

use std::path::Path;

use crate::io::{self, RobustnessConfig};
use crate::{Error, NormalizedPath, Result};

/// A filesystem primitive a backend may or may not provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    CreateDir,
    Write,
    Copy,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateDir => "directory creation",
            Self::Write => "file write",
            Self::Copy => "file copy",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimal set of filesystem operations needed to materialize configuration.
///
/// Source files are addressed by native [`Path`] exactly as the caller gave
/// them. Targets inside the server directory use [`NormalizedPath`].
pub trait Filesystem {
    /// Whether a regular file exists at `path`.
    fn is_file(&self, path: &Path) -> bool;

    /// Read the full contents of the file at `path`.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Create `path` and any missing ancestors.
    fn create_dir_all(&self, _path: &NormalizedPath) -> Result<()> {
        Err(Error::MissingCapability {
            capability: Capability::CreateDir,
        })
    }

    /// Replace the file at `path` with `content`.
    fn write(&self, _path: &NormalizedPath, _content: &[u8]) -> Result<()> {
        Err(Error::MissingCapability {
            capability: Capability::Write,
        })
    }

    /// Replace the file at `to` with the bytes of `from`, returning the
    /// bytes that were copied.
    fn copy(&self, _from: &Path, _to: &NormalizedPath) -> Result<Vec<u8>> {
        Err(Error::MissingCapability {
            capability: Capability::Copy,
        })
    }
}

/// The local disk, written through [`io::write_atomic`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs {
    robustness: RobustnessConfig,
}

impl LocalFs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Filesystem for LocalFs {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        io::read_bytes(path)
    }

    fn create_dir_all(&self, path: &NormalizedPath) -> Result<()> {
        let native = path.to_native();
        std::fs::create_dir_all(&native).map_err(|e| Error::io(&native, e))
    }

    fn write(&self, path: &NormalizedPath, content: &[u8]) -> Result<()> {
        tracing::debug!(path = %path, bytes = content.len(), "Writing file");
        io::write_atomic(path, content, self.robustness)
    }

    fn copy(&self, from: &Path, to: &NormalizedPath) -> Result<Vec<u8>> {
        tracing::debug!(from = %from.display(), to = %to, "Copying file");
        io::copy_atomic(from, to, self.robustness)
    }
}
