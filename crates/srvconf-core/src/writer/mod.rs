//! Generated configuration file writers
//!
//! - **PropertyFileWriter**: `key=value` lines with normalized values
//! - **OptionListWriter**: one verbatim option per line
//!
//! Both begin with the same [`Header`] and replace the target file in full.

mod options;
mod properties;

pub use options::OptionListWriter;
pub use properties::PropertyFileWriter;

use srvconf_fs::{Filesystem, NormalizedPath};

/// Name stamped into generated files when the caller does not supply one.
pub const DEFAULT_TOOL_NAME: &str = "srvconf";

/// The comment line every generated file starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    tool_name: String,
}

impl Header {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
        }
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL_NAME)
    }
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "# Generated by {}", self.tool_name)
    }
}

/// Create the parent of `path`, then replace `path` with `content`.
fn persist(fs: &dyn Filesystem, path: &NormalizedPath, content: &str) -> srvconf_fs::Result<()> {
    if let Some(parent) = path.parent() {
        fs.create_dir_all(&parent)?;
    }
    fs.write(path, content.as_bytes())
}
