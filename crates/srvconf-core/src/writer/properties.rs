//! Property file writer (`key=value` per line)

use indexmap::IndexMap;
use srvconf_fs::{Filesystem, NormalizedPath};

use super::{Header, persist};
use crate::normalize::normalize_value;

/// Writes an ordered property map as a header line followed by `key=value` lines.
///
/// Values are normalized with [`normalize_value`]; keys are written as given.
/// Entries keep the order of the map, which makes the output reproducible.
#[derive(Debug, Clone, Default)]
pub struct PropertyFileWriter {
    header: Header,
}

impl PropertyFileWriter {
    pub fn new(header: Header) -> Self {
        Self { header }
    }

    /// Render the full file content.
    pub fn render(&self, properties: &IndexMap<String, String>) -> String {
        let mut out = format!("{}\n", self.header);
        for (key, value) in properties {
            out.push_str(key);
            out.push('=');
            out.push_str(&normalize_value(value));
            out.push('\n');
        }
        out
    }

    /// Render and replace the file at `path`, creating parent directories.
    ///
    /// Returns the rendered content.
    pub fn write(
        &self,
        fs: &dyn Filesystem,
        path: &NormalizedPath,
        properties: &IndexMap<String, String>,
    ) -> srvconf_fs::Result<String> {
        let content = self.render(properties);
        persist(fs, path, &content)?;
        Ok(content)
    }
}
