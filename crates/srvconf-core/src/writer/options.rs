//! Option list writer (one option per line)

use srvconf_fs::{Filesystem, NormalizedPath};

use super::{Header, persist};

/// Writes options verbatim, one per line, after the header.
#[derive(Debug, Clone, Default)]
pub struct OptionListWriter {
    header: Header,
}

impl OptionListWriter {
    pub fn new(header: Header) -> Self {
        Self { header }
    }

    pub fn render(&self, options: &[String]) -> String {
        let mut out = format!("{}\n", self.header);
        for option in options {
            out.push_str(option);
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
        options: &[String],
    ) -> srvconf_fs::Result<String> {
        let content = self.render(options);
        persist(fs, path, &content)?;
        Ok(content)
    }
}
