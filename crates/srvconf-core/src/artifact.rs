//! Configuration artifacts and the sources that can produce them

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use srvconf_fs::NormalizedPath;

/// The configuration files a server directory is materialized with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// `server.xml`, the server descriptor (copied only)
    ServerConfig,
    /// `jvm.options`
    JvmOptions,
    /// `bootstrap.properties`
    BootstrapProperties,
    /// `server.env`, the server environment (copied only)
    ServerEnv,
}

impl ArtifactKind {
    /// All built-in artifacts in the order they are materialized.
    pub const ALL: [Self; 4] = [
        Self::ServerConfig,
        Self::JvmOptions,
        Self::BootstrapProperties,
        Self::ServerEnv,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::ServerConfig => "server.xml",
            Self::JvmOptions => "jvm.options",
            Self::BootstrapProperties => "bootstrap.properties",
            Self::ServerEnv => "server.env",
        }
    }

    /// Human-readable name used in reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ServerConfig => "server descriptor",
            Self::JvmOptions => "jvm options",
            Self::BootstrapProperties => "bootstrap properties",
            Self::ServerEnv => "server environment",
        }
    }

    pub fn accepts_inline(&self) -> bool {
        matches!(self, Self::JvmOptions | Self::BootstrapProperties)
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// A named output file inside the target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    name: String,
    file_name: String,
    accepts_inline: bool,
}

impl Artifact {
    /// An artifact that can be written from inline data or copied.
    pub fn new(name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            accepts_inline: true,
        }
    }

    /// An artifact that can only be copied from an external file.
    pub fn copy_only(name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            accepts_inline: false,
            ..Self::new(name, file_name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn accepts_inline(&self) -> bool {
        self.accepts_inline
    }

    /// Where this artifact lands inside `target_dir`.
    pub fn target(&self, target_dir: &NormalizedPath) -> NormalizedPath {
        target_dir.join(&self.file_name)
    }
}

impl From<ArtifactKind> for Artifact {
    fn from(kind: ArtifactKind) -> Self {
        Self {
            name: kind.display_name().to_string(),
            file_name: kind.file_name().to_string(),
            accepts_inline: kind.accepts_inline(),
        }
    }
}

/// Configuration supplied directly by the caller rather than read from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSource {
    Properties(IndexMap<String, String>),
    Options(Vec<String>),
}

/// One artifact together with its candidate sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
    pub artifact: Artifact,
    pub inline: Option<InlineSource>,
    /// Source file, kept in the caller's native form.
    pub external: Option<PathBuf>,
}

impl ArtifactSpec {
    pub fn new(artifact: impl Into<Artifact>) -> Self {
        Self {
            artifact: artifact.into(),
            inline: None,
            external: None,
        }
    }

    /// Use an inline property map. An empty map still counts as present.
    pub fn with_properties<K, V>(mut self, properties: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.inline = Some(InlineSource::Properties(
            properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ));
        self
    }

    /// Use an inline option list. An empty list still counts as present.
    pub fn with_options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.inline = Some(InlineSource::Options(
            options.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn with_inline(mut self, inline: Option<InlineSource>) -> Self {
        self.inline = inline;
        self
    }

    pub fn with_external(mut self, path: impl AsRef<Path>) -> Self {
        self.external = Some(path.as_ref().to_path_buf());
        self
    }
}
