//! Source precedence for a single artifact
//!
//! Inline data wins outright, then an existing external file, otherwise the
//! artifact is skipped and its target is left alone.

use std::path::{Path, PathBuf};

use srvconf_fs::checksum::compute_checksum;
use srvconf_fs::{Filesystem, NormalizedPath, path};

use crate::artifact::{ArtifactSpec, InlineSource};
use crate::writer::{Header, OptionListWriter, PropertyFileWriter};
use crate::{Error, Result};

/// Which source produced an artifact, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    WrittenFromInline,
    CopiedFromExternal { source: PathBuf },
    Skipped,
}

impl ResolutionOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    /// Describe where the content came from, or `None` when skipped.
    pub fn source_description(&self) -> Option<String> {
        match self {
            Self::WrittenFromInline => Some("inlined configuration".to_string()),
            Self::CopiedFromExternal { source } => Some(source.display().to_string()),
            Self::Skipped => None,
        }
    }
}

/// The result of resolving one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: ResolutionOutcome,
    /// Path of the artifact inside the target directory.
    pub target: NormalizedPath,
    /// `sha256:<hex>` of the bytes written or copied, read once from the source.
    pub checksum: Option<String>,
    /// An existing external file that was ignored because inline data won.
    pub shadowed_external: Option<PathBuf>,
}

/// Applies source precedence to one artifact at a time.
pub struct SourceResolver<'a> {
    fs: &'a dyn Filesystem,
    properties: PropertyFileWriter,
    options: OptionListWriter,
    dry_run: bool,
}

impl<'a> SourceResolver<'a> {
    /// Create a resolver writing through `fs`.
    ///
    /// With `dry_run` set, outcomes and checksums are computed but nothing
    /// is written, copied or created.
    pub fn new(fs: &'a dyn Filesystem, header: Header, dry_run: bool) -> Self {
        Self {
            fs,
            properties: PropertyFileWriter::new(header.clone()),
            options: OptionListWriter::new(header),
            dry_run,
        }
    }

    /// Resolve `spec` into `target_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InlineNotSupported`] for inline data on a copy-only
    /// artifact and [`Error::Artifact`] when a write or copy fails.
    pub fn resolve(&self, target_dir: &NormalizedPath, spec: &ArtifactSpec) -> Result<Resolution> {
        let artifact = &spec.artifact;
        let target = artifact.target(target_dir);
        let failed = |source: srvconf_fs::Error| Error::Artifact {
            artifact: artifact.file_name().to_string(),
            source,
        };

        if let Some(inline) = &spec.inline {
            if !artifact.accepts_inline() {
                return Err(Error::InlineNotSupported {
                    artifact: artifact.file_name().to_string(),
                });
            }

            let content = match (inline, self.dry_run) {
                (InlineSource::Properties(map), false) => {
                    self.properties.write(self.fs, &target, map).map_err(failed)?
                }
                (InlineSource::Properties(map), true) => self.properties.render(map),
                (InlineSource::Options(list), false) => {
                    self.options.write(self.fs, &target, list).map_err(failed)?
                }
                (InlineSource::Options(list), true) => self.options.render(list),
            };

            return Ok(Resolution {
                outcome: ResolutionOutcome::WrittenFromInline,
                checksum: Some(compute_checksum(content.as_bytes())),
                shadowed_external: self.existing_external(spec).map(Path::to_path_buf),
                target,
            });
        }

        if let Some(source) = self.existing_external(spec) {
            let bytes = if self.dry_run {
                self.fs.read(source).map_err(failed)?
            } else {
                if let Some(parent) = target.parent() {
                    self.fs.create_dir_all(&parent).map_err(failed)?;
                }
                self.fs.copy(source, &target).map_err(failed)?
            };

            return Ok(Resolution {
                outcome: ResolutionOutcome::CopiedFromExternal {
                    source: path::canonical(source),
                },
                checksum: Some(compute_checksum(&bytes)),
                shadowed_external: None,
                target,
            });
        }

        Ok(Resolution {
            outcome: ResolutionOutcome::Skipped,
            target,
            checksum: None,
            shadowed_external: None,
        })
    }

    /// The external path, only when it names an existing regular file.
    fn existing_external<'s>(&self, spec: &'s ArtifactSpec) -> Option<&'s Path> {
        spec.external.as_deref().filter(|source| self.fs.is_file(source))
    }
}
