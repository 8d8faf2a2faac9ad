//! Batch materialization of artifacts into one server directory
//!
//! The materializer never logs by itself. It returns a [`MaterializeReport`]
//! the caller can inspect or pass to [`MaterializeReport::log`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Deserialize;
use srvconf_fs::{Filesystem, LocalFs, NormalizedPath};

use crate::artifact::ArtifactSpec;
use crate::resolver::{Resolution, ResolutionOutcome, SourceResolver};
use crate::writer::{DEFAULT_TOOL_NAME, Header};
use crate::{Error, Result};

/// What to do when one artifact fails with an I/O error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the run on the first failure.
    #[default]
    FailFast,
    /// Record the failure and carry on with the remaining artifacts.
    Continue,
}

/// Cooperative cancellation, observed only between artifacts.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Options for a materialization run
#[derive(Debug, Clone)]
pub struct MaterializeOptions {
    /// Name written into the header of generated files.
    pub tool_name: String,
    /// Resolve and report without touching the filesystem.
    pub dry_run: bool,
    pub failure_policy: FailurePolicy,
    pub cancel: Option<CancelToken>,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            tool_name: DEFAULT_TOOL_NAME.to_string(),
            dry_run: false,
            failure_policy: FailurePolicy::default(),
            cancel: None,
        }
    }
}

/// Outcome for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReport {
    /// File name of the artifact, e.g. `jvm.options`.
    pub artifact: String,
    pub resolution: Resolution,
}

/// A failed artifact recorded under [`FailurePolicy::Continue`].
#[derive(Debug)]
pub struct ArtifactFailure {
    pub artifact: String,
    pub error: Error,
}

/// Report from a materialization run
#[derive(Debug, Default)]
pub struct MaterializeReport {
    pub artifacts: Vec<ArtifactReport>,
    pub failures: Vec<ArtifactFailure>,
    /// The run stopped early because its [`CancelToken`] fired.
    pub cancelled: bool,
    pub dry_run: bool,
}

impl MaterializeReport {
    /// Whether every requested artifact was resolved.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }

    /// `(artifact, outcome)` pairs in processing order.
    pub fn outcomes(&self) -> Vec<(&str, &ResolutionOutcome)> {
        self.artifacts
            .iter()
            .map(|report| (report.artifact.as_str(), &report.resolution.outcome))
            .collect()
    }

    /// Look up the outcome for one artifact by file name.
    pub fn outcome(&self, artifact: &str) -> Option<&ResolutionOutcome> {
        self.artifacts
            .iter()
            .find(|report| report.artifact == artifact)
            .map(|report| &report.resolution.outcome)
    }

    /// Emit one `tracing` event per artifact.
    pub fn log(&self) {
        let prefix = if self.dry_run { "[dry-run] " } else { "" };
        for report in &self.artifacts {
            let resolution = &report.resolution;
            if let Some(source) = resolution.outcome.source_description() {
                tracing::info!(
                    target_file = %resolution.target,
                    checksum = resolution.checksum.as_deref().unwrap_or_default(),
                    "{}Updated server configuration file {} from {}",
                    prefix,
                    report.artifact,
                    source
                );
            } else {
                tracing::debug!("{}No source for {}, left untouched", prefix, report.artifact);
            }
            if let Some(shadowed) = &resolution.shadowed_external {
                tracing::warn!(
                    "Inline configuration for {} overrides existing file {}",
                    report.artifact,
                    shadowed.display()
                );
            }
        }
        for failure in &self.failures {
            tracing::error!("Failed to update {}: {}", failure.artifact, failure.error);
        }
        if self.cancelled {
            tracing::warn!("Materialization cancelled before all artifacts were processed");
        }
    }
}

/// Resolves a batch of artifacts into one target directory.
pub struct ConfigMaterializer<F: Filesystem = LocalFs> {
    fs: F,
    options: MaterializeOptions,
}

impl ConfigMaterializer<LocalFs> {
    /// Create a materializer writing to the local disk.
    pub fn new(options: MaterializeOptions) -> Self {
        Self::with_filesystem(LocalFs::new(), options)
    }
}

impl<F: Filesystem> ConfigMaterializer<F> {
    pub fn with_filesystem(fs: F, options: MaterializeOptions) -> Self {
        Self { fs, options }
    }

    pub fn options(&self) -> &MaterializeOptions {
        &self.options
    }

    /// Materialize `specs` into `target_dir`, creating it first if needed.
    ///
    /// Artifacts are processed in the order given. A missing filesystem
    /// capability aborts the run under any policy. Other failures abort under
    /// [`FailurePolicy::FailFast`] and are collected under
    /// [`FailurePolicy::Continue`]. Files written before an abort stay on disk.
    pub fn materialize(
        &self,
        target_dir: &NormalizedPath,
        specs: &[ArtifactSpec],
    ) -> Result<MaterializeReport> {
        let mut report = MaterializeReport {
            dry_run: self.options.dry_run,
            ..MaterializeReport::default()
        };

        if !self.options.dry_run {
            self.fs.create_dir_all(target_dir)?;
        }

        let resolver = SourceResolver::new(
            &self.fs,
            Header::new(self.options.tool_name.clone()),
            self.options.dry_run,
        );

        for spec in specs {
            if self.is_cancelled() {
                report.cancelled = true;
                break;
            }

            match resolver.resolve(target_dir, spec) {
                Ok(resolution) => report.artifacts.push(ArtifactReport {
                    artifact: spec.artifact.file_name().to_string(),
                    resolution,
                }),
                Err(error) if self.continues_after(&error) => {
                    report.failures.push(ArtifactFailure {
                        artifact: spec.artifact.file_name().to_string(),
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }

        Ok(report)
    }

    fn continues_after(&self, error: &Error) -> bool {
        !error.is_fatal() && self.options.failure_policy == FailurePolicy::Continue
    }

    fn is_cancelled(&self) -> bool {
        self.options
            .cancel
            .as_ref()
            .is_some_and(CancelToken::is_cancelled)
    }
}
