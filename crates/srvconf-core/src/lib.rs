//! Server configuration materialization.
//!
//! Given inline properties, inline JVM options and optional external source
//! files, this crate decides which source wins for each configuration
//! artifact and produces the resulting files in a server directory.
//!
//! # Architecture
//!
//! - [`normalize`] canonicalizes property values before they are written.
//! - [`writer`] renders property and option-list files behind a common header.
//! - [`resolver`] applies the inline > external > skip precedence per artifact.
//! - [`materializer`] runs the resolver over a batch and collects a report.
//!
//! All filesystem mutation goes through [`srvconf_fs::Filesystem`].

pub mod artifact;
pub mod config;
pub mod error;
pub mod logging;
pub mod materializer;
pub mod normalize;
pub mod resolver;
pub mod writer;

pub use artifact::{Artifact, ArtifactKind, ArtifactSpec, InlineSource};
pub use config::MaterializeConfig;
pub use error::{Error, Result};
pub use materializer::{
    ArtifactFailure, ArtifactReport, CancelToken, ConfigMaterializer, FailurePolicy,
    MaterializeOptions, MaterializeReport,
};
pub use normalize::normalize_value;
pub use resolver::{Resolution, ResolutionOutcome, SourceResolver};
pub use writer::{Header, OptionListWriter, PropertyFileWriter};
