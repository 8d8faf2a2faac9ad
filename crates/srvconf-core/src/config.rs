//! Declarative materialization config
//!
//! A config file names the server directory and, per artifact, an inline
//! value and/or an external file:
//!
//! ```toml
//! tool_name = "liberty-maven-plugin"
//! server_dir = "target/liberty/wlp/usr/servers/defaultServer"
//! resources_dir = "src/test/resources"
//!
//! [jvm_options]
//! inline = ["-Xmx512m", "-Xms256m"]
//!
//! [bootstrap_properties]
//! file = "config/bootstrap.properties"
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use srvconf_fs::{ConfigStore, NormalizedPath};

use crate::artifact::{ArtifactKind, ArtifactSpec, InlineSource};
use crate::materializer::{FailurePolicy, MaterializeOptions};
use crate::writer::DEFAULT_TOOL_NAME;
use crate::{Error, Result};

/// Source settings for an artifact that is only ever copied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CopySource {
    pub file: Option<PathBuf>,
}

/// Source settings for `jvm.options`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsSource {
    pub inline: Option<Vec<String>>,
    pub file: Option<PathBuf>,
}

/// Source settings for `bootstrap.properties`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PropertiesSource {
    pub inline: Option<IndexMap<String, String>>,
    pub file: Option<PathBuf>,
}

/// Everything one materialization run needs, as read from a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaterializeConfig {
    pub tool_name: Option<String>,
    /// The server configuration directory all artifacts land in.
    pub server_dir: Option<PathBuf>,
    /// Fallback location for external files: `<resources_dir>/<file name>`.
    pub resources_dir: Option<PathBuf>,
    pub dry_run: bool,
    pub failure_policy: FailurePolicy,
    pub server_config: CopySource,
    pub jvm_options: OptionsSource,
    pub bootstrap_properties: PropertiesSource,
    pub server_env: CopySource,
}

impl MaterializeConfig {
    /// Load from a TOML, JSON or YAML file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }

    /// Run options derived from this config.
    pub fn options(&self) -> MaterializeOptions {
        MaterializeOptions {
            tool_name: self
                .tool_name
                .clone()
                .unwrap_or_else(|| DEFAULT_TOOL_NAME.to_string()),
            dry_run: self.dry_run,
            failure_policy: self.failure_policy,
            cancel: None,
        }
    }

    /// The server directory, resolved against `base_dir`.
    pub fn target_dir(&self, base_dir: &NormalizedPath) -> Result<NormalizedPath> {
        self.server_dir
            .as_deref()
            .map(|dir| NormalizedPath::new(resolve_path(base_dir, dir)))
            .ok_or_else(|| Error::InvalidConfig {
                message: "server_dir is required".to_string(),
            })
    }

    /// Specs for the four built-in artifacts, in materialization order.
    ///
    /// Relative paths resolve against `base_dir`.
    pub fn specs(&self, base_dir: &NormalizedPath) -> Vec<ArtifactSpec> {
        ArtifactKind::ALL
            .into_iter()
            .map(|kind| {
                let (inline, file) = match kind {
                    ArtifactKind::ServerConfig => (None, self.server_config.file.as_deref()),
                    ArtifactKind::JvmOptions => (
                        self.jvm_options.inline.clone().map(InlineSource::Options),
                        self.jvm_options.file.as_deref(),
                    ),
                    ArtifactKind::BootstrapProperties => (
                        self.bootstrap_properties
                            .inline
                            .clone()
                            .map(InlineSource::Properties),
                        self.bootstrap_properties.file.as_deref(),
                    ),
                    ArtifactKind::ServerEnv => (None, self.server_env.file.as_deref()),
                };

                let external = file.map(|f| resolve_path(base_dir, f)).or_else(|| {
                    self.resources_dir
                        .as_deref()
                        .map(|dir| resolve_path(base_dir, dir).join(kind.file_name()))
                });

                ArtifactSpec {
                    external,
                    ..ArtifactSpec::new(kind).with_inline(inline)
                }
            })
            .collect()
    }
}

fn resolve_path(base_dir: &NormalizedPath, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.to_native().join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> NormalizedPath {
        NormalizedPath::new("/work/app")
    }

    #[test]
    fn defaults_use_default_tool_name_and_fail_fast() {
        let options = MaterializeConfig::default().options();
        assert_eq!(options.tool_name, "srvconf");
        assert_eq!(options.failure_policy, FailurePolicy::FailFast);
        assert!(!options.dry_run);
    }

    #[test]
    fn missing_server_dir_is_invalid() {
        let err = MaterializeConfig::default().target_dir(&base()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn relative_server_dir_resolves_against_base() {
        let config = MaterializeConfig {
            server_dir: Some(PathBuf::from("target/servers/defaultServer")),
            ..MaterializeConfig::default()
        };
        assert_eq!(
            config.target_dir(&base()).unwrap().as_str(),
            "/work/app/target/servers/defaultServer"
        );
    }

    #[test]
    fn resources_dir_supplies_default_external_files() {
        let config = MaterializeConfig {
            resources_dir: Some(PathBuf::from("src/test/resources")),
            server_env: CopySource {
                file: Some(PathBuf::from("env/custom.env")),
            },
            ..MaterializeConfig::default()
        };

        let externals: Vec<_> = config
            .specs(&base())
            .into_iter()
            .map(|spec| spec.external)
            .collect();

        assert_eq!(
            externals,
            vec![
                Some(PathBuf::from("/work/app/src/test/resources/server.xml")),
                Some(PathBuf::from("/work/app/src/test/resources/jvm.options")),
                Some(PathBuf::from("/work/app/src/test/resources/bootstrap.properties")),
                Some(PathBuf::from("/work/app/env/custom.env")),
            ]
        );
    }

    #[test]
    fn inline_values_map_to_matching_artifacts() {
        let config = MaterializeConfig {
            jvm_options: OptionsSource {
                inline: Some(vec!["-Xmx512m".into()]),
                file: None,
            },
            ..MaterializeConfig::default()
        };

        let specs = config.specs(&base());
        assert_eq!(specs.len(), 4);
        assert_eq!(
            specs[1].inline,
            Some(InlineSource::Options(vec!["-Xmx512m".into()]))
        );
        assert!(specs[0].inline.is_none());
        assert!(specs[2].inline.is_none());
        assert!(specs.iter().all(|spec| spec.external.is_none()));
    }
}
