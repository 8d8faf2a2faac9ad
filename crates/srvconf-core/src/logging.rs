use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize a tracing subscriber for callers that want materialization
/// reports printed.
///
/// Uses the `RUST_LOG` environment variable to pick the level, defaulting
/// to "info" if it is not set.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArtifactKind, ArtifactSpec, ConfigMaterializer, MaterializeOptions};
    use srvconf_fs::NormalizedPath;

    #[test]
    fn test_logging_init_and_report() {
        // Only one subscriber per process, so a second init may fail
        let _ = init();

        let temp = tempfile::tempdir().unwrap();
        let specs = [
            ArtifactSpec::new(ArtifactKind::JvmOptions).with_options(["-Xmx512m"]),
            ArtifactSpec::new(ArtifactKind::ServerEnv),
        ];
        let report = ConfigMaterializer::new(MaterializeOptions::default())
            .materialize(&NormalizedPath::new(temp.path()), &specs)
            .unwrap();

        report.log();
    }
}
