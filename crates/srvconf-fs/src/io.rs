//! Atomic I/O operations with file locking

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use backoff::ExponentialBackoff;
use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Tuning knobs for [`write_atomic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobustnessConfig {
    /// How long to keep retrying a contended lock or a refused rename.
    pub lock_timeout: Duration,
    /// Flush the temp file to disk before it replaces the target.
    pub enable_fsync: bool,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(10),
            enable_fsync: true,
        }
    }
}

impl RobustnessConfig {
    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: Duration::from_millis(10),
            max_interval: Duration::from_millis(250),
            max_elapsed_time: Some(self.lock_timeout),
            ..ExponentialBackoff::default()
        }
    }
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Write content atomically to a file with locking.
///
/// Parent directories are created as needed. Content goes to a temp file in
/// the same directory, which is then renamed over the target, so readers see
/// either the old file or the new one. Writers serialize on a hidden
/// `.<name>.lock` sidecar. The sidecar is removed afterwards only if this
/// call created it, so a pre-existing file of that name is left intact.
pub fn write_atomic(
    path: &NormalizedPath,
    content: &[u8],
    config: RobustnessConfig,
) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let lock_path = lock_path(&native_path);
    let (lock_file, created) = open_lock(&lock_path)?;

    let result = acquire_lock(&lock_file, &native_path, config)
        .and_then(|()| replace_via_temp(&native_path, content, config));

    let _ = FileExt::unlock(&lock_file);
    drop(lock_file);
    if created {
        let _ = fs::remove_file(&lock_path);
    }

    result
}

/// Open the lock sidecar, reporting whether this call created it.
fn open_lock(lock_path: &Path) -> Result<(File, bool)> {
    match OpenOptions::new().write(true).create_new(true).open(lock_path) {
        Ok(file) => Ok((file, true)),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => OpenOptions::new()
            .write(true)
            .open(lock_path)
            .map(|file| (file, false))
            .map_err(|e| Error::io(lock_path, e)),
        Err(e) => Err(Error::io(lock_path, e)),
    }
}

fn acquire_lock(lock_file: &File, target: &Path, config: RobustnessConfig) -> Result<()> {
    backoff::retry(config.backoff(), || {
        lock_file.try_lock_exclusive().map_err(|e| {
            tracing::debug!(path = %target.display(), error = %e, "Lock contended, retrying");
            backoff::Error::transient(e)
        })
    })
    .map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })
}

fn replace_via_temp(target: &Path, content: &[u8], config: RobustnessConfig) -> Result<()> {
    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.{}.tmp",
        target
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    );
    let temp_path = target.with_file_name(&temp_name);

    let result = write_temp(&temp_path, content, config)
        .and_then(|()| rename_with_retry(&temp_path, target, config));
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp(temp_path: &Path, content: &[u8], config: RobustnessConfig) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    if config.enable_fsync {
        temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;
    }

    Ok(())
}

fn rename_with_retry(from: &Path, to: &Path, config: RobustnessConfig) -> Result<()> {
    backoff::retry(config.backoff(), || {
        fs::rename(from, to).map_err(|e| {
            // Windows refuses to replace a file another handle still has open
            if e.kind() == std::io::ErrorKind::PermissionDenied && cfg!(windows) {
                tracing::debug!(path = %to.display(), "Rename refused, retrying");
                backoff::Error::transient(e)
            } else {
                backoff::Error::permanent(e)
            }
        })
    })
    .map_err(|e| {
        let source = match e {
            backoff::Error::Permanent(err) => err,
            backoff::Error::Transient { err, .. } => err,
        };
        Error::io(to, source)
    })
}

fn lock_path(target: &Path) -> PathBuf {
    let mut name = std::ffi::OsString::from(".");
    if let Some(file_name) = target.file_name() {
        name.push(file_name);
    }
    name.push(".lock");
    target.with_file_name(name)
}

/// Read raw bytes from a file.
pub fn read_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| Error::io(path, e))
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically with default robustness settings.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes(), RobustnessConfig::default())
}

/// Copy a file's bytes verbatim over `to`, creating parents as needed.
///
/// The source is read once and the returned bytes are exactly what landed
/// at `to`. The destination is replaced atomically, so a failed copy leaves
/// the previous destination contents in place.
pub fn copy_atomic(
    from: impl AsRef<Path>,
    to: &NormalizedPath,
    config: RobustnessConfig,
) -> Result<Vec<u8>> {
    let bytes = read_bytes(from)?;
    write_atomic(to, &bytes, config)?;
    Ok(bytes)
}
