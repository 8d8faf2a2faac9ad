//! [`TestServer`] fixture for materialization scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use srvconf_fs::NormalizedPath;
use tempfile::TempDir;

/// Directory holding external source files inside the fixture.
pub const RESOURCES_DIR: &str = "src/test/resources";

/// Server configuration directory inside the fixture.
pub const SERVER_DIR: &str = "target/liberty/wlp/usr/servers/defaultServer";

/// A temporary project root with helpers for placing source files and
/// asserting on the materialized server directory.
///
/// The server directory is not created up front, so tests also cover
/// directory creation.
///
/// # Example
///
/// ```rust,no_run
/// use srvconf_test_utils::server::TestServer;
///
/// let server = TestServer::new();
/// let source = server.write_resource("server.env", "KEY=value\n");
/// server.assert_server_file_absent("server.env");
/// ```
pub struct TestServer {
    temp_dir: TempDir,
}

impl Default for TestServer {
    fn default() -> Self {
        Self::new()
    }
}

impl TestServer {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root of the temporary project.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Root of the temporary project as a [`NormalizedPath`].
    pub fn base_dir(&self) -> NormalizedPath {
        NormalizedPath::new(self.root())
    }

    /// The server configuration directory materialization targets.
    pub fn server_dir(&self) -> NormalizedPath {
        self.base_dir().join(SERVER_DIR)
    }

    /// Full path of `name` inside the resources directory.
    pub fn resource_path(&self, name: &str) -> PathBuf {
        self.root().join(RESOURCES_DIR).join(name)
    }

    /// Full path of `name` inside the server directory.
    pub fn server_file(&self, name: &str) -> PathBuf {
        self.server_dir().to_native().join(name)
    }

    /// Write an external source file and return its path.
    pub fn write_resource(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.resource_path(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// Place a file directly into the server directory, simulating a
    /// previous run or a hand-edited file.
    pub fn write_server_file(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.server_file(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a materialization config file at the project root.
    pub fn write_config(&self, name: &str, content: &str) -> NormalizedPath {
        let path = self.root().join(name);
        fs::write(&path, content).unwrap();
        NormalizedPath::new(path)
    }

    /// Read a materialized file as text.
    ///
    /// # Panics
    /// Panics with the path if the file cannot be read.
    pub fn read_server_file(&self, name: &str) -> String {
        let path = self.server_file(name);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Read a materialized file as raw bytes.
    pub fn read_server_bytes(&self, name: &str) -> Vec<u8> {
        let path = self.server_file(name);
        fs::read(&path).unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that `name` does **not** exist in the server directory.
    pub fn assert_server_file_absent(&self, name: &str) {
        let path = self.server_file(name);
        assert!(!path.exists(), "Expected file NOT to exist: {}", path.display());
    }

    /// Assert that the materialized `name` consists of exactly `lines`.
    pub fn assert_server_lines(&self, name: &str, lines: &[&str]) {
        let content = self.read_server_file(name);
        let actual: Vec<&str> = content.lines().collect();
        assert_eq!(
            actual,
            lines,
            "Unexpected content in {}",
            self.server_file(name).display()
        );
    }
}
