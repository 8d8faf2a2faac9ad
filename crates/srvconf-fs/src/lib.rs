//! Filesystem abstraction for srvconf
//!
//! Provides forward-slash path handling, atomic I/O, and the small
//! [`Filesystem`] interface the materializer writes through.

pub mod checksum;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use filesystem::{Capability, Filesystem, LocalFs};
pub use io::RobustnessConfig;
pub use path::NormalizedPath;
