//! Shared test utilities for the srvconf workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`server`]: [`server::TestServer`] fixture with a resources directory
//!   and a server directory side by side

pub mod server;
