//! # smiley-core
//!
//! Shared building blocks for the smileycoin RPC client:
//! - [`ClientConfig`] - connection and daemon-lifecycle settings, loadable from TOML
//! - [`SmileyError`] - the error type every crate returns
//! - [`Params`] - positional JSON-RPC parameter lists with optional trailing slots
//! - [`model`] - typed arguments and results for the daemon's methods
//! - [`Secret`] - redacting wrapper for the RPC password

pub mod config;
pub mod error;
pub mod model;
pub mod params;
pub mod secret;

pub use config::{ClientConfig, default_config_path};
pub use error::{Result, SmileyError};
pub use params::Params;
pub use secret::Secret;
