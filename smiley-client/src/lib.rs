//! smiley-client
//!
//! A Rust client for the JSON-RPC interface of `smileycoind`, the smileycoin
//! node daemon, with optional management of a local daemon process.
//!
//! # Overview
//!
//! - **Transport**: every call is a JSON-RPC 1.0 request posted over HTTP
//!   with basic authentication; the `result` of the response is returned and
//!   a daemon-reported `error` becomes [`SmileyError::Daemon`].
//! - **Typed methods**: each daemon method is an async method on
//!   [`SmileyClient`] with typed arguments. Optional trailing arguments are
//!   `Option`s and are left off the wire when unset.
//! - **Daemon supervision**: with `start_server` set, constructing the client
//!   launches `smileycoind` unless one is already running. Only a daemon the
//!   client launched itself is ever stopped.
//!
//! # Quick Start
//!
//! ```no_run
//! use smiley_client::SmileyClient;
//!
//! #[tokio::main]
//! async fn main() -> smiley_client::Result<()> {
//!     let client = SmileyClient::builder()
//!         .credentials("smileyrpc", "secret")
//!         .port(14243)
//!         .start_server(true)
//!         .build()?;
//!
//!     let info = client.get_info().await?;
//!     println!("{}", info);
//!
//!     // Methods without a typed wrapper are still reachable.
//!     let raw = client.call("getblockcount", vec![]).await?;
//!     println!("{}", raw);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! [`ClientConfig`] can be loaded from `client.toml` in the platform config
//! directory:
//!
//! ```toml
//! rpc_user = "smileyrpc"
//! rpc_password = "secret"
//! rpc_port = 14243
//! start_server = true
//! shutdown_after_run = true
//! ```

mod client;
mod rpc;
pub mod supervisor;
pub mod transport;

pub use client::{SmileyClient, SmileyClientBuilder};
pub use supervisor::{DaemonProcess, DaemonSupervisor, ProcessHost, SystemHost};
pub use transport::RpcTransport;

pub use smiley_core::model;
pub use smiley_core::{ClientConfig, Params, Result, Secret, SmileyError};
