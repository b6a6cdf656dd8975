//! Building a daemon client from the config file and command-line overrides.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use smiley_client::SmileyClient;
use smiley_core::ClientConfig;
use std::path::PathBuf;
use tracing::debug;

/// Connection options shared by every command.
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Path to the client config file
    #[arg(long, env = "SMILEY_CONFIG")]
    pub config: Option<PathBuf>,

    /// RPC user name
    #[arg(long, env = "SMILEY_RPC_USER")]
    pub rpc_user: Option<String>,

    /// RPC password
    #[arg(long, env = "SMILEY_RPC_PASSWORD", hide_env_values = true)]
    pub rpc_password: Option<String>,

    /// Host the daemon listens on
    #[arg(long, env = "SMILEY_RPC_HOST")]
    pub rpc_host: Option<String>,

    /// Port the daemon listens on
    #[arg(long, env = "SMILEY_RPC_PORT")]
    pub rpc_port: Option<u16>,

    /// Launch smileycoind if it is not already running
    #[arg(long)]
    pub start_server: bool,

    /// Leave a daemon launched by this command running afterwards
    #[arg(long)]
    pub keep_running: bool,
}

/// Load the config file and apply command-line overrides on top.
pub fn load_config(args: &ConnectionArgs) -> Result<ClientConfig> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => ClientConfig::load().context("Failed to load default config")?,
    };

    if let Some(user) = &args.rpc_user {
        config.rpc_user = user.clone();
    }
    if let Some(password) = &args.rpc_password {
        config.rpc_password = password.as_str().into();
    }
    if let Some(host) = &args.rpc_host {
        config.rpc_host = host.clone();
    }
    if let Some(port) = args.rpc_port {
        config.rpc_port = port;
    }
    if args.start_server {
        config.start_server = true;
    }
    if args.keep_running {
        config.shutdown_after_run = false;
    }

    debug!("connecting to {}:{}", config.rpc_host, config.rpc_port);
    Ok(config)
}

/// Create the client, launching the daemon if configured to.
pub fn connect(args: &ConnectionArgs) -> Result<SmileyClient> {
    let config = load_config(args)?;
    SmileyClient::new(config).context("Failed to create daemon client")
}

/// Parse a command-line parameter the way the daemon's own CLI does:
/// valid JSON is sent as-is, anything else as a string.
pub fn parse_param(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn args_with_config(path: PathBuf) -> ConnectionArgs {
        ConnectionArgs {
            config: Some(path),
            rpc_user: None,
            rpc_password: None,
            rpc_host: None,
            rpc_port: None,
            start_server: false,
            keep_running: false,
        }
    }

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param("42"), json!(42));
        assert_eq!(parse_param("true"), json!(true));
        assert_eq!(parse_param("[\"a\",1]"), json!(["a", 1]));
        assert_eq!(parse_param("Bx1abc"), json!("Bx1abc"));
        assert_eq!(parse_param("\"quoted\""), json!("quoted"));
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rpc_user = \"from-file\"\nrpc_port = 1000").unwrap();

        let mut args = args_with_config(file.path().to_path_buf());
        args.rpc_port = Some(2000);
        args.start_server = true;
        args.keep_running = true;

        let config = load_config(&args).unwrap();
        assert_eq!(config.rpc_user, "from-file");
        assert_eq!(config.rpc_port, 2000);
        assert!(config.start_server);
        assert!(!config.shutdown_after_run);
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&args_with_config(dir.path().join("absent.toml"))).unwrap();
        assert!(!config.start_server);
        assert!(config.shutdown_after_run);
    }
}
