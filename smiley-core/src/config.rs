//! Client configuration handling.
//!
//! Configuration is read from `client.toml` in the platform config directory
//! (for example `~/.config/smiley/client.toml` on Linux). Every field has a
//! default, so a missing file or a partial file is fine. The camelCase option
//! names used by older smileycoin tooling (`rpcUser`, `startServer`, ...) are
//! accepted as aliases.

use crate::error::{Result, SmileyError};
use crate::secret::Secret;
use directories::ProjectDirs;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Name of the daemon executable, also used to find an already running daemon.
pub const DEFAULT_DAEMON_PROGRAM: &str = "smileycoind";

/// Suffix appended to the method name to form the JSON-RPC request id.
pub const DEFAULT_ID_SUFFIX: &str = "python_client";

pub const DEFAULT_RPC_HOST: &str = "localhost";

pub const DEFAULT_RPC_PORT: u16 = 14243;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Stop a daemon this client started when the client is dropped.
    ///
    /// When false, an owned daemon is left running after the client goes away.
    #[serde(alias = "shutDownAfterRun")]
    pub shutdown_after_run: bool,

    /// Launch the daemon on construction if it is not already running.
    #[serde(alias = "startServer")]
    pub start_server: bool,

    #[serde(alias = "rpcUser")]
    pub rpc_user: String,

    #[serde(alias = "rpcPassword")]
    pub rpc_password: Secret,

    #[serde(alias = "rpcHost")]
    pub rpc_host: String,

    /// Accepts a number or a numeric string.
    #[serde(alias = "rpcPort", deserialize_with = "deserialize_port")]
    pub rpc_port: u16,

    /// Executable launched by the supervisor.
    pub daemon_program: String,

    /// Arguments passed to the daemon executable.
    pub daemon_args: Vec<String>,

    pub id_suffix: String,

    /// Request timeout in milliseconds. Unset means the HTTP client default.
    pub timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            shutdown_after_run: true,
            start_server: false,
            rpc_user: String::new(),
            rpc_password: Secret::default(),
            rpc_host: DEFAULT_RPC_HOST.to_string(),
            rpc_port: DEFAULT_RPC_PORT,
            daemon_program: DEFAULT_DAEMON_PROGRAM.to_string(),
            daemon_args: Vec::new(),
            id_suffix: DEFAULT_ID_SUFFIX.to_string(),
            timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration with the given credentials and defaults elsewhere.
    pub fn new(user: impl Into<String>, password: impl Into<Secret>, port: u16) -> Self {
        Self {
            rpc_user: user.into(),
            rpc_password: password.into(),
            rpc_port: port,
            ..Self::default()
        }
    }

    pub fn with_start_server(mut self, start: bool) -> Self {
        self.start_server = start;
        self
    }

    pub fn with_shutdown_after_run(mut self, shutdown: bool) -> Self {
        self.shutdown_after_run = shutdown;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.rpc_host = host.into();
        self
    }

    /// Set the daemon executable and its arguments.
    pub fn with_daemon(mut self, program: impl Into<String>, args: Vec<String>) -> Self {
        self.daemon_program = program.into();
        self.daemon_args = args;
        self
    }

    pub fn with_id_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.id_suffix = suffix.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// The request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// The URL every request is posted to.
    pub fn endpoint(&self) -> Result<Url> {
        let raw = format!("http://{}:{}/", self.rpc_host, self.rpc_port);
        Url::parse(&raw)
            .map_err(|e| SmileyError::Config(format!("invalid RPC endpoint {}: {}", raw, e)))
    }

    /// Load configuration from the default location, or defaults if absent.
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file, or defaults if the file is missing.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            SmileyError::Config(format!("failed to read config from {:?}: {}", path, e))
        })?;
        let config = toml::from_str(&contents).map_err(|e| {
            SmileyError::Config(format!("failed to parse config from {:?}: {}", path, e))
        })?;

        debug!("loaded config from {:?}", path);
        Ok(config)
    }
}

fn deserialize_port<'de, D>(deserializer: D) -> std::result::Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid port {:?}", text))),
    }
}

/// Get the default config file path.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "smileycoin", "smiley").map(|d| d.config_dir().join("client.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert!(config.shutdown_after_run);
        assert!(!config.start_server);
        assert_eq!(config.daemon_program, "smileycoind");
        assert_eq!(config.id_suffix, "python_client");
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_endpoint_uses_localhost_and_port() {
        let config = ClientConfig::new("u", "p", 14243);
        assert_eq!(config.endpoint().unwrap().as_str(), "http://localhost:14243/");
    }

    #[test]
    fn test_endpoint_rejects_bad_host() {
        let config = ClientConfig::default().with_host("bad host");
        assert!(matches!(config.endpoint(), Err(SmileyError::Config(_))));
    }

    #[test]
    fn test_sub_second_timeout_is_kept() {
        let config = ClientConfig::default().with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load_from_path(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.rpc_port, DEFAULT_RPC_PORT);
    }

    #[test]
    fn test_load_accepts_camel_case_aliases() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
shutDownAfterRun = false
startServer = true
rpcUser = "smileyrpc"
rpcPassword = "secret"
rpcPort = "14243"
timeout_ms = 30000
"#
        )
        .unwrap();

        let config = ClientConfig::load_from_path(file.path()).unwrap();
        assert!(!config.shutdown_after_run);
        assert!(config.start_server);
        assert_eq!(config.rpc_user, "smileyrpc");
        assert_eq!(config.rpc_password.expose(), "secret");
        assert_eq!(config.rpc_port, 14243);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.rpc_host, "localhost");
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rpc_port = \"not a number\"").unwrap();

        let result = ClientConfig::load_from_path(file.path());
        assert!(matches!(result, Err(SmileyError::Config(_))));
    }
}
